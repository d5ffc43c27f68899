use std::sync::Arc;

use revgraph_api::Row;

use super::{
    RowAnchors, SurfaceBackend, SurfaceCapabilities, SurfaceOutput, SurfaceRegistry,
    SurfaceSummary,
};
use crate::{Error, GraphRenderer, RenderConfig, RenderSummary, Result};

/// Result of rendering through a named backend.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Counts for the pass.
    pub summary: RenderSummary,
    /// Encoded surface content.
    pub output: SurfaceOutput,
}

/// High-level façade for rendering rows with a registered backend.
#[derive(Clone)]
pub struct RenderService {
    registry: Arc<SurfaceRegistry>,
    config: RenderConfig,
}

impl RenderService {
    /// Create a render service backed by the provided registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `config` fails validation.
    pub fn new(registry: SurfaceRegistry, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: Arc::new(registry),
            config,
        })
    }

    /// Configuration handed to every renderer.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// List summaries for all registered backends.
    #[must_use]
    pub fn summaries(&self) -> Vec<SurfaceSummary> {
        self.registry.summaries()
    }

    /// Fetch capabilities for a backend, if registered.
    #[must_use]
    pub fn capabilities(&self, backend_id: &str) -> Option<SurfaceCapabilities> {
        self.registry.capabilities(backend_id)
    }

    /// Render `rows` onto a fresh surface from `backend_id`.
    ///
    /// A new renderer and surface are created per call, so concurrent calls on
    /// a shared service never see each other's state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendNotRegistered`] when the id is unknown and
    /// propagates renderer and surface failures.
    pub fn render(
        &self,
        backend_id: &str,
        rows: &[Row],
        anchors: &mut dyn RowAnchors,
    ) -> Result<RenderOutput> {
        let backend = self.backend(backend_id)?;
        let mut surface = backend.create();
        let mut renderer = GraphRenderer::new(self.config.clone())?;

        let summary = renderer.render(rows, anchors, surface.as_mut())?;
        let output = surface.finish()?;
        log::debug!(
            "{} backend produced {} bytes of {}",
            backend.id(),
            output.bytes.len(),
            output.media_type
        );
        Ok(RenderOutput { summary, output })
    }

    fn backend(&self, backend_id: &str) -> Result<Arc<dyn SurfaceBackend>> {
        self.registry
            .get(backend_id)
            .ok_or_else(|| Error::BackendNotRegistered {
                backend: backend_id.to_string(),
            })
    }
}

impl std::fmt::Debug for RenderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderService")
            .field("backends", &self.registry.ids())
            .field("config", &self.config)
            .finish()
    }
}
