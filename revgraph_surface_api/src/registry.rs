//! Registry of the surface backends available to the renderer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{SurfaceBackend, SurfaceCapabilities, SurfaceSummary};

/// In-memory registry for surface backends.
#[derive(Default)]
pub struct SurfaceRegistry {
    backends: HashMap<&'static str, Arc<dyn SurfaceBackend>>,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend keyed by its `SurfaceBackend::id`.
    pub fn register<B>(&mut self, backend: B)
    where
        B: SurfaceBackend + 'static,
    {
        self.register_arc(Arc::new(backend));
    }

    /// Register an already shared backend.
    pub fn register_arc(&mut self, backend: Arc<dyn SurfaceBackend>) {
        self.backends.insert(backend.id(), backend);
    }

    /// Retrieve a backend by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn SurfaceBackend>> {
        self.backends.get(id).map(Arc::clone)
    }

    /// Returns the registered backend identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.backends.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Capabilities for a backend, if registered.
    #[must_use]
    pub fn capabilities(&self, id: &str) -> Option<SurfaceCapabilities> {
        self.backends.get(id).map(|backend| backend.capabilities())
    }

    /// Summaries for every registered backend, sorted by id.
    #[must_use]
    pub fn summaries(&self) -> Vec<SurfaceSummary> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.backends.get(id))
            .map(|backend| SurfaceSummary {
                id: backend.id().to_owned(),
                label: backend.label().to_owned(),
                capabilities: backend.capabilities(),
            })
            .collect()
    }
}

impl std::fmt::Debug for SurfaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceRegistry")
            .field("backends", &self.ids())
            .finish()
    }
}
