use serde::{Deserialize, Serialize};

/// Shape drawn at a vertex to indicate the status of its revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// Filled circle.
    #[default]
    Normal,
    /// Short horizontal dash marking a closed branch head.
    Closing,
    /// Three-line asterisk marking an unstable revision.
    Unstable,
    /// Crossed lines marking an obsolete revision.
    Obsolete,
}

impl Glyph {
    /// Select a glyph from the last character of a graph node code.
    ///
    /// `_` closes, `*` is unstable, `x` is obsolete; anything else, including
    /// an empty code, is a normal vertex.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.chars().last() {
            Some('_') => Self::Closing,
            Some('*') => Self::Unstable,
            Some('x') => Self::Obsolete,
            _ => Self::Normal,
        }
    }
}
