use serde::{Deserialize, Serialize};

/// Color as referenced by row payloads: a palette slot or a literal hex value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorRef {
    /// Index into the renderer palette. Wraps modulo the palette length.
    Index(i64),
    /// Literal `#rgb` or `#rrggbb` color, used verbatim.
    Hex(String),
}

impl ColorRef {
    /// Resolve the reference against `palette`.
    ///
    /// Returns `None` for negative indices and malformed hex strings.
    #[must_use]
    pub fn resolve<'a>(&'a self, palette: &'a Palette) -> Option<&'a str> {
        match self {
            Self::Index(index) => usize::try_from(*index).ok().map(|index| palette.get(index)),
            Self::Hex(hex) => Rgb::parse_hex(hex).map(|_| hex.as_str()),
        }
    }
}

impl From<usize> for ColorRef {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ColorRef {
    fn from(hex: &str) -> Self {
        Self::Hex(hex.to_owned())
    }
}

/// 8-bit RGB triple parsed from a hex color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    #[must_use]
    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| {
                    let nibble = c.to_digit(16).unwrap_or(0) as u8;
                    nibble * 17
                });
                Some(Self::new(channels.next()?, channels.next()?, channels.next()?))
            }
            6 => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(digits.get(range)?, 16).ok()
                };
                Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
            }
            _ => None,
        }
    }
}

/// Ordered list of hex colors that palette indices select from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Build a palette, rejecting empty lists and malformed entries.
    #[must_use]
    pub fn new(colors: Vec<String>) -> Option<Self> {
        let palette = Self(colors);
        palette.is_valid().then_some(palette)
    }

    /// Entry for `index`, wrapped modulo the palette length.
    ///
    /// An empty palette (only reachable through deserialization) yields black.
    #[must_use]
    pub fn get(&self, index: usize) -> &str {
        if self.is_empty() {
            return "#000000";
        }
        &self.0[index % self.len()]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the palette has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty and every entry parses as a hex color.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|entry| Rgb::parse_hex(entry).is_some())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(
            ["#cc3333", "#b3a000", "#2e9e2e", "#1f9e9e", "#3355cc", "#b030b0"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_wraps_modulo_palette_length() {
        let palette = Palette::default();
        for index in 0..(palette.len() * 3) {
            let color = ColorRef::from(index);
            assert_eq!(
                color.resolve(&palette),
                Some(palette.get(index % palette.len()))
            );
        }
        assert_eq!(ColorRef::Index(7).resolve(&palette), Some("#b3a000"));
    }

    #[test]
    fn hex_resolves_verbatim() {
        let palette = Palette::default();
        assert_eq!(ColorRef::from("#ABCDEF").resolve(&palette), Some("#ABCDEF"));
        assert_eq!(ColorRef::from("#fa0").resolve(&palette), Some("#fa0"));
    }

    #[test]
    fn malformed_references_do_not_resolve() {
        let palette = Palette::default();
        assert_eq!(ColorRef::Index(-1).resolve(&palette), None);
        assert_eq!(ColorRef::from("red").resolve(&palette), None);
        assert_eq!(ColorRef::from("#12345").resolve(&palette), None);
        assert_eq!(ColorRef::from("#gg0000").resolve(&palette), None);
    }

    #[test]
    fn color_ref_deserializes_untagged() {
        let refs: Vec<ColorRef> = serde_json::from_str(r##"[3, "#00ff00"]"##).expect("parse");
        assert_eq!(refs, vec![ColorRef::Index(3), ColorRef::Hex("#00ff00".into())]);
    }

    #[test]
    fn short_hex_expands_channels() {
        assert_eq!(Rgb::parse_hex("#f0a"), Some(Rgb::new(0xff, 0x00, 0xaa)));
    }

    #[test]
    fn palette_rejects_empty_and_malformed() {
        assert!(Palette::new(Vec::new()).is_none());
        assert!(Palette::new(vec!["#000".into(), "blue".into()]).is_none());
        assert!(Palette::new(vec!["#000".into()]).is_some());
    }
}
