use std::any::Any;

use serde::Deserialize;

use super::{Custom, CustomKind};

static UI_COLOR: CustomKind = CustomKind::new("Color").in_group("ColorType");
static RGB_COLOR: CustomKind = CustomKind::new("RGBColor").in_group("ColorType");

/// Color taken from a named palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiColor {
    #[serde(alias = "UIColor")]
    pub palette: String,
}

impl UiColor {
    pub fn new(palette: impl Into<String>) -> Self {
        Self {
            palette: palette.into(),
        }
    }

    pub fn from_value(value: &serde_json::Value) -> crate::Result<Self> {
        super::from_value(UI_COLOR.name, value)
    }
}

impl Custom for UiColor {
    fn kind(&self) -> &'static CustomKind {
        &UI_COLOR
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Explicit color given as `#RRGGBB`.
///
/// Unparseable input falls back to magenta so broken data stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbColor {
    pub source: String,
    pub rgb: [u8; 3],
}

#[derive(Debug, Deserialize)]
struct RgbValues {
    #[serde(alias = "Color")]
    color: String,
}

impl RgbColor {
    pub const FALLBACK: [u8; 3] = [0xff, 0x00, 0xff];

    pub fn parse(source: &str) -> Self {
        let rgb = parse_hex(source).unwrap_or_else(|| {
            tracing::warn!(color = source, "Invalid RGB color, using fallback");
            Self::FALLBACK
        });
        Self {
            source: source.to_string(),
            rgb,
        }
    }

    pub fn from_value(value: &serde_json::Value) -> crate::Result<Self> {
        let values: RgbValues = super::from_value(RGB_COLOR.name, value)?;
        Ok(Self::parse(&values.color))
    }
}

fn parse_hex(source: &str) -> Option<[u8; 3]> {
    let hex = source.trim().strip_prefix('#').unwrap_or(source.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

impl Custom for RgbColor {
    fn kind(&self) -> &'static CustomKind {
        &RGB_COLOR
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
