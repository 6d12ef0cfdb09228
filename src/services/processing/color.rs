use super::palette;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A resolved RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `RRGGBB` or `AARRGGBB`, with or without a leading `#`. The alpha
    /// channel of an 8-digit value is stripped.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        let hex = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => return None,
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Euclidean distance in RGB space. Maximum is ~441.67 (black to white).
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        dr.mul_add(dr, dg.mul_add(dg, db * db)).sqrt()
    }

    pub fn is_white(self) -> bool {
        self.r == 0xFF && self.g == 0xFF && self.b == 0xFF
    }

    pub fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The colour recovered from a cell fill: either a real RGB value, or a
/// sentinel for an indexed/pattern palette reference that could not be
/// resolved. Sentinels are deliberately distinguishable downstream; they can
/// still be registered in the colour legend by their literal code, but they
/// never participate in similarity matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractedColor {
    Rgb(Rgb),
    Indexed(u32),
    Pattern(u32),
}

impl ExtractedColor {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, ExtractedColor::Rgb(_))
    }

    pub fn as_rgb(&self) -> Option<Rgb> {
        match self {
            ExtractedColor::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedColor::Rgb(rgb) => write!(f, "{rgb}"),
            ExtractedColor::Indexed(n) => write!(f, "#INDEX{n}"),
            ExtractedColor::Pattern(n) => write!(f, "#PATTERN{n}"),
        }
    }
}

impl Serialize for ExtractedColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ExtractedColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour code: {value}")))
    }
}

impl ToSchema for ExtractedColor {
    fn name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("ExtractedColor")
    }
}

impl utoipa::PartialSchema for ExtractedColor {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        String::schema()
    }
}

impl ExtractedColor {
    /// Parse a stored colour code: `#RRGGBB`, `#AARRGGBB`, `#INDEX<n>` or
    /// `#PATTERN<n>`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Some(rest) = trimmed.strip_prefix("#INDEX") {
            return rest.parse().ok().map(ExtractedColor::Indexed);
        }
        if let Some(rest) = trimmed.strip_prefix("#PATTERN") {
            return rest.parse().ok().map(ExtractedColor::Pattern);
        }
        Rgb::parse(trimmed).map(ExtractedColor::Rgb)
    }
}

/// The fill representations actually observed across rota spreadsheets,
/// captured once per cell by the workbook adapter. Extraction is a
/// first-success-wins walk over these fields, so no speculative style
/// introspection happens anywhere else.
#[derive(Debug, Default, Clone)]
pub struct FillProbe {
    /// Solid background fill, as an ARGB or RGB hex string.
    pub background_argb: Option<String>,
    /// Pattern-fill background colour.
    pub pattern_background_argb: Option<String>,
    /// Foreground colour; some legacy writers use it to mean cell highlight.
    pub foreground_argb: Option<String>,
    /// Legacy indexed palette reference on the background fill.
    pub background_indexed: Option<u32>,
    /// Legacy indexed palette reference on a pattern fill.
    pub pattern_indexed: Option<u32>,
    /// Theme colour slot reference on the background fill.
    pub background_theme: Option<u32>,
}

impl FillProbe {
    pub fn is_empty(&self) -> bool {
        self.background_argb.is_none()
            && self.pattern_background_argb.is_none()
            && self.foreground_argb.is_none()
            && self.background_indexed.is_none()
            && self.pattern_indexed.is_none()
            && self.background_theme.is_none()
    }
}

/// Recover a cell's fill colour. An unstyled cell legitimately yields `None`.
pub fn extract_color(probe: &FillProbe) -> Option<ExtractedColor> {
    // 1. Direct background fill (ARGB alpha stripped, RGB used as-is)
    if let Some(rgb) = probe.background_argb.as_deref().and_then(Rgb::parse) {
        return Some(ExtractedColor::Rgb(rgb));
    }

    // 2. Pattern-fill background
    if let Some(rgb) = probe
        .pattern_background_argb
        .as_deref()
        .and_then(Rgb::parse)
    {
        return Some(ExtractedColor::Rgb(rgb));
    }

    // 3. Foreground used as highlight; pure white/black is default-text
    //    noise, not an intentional fill
    if let Some(rgb) = probe.foreground_argb.as_deref().and_then(Rgb::parse) {
        if !rgb.is_white() && !rgb.is_black() {
            return Some(ExtractedColor::Rgb(rgb));
        }
    }

    // 4. Theme or legacy indexed references, resolved through the shared
    //    palette; unknown indices become sentinels instead of failing
    if let Some(theme) = probe.background_theme {
        return Some(match palette::theme_color(theme) {
            Some(rgb) => ExtractedColor::Rgb(rgb),
            None => ExtractedColor::Indexed(theme),
        });
    }
    if let Some(index) = probe.background_indexed {
        return Some(match palette::indexed_color(index) {
            Some(rgb) => ExtractedColor::Rgb(rgb),
            None => ExtractedColor::Indexed(index),
        });
    }
    if let Some(index) = probe.pattern_indexed {
        return Some(match palette::indexed_color(index) {
            Some(rgb) => ExtractedColor::Rgb(rgb),
            None => ExtractedColor::Pattern(index),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_fill_strips_alpha() {
        let probe = FillProbe {
            background_argb: Some("FF4472C4".to_string()),
            ..FillProbe::default()
        };
        assert_eq!(
            extract_color(&probe),
            Some(ExtractedColor::Rgb(Rgb {
                r: 0x44,
                g: 0x72,
                b: 0xC4
            }))
        );
    }

    #[test]
    fn six_digit_fill_used_as_is() {
        let probe = FillProbe {
            background_argb: Some("#123456".to_string()),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&probe).unwrap().to_string(), "#123456");
    }

    #[test]
    fn pattern_background_is_second_choice() {
        let probe = FillProbe {
            pattern_background_argb: Some("FF00B050".to_string()),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&probe).unwrap().to_string(), "#00B050");
    }

    #[test]
    fn white_and_black_foreground_rejected() {
        for noise in ["FFFFFFFF", "FF000000"] {
            let probe = FillProbe {
                foreground_argb: Some(noise.to_string()),
                ..FillProbe::default()
            };
            assert_eq!(extract_color(&probe), None);
        }

        let probe = FillProbe {
            foreground_argb: Some("FFFFC000".to_string()),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&probe).unwrap().to_string(), "#FFC000");
    }

    #[test]
    fn known_index_resolves_unknown_becomes_sentinel() {
        let known = FillProbe {
            background_indexed: Some(43),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&known).unwrap().to_string(), "#FFFF99");

        let unknown = FillProbe {
            background_indexed: Some(81),
            ..FillProbe::default()
        };
        let color = extract_color(&unknown).unwrap();
        assert!(color.is_sentinel());
        assert_eq!(color.to_string(), "#INDEX81");
    }

    #[test]
    fn unknown_pattern_index_has_its_own_sentinel() {
        let probe = FillProbe {
            pattern_indexed: Some(77),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&probe).unwrap().to_string(), "#PATTERN77");
    }

    #[test]
    fn unstyled_cell_is_none_not_an_error() {
        assert_eq!(extract_color(&FillProbe::default()), None);
    }

    #[test]
    fn direct_fill_wins_over_later_strategies() {
        let probe = FillProbe {
            background_argb: Some("FFFF0000".to_string()),
            pattern_background_argb: Some("FF00FF00".to_string()),
            background_indexed: Some(5),
            ..FillProbe::default()
        };
        assert_eq!(extract_color(&probe).unwrap().to_string(), "#FF0000");
    }

    #[test]
    fn colour_codes_round_trip_through_parse() {
        for code in ["#1A2B3C", "#INDEX12", "#PATTERN3"] {
            assert_eq!(ExtractedColor::parse(code).unwrap().to_string(), code);
        }
        assert!(ExtractedColor::parse("not a colour").is_none());
    }

    #[test]
    fn rgb_distance_is_euclidean() {
        let black = Rgb { r: 0, g: 0, b: 0 };
        let white = Rgb {
            r: 255,
            g: 255,
            b: 255,
        };
        assert!((black.distance(white) - 441.672_955).abs() < 1e-3);
        assert!((black.distance(black)).abs() < f64::EPSILON);
    }
}
