use serde::Deserialize;

use crate::color::{blend, parse_hex, Rgb, DARK_TEXT};
use crate::record::{make_color_record, ColorRecord};

const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xff, 0xff, 0xff);
const DEFAULT_POSITIVE: Rgb = Rgb::new(0x33, 0x8d, 0xcd);
const DEFAULT_NEGATIVE: Rgb = Rgb::new(0xff, 0x59, 0x42);

/// Plugin-level colors that column configs fall back to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "ThemeColors")]
pub struct GridTheme {
    pub background: Rgb,
    pub foreground: String,
    pub pos_fg: ColorRecord,
    pub neg_fg: ColorRecord,
    /// `pos_fg` mixed halfway into `background`.
    pub pos_bg: ColorRecord,
    pub neg_bg: ColorRecord,
    /// Default for string/date columns in a single-color mode.
    pub color: ColorRecord,
}

impl GridTheme {
    pub fn new(
        background: Rgb,
        foreground: impl Into<String>,
        positive: Rgb,
        negative: Rgb,
    ) -> Self {
        let tint = |fg: Rgb| {
            let mixed = blend(&fg.to_hex(), background);
            make_color_record(parse_hex(&mixed).unwrap_or(background))
        };

        Self {
            background,
            foreground: foreground.into(),
            pos_fg: make_color_record(positive),
            neg_fg: make_color_record(negative),
            pos_bg: tint(positive),
            neg_bg: tint(negative),
            color: make_color_record(positive),
        }
    }

    /// Replace the default single color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = make_color_record(color);
        self
    }
}

impl Default for GridTheme {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND, DARK_TEXT, DEFAULT_POSITIVE, DEFAULT_NEGATIVE)
    }
}

/// Wire form: base colors only, derived records are rebuilt.
#[derive(Deserialize)]
#[serde(default)]
struct ThemeColors {
    background: Rgb,
    foreground: String,
    positive: Rgb,
    negative: Rgb,
    color: Option<Rgb>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            foreground: DARK_TEXT.to_string(),
            positive: DEFAULT_POSITIVE,
            negative: DEFAULT_NEGATIVE,
            color: None,
        }
    }
}

impl From<ThemeColors> for GridTheme {
    fn from(colors: ThemeColors) -> Self {
        let theme =
            GridTheme::new(colors.background, colors.foreground, colors.positive, colors.negative);
        match colors.color {
            Some(color) => theme.with_color(color),
            None => theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_backgrounds_are_tints_of_the_foregrounds() {
        let theme = GridTheme::default();
        assert_eq!(theme.pos_fg.hex, "#338dcd");
        assert_eq!(theme.neg_fg.hex, "#ff5942");
        assert_eq!(theme.pos_bg.rgb, Rgb::new(158, 198, 232));
        assert_eq!(theme.neg_bg.rgb, Rgb::new(255, 178, 162));
        assert_eq!(theme.color, theme.pos_fg);
    }

    #[test]
    fn deserializes_with_defaults() {
        let theme: GridTheme =
            serde_json::from_str(r##"{"background": "#000000", "color": "#ff0000"}"##).unwrap();
        assert_eq!(theme.background, Rgb::BLACK);
        assert_eq!(theme.foreground, DARK_TEXT);
        assert_eq!(theme.pos_fg.hex, "#338dcd");
        assert_eq!(theme.color.hex, "#ff0000");

        let empty: GridTheme = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GridTheme::default());
    }
}
