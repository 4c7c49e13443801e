//! Color math used by cell style resolution.
//!
//! Channels are on a 0..=255 scale; alpha is 0..=1.

use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text color for light backgrounds.
pub const DARK_TEXT: &str = "#161616";
/// Text color for dark backgrounds.
pub const LIGHT_TEXT: &str = "#ffffff";
/// Backgrounds with perceived luminance strictly above this get [`DARK_TEXT`].
pub const LUMINANCE_THRESHOLD: f64 = 130.0;

/// An opaque sRGB color.
///
/// Serialized as a `#rrggbb` hex string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    fn from_channels(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(|c| {
            if c.is_nan() {
                0
            } else {
                c.round().clamp(0.0, 255.0) as u8
            }
        });
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).ok_or_else(|| D::Error::custom("color must be a #rgb or #rrggbb hex string"))
    }
}

/// Parse `#rgb` / `#rrggbb` (the `#` is optional).
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Midpoint mix of `hex_a` and `b` in OKLab.
///
/// Used to derive default background tints from foreground colors. If `hex_a` doesn't parse,
/// `b` is returned unchanged.
pub fn blend(hex_a: &str, b: Rgb) -> String {
    match parse_hex(hex_a) {
        Some(a) => mix_oklab(a, b, 0.5).to_hex(),
        None => b.to_hex(),
    }
}

fn mix_oklab(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let a = to_oklab(a);
    let b = to_oklab(b);
    from_oklab([0, 1, 2].map(|i| a[i] + (b[i] - a[i]) * t))
}

/// Porter-Duff "over" of `fg` at `alpha` onto an opaque background.
///
/// `out = (1 - alpha) * bg + alpha * fg` per channel. `alpha` is clamped to `0..=1`; NaN counts
/// as fully transparent.
pub fn alpha_composite(fg: Rgb, alpha: f64, bg: Rgb) -> Rgb {
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let fg = fg.channels();
    let bg = bg.channels();
    Rgb::from_channels([0, 1, 2].map(|i| (1.0 - alpha) * bg[i] + alpha * fg[i]))
}

/// Perceived brightness: `sqrt(0.299 r² + 0.587 g² + 0.114 b²)`.
pub fn luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.channels();
    (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
}

/// Text color for a background with the given [`luminance`]. The threshold itself gets light text.
pub fn infer_foreground_from_luminance(luminance: f64) -> &'static str {
    if luminance > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Pick dark or light text for a background.
///
/// This is a brightness heuristic, not a WCAG contrast computation.
pub fn infer_foreground_from_background(background: Rgb) -> &'static str {
    infer_foreground_from_luminance(luminance(background))
}

/// Rotate a color's hue by `degrees` in HSL, keeping saturation and lightness.
pub fn rotate_hue(rgb: Rgb, degrees: f64) -> Rgb {
    let [h, s, l] = to_hsl(rgb);
    from_hsl([(h + degrees).rem_euclid(360.0), s, l])
}

fn to_hsl(rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.channels().map(|c| c / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    if delta == 0.0 {
        return [0.0, 0.0, l];
    }

    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    [h, s, l]
}

fn from_hsl([h, s, l]: [f64; 3]) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb::from_channels([r, g, b].map(|v| (v + m) * 255.0))
}

fn srgb_to_linear(c: f64) -> f64 {
    let c = c / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    let c = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    c.clamp(0.0, 1.0) * 255.0
}

fn to_oklab(rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.channels().map(srgb_to_linear);
    let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
    let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
    let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();
    [
        0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    ]
}

fn from_oklab([l, a, b]: [f64; 3]) -> Rgb {
    let l_ = (l + 0.396_337_777_4 * a + 0.215_803_757_3 * b).powi(3);
    let m_ = (l - 0.105_561_345_8 * a - 0.063_854_172_8 * b).powi(3);
    let s_ = (l - 0.089_484_177_5 * a - 1.291_485_548_0 * b).powi(3);
    Rgb::from_channels([
        linear_to_srgb(4.076_741_662_1 * l_ - 3.307_711_591_3 * m_ + 0.230_969_929_2 * s_),
        linear_to_srgb(-1.268_438_004_6 * l_ + 2.609_757_401_1 * m_ - 0.341_319_396_5 * s_),
        linear_to_srgb(-0.004_196_086_3 * l_ - 0.703_418_614_7 * m_ + 1.707_614_701_0 * s_),
    ])
}
