use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{parse_hex, rotate_hue, Rgb};

/// Hue shift, in degrees, of the outer stops of a record's decorative gradient.
pub const GRADIENT_HUE_SHIFT: f64 = 15.0;

/// A color derived once from a base color: its hex, its channels and a decorative gradient.
///
/// Serialized as the tuple `[hex, r, g, b, gradient_css]`. Deserializes from that tuple or from
/// a bare hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorRecord {
    pub hex: String,
    pub rgb: Rgb,
    /// Three-stop `linear-gradient(...)` from the hue rotated by -15° to +15°.
    pub gradient: String,
}

/// Build the record for `rgb`.
pub fn make_color_record(rgb: Rgb) -> ColorRecord {
    let before = rotate_hue(rgb, -GRADIENT_HUE_SHIFT);
    let after = rotate_hue(rgb, GRADIENT_HUE_SHIFT);
    let hex = rgb.to_hex();
    ColorRecord {
        gradient: format!("linear-gradient(to right, {before} 0%, {hex} 50%, {after} 100%)"),
        hex,
        rgb,
    }
}

impl ColorRecord {
    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex(hex).map(make_color_record)
    }
}

impl Serialize for ColorRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(&self.hex)?;
        tuple.serialize_element(&self.rgb.r)?;
        tuple.serialize_element(&self.rgb.g)?;
        tuple.serialize_element(&self.rgb.b)?;
        tuple.serialize_element(&self.gradient)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for ColorRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Tuple(String, u8, u8, u8, String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(hex) => ColorRecord::from_hex(&hex)
                .ok_or_else(|| D::Error::custom(format!("invalid color {hex:?}"))),
            Repr::Tuple(hex, r, g, b, gradient) => Ok(ColorRecord {
                hex,
                rgb: Rgb::new(r, g, b),
                gradient,
            }),
        }
    }
}
