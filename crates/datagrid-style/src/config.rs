use serde::{Deserialize, Serialize};

use datagrid_format::{parse_time_zone, CellFormat, ColumnFormatOptions, FieldSetting};

use crate::color::parse_hex;
use crate::error::{ConfigError, ConfigResult};
use crate::record::ColorRecord;

/// Largest `fixed` value the strict validator accepts.
pub const MAX_FIXED: u32 = 20;

/// Foreground treatment of numeric (and boolean) cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFgMode {
    Color,
    Bar,
    Disabled,
}

/// Background treatment of numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberBgMode {
    Color,
    Gradient,
    Disabled,
}

/// Single-color treatment of string and date/datetime cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Foreground,
    Background,
    Disabled,
}

/// Per-column style configuration as persisted by the host viewer.
///
/// Every field is optional. Values that fail to parse are dropped (and logged at `debug`), so a
/// stale or partially edited config still renders; [`ColumnStyleConfig::validate`] is the opt-in
/// strict check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnStyleConfig {
    #[serde(flatten)]
    pub format: ColumnFormatOptions,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_fg_mode: Option<NumberFgMode>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_bg_mode: Option<NumberBgMode>,
    /// Value at which a bar reaches full width.
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fg_gradient: Option<f64>,
    /// Value at which a gradient background reaches full opacity.
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_gradient: Option<f64>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pos_fg_color: Option<ColorRecord>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub neg_fg_color: Option<ColorRecord>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pos_bg_color: Option<ColorRecord>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub neg_bg_color: Option<ColorRecord>,
    #[serde(
        alias = "string_color_mode",
        alias = "datetime_color_mode",
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_mode: Option<ColorMode>,
    #[serde(
        deserialize_with = "datagrid_format::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<ColorRecord>,
}

impl ColumnStyleConfig {
    /// Parse a config from JSON. Only a document that isn't a JSON object is an error; bad
    /// individual fields fall back to unset.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn cell_format(&self) -> Option<CellFormat> {
        self.format.format
    }

    /// Check the values that did parse for ranges the renderer would otherwise silently clamp
    /// or ignore. Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(fixed) = self.format.fixed {
            if fixed > MAX_FIXED {
                return Err(ConfigError::FixedOutOfRange(fixed));
            }
        }

        let gradients = [("fg_gradient", self.fg_gradient), ("bg_gradient", self.bg_gradient)];
        for (field, value) in gradients {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidGradient { field, value });
                }
            }
        }

        if let Some(tz) = &self.format.time_zone {
            if parse_time_zone(tz).is_none() {
                return Err(ConfigError::InvalidTimeZone(tz.clone()));
            }
        }

        if let Some(FieldSetting::Set(digits)) = self.format.fractional_second_digits {
            if !(1..=3).contains(&digits) {
                return Err(ConfigError::InvalidFractionalSecondDigits(digits));
            }
        }

        let records = [
            ("pos_fg_color", &self.pos_fg_color),
            ("neg_fg_color", &self.neg_fg_color),
            ("pos_bg_color", &self.pos_bg_color),
            ("neg_bg_color", &self.neg_bg_color),
            ("color", &self.color),
        ];
        for (field, record) in records {
            if let Some(record) = record {
                if parse_hex(&record.hex) != Some(record.rgb) {
                    return Err(ConfigError::InvalidColor {
                        field,
                        value: record.hex.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
