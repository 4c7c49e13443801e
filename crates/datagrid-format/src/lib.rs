//! Type-driven cell formatting for a datagrid over a columnar analytics view.
//!
//! This crate provides:
//! - [`locale`] definitions for decimal/thousands separators and date ordering.
//! - Number, date/time and boolean [`Formatter`]s selected by a column's [`SemanticType`] and its
//!   per-column [`ColumnFormatOptions`].
//! - A [`FormatterRegistry`] that caches formatters by [`FormatterKey`] so a viewport redraw does
//!   not rebuild them for every cell.

pub mod locale;
pub mod serde_helpers;

mod datetime;
mod formatter;
mod number;
mod options;
mod registry;

use core::fmt;

pub use crate::datetime::{parse_time_zone, DateTimeFormatter};
pub use crate::formatter::{BooleanFormatter, BooleanLabels, Formatter, FormatterKey};
pub use crate::number::NumberFormatter;
pub use crate::options::{
    CellFormat, ColumnFormatOptions, DateField, DateTimeStyle, FieldSetting, FieldStyle, FieldValue,
};
pub use crate::registry::{FormatterRegistry, RegistryOptions};

pub use locale::{get_locale, DateOrder, Locale, EN_US};

/// The logical kind of a column, independent of how the engine stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticType {
    Integer,
    Float,
    String,
    Boolean,
    Date,
    Datetime,
}

impl SemanticType {
    pub const ALL: [SemanticType; 6] = [
        SemanticType::Integer,
        SemanticType::Float,
        SemanticType::String,
        SemanticType::Boolean,
        SemanticType::Date,
        SemanticType::Datetime,
    ];

    /// Parse a type name as reported by the engine's schema (`"float"`, `"datetime"`, ...).
    ///
    /// Matching is ASCII case-insensitive. Anything outside the six known kinds returns `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    pub const fn name(self) -> &'static str {
        match self {
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "date",
            SemanticType::Datetime => "datetime",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Float)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, SemanticType::Date | SemanticType::Datetime)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw cell value as handed over by the engine for one viewport window.
///
/// Temporal columns carry milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Null,
    Number(f64),
    Text(&'a str),
    Bool(bool),
    Timestamp(i64),
}

impl<'a> CellValue<'a> {
    pub const fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The value as a number, if it has a numeric reading.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            CellValue::Number(n) => Some(n),
            CellValue::Timestamp(ms) => Some(ms as f64),
            _ => None,
        }
    }

    /// Unformatted display text, used when no formatter applies to the value.
    pub fn to_display_string(&self) -> Option<String> {
        match *self {
            CellValue::Null => None,
            CellValue::Number(n) => Some(crate::number::format_plain(n)),
            CellValue::Text(s) => Some(s.to_string()),
            CellValue::Bool(b) => Some(if b { "true" } else { "false" }.to_string()),
            CellValue::Timestamp(ms) => Some(ms.to_string()),
        }
    }
}

impl From<f64> for CellValue<'_> {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue<'_> {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<'a> From<&'a str> for CellValue<'a> {
    fn from(value: &'a str) -> Self {
        CellValue::Text(value)
    }
}

impl<'a, T> From<Option<T>> for CellValue<'a>
where
    T: Into<CellValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
