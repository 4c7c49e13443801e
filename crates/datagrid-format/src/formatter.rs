use core::fmt;

use serde::{Deserialize, Serialize};

use crate::datetime::DateTimeFormatter;
use crate::number::NumberFormatter;
use crate::options::ColumnFormatOptions;
use crate::{CellValue, SemanticType};

/// Display labels for boolean cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanLabels {
    pub true_label: String,
    pub false_label: String,
}

impl Default for BooleanLabels {
    fn default() -> Self {
        Self {
            true_label: "true".to_string(),
            false_label: "false".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanFormatter {
    labels: BooleanLabels,
}

impl BooleanFormatter {
    pub fn new(labels: BooleanLabels) -> Self {
        Self { labels }
    }

    pub fn format(&self, value: bool) -> &str {
        if value {
            &self.labels.true_label
        } else {
            &self.labels.false_label
        }
    }
}

/// A formatter selected for a column's semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatter {
    Number(NumberFormatter),
    DateTime(DateTimeFormatter),
    Boolean(BooleanFormatter),
}

impl Formatter {
    /// Format a cell value.
    ///
    /// `Null` is never formatted. Values whose variant doesn't fit the formatter (text in a number
    /// column, a timestamp outside chrono's range, ...) fall back to their unformatted display
    /// string rather than failing.
    pub fn format(&self, value: CellValue<'_>) -> Option<String> {
        match (self, value) {
            (_, CellValue::Null) => None,
            (Formatter::Number(fmt), CellValue::Number(n)) => Some(fmt.format(n)),
            (Formatter::DateTime(fmt), CellValue::Timestamp(ms)) => {
                fmt.format_millis(ms).or_else(|| value.to_display_string())
            }
            (Formatter::DateTime(fmt), CellValue::Number(n)) if n.is_finite() => {
                fmt.format_millis(n.trunc() as i64).or_else(|| value.to_display_string())
            }
            (Formatter::Boolean(fmt), CellValue::Bool(b)) => Some(fmt.format(b).to_string()),
            _ => value.to_display_string(),
        }
    }
}

/// Cache key for a formatter: the semantic type plus the options that affect its output.
///
/// Options irrelevant to the type are dropped, so e.g. a float column's key ignores date fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatterKey {
    ty: SemanticType,
    options: ColumnFormatOptions,
}

impl FormatterKey {
    pub fn new(ty: SemanticType, options: &ColumnFormatOptions) -> Self {
        Self {
            ty,
            options: options.relevant_to(ty),
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.ty
    }

    /// The projected options this key was built from.
    pub fn options(&self) -> &ColumnFormatOptions {
        &self.options
    }
}

impl fmt::Display for FormatterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.options != ColumnFormatOptions::default() {
            let json = serde_json::to_string(&self.options).map_err(|_| fmt::Error)?;
            write!(f, "{json}")?;
        }
        Ok(())
    }
}
