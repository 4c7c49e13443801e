use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SemanticType;

/// Cell-level presentation selected by the column's `format` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    Link,
    Bold,
    Italics,
    /// Date/datetime columns built field-by-field from the per-field settings.
    Custom,
}

/// `dateStyle` / `timeStyle` lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeStyle {
    Full,
    Long,
    Medium,
    Short,
}

/// Presentation of a single date/time component in custom mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "narrow")]
    Narrow,
}

/// A date-format setting that can also be switched off with the literal `"disabled"`.
///
/// The surrounding `Option` carries the third state: `None` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSetting<T> {
    Disabled,
    Set(T),
}

const DISABLED: &str = "disabled";

impl<T> FieldSetting<T> {
    /// Resolve against a default: unset takes the default, disabled omits the component.
    pub fn resolve(setting: Option<Self>, default: Option<T>) -> Option<T> {
        match setting {
            None => default,
            Some(FieldSetting::Disabled) => None,
            Some(FieldSetting::Set(value)) => Some(value),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldSetting<U> {
        match self {
            FieldSetting::Disabled => FieldSetting::Disabled,
            FieldSetting::Set(value) => FieldSetting::Set(f(value)),
        }
    }
}

impl<T: Serialize> Serialize for FieldSetting<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldSetting::Disabled => serializer.serialize_str(DISABLED),
            FieldSetting::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FieldSetting<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.as_str() == Some(DISABLED) {
            return Ok(FieldSetting::Disabled);
        }
        T::deserialize(raw).map(FieldSetting::Set).map_err(D::Error::custom)
    }
}

/// The date/time components addressable in custom mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
    Weekday,
    Hour,
    Minute,
    Second,
    Hour12,
    FractionalSecondDigits,
}

/// A resolved custom-mode field value, regardless of the field's own setting type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Style(FieldStyle),
    Flag(bool),
    Digits(u8),
}

/// Per-column options that affect formatted text.
///
/// Every field is optional and lenient; see [`crate::serde_helpers::lenient`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnFormatOptions {
    /// Forces both the minimum and maximum number of fraction digits.
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed: Option<u32>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub format: Option<CellFormat>,
    #[serde(
        rename = "timeZone",
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<String>,
    #[serde(
        rename = "dateStyle",
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_style: Option<FieldSetting<DateTimeStyle>>,
    #[serde(
        rename = "timeStyle",
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_style: Option<FieldSetting<DateTimeStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub month: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekday: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub hour: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub minute: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub second: Option<FieldSetting<FieldStyle>>,
    #[serde(
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub hour12: Option<FieldSetting<bool>>,
    #[serde(
        rename = "fractionalSecondDigits",
        deserialize_with = "crate::serde_helpers::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fractional_second_digits: Option<FieldSetting<u8>>,
}

impl ColumnFormatOptions {
    pub fn is_custom_date_format(&self) -> bool {
        self.format == Some(CellFormat::Custom)
    }

    /// The setting for one custom-mode field, widened to [`FieldValue`].
    pub fn date_field(&self, field: DateField) -> Option<FieldSetting<FieldValue>> {
        let style =
            |setting: Option<FieldSetting<FieldStyle>>| setting.map(|s| s.map(FieldValue::Style));
        match field {
            DateField::Year => style(self.year),
            DateField::Month => style(self.month),
            DateField::Day => style(self.day),
            DateField::Weekday => style(self.weekday),
            DateField::Hour => style(self.hour),
            DateField::Minute => style(self.minute),
            DateField::Second => style(self.second),
            DateField::Hour12 => self.hour12.map(|s| s.map(FieldValue::Flag)),
            DateField::FractionalSecondDigits => {
                self.fractional_second_digits.map(|s| s.map(FieldValue::Digits))
            }
        }
    }

    /// Project onto the fields that change output for `ty`.
    ///
    /// Two option sets with equal projections format identically, which is what makes the
    /// projection usable as a cache key.
    pub(crate) fn relevant_to(&self, ty: SemanticType) -> ColumnFormatOptions {
        match ty {
            SemanticType::Integer | SemanticType::Float => ColumnFormatOptions {
                fixed: self.fixed,
                ..ColumnFormatOptions::default()
            },
            SemanticType::Date | SemanticType::Datetime if self.is_custom_date_format() => {
                ColumnFormatOptions {
                    fixed: None,
                    format: Some(CellFormat::Custom),
                    date_style: None,
                    time_style: None,
                    ..self.clone()
                }
            }
            SemanticType::Date | SemanticType::Datetime => ColumnFormatOptions {
                time_zone: self.time_zone.clone(),
                date_style: self.date_style,
                time_style: self.time_style,
                ..ColumnFormatOptions::default()
            },
            SemanticType::String | SemanticType::Boolean => ColumnFormatOptions::default(),
        }
    }
}
