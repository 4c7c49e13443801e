use std::collections::HashMap;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::datetime::{parse_time_zone, DateTimeFormatter};
use crate::formatter::{BooleanFormatter, BooleanLabels, Formatter, FormatterKey};
use crate::locale::{get_locale, Locale, EN_US};
use crate::number::NumberFormatter;
use crate::options::ColumnFormatOptions;
use crate::{CellValue, SemanticType};

/// Plugin-level settings shared by every formatter a registry builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Locale tag (`en-US`, `de_DE.UTF-8`, ...). Unknown tags fall back to `en-US`.
    pub locale: String,
    /// Time zone for datetime columns without their own `timeZone`. `None` means UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_time_zone: Option<String>,
    pub boolean_labels: BooleanLabels,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            locale: EN_US.id.to_string(),
            default_time_zone: None,
            boolean_labels: BooleanLabels::default(),
        }
    }
}

/// Cache of formatters keyed by [`FormatterKey`].
///
/// Create one per plugin instance and pass it to whatever renders cells. Entries are built on
/// first use and kept for the registry's lifetime; call [`FormatterRegistry::clear`] after
/// changing anything that the keys don't capture (e.g. swapping the registry's locale).
///
/// Lookups take a read lock, so the registry can be shared between threads. Building the same key
/// twice yields equivalent formatters, so racing inserts are harmless.
#[derive(Debug)]
pub struct FormatterRegistry {
    locale: &'static Locale,
    default_offset: FixedOffset,
    boolean_labels: BooleanLabels,
    cache: RwLock<HashMap<FormatterKey, Arc<Formatter>>>,
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new(RegistryOptions::default())
    }
}

impl FormatterRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        let locale = get_locale(&options.locale).unwrap_or_else(|| {
            log::debug!("unknown locale {:?}; using {}", options.locale, EN_US.id);
            &EN_US
        });
        let utc = Utc.fix();
        let default_offset = match options.default_time_zone.as_deref() {
            Some(tz) => parse_time_zone(tz).unwrap_or_else(|| {
                log::debug!("unsupported default time zone {tz:?}; using UTC");
                utc
            }),
            None => utc,
        };

        Self {
            locale,
            default_offset,
            boolean_labels: options.boolean_labels,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    /// Get (building on first use) the formatter for `ty` with `options`.
    ///
    /// Returns `None` for string columns: their values are shown as-is.
    pub fn get(&self, ty: SemanticType, options: &ColumnFormatOptions) -> Option<Arc<Formatter>> {
        if ty == SemanticType::String {
            return None;
        }

        let key = FormatterKey::new(ty, options);
        if let Some(formatter) = self.cache.read().get(&key) {
            return Some(Arc::clone(formatter));
        }

        log::trace!("building formatter for {key}");
        let formatter = Arc::new(self.build(&key)?);
        let mut cache = self.cache.write();
        Some(Arc::clone(cache.entry(key).or_insert(formatter)))
    }

    /// Like [`FormatterRegistry::get`], but for the type name reported by the engine's schema.
    ///
    /// Unknown type names return `None`, meaning the value is displayed unchanged.
    pub fn get_by_name(
        &self,
        type_name: &str,
        options: &ColumnFormatOptions,
    ) -> Option<Arc<Formatter>> {
        match SemanticType::from_name(type_name) {
            Some(ty) => self.get(ty, options),
            None => {
                log::debug!("no formatter for unknown column type {type_name:?}");
                None
            }
        }
    }

    /// Format one value, falling back to its unformatted text when no formatter applies.
    pub fn format(
        &self,
        ty: SemanticType,
        value: CellValue<'_>,
        options: &ColumnFormatOptions,
    ) -> Option<String> {
        if value.is_null() {
            return None;
        }
        match self.get(ty, options) {
            Some(formatter) => formatter.format(value),
            None => value.to_display_string(),
        }
    }

    /// Drop every cached formatter.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    fn build(&self, key: &FormatterKey) -> Option<Formatter> {
        let options = key.options();
        let formatter = match key.semantic_type() {
            SemanticType::Integer => {
                Formatter::Number(NumberFormatter::integer(self.locale, options.fixed))
            }
            SemanticType::Float => {
                Formatter::Number(NumberFormatter::float(self.locale, options.fixed))
            }
            ty @ (SemanticType::Date | SemanticType::Datetime) => Formatter::DateTime(
                DateTimeFormatter::from_options(ty, options, self.locale, self.default_offset),
            ),
            SemanticType::Boolean => {
                Formatter::Boolean(BooleanFormatter::new(self.boolean_labels.clone()))
            }
            SemanticType::String => return None,
        };
        Some(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_by_key() {
        let registry = FormatterRegistry::default();
        let fixed = ColumnFormatOptions {
            fixed: Some(1),
            ..ColumnFormatOptions::default()
        };

        let a = registry.get(SemanticType::Float, &fixed).unwrap();
        let b = registry.get(SemanticType::Float, &fixed).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        registry.get(SemanticType::Float, &ColumnFormatOptions::default());
        registry.get(SemanticType::Integer, &fixed);
        assert_eq!(registry.len(), 3);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn strings_have_no_formatter() {
        let registry = FormatterRegistry::default();
        assert!(registry.get(SemanticType::String, &ColumnFormatOptions::default()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_locale_falls_back_to_en_us() {
        let registry = FormatterRegistry::new(RegistryOptions {
            locale: "tlh-KX".to_string(),
            ..RegistryOptions::default()
        });
        assert_eq!(registry.locale().id, "en-US");
    }
}
