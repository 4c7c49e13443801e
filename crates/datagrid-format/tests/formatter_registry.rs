use std::sync::Arc;

use datagrid_format::{
    BooleanLabels, CellValue, ColumnFormatOptions, FormatterRegistry, RegistryOptions, SemanticType,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fixed(digits: u32) -> ColumnFormatOptions {
    ColumnFormatOptions {
        fixed: Some(digits),
        ..ColumnFormatOptions::default()
    }
}

#[test]
fn fixed_precision_overrides_type_default() {
    let registry = FormatterRegistry::default();
    let options = fixed(3);

    let float = registry.get(SemanticType::Float, &options).unwrap();
    assert_eq!(float.format(CellValue::Number(12345.6789)).as_deref(), Some("12,345.679"));

    let integer = registry.get(SemanticType::Integer, &ColumnFormatOptions::default()).unwrap();
    assert_eq!(integer.format(CellValue::Number(12345.6789)).as_deref(), Some("12,345"));
}

#[test]
fn unknown_type_names_have_no_formatter() {
    let registry = FormatterRegistry::default();
    let options = ColumnFormatOptions::default();
    assert!(registry.get_by_name("decimal128", &options).is_none());
    assert!(registry.get_by_name("", &options).is_none());
    assert!(registry.get_by_name("string", &options).is_none());
    assert!(registry.get_by_name("FLOAT", &options).is_some());
}

#[test]
fn format_passes_strings_through_and_skips_nulls() {
    let registry = FormatterRegistry::default();
    let options = ColumnFormatOptions::default();
    assert_eq!(
        registry.format(SemanticType::String, CellValue::Text("http://x"), &options),
        Some("http://x".to_string())
    );
    for ty in SemanticType::ALL {
        assert_eq!(registry.format(ty, CellValue::Null, &options), None);
    }
}

#[test]
fn boolean_labels_come_from_registry_options() {
    let registry = FormatterRegistry::new(RegistryOptions {
        boolean_labels: BooleanLabels {
            true_label: "yes".to_string(),
            false_label: "no".to_string(),
        },
        ..RegistryOptions::default()
    });
    let options = ColumnFormatOptions::default();
    assert_eq!(
        registry.format(SemanticType::Boolean, CellValue::Bool(true), &options),
        Some("yes".to_string())
    );
    assert_eq!(
        registry.format(SemanticType::Boolean, CellValue::Bool(false), &options),
        Some("no".to_string())
    );
}

#[test]
fn registry_options_deserialize_with_defaults() {
    let options: RegistryOptions = serde_json::from_str(
        r#"{"locale": "de_DE.UTF-8", "default_time_zone": "+01:00"}"#,
    )
    .unwrap();
    let registry = FormatterRegistry::new(options);
    assert_eq!(registry.locale().id, "de-DE");
    assert_eq!(
        registry.format(
            SemanticType::Float,
            CellValue::Number(1234.5),
            &ColumnFormatOptions::default()
        ),
        Some("1.234,50".to_string())
    );
    // 2024-01-02T15:04:05Z rendered one hour ahead.
    assert_eq!(
        registry.format(
            SemanticType::Datetime,
            CellValue::Timestamp(1_704_207_845_000),
            &ColumnFormatOptions::default()
        ),
        Some("02.01.24, 16:04:05".to_string())
    );
}

#[test]
fn options_irrelevant_to_the_type_share_a_cache_entry() {
    let registry = FormatterRegistry::default();
    let linked: ColumnFormatOptions =
        serde_json::from_str(r#"{"format": "link", "fixed": 1}"#).unwrap();
    let a = registry.get(SemanticType::Float, &linked).unwrap();
    let b = registry.get(SemanticType::Float, &fixed(1)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Arc::new(FormatterRegistry::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .format(SemanticType::Float, CellValue::Number(i as f64), &fixed(1))
                    .unwrap()
            })
        })
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["0.0", "1.0", "2.0", "3.0"]);
    assert_eq!(registry.len(), 1);
}

proptest! {
    #[test]
    fn repeated_lookups_format_identically(
        value in -1.0e12f64..1.0e12,
        digits in proptest::option::of(0u32..8),
        type_index in 0usize..6,
    ) {
        let registry = FormatterRegistry::default();
        let ty = SemanticType::ALL[type_index];
        let options = ColumnFormatOptions { fixed: digits, ..ColumnFormatOptions::default() };
        let cell = CellValue::Number(value);

        let first = registry.format(ty, cell, &options);
        let second = registry.format(ty, cell, &options);
        prop_assert_eq!(&first, &second);

        registry.clear();
        prop_assert_eq!(registry.format(ty, cell, &options), first);
    }

    #[test]
    fn float_output_has_exactly_fixed_fraction_digits(
        value in -1.0e9f64..1.0e9,
        digits in 1u32..6,
    ) {
        let registry = FormatterRegistry::default();
        let text =
            registry.format(SemanticType::Float, CellValue::Number(value), &fixed(digits)).unwrap();
        let (_, frac) = text.split_once('.').unwrap();
        prop_assert_eq!(frac.len(), digits as usize);
    }
}
