use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use datagrid_format::{FormatterRegistry, RegistryOptions};
use datagrid_style::{
    render_viewport, CellRenderInstruction, CellStyleResolver, CellValue, ColumnStyleConfig,
    GridTheme, RichContent, ViewportColumn,
};
use pretty_assertions::assert_eq;

fn schema() -> HashMap<String, String> {
    [("price", "float"), ("name", "string"), ("flag", "boolean"), ("blob", "binary")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn text(s: &str) -> CellRenderInstruction {
    CellRenderInstruction::plain(Some(s.to_string()))
}

#[test]
fn renders_column_major_with_per_column_configs() {
    let resolver = CellStyleResolver::default();
    let theme = GridTheme::default();
    let columns = vec![
        ViewportColumn::new(
            "price",
            [CellValue::Number(1.5), CellValue::Null, CellValue::Number(-2.0)],
        ),
        ViewportColumn::new("name", [CellValue::Text("a"), CellValue::Text("b")]),
    ];
    let mut configs = HashMap::new();
    configs.insert(
        "price".to_string(),
        ColumnStyleConfig::from_json(r#"{"fixed": 1, "number_fg_mode": "color"}"#).unwrap(),
    );
    configs.insert(
        "name".to_string(),
        ColumnStyleConfig::from_json(r#"{"format": "bold"}"#).unwrap(),
    );

    let cells = render_viewport(&resolver, &schema(), &columns, &configs, &theme);
    assert_eq!(cells.len(), 2);
    assert_eq!(
        cells[0],
        vec![
            CellRenderInstruction {
                text: Some("1.5".to_string()),
                foreground_color: Some("#338dcd".to_string()),
                ..CellRenderInstruction::default()
            },
            CellRenderInstruction::default(),
            CellRenderInstruction {
                text: Some("-2.0".to_string()),
                foreground_color: Some("#ff5942".to_string()),
                ..CellRenderInstruction::default()
            },
        ]
    );
    assert_eq!(
        cells[1][1].rich_content,
        Some(RichContent::Bold { text: "b".to_string() })
    );
}

#[test]
fn missing_configs_and_unknown_columns_render_plainly() {
    let resolver = CellStyleResolver::default();
    let theme = GridTheme::default();
    let columns = vec![
        ViewportColumn::new("flag", [CellValue::Bool(true)]),
        ViewportColumn::new("blob", [CellValue::Text("0xdead")]),
        ViewportColumn::new("ghost", [CellValue::Number(3.25), CellValue::Null]),
    ];

    let cells = render_viewport(&resolver, &schema(), &columns, &HashMap::new(), &theme);
    assert_eq!(
        cells,
        vec![
            vec![text("true")],
            vec![text("0xdead")],
            vec![text("3.25"), CellRenderInstruction::default()],
        ]
    );
}

#[test]
fn shares_one_registry_across_the_window() {
    let registry = Arc::new(FormatterRegistry::new(RegistryOptions {
        locale: "de-DE".to_string(),
        ..RegistryOptions::default()
    }));
    let resolver = CellStyleResolver::new(Arc::clone(&registry));
    let theme = GridTheme::default();
    let schema: BTreeMap<String, String> =
        [("n".to_string(), "float".to_string())].into_iter().collect();
    let values: Vec<CellValue<'_>> =
        (0..100).map(|i| CellValue::Number(i as f64 * 1000.0)).collect();
    let columns = vec![ViewportColumn::new("n", values)];

    let cells = render_viewport(&resolver, &schema, &columns, &HashMap::new(), &theme);
    assert_eq!(cells[0][2], text("2.000,00"));
    assert_eq!(registry.len(), 1);
}
