use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use datagrid_format::CellValue;

use crate::config::ColumnStyleConfig;
use crate::resolver::{CellRenderInstruction, CellStyleResolver};
use crate::theme::GridTheme;

/// The engine's view schema: column name to type name.
pub trait ColumnSchema {
    fn semantic_type(&self, column: &str) -> Option<&str>;
}

impl<S: BuildHasher> ColumnSchema for HashMap<String, String, S> {
    fn semantic_type(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl ColumnSchema for BTreeMap<String, String> {
    fn semantic_type(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

/// One column of a viewport window, as fetched from the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportColumn<'a> {
    pub name: &'a str,
    pub values: Vec<CellValue<'a>>,
}

impl<'a> ViewportColumn<'a> {
    pub fn new(name: &'a str, values: impl IntoIterator<Item = CellValue<'a>>) -> Self {
        Self {
            name,
            values: values.into_iter().collect(),
        }
    }
}

/// Resolve every cell of a viewport window, column-major.
///
/// Columns missing from `configs` use the default config. Columns missing from the schema, or
/// with a type name outside the known kinds, show their raw values.
pub fn render_viewport<S>(
    resolver: &CellStyleResolver,
    schema: &S,
    columns: &[ViewportColumn<'_>],
    configs: &HashMap<String, ColumnStyleConfig>,
    theme: &GridTheme,
) -> Vec<Vec<CellRenderInstruction>>
where
    S: ColumnSchema + ?Sized,
{
    let default_config = ColumnStyleConfig::default();
    columns
        .iter()
        .map(|column| {
            let config = configs.get(column.name).unwrap_or(&default_config);
            match schema.semantic_type(column.name) {
                Some(type_name) => column
                    .values
                    .iter()
                    .map(|&value| resolver.resolve_by_name(type_name, value, config, theme))
                    .collect(),
                None => {
                    log::debug!("column {:?} is not in the schema", column.name);
                    column
                        .values
                        .iter()
                        .map(|value| CellRenderInstruction::plain(value.to_display_string()))
                        .collect()
                }
            }
        })
        .collect()
}
