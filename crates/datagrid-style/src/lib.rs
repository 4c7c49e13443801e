//! Per-cell styling for a datagrid over a columnar analytics view.
//!
//! Given a column's semantic type, its [`ColumnStyleConfig`] and a [`GridTheme`], the
//! [`CellStyleResolver`] turns each raw value into a [`CellRenderInstruction`]: formatted text
//! (via [`datagrid_format::FormatterRegistry`]), foreground/background colors, and optional rich
//! content such as links or bars.
//!
//! The [`color`] module holds the color math (OKLab blending, alpha compositing, contrast
//! inference) the resolver relies on.

pub mod color;

mod config;
mod error;
mod record;
mod resolver;
mod theme;
mod viewport;

pub use crate::color::Rgb;
pub use crate::config::{ColorMode, ColumnStyleConfig, NumberBgMode, NumberFgMode, MAX_FIXED};
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::record::{make_color_record, ColorRecord, GRADIENT_HUE_SHIFT};
pub use crate::resolver::{
    BarAnchor, CellRenderInstruction, CellStyleResolver, RichContent, MAX_BAR_WIDTH_PCT,
};
pub use crate::theme::GridTheme;
pub use crate::viewport::{render_viewport, ColumnSchema, ViewportColumn};

pub use datagrid_format::{CellValue, SemanticType};
