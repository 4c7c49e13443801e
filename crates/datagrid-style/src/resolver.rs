use std::sync::Arc;

use serde::{Deserialize, Serialize};

use datagrid_format::{CellFormat, CellValue, FormatterRegistry, SemanticType};

use crate::color::{alpha_composite, infer_foreground_from_background, Rgb};
use crate::config::{ColorMode, ColumnStyleConfig, NumberBgMode, NumberFgMode};
use crate::error::ConfigResult;
use crate::record::ColorRecord;
use crate::theme::GridTheme;

/// Width of a bar at (or beyond) its gradient denominator, in percent.
pub const MAX_BAR_WIDTH_PCT: f64 = 100.0;

/// What the host widget should render for one cell.
///
/// All fields empty means "render nothing special": that is what null cells resolve to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellRenderInstruction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_content: Option<RichContent>,
}

impl CellRenderInstruction {
    pub fn plain(text: Option<String>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Side a bar grows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarAnchor {
    Left,
    Right,
}

/// Non-plain-text cell content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RichContent {
    Link { href: String, text: String },
    Bold { text: String },
    Italics { text: String },
    /// A horizontal bar replacing the cell text. `color` is a CSS gradient.
    Bar {
        width_pct: f64,
        anchor: BarAnchor,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    /// Zero, negative zero and NaN are neither positive nor negative.
    fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// `clamp(|value / denominator|, 0, 1)`; 0 for unset, zero or non-finite denominators.
fn gradient_ratio(value: f64, denominator: Option<f64>) -> f64 {
    let Some(denominator) = denominator else {
        return 0.0;
    };
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = (value / denominator).abs();
    if ratio.is_nan() {
        0.0
    } else {
        ratio.min(1.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Maps a cell value plus its column's config to a [`CellRenderInstruction`].
///
/// Resolution is total: malformed or missing config degrades to no styling instead of failing.
#[derive(Debug, Clone)]
pub struct CellStyleResolver {
    registry: Arc<FormatterRegistry>,
}

impl Default for CellStyleResolver {
    fn default() -> Self {
        Self::new(Arc::new(FormatterRegistry::default()))
    }
}

impl CellStyleResolver {
    pub fn new(registry: Arc<FormatterRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<FormatterRegistry> {
        &self.registry
    }

    pub fn resolve(
        &self,
        ty: SemanticType,
        value: CellValue<'_>,
        config: &ColumnStyleConfig,
        theme: &GridTheme,
    ) -> CellRenderInstruction {
        if value.is_null() {
            return CellRenderInstruction::default();
        }

        match ty {
            SemanticType::Integer | SemanticType::Float => {
                self.resolve_number(ty, value, config, theme)
            }
            SemanticType::String => resolve_string(value, config, theme),
            SemanticType::Boolean => self.resolve_boolean(value, config, theme),
            SemanticType::Date | SemanticType::Datetime => {
                let (foreground_color, background_color) = single_color(config, theme);
                CellRenderInstruction {
                    text: self.registry.format(ty, value, &config.format),
                    foreground_color,
                    background_color,
                    rich_content: None,
                }
            }
        }
    }

    /// Resolve using the engine's type name. Unknown types show the raw value without styling.
    pub fn resolve_by_name(
        &self,
        type_name: &str,
        value: CellValue<'_>,
        config: &ColumnStyleConfig,
        theme: &GridTheme,
    ) -> CellRenderInstruction {
        match SemanticType::from_name(type_name) {
            Some(ty) => self.resolve(ty, value, config, theme),
            None => {
                log::debug!("unstyled cell in column of unknown type {type_name:?}");
                CellRenderInstruction::plain(value.to_display_string())
            }
        }
    }

    /// Like [`CellStyleResolver::resolve`], but rejects configs that fail
    /// [`ColumnStyleConfig::validate`].
    pub fn resolve_strict(
        &self,
        ty: SemanticType,
        value: CellValue<'_>,
        config: &ColumnStyleConfig,
        theme: &GridTheme,
    ) -> ConfigResult<CellRenderInstruction> {
        config.validate()?;
        Ok(self.resolve(ty, value, config, theme))
    }

    fn resolve_number(
        &self,
        ty: SemanticType,
        value: CellValue<'_>,
        config: &ColumnStyleConfig,
        theme: &GridTheme,
    ) -> CellRenderInstruction {
        let text = self.registry.format(ty, value, &config.format);
        let Some(number) = value.as_f64() else {
            return CellRenderInstruction::plain(text);
        };

        let sign = Sign::of(number);
        let (fg_record, bg_record) = match sign {
            Sign::Positive => (
                Some(config.pos_fg_color.as_ref().unwrap_or(&theme.pos_fg)),
                Some(config.pos_bg_color.as_ref().unwrap_or(&theme.pos_bg)),
            ),
            Sign::Negative => (
                Some(config.neg_fg_color.as_ref().unwrap_or(&theme.neg_fg)),
                Some(config.neg_bg_color.as_ref().unwrap_or(&theme.neg_bg)),
            ),
            Sign::Zero => (None, None),
        };

        let background = match config.number_bg_mode {
            Some(NumberBgMode::Gradient) => bg_record.map(|record| {
                let alpha = gradient_ratio(number, config.bg_gradient);
                alpha_composite(record.rgb, alpha, theme.background)
            }),
            Some(NumberBgMode::Color) => bg_record.map(|record| record.rgb),
            Some(NumberBgMode::Disabled) | None => None,
        };

        let foreground_color = match config.number_fg_mode {
            Some(NumberFgMode::Color) => fg_record.map(|record| record.hex.clone()),
            _ => inferred_foreground(background),
        };
        let background_color = background.map(Rgb::to_hex);

        if config.number_fg_mode == Some(NumberFgMode::Bar) {
            let width_pct = round2(gradient_ratio(number, config.fg_gradient) * MAX_BAR_WIDTH_PCT);
            let anchor = match sign {
                Sign::Negative => BarAnchor::Right,
                Sign::Positive | Sign::Zero => BarAnchor::Left,
            };
            return CellRenderInstruction {
                text: None,
                foreground_color,
                background_color,
                rich_content: Some(RichContent::Bar {
                    width_pct,
                    anchor,
                    color: fg_record.map(|record| record.gradient.clone()),
                }),
            };
        }

        CellRenderInstruction {
            text,
            foreground_color,
            background_color,
            rich_content: None,
        }
    }

    fn resolve_boolean(
        &self,
        value: CellValue<'_>,
        config: &ColumnStyleConfig,
        theme: &GridTheme,
    ) -> CellRenderInstruction {
        let text = self.registry.format(SemanticType::Boolean, value, &config.format);
        let foreground_color = match (value, config.number_fg_mode) {
            (CellValue::Bool(b), Some(NumberFgMode::Color)) => {
                let record = if b {
                    config.pos_fg_color.as_ref().unwrap_or(&theme.pos_fg)
                } else {
                    config.neg_fg_color.as_ref().unwrap_or(&theme.neg_fg)
                };
                Some(record.hex.clone())
            }
            _ => None,
        };

        CellRenderInstruction {
            text,
            foreground_color,
            ..CellRenderInstruction::default()
        }
    }
}

fn resolve_string(
    value: CellValue<'_>,
    config: &ColumnStyleConfig,
    theme: &GridTheme,
) -> CellRenderInstruction {
    let text = value.to_display_string();
    let rich_content = text.as_ref().and_then(|text| match config.cell_format() {
        Some(CellFormat::Link) => Some(RichContent::Link {
            href: text.clone(),
            text: text.clone(),
        }),
        Some(CellFormat::Bold) => Some(RichContent::Bold { text: text.clone() }),
        Some(CellFormat::Italics) => Some(RichContent::Italics { text: text.clone() }),
        Some(CellFormat::Custom) | None => None,
    });
    let (foreground_color, background_color) = single_color(config, theme);

    CellRenderInstruction {
        text,
        foreground_color,
        background_color,
        rich_content,
    }
}

/// Colors for string and date cells: `(foreground, background)`.
fn single_color(config: &ColumnStyleConfig, theme: &GridTheme) -> (Option<String>, Option<String>) {
    let record: &ColorRecord = config.color.as_ref().unwrap_or(&theme.color);
    match config.color_mode {
        Some(ColorMode::Foreground) => (Some(record.hex.clone()), None),
        Some(ColorMode::Background) => (
            Some(infer_foreground_from_background(record.rgb).to_string()),
            Some(record.hex.clone()),
        ),
        Some(ColorMode::Disabled) | None => (None, None),
    }
}

fn inferred_foreground(background: Option<Rgb>) -> Option<String> {
    background.map(|bg| infer_foreground_from_background(bg).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gradient_ratio_is_clamped_and_total() {
        assert_eq!(gradient_ratio(25.0, Some(10.0)), 1.0);
        assert_eq!(gradient_ratio(-5.0, Some(10.0)), 0.5);
        assert_eq!(gradient_ratio(5.0, Some(-10.0)), 0.5);
        assert_eq!(gradient_ratio(5.0, Some(0.0)), 0.0);
        assert_eq!(gradient_ratio(5.0, Some(f64::NAN)), 0.0);
        assert_eq!(gradient_ratio(5.0, Some(f64::INFINITY)), 0.0);
        assert_eq!(gradient_ratio(5.0, None), 0.0);
        assert_eq!(gradient_ratio(f64::NAN, Some(10.0)), 0.0);
        assert_eq!(gradient_ratio(f64::INFINITY, Some(10.0)), 1.0);
    }

    #[test]
    fn sign_treats_zero_and_nan_as_neither() {
        assert_eq!(Sign::of(5.0), Sign::Positive);
        assert_eq!(Sign::of(-5.0), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(f64::NAN), Sign::Zero);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn rich_content_serializes_with_a_kind_tag() {
        let bar = RichContent::Bar {
            width_pct: 50.0,
            anchor: BarAnchor::Right,
            color: None,
        };
        assert_eq!(
            serde_json::to_value(&bar).unwrap(),
            serde_json::json!({"kind": "bar", "width_pct": 50.0, "anchor": "right"})
        );
    }
}
