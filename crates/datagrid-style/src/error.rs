pub type ConfigResult<T> = Result<T, ConfigError>;

/// Problems reported by strict config parsing and [`crate::ColumnStyleConfig::validate`].
///
/// Rendering never fails on these; the lenient path drops or clamps the offending value instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("fixed must be at most 20, got {0}")]
    FixedOutOfRange(u32),

    #[error("{field} must be a positive finite number, got {value}")]
    InvalidGradient { field: &'static str, value: f64 },

    #[error("unsupported time zone: {0}")]
    InvalidTimeZone(String),

    #[error("fractionalSecondDigits must be between 1 and 3, got {0}")]
    InvalidFractionalSecondDigits(u8),

    #[error("{field} is not a valid color: {value}")]
    InvalidColor { field: &'static str, value: String },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
