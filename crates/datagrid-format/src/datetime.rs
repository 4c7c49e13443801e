use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::locale::{DateOrder, Locale};
use crate::options::{
    ColumnFormatOptions, DateField, DateTimeStyle, FieldSetting, FieldStyle, FieldValue,
};
use crate::SemanticType;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Custom-mode fields and their defaults. A `None` default omits the field unless it is set.
const DATE_FIELDS: [(DateField, Option<FieldValue>); 9] = [
    (DateField::Year, Some(FieldValue::Style(FieldStyle::TwoDigit))),
    (DateField::Month, Some(FieldValue::Style(FieldStyle::Numeric))),
    (DateField::Day, Some(FieldValue::Style(FieldStyle::Numeric))),
    (DateField::Weekday, None),
    (DateField::Hour, Some(FieldValue::Style(FieldStyle::Numeric))),
    (DateField::Minute, Some(FieldValue::Style(FieldStyle::Numeric))),
    (DateField::Second, Some(FieldValue::Style(FieldStyle::Numeric))),
    (DateField::Hour12, Some(FieldValue::Flag(true))),
    (DateField::FractionalSecondDigits, None),
];

/// Parse a `timeZone` setting into a fixed offset.
///
/// Accepts `UTC`, `GMT`, `Z`, `Etc/UTC`, `±HH:MM`, `±HHMM`, `±H` and the same offsets
/// prefixed with `UTC`/`GMT` (`UTC+5:30`). Region names (`America/New_York`) are not resolved.
pub fn parse_time_zone(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim().to_ascii_uppercase();
    if matches!(tz.as_str(), "UTC" | "GMT" | "Z" | "ETC/UTC" | "ETC/GMT") {
        return Some(Utc.fix());
    }

    let rest = tz
        .strip_prefix("UTC")
        .or_else(|| tz.strip_prefix("GMT"))
        .unwrap_or(&tz);
    let (sign, digits) = match rest.as_bytes().first().copied()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    // ASCII only from here on, so the byte split below lands on a char boundary.
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None if (1..=2).contains(&digits.len()) => (digits, "0"),
        None => return None,
    };
    if hours.is_empty() || minutes.is_empty() || minutes.contains(':') {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CustomFields {
    year: Option<FieldStyle>,
    month: Option<FieldStyle>,
    day: Option<FieldStyle>,
    weekday: Option<FieldStyle>,
    hour: Option<FieldStyle>,
    minute: Option<FieldStyle>,
    second: Option<FieldStyle>,
    hour12: Option<bool>,
    fractional_second_digits: Option<u8>,
}

impl CustomFields {
    fn resolve(options: &ColumnFormatOptions) -> Self {
        let mut fields = CustomFields::default();
        for (field, default) in DATE_FIELDS {
            fields.set(field, FieldSetting::resolve(options.date_field(field), default));
        }
        fields
    }

    fn set(&mut self, field: DateField, value: Option<FieldValue>) {
        let style = match value {
            Some(FieldValue::Style(style)) => Some(style),
            _ => None,
        };
        match field {
            DateField::Year => self.year = style,
            DateField::Month => self.month = style,
            DateField::Day => self.day = style,
            DateField::Weekday => self.weekday = style,
            DateField::Hour => self.hour = style,
            DateField::Minute => self.minute = style,
            DateField::Second => self.second = style,
            DateField::Hour12 => {
                self.hour12 = match value {
                    Some(FieldValue::Flag(flag)) => Some(flag),
                    _ => None,
                }
            }
            DateField::FractionalSecondDigits => {
                self.fractional_second_digits = match value {
                    Some(FieldValue::Digits(d)) if d > 0 => Some(d.min(3)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Styles {
        date: Option<DateTimeStyle>,
        time: Option<DateTimeStyle>,
    },
    Fields(CustomFields),
}

/// Locale-aware formatter for date and datetime columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatter {
    locale: &'static Locale,
    offset: FixedOffset,
    pattern: Pattern,
}

impl DateTimeFormatter {
    /// Build a formatter for `ty` (date or datetime) from a column's options.
    ///
    /// `date` columns render in UTC unless `timeZone` says otherwise; `datetime` columns fall back
    /// to `default_offset`.
    pub fn from_options(
        ty: SemanticType,
        options: &ColumnFormatOptions,
        locale: &'static Locale,
        default_offset: FixedOffset,
    ) -> Self {
        let type_offset = match ty {
            SemanticType::Date => Utc.fix(),
            _ => default_offset,
        };
        let offset = match options.time_zone.as_deref() {
            Some(tz) => parse_time_zone(tz).unwrap_or_else(|| {
                log::debug!("unsupported time zone {tz:?}; using {type_offset}");
                type_offset
            }),
            None => type_offset,
        };

        let pattern = if options.is_custom_date_format() {
            Pattern::Fields(CustomFields::resolve(options))
        } else {
            let (date_default, time_default) = match ty {
                SemanticType::Date => (Some(DateTimeStyle::Short), None),
                _ => (Some(DateTimeStyle::Short), Some(DateTimeStyle::Medium)),
            };
            let date = FieldSetting::resolve(options.date_style, date_default);
            let time = FieldSetting::resolve(options.time_style, time_default);
            match (date, time) {
                // Both components switched off: keep the date visible.
                (None, None) => Pattern::Styles {
                    date: Some(DateTimeStyle::Short),
                    time: None,
                },
                (date, time) => Pattern::Styles { date, time },
            }
        };

        Self {
            locale,
            offset,
            pattern,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Format milliseconds since the Unix epoch. Returns `None` when out of chrono's range.
    pub fn format_millis(&self, millis: i64) -> Option<String> {
        let dt = DateTime::from_timestamp_millis(millis)?.with_timezone(&self.offset);
        Some(match &self.pattern {
            Pattern::Styles { date, time } => self.format_styles(&dt, *date, *time),
            Pattern::Fields(fields) => self.format_fields(&dt, fields),
        })
    }

    fn format_styles(
        &self,
        dt: &DateTime<FixedOffset>,
        date: Option<DateTimeStyle>,
        time: Option<DateTimeStyle>,
    ) -> String {
        let date_text = date.map(|style| self.styled_date(dt, style));
        let time_text = time.map(|style| self.styled_time(dt, style));
        match (date_text, time_text) {
            (Some(d), Some(t)) => {
                let joiner = match date {
                    Some(DateTimeStyle::Full | DateTimeStyle::Long) => " at ",
                    _ => ", ",
                };
                format!("{d}{joiner}{t}")
            }
            (Some(d), None) => d,
            (None, Some(t)) => t,
            (None, None) => String::new(),
        }
    }

    fn styled_date(&self, dt: &DateTime<FixedOffset>, style: DateTimeStyle) -> String {
        let month_style = match style {
            DateTimeStyle::Short => {
                let pad = if self.locale.pad_short_date {
                    FieldStyle::TwoDigit
                } else {
                    FieldStyle::Numeric
                };
                return self.numeric_date(
                    Some(numeric(dt.month(), pad)),
                    Some(numeric(dt.day(), pad)),
                    Some(two_digit(dt.year().rem_euclid(100) as u32)),
                );
            }
            DateTimeStyle::Medium => FieldStyle::Short,
            DateTimeStyle::Long | DateTimeStyle::Full => FieldStyle::Long,
        };

        let body = self.textual_date(
            month_name(dt.month(), month_style),
            Some(dt.day().to_string()),
            Some(dt.year().to_string()),
        );
        if style == DateTimeStyle::Full {
            format!("{}, {body}", weekday_name(dt, FieldStyle::Long))
        } else {
            body
        }
    }

    fn styled_time(&self, dt: &DateTime<FixedOffset>, style: DateTimeStyle) -> String {
        let hour12 = self.locale.hour12;
        let mut out =
            format!("{}:{:02}", hour_text(dt.hour(), hour12, FieldStyle::Numeric), dt.minute());
        if style != DateTimeStyle::Short {
            out.push_str(&format!(":{:02}", dt.second()));
        }
        if hour12 {
            out.push(' ');
            out.push_str(am_pm(dt.hour()));
        }
        match style {
            DateTimeStyle::Long => {
                out.push(' ');
                out.push_str(&zone_label(self.offset, false));
            }
            DateTimeStyle::Full => {
                out.push(' ');
                out.push_str(&zone_label(self.offset, true));
            }
            DateTimeStyle::Short | DateTimeStyle::Medium => {}
        }
        out
    }

    fn format_fields(&self, dt: &DateTime<FixedOffset>, fields: &CustomFields) -> String {
        let year = fields.year.map(|style| match style {
            FieldStyle::TwoDigit => two_digit(dt.year().rem_euclid(100) as u32),
            _ => dt.year().to_string(),
        });
        let day = fields.day.map(|style| numeric(dt.day(), style));

        let mut date = match fields.month {
            Some(style @ (FieldStyle::Short | FieldStyle::Long | FieldStyle::Narrow)) => {
                self.textual_date(month_name(dt.month(), style), day, year)
            }
            month => self.numeric_date(month.map(|style| numeric(dt.month(), style)), day, year),
        };
        if let Some(style) = fields.weekday {
            let weekday = weekday_name(dt, style);
            date = if date.is_empty() {
                weekday
            } else {
                format!("{weekday}, {date}")
            };
        }

        let hour12 = fields.hour12.unwrap_or(self.locale.hour12);
        let mut time_parts = Vec::with_capacity(3);
        if let Some(style) = fields.hour {
            time_parts.push(hour_text(dt.hour(), hour12, style));
        }
        if let Some(style) = fields.minute {
            let padded = !time_parts.is_empty() || style == FieldStyle::TwoDigit;
            time_parts.push(pad_if(dt.minute(), padded));
        }
        if let Some(style) = fields.second {
            let padded = !time_parts.is_empty() || style == FieldStyle::TwoDigit;
            time_parts.push(pad_if(dt.second(), padded));
        }
        let mut time = time_parts.join(":");
        if let Some(digits) = fields.fractional_second_digits {
            let millis = format!("{:03}", dt.timestamp_subsec_millis().min(999));
            if !time.is_empty() {
                time.push('.');
            }
            time.push_str(&millis[..digits as usize]);
        }
        if fields.hour.is_some() && hour12 {
            time.push(' ');
            time.push_str(am_pm(dt.hour()));
        }

        match (date.is_empty(), time.is_empty()) {
            (false, false) => format!("{date}, {time}"),
            (false, true) => date,
            (true, _) => time,
        }
    }

    /// Join numeric day/month/year components in locale order.
    fn numeric_date(
        &self,
        month: Option<String>,
        day: Option<String>,
        year: Option<String>,
    ) -> String {
        let ordered = match self.locale.date_order {
            DateOrder::MonthDayYear => [month, day, year],
            DateOrder::DayMonthYear => [day, month, year],
            DateOrder::YearMonthDay => [year, month, day],
        };
        let sep = self.locale.date_separator.to_string();
        ordered.into_iter().flatten().collect::<Vec<_>>().join(&sep)
    }

    /// Join a month name with day/year (`Jan 2, 2024` or `2 Jan 2024`).
    fn textual_date(&self, month: String, day: Option<String>, year: Option<String>) -> String {
        match self.locale.date_order {
            DateOrder::MonthDayYear => {
                let mut out = month;
                if let Some(day) = &day {
                    out.push(' ');
                    out.push_str(day);
                }
                if let Some(year) = year {
                    out.push_str(if day.is_some() { ", " } else { " " });
                    out.push_str(&year);
                }
                out
            }
            DateOrder::DayMonthYear => join_parts([day, Some(month), year]),
            DateOrder::YearMonthDay => join_parts([year, Some(month), day]),
        }
    }
}

fn join_parts(parts: [Option<String>; 3]) -> String {
    parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

fn numeric(value: u32, style: FieldStyle) -> String {
    match style {
        FieldStyle::TwoDigit => two_digit(value),
        _ => value.to_string(),
    }
}

fn two_digit(value: u32) -> String {
    format!("{:02}", value % 100)
}

fn pad_if(value: u32, padded: bool) -> String {
    if padded {
        format!("{value:02}")
    } else {
        value.to_string()
    }
}

fn hour_text(hour: u32, hour12: bool, style: FieldStyle) -> String {
    if hour12 {
        let h = match hour % 12 {
            0 => 12,
            h => h,
        };
        numeric(h, style)
    } else {
        format!("{hour:02}")
    }
}

fn am_pm(hour: u32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

fn month_name(month: u32, style: FieldStyle) -> String {
    let name = MONTH_NAMES[(month as usize).saturating_sub(1) % 12];
    match style {
        FieldStyle::Long => name.to_string(),
        FieldStyle::Narrow => name[..1].to_string(),
        _ => name[..3].to_string(),
    }
}

fn weekday_name(dt: &DateTime<FixedOffset>, style: FieldStyle) -> String {
    let name = WEEKDAY_NAMES[dt.weekday().num_days_from_monday() as usize];
    match style {
        FieldStyle::Long => name.to_string(),
        FieldStyle::Narrow => name[..1].to_string(),
        _ => name[..3].to_string(),
    }
}

/// `UTC` / `GMT+5:30` for `timeStyle: long`; `Coordinated Universal Time` / `GMT+05:30` for full.
fn zone_label(offset: FixedOffset, long: bool) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return if long { "Coordinated Universal Time" } else { "UTC" }.to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let hours = secs.abs() / 3600;
    let minutes = secs.abs() % 3600 / 60;
    match (long, minutes) {
        (true, _) => format!("GMT{sign}{hours:02}:{minutes:02}"),
        (false, 0) => format!("GMT{sign}{hours}"),
        (false, _) => format!("GMT{sign}{hours}:{minutes:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{DE_DE, EN_US};

    // 2024-01-02T15:04:05.678Z, a Tuesday.
    const SAMPLE_MS: i64 = 1_704_207_845_678;

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    fn custom(json: &str) -> ColumnFormatOptions {
        let mut options: ColumnFormatOptions = serde_json::from_str(json).unwrap();
        options.format = Some(crate::CellFormat::Custom);
        options
    }

    #[test]
    fn parses_fixed_offset_time_zones() {
        assert_eq!(parse_time_zone("utc"), Some(utc()));
        assert_eq!(parse_time_zone("Etc/UTC"), Some(utc()));
        assert_eq!(parse_time_zone("+05:30"), FixedOffset::east_opt(19_800));
        assert_eq!(parse_time_zone("-0800"), FixedOffset::west_opt(28_800));
        assert_eq!(parse_time_zone("UTC+2"), FixedOffset::east_opt(7_200));
        assert_eq!(parse_time_zone("GMT-3:00"), FixedOffset::west_opt(10_800));
        assert_eq!(parse_time_zone("America/New_York"), None);
        assert_eq!(parse_time_zone("+25:00"), None);
        assert_eq!(parse_time_zone("+1:x"), None);
        assert_eq!(parse_time_zone(""), None);
    }

    #[test]
    fn non_ascii_offsets_are_rejected() {
        assert_eq!(parse_time_zone("+1é2"), None);
        assert_eq!(parse_time_zone("UTC-0é0"), None);
        assert_eq!(parse_time_zone("+０５:００"), None);
        assert_eq!(parse_time_zone("+05:3:0"), None);
        assert_eq!(parse_time_zone("+:30"), None);
    }

    #[test]
    fn type_defaults() {
        let options = ColumnFormatOptions::default();
        let date = DateTimeFormatter::from_options(SemanticType::Date, &options, &EN_US, utc());
        assert_eq!(date.format_millis(SAMPLE_MS).unwrap(), "1/2/24");

        let datetime =
            DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(datetime.format_millis(SAMPLE_MS).unwrap(), "1/2/24, 3:04:05 PM");
    }

    #[test]
    fn style_overrides_and_disabled_components() {
        let options: ColumnFormatOptions =
            serde_json::from_str(r#"{"dateStyle": "full", "timeStyle": "long"}"#).unwrap();
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(
            fmt.format_millis(SAMPLE_MS).unwrap(),
            "Tuesday, January 2, 2024 at 3:04:05 PM UTC"
        );

        let options: ColumnFormatOptions =
            serde_json::from_str(r#"{"dateStyle": "disabled", "timeStyle": "short"}"#).unwrap();
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "3:04 PM");

        let options: ColumnFormatOptions =
            serde_json::from_str(r#"{"dateStyle": "medium", "timeStyle": "disabled"}"#).unwrap();
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "Jan 2, 2024");
    }

    #[test]
    fn time_zone_shifts_wall_clock_time() {
        let options: ColumnFormatOptions =
            serde_json::from_str(r#"{"timeZone": "+05:30", "timeStyle": "long"}"#).unwrap();
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "1/2/24, 8:34:05 PM GMT+5:30");
    }

    #[test]
    fn unknown_time_zone_uses_type_offset() {
        let options: ColumnFormatOptions =
            serde_json::from_str(r#"{"timeZone": "Mars/Olympus"}"#).unwrap();
        let default = FixedOffset::east_opt(3600).unwrap();
        let fmt =
            DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, default);
        assert_eq!(fmt.offset(), default);

        let fmt = DateTimeFormatter::from_options(SemanticType::Date, &options, &EN_US, default);
        assert_eq!(fmt.offset(), utc());
    }

    #[test]
    fn custom_mode_uses_field_defaults() {
        let fmt =
            DateTimeFormatter::from_options(SemanticType::Datetime, &custom("{}"), &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "1/2/24, 3:04:05 PM");
    }

    #[test]
    fn custom_mode_fields_can_be_disabled_or_restyled() {
        let options = custom(
            r#"{"year": "numeric", "month": "long", "weekday": "short",
                "second": "disabled", "hour12": false}"#,
        );
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "Tue, January 2, 2024, 15:04");

        let options = custom(
            r#"{"year": "disabled", "month": "disabled", "day": "disabled",
                "fractionalSecondDigits": 2}"#,
        );
        let fmt = DateTimeFormatter::from_options(SemanticType::Datetime, &options, &EN_US, utc());
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "3:04:05.67 PM");
    }

    #[test]
    fn locale_orders_numeric_dates() {
        let fmt = DateTimeFormatter::from_options(
            SemanticType::Date,
            &ColumnFormatOptions::default(),
            &DE_DE,
            utc(),
        );
        assert_eq!(fmt.format_millis(SAMPLE_MS).unwrap(), "02.01.24");
    }

    #[test]
    fn out_of_range_timestamps_are_rejected() {
        let fmt = DateTimeFormatter::from_options(
            SemanticType::Datetime,
            &ColumnFormatOptions::default(),
            &EN_US,
            utc(),
        );
        assert_eq!(fmt.format_millis(i64::MAX), None);
    }
}
