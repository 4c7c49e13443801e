/// Order of the numeric day/month/year components in a locale's short date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Locale information used by the number and date formatters.
///
/// Only the parts of a locale that change visible cell text are modelled: separators, the
/// numeric date ordering and whether the clock defaults to 12 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    pub id: &'static str,
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
    pub date_order: DateOrder,
    pub date_separator: char,
    /// Pad numeric day/month to two digits in default-style short dates.
    pub pad_short_date: bool,
    pub hour12: bool,
}

pub static EN_US: Locale = Locale {
    id: "en-US",
    decimal_separator: '.',
    thousands_separator: Some(','),
    date_order: DateOrder::MonthDayYear,
    date_separator: '/',
    pad_short_date: false,
    hour12: true,
};

pub static EN_GB: Locale = Locale {
    id: "en-GB",
    decimal_separator: '.',
    thousands_separator: Some(','),
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_short_date: true,
    hour12: false,
};

pub static DE_DE: Locale = Locale {
    id: "de-DE",
    decimal_separator: ',',
    thousands_separator: Some('.'),
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_short_date: true,
    hour12: false,
};

/// French (France) groups thousands with U+00A0 NO-BREAK SPACE.
pub static FR_FR: Locale = Locale {
    id: "fr-FR",
    decimal_separator: ',',
    thousands_separator: Some('\u{00A0}'),
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_short_date: true,
    hour12: false,
};

pub static ES_ES: Locale = Locale {
    id: "es-ES",
    decimal_separator: ',',
    thousands_separator: Some('.'),
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_short_date: false,
    hour12: false,
};

pub static ES_MX: Locale = Locale {
    id: "es-MX",
    decimal_separator: '.',
    thousands_separator: Some(','),
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_short_date: false,
    hour12: false,
};

pub static IT_IT: Locale = Locale {
    id: "it-IT",
    decimal_separator: ',',
    thousands_separator: Some('.'),
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
    pad_short_date: true,
    hour12: false,
};

/// Swiss variants share `'` grouping and `.` decimals.
pub static DE_CH: Locale = Locale {
    id: "de-CH",
    decimal_separator: '.',
    thousands_separator: Some('\''),
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_short_date: true,
    hour12: false,
};

pub static FR_CH: Locale = Locale {
    id: "fr-CH",
    decimal_separator: '.',
    thousands_separator: Some('\''),
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_short_date: true,
    hour12: false,
};

pub static IT_CH: Locale = Locale {
    id: "it-CH",
    decimal_separator: '.',
    thousands_separator: Some('\''),
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
    pad_short_date: true,
    hour12: false,
};

static ALL: [&Locale; 10] = [
    &EN_US, &EN_GB, &DE_DE, &DE_CH, &FR_FR, &FR_CH, &ES_ES, &ES_MX, &IT_IT, &IT_CH,
];

/// Canonicalize a locale tag to one of the shipped locale ids.
///
/// Accepts BCP-47 (`en-US`, `fr-FR-u-nu-latn`) and POSIX (`en_US.UTF-8`, `de_DE@euro`) spellings.
/// Region variants that aren't shipped fall back to the language's primary region.
fn normalize_locale_id(id: &str) -> Option<&'static str> {
    let mut key: String = id
        .trim()
        .chars()
        .map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() })
        .collect();
    if key.is_empty() {
        return None;
    }

    for marker in [".", "@", "-u-", "-x-"] {
        if let Some(idx) = key.find(marker) {
            key.truncate(idx);
        }
    }

    let exact = match key.as_str() {
        "en-us" | "en" => Some("en-US"),
        "en-gb" | "en-uk" => Some("en-GB"),
        "de-de" | "de" => Some("de-DE"),
        "de-ch" => Some("de-CH"),
        "fr-fr" | "fr" => Some("fr-FR"),
        "fr-ch" => Some("fr-CH"),
        "es-es" | "es" => Some("es-ES"),
        "es-mx" => Some("es-MX"),
        "it-it" | "it" => Some("it-IT"),
        "it-ch" => Some("it-CH"),
        _ => None,
    };
    if exact.is_some() {
        return exact;
    }

    match key.split('-').next().unwrap_or("") {
        "en" => Some("en-US"),
        "de" => Some("de-DE"),
        "fr" => Some("fr-FR"),
        "es" => Some("es-ES"),
        "it" => Some("it-IT"),
        _ => None,
    }
}

/// Look up a shipped locale by tag.
pub fn get_locale(id: &str) -> Option<&'static Locale> {
    let id = normalize_locale_id(id)?;
    ALL.iter().copied().find(|locale| locale.id == id)
}

/// Insert `sep` between groups of three digits, counting from the right.
///
/// `digits` must be ASCII digits only.
pub(crate) fn group_thousands(digits: &str, sep: Option<char>) -> String {
    let Some(sep) = sep else {
        return digits.to_string();
    };
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
    let first_group = match len % 3 {
        0 => 3,
        n => n,
    };
    out.push_str(&digits[..first_group]);
    let mut idx = first_group;
    while idx < len {
        out.push(sep);
        out.push_str(&digits[idx..idx + 3]);
        idx += 3;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_locale_spellings() {
        assert_eq!(normalize_locale_id("en-us"), Some("en-US"));
        assert_eq!(normalize_locale_id("en_US.UTF-8"), Some("en-US"));
        assert_eq!(normalize_locale_id("en_US@posix"), Some("en-US"));
        assert_eq!(normalize_locale_id("en-AU"), Some("en-US"));
        assert_eq!(normalize_locale_id("en_uk"), Some("en-GB"));
        assert_eq!(normalize_locale_id("de-AT"), Some("de-DE"));
        assert_eq!(normalize_locale_id("de_ch"), Some("de-CH"));
        assert_eq!(normalize_locale_id("fr-CA"), Some("fr-FR"));
        assert_eq!(normalize_locale_id("fr-FR-u-nu-latn"), Some("fr-FR"));
        assert_eq!(normalize_locale_id("es-AR"), Some("es-ES"));
        assert_eq!(normalize_locale_id("ja-JP"), None);
        assert_eq!(normalize_locale_id("  "), None);
    }

    #[test]
    fn every_canonical_id_resolves_to_its_locale() {
        for locale in ALL {
            assert_eq!(get_locale(locale.id).map(|l| l.id), Some(locale.id));
        }
    }

    #[test]
    fn groups_thousands_from_the_right() {
        assert_eq!(group_thousands("1", Some(',')), "1");
        assert_eq!(group_thousands("123", Some(',')), "123");
        assert_eq!(group_thousands("1234", Some(',')), "1,234");
        assert_eq!(group_thousands("123456", Some('.')), "123.456");
        assert_eq!(group_thousands("1234567", Some('\u{00A0}')), "1\u{00A0}234\u{00A0}567");
        assert_eq!(group_thousands("1234567", None), "1234567");
    }
}
