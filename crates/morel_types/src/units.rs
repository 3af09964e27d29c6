// Units & Locale - Display formatting descriptors consumed from the host
//
// The host hands the cards a unit-system descriptor and a locale. Neither is
// owned here; this module only types them and implements the locale-aware
// numeric formatting the cards render temperatures with.

use serde::{Deserialize, Serialize};

/// Temperature unit of the host's configured unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host unit-system descriptor. Only the temperature unit is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub temperature: TemperatureUnit,
}

impl UnitSystem {
    pub const METRIC: UnitSystem = UnitSystem {
        temperature: TemperatureUnit::Celsius,
    };
    pub const US_CUSTOMARY: UnitSystem = UnitSystem {
        temperature: TemperatureUnit::Fahrenheit,
    };
}

/// Numeric display format selected in the host's user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Follow the profile language (resolved by the host; rendered here
    /// with `.` decimal and `,` grouping).
    #[default]
    Language,
    /// 1,234,567.89
    CommaDecimal,
    /// 1.234.567,89
    DecimalComma,
    /// 1 234 567,89
    SpaceComma,
    /// No grouping, `.` decimal.
    None,
}

/// Host locale descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Locale {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub number_format: NumberFormat,
}

impl Locale {
    pub fn new(language: impl Into<String>, number_format: NumberFormat) -> Self {
        Self {
            language: language.into(),
            number_format,
        }
    }

    fn separators(&self) -> (char, Option<char>) {
        match self.number_format {
            NumberFormat::Language | NumberFormat::CommaDecimal => ('.', Some(',')),
            NumberFormat::DecimalComma => (',', Some('.')),
            NumberFormat::SpaceComma => (',', Some(' ')),
            NumberFormat::None => ('.', None),
        }
    }
}

/// Format a finite number for display.
///
/// Rounds to `max_fraction` digits, keeps at least `min_fraction` digits,
/// and applies the locale's decimal and grouping separators.
pub fn format_number(value: f64, locale: &Locale, min_fraction: usize, max_fraction: usize) -> String {
    let max_fraction = max_fraction.max(min_fraction);
    let rendered = format!("{value:.max_fraction$}");

    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
        None => (rendered, String::new()),
    };

    // Trim trailing zeros down to the minimum fraction width.
    let mut frac_part = frac_part;
    while frac_part.len() > min_fraction && frac_part.ends_with('0') {
        frac_part.pop();
    }

    let (decimal_sep, group_sep) = locale.separators();

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part.as_str()),
    };
    let grouped = match group_sep {
        Some(sep) => group_digits(digits, sep),
        None => digits.to_string(),
    };

    let mut out = String::new();
    out.push_str(sign);
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push(decimal_sep);
        out.push_str(&frac_part);
    }
    out
}

fn group_digits(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
