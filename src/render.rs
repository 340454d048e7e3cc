//! Display formatting and the granularity cycle.
//!
//! Maps a [`Breakdown`](crate::age::Breakdown) to the three text slots a
//! subject renders into, under the currently selected granularity. Number
//! grouping and pluralization sit behind [`NumberLocale`] so the formatter
//! can be exercised without a real locale engine.

use serde::Deserialize;

use crate::age::Breakdown;

/// Display granularity for a subject.
///
/// The five values form a fixed cycle; [`Granularity::advance`] is the only
/// way a subject's mode ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    Days,
    MonthsDays,
    YearsMonths,
    Minutes,
    Seconds,
}

impl Granularity {
    /// Cyclic successor, wrapping from `Seconds` back to `Days`.
    pub fn advance(self) -> Self {
        match self {
            Self::Days => Self::MonthsDays,
            Self::MonthsDays => Self::YearsMonths,
            Self::YearsMonths => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds => Self::Days,
        }
    }

    /// Name shown on the toggle control and accepted in config files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::MonthsDays => "months-days",
            Self::YearsMonths => "years-months",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

/// Plural category of a number under some locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plural {
    One,
    Other,
}

/// Number formatting capability.
pub trait NumberLocale {
    fn format_integer(&self, n: u64) -> String;
    fn select_plural_form(&self, n: u64) -> Plural;
}

/// English defaults: comma grouping, singular only at exactly one.
pub struct EnLocale;

impl NumberLocale for EnLocale {
    fn format_integer(&self, n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    fn select_plural_form(&self, n: u64) -> Plural {
        if n == 1 { Plural::One } else { Plural::Other }
    }
}

/// The three text slots a subject renders into. Slots the current mode does
/// not use hold empty strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragments {
    pub years_text: String,
    pub months_text: String,
    pub days_text: String,
}

/// Formats one value with its pluralized unit name: `1 day`, `21 days`,
/// `1,234,567 minutes`.
pub fn unit(locale: &impl NumberLocale, name: &str, n: u64) -> String {
    let suffix = match locale.select_plural_form(n) {
        Plural::One => "",
        Plural::Other => "s",
    };
    format!("{} {name}{suffix}", locale.format_integer(n))
}

/// Maps a breakdown to the three display fragments for the given mode.
pub fn render(age: &Breakdown, mode: Granularity, locale: &impl NumberLocale) -> Fragments {
    match mode {
        Granularity::Days => Fragments {
            days_text: unit(locale, "day", age.full_days),
            ..Fragments::default()
        },
        Granularity::MonthsDays => Fragments {
            months_text: unit(locale, "month", u64::from(age.full_months)),
            days_text: unit(locale, "day", u64::from(age.days)),
            ..Fragments::default()
        },
        Granularity::YearsMonths => Fragments {
            years_text: unit(locale, "year", u64::from(age.years)),
            months_text: unit(locale, "month", u64::from(age.months)),
            days_text: unit(locale, "day", u64::from(age.days)),
        },
        Granularity::Minutes => Fragments {
            days_text: unit(locale, "minute", age.minutes),
            ..Fragments::default()
        },
        Granularity::Seconds => Fragments {
            days_text: unit(locale, "second", age.seconds),
            ..Fragments::default()
        },
    }
}
