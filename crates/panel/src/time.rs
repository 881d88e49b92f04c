//! Compact timestamps for bookmark cards.

use chrono::{Datelike, Duration};

use ayah_core::types::Timestamp;

use crate::config::Locale;

const TR_MONTHS: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

/// Full timestamp for tooltips: `DD.MM.YYYY HH:mm:ss`.
pub fn format_exact(at: Timestamp) -> String {
    at.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Short relative time in the style of social feeds.
///
/// Under a minute (or in the future) reads as "now", then minutes, then
/// hours; from one day on the date is shown, with the year only when it
/// differs from `now`'s.
pub fn format_relative(at: Timestamp, now: Timestamp, locale: Locale) -> String {
    let elapsed = now.signed_duration_since(at);

    if elapsed < Duration::minutes(1) {
        return match locale {
            Locale::En => "now".to_string(),
            Locale::Tr => "şimdi".to_string(),
        };
    }
    if elapsed < Duration::hours(1) {
        let minutes = elapsed.num_minutes();
        return match locale {
            Locale::En => format!("{minutes}m"),
            Locale::Tr => format!("{minutes} dk"),
        };
    }
    if elapsed < Duration::days(1) {
        let hours = elapsed.num_hours();
        return match locale {
            Locale::En => format!("{hours}h"),
            Locale::Tr => format!("{hours} sa"),
        };
    }

    let same_year = at.year() == now.year();
    match locale {
        Locale::En if same_year => at.format("%b %-d").to_string(),
        Locale::En => at.format("%b %-d, %Y").to_string(),
        Locale::Tr => {
            let month = TR_MONTHS[at.month0() as usize];
            if same_year {
                format!("{} {month}", at.day())
            } else {
                format!("{} {month} {}", at.day(), at.year())
            }
        }
    }
}
