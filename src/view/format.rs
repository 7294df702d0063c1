//! Display formatting for money, percentages and dates.

use chrono::{Datelike, NaiveDate};

use crate::config::CURRENCY_PREFIX;

const WEEKDAYS_ES: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "set", "oct", "nov", "dic",
];

/// Formats an amount as `S/. 15.75` — fixed prefix, exactly two
/// decimals, no thousands separators.
pub fn currency(amount: f64) -> String {
    format!("{CURRENCY_PREFIX} {amount:.2}")
}

/// Share of `count` over `total` with one decimal, e.g. `37.5%`.
/// A zero total renders as `0%` rather than dividing.
pub fn percentage(count: u32, total: u32) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", (count as f64 / total as f64) * 100.0)
}

/// Human date for table cells and toasts, e.g. `sáb 10 mar 2024`.
pub fn display_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_ES[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ES[date.month0() as usize];
    format!("{weekday} {:02} {month} {}", date.day(), date.year())
}
