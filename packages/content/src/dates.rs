use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

use crate::locale::Locale;

/// Timestamp of a card date written as `MM/YYYY` or `YYYY`.
///
/// Missing or unparsable dates are `0` so they sort after every real date.
pub fn parse_card_date(value: Option<&str>) -> i64 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return 0;
    };
    let parts: Vec<&str> = value.split('/').collect();
    let date = match parts.as_slice() {
        [month, year] => month
            .trim()
            .parse::<u32>()
            .ok()
            .zip(year.trim().parse::<i32>().ok())
            .and_then(|(m, y)| NaiveDate::from_ymd_opt(y, m, 1)),
        [year] => year
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        _ => None,
    };
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Most recent first: end date descending, then start date descending.
pub fn by_recency(
    a_init: Option<&str>,
    a_end: Option<&str>,
    b_init: Option<&str>,
    b_end: Option<&str>,
) -> Ordering {
    parse_card_date(b_end)
        .cmp(&parse_card_date(a_end))
        .then_with(|| parse_card_date(b_init).cmp(&parse_card_date(a_init)))
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MONTHS_EN: [&str; 12] = [
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

/// Long date: `24 de setembro de 2025` / `September 24, 2025`.
pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    let index = date.month0() as usize;
    match locale {
        Locale::Pt => format!("{} de {} de {}", date.day(), MONTHS_PT[index], date.year()),
        Locale::En => format!("{} {}, {}", MONTHS_EN[index], date.day(), date.year()),
    }
}
