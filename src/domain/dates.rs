//! Heuristic parsing of free-form listing dates (`Dec 2024`).

use once_cell::sync::Lazy;
use regex::Regex;
use time::{Date, Month};

static LISTING_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w{3})\s+(\d{4})").expect("listing date pattern is valid"));

const MONTHS: [(&str, Month); 12] = [
    ("jan", Month::January),
    ("feb", Month::February),
    ("mar", Month::March),
    ("apr", Month::April),
    ("may", Month::May),
    ("jun", Month::June),
    ("jul", Month::July),
    ("aug", Month::August),
    ("sep", Month::September),
    ("oct", Month::October),
    ("nov", Month::November),
    ("dec", Month::December),
];

/// Find a three-letter month abbreviation followed by a four-digit year anywhere
/// in `input` and return the first day of that month.
///
/// The pattern is searched, not anchored, so `"Dec 2024"` and `"posted Dec 2024"`
/// both match. A full month name such as `"December 2024"` does not, because the
/// three letters adjacent to the year (`ber`) are not an abbreviation.
pub fn parse_listing_date(input: &str) -> Option<Date> {
    let captures = LISTING_DATE.captures(input)?;
    let token = captures.get(1)?.as_str().to_ascii_lowercase();
    let year: i32 = captures.get(2)?.as_str().parse().ok()?;

    let month = MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|(_, month)| *month)?;

    Date::from_calendar_date(year, month, 1).ok()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_abbreviated_month_and_year() {
        assert_eq!(parse_listing_date("Dec 2024"), Some(date!(2024 - 12 - 01)));
        assert_eq!(parse_listing_date("Sep 2024"), Some(date!(2024 - 09 - 01)));
    }

    #[test]
    fn month_token_is_case_insensitive() {
        assert_eq!(parse_listing_date("dec 2024"), Some(date!(2024 - 12 - 01)));
        assert_eq!(parse_listing_date("NOV   2023"), Some(date!(2023 - 11 - 01)));
    }

    #[test]
    fn pattern_may_appear_inside_longer_text() {
        assert_eq!(
            parse_listing_date("Updated Oct 2022 (rev 2)"),
            Some(date!(2022 - 10 - 01))
        );
    }

    #[test]
    fn unrecognised_inputs_yield_none() {
        for input in ["unknown", "", "2024", "Foo 2024", "December 2024", "Dec 24"] {
            assert_eq!(parse_listing_date(input), None, "input `{input}`");
        }
    }
}
