use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::{Result, StoreError};

/// The current calendar day in the user's timezone. Bucketing and counting
/// take this as an argument rather than reading the clock themselves.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a due-date token into a calendar day: `today`, `tomorrow`, `eow`,
/// `eom`, `+Nd`/`+Nw`, a weekday name (`fri`, `2:fri` for the one after
/// next), or `YYYY-MM-DD`.
pub fn parse_human_date(input: &str) -> Result<NaiveDate> {
    parse_human_date_from(input, today())
}

fn parse_human_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = Weekday::Sun.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            return Ok(if days_to_sunday >= 0 {
                today + Duration::days(days_to_sunday)
            } else {
                today + Duration::days(days_to_sunday + 7)
            });
        }
        "eom" => {
            let next_month = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            };
            return next_month
                .map(|d| d - Duration::days(1))
                .ok_or_else(|| StoreError::validation("could not compute end of month"));
        }
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw)
    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() >= 2 {
            let (num_str, unit) = rest.split_at(rest.len() - 1);
            let count: i64 = num_str
                .parse()
                .map_err(|_| StoreError::validation(format!("invalid relative date: {input}")))?;
            return match unit {
                "d" => Ok(today + Duration::days(count)),
                "w" => Ok(today + Duration::weeks(count)),
                _ => Err(StoreError::validation(format!(
                    "unknown unit in relative date: {unit}"
                ))),
            };
        }
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target_weekday) = parse_weekday_str(day_str) {
            let mut days_needed = target_weekday.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            // count = 1 means the next such weekday, count = 2 the one after.
            days_needed += (count - 1) * 7;
            return Ok(today + Duration::days(days_needed));
        }
    }

    // 4. Fallback to the standard format
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    Err(StoreError::validation(format!(
        "could not parse date: {input}"
    )))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<i64>().ok().map(|c| (c, day)),
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(StoreError::validation("invalid weekday")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        // A Friday.
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn keywords_resolve_against_anchor() {
        let today = anchor();
        assert_eq!(parse_human_date_from("today", today).unwrap(), today);
        assert_eq!(
            parse_human_date_from("tomorrow", today).unwrap(),
            today + Duration::days(1)
        );
        // Next Sunday from a Friday.
        assert_eq!(
            parse_human_date_from("eow", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()
        );
        assert_eq!(
            parse_human_date_from("eom", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
        );
    }

    #[test]
    fn relative_offsets() {
        let today = anchor();
        assert_eq!(
            parse_human_date_from("+3d", today).unwrap(),
            today + Duration::days(3)
        );
        assert_eq!(
            parse_human_date_from("+2w", today).unwrap(),
            today + Duration::weeks(2)
        );
        assert!(parse_human_date_from("+3x", today).is_err());
    }

    #[test]
    fn weekday_tokens() {
        let today = anchor(); // Friday
        // "fri" on a Friday means next Friday, not today.
        assert_eq!(
            parse_human_date_from("fri", today).unwrap(),
            today + Duration::days(7)
        );
        assert_eq!(
            parse_human_date_from("mon", today).unwrap(),
            today + Duration::days(3)
        );
        assert_eq!(
            parse_human_date_from("2:mon", today).unwrap(),
            today + Duration::days(10)
        );
    }

    #[test]
    fn iso_dates_and_garbage() {
        let today = anchor();
        assert_eq!(
            parse_human_date_from("2026-12-24", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()
        );
        assert!(matches!(
            parse_human_date_from("whenever", today),
            Err(StoreError::Validation(_))
        ));
    }
}
