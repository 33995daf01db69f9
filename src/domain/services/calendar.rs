use chrono::{Duration, NaiveDate};

/// Calendar dates covered by a stay, as the half-open interval
/// `[check_in, check_out)`. The checkout day itself stays bookable because
/// the guest vacates that morning.
pub fn dates_in_range(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut day = check_in;
    while day < check_out {
        dates.push(day);
        day += Duration::days(1);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn checkout_day_is_excluded() {
        let dates = dates_in_range(d("2024-01-10"), d("2024-01-13"));
        assert_eq!(dates, vec![d("2024-01-10"), d("2024-01-11"), d("2024-01-12")]);
    }

    #[test]
    fn same_day_range_is_empty() {
        assert!(dates_in_range(d("2024-01-10"), d("2024-01-10")).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(dates_in_range(d("2024-01-13"), d("2024-01-10")).is_empty());
    }
}
