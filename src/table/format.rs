use chrono::{NaiveDateTime, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeStyle {
    /// `YYYY-MM-DD`
    DateOnly,
    /// `YYYY-MM-DD HH:MM:SS`
    Seconds,
    /// `YYYY-MM-DD HH:MM:SS.ffffff`
    Micros,
}

impl DateTimeStyle {
    /// Narrowest style that loses nothing for any of `values`: date-only when
    /// all sit at midnight, microseconds when any carries a fraction.
    pub fn for_values<'a>(values: impl Iterator<Item = &'a NaiveDateTime>) -> Self {
        values.fold(DateTimeStyle::DateOnly, |style, d| {
            if d.nanosecond() != 0 {
                DateTimeStyle::Micros
            } else if style == DateTimeStyle::DateOnly && d.time() != NaiveTime::MIN {
                DateTimeStyle::Seconds
            } else {
                style
            }
        })
    }
}

pub fn format_datetime(d: &NaiveDateTime, style: DateTimeStyle) -> String {
    match style {
        DateTimeStyle::DateOnly => d.format("%Y-%m-%d").to_string(),
        DateTimeStyle::Seconds => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        DateTimeStyle::Micros => d.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
    }
}

/// Shortest round-trip form, keeping a trailing `.0` on whole numbers.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        let s = if x > 0.0 { "inf" } else { "-inf" };
        s.to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn floats_keep_decimal_point() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn style_widens_to_what_the_values_need() {
        let midnight = at(0, 0, 0, 0);
        let morning = at(8, 30, 0, 0);
        let fraction = at(8, 30, 0, 500);

        assert_eq!(DateTimeStyle::for_values([midnight].iter()), DateTimeStyle::DateOnly);
        assert_eq!(
            DateTimeStyle::for_values([midnight, morning].iter()),
            DateTimeStyle::Seconds
        );
        assert_eq!(
            DateTimeStyle::for_values([fraction, morning].iter()),
            DateTimeStyle::Micros
        );
        assert_eq!(DateTimeStyle::for_values(std::iter::empty()), DateTimeStyle::DateOnly);
    }

    #[test]
    fn fractional_seconds_survive_formatting() {
        assert_eq!(
            format_datetime(&at(8, 30, 0, 500), DateTimeStyle::Micros),
            "2024-01-01 08:30:00.500000"
        );
        assert_eq!(
            format_datetime(&at(8, 30, 0, 0), DateTimeStyle::Micros),
            "2024-01-01 08:30:00.000000"
        );
    }
}
