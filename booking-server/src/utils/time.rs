//! 时间工具函数: 业务时区转换
//!
//! Reservations carry restaurant-local `date`/`time` strings; everything the
//! engine compares is UTC Unix millis. Conversion happens here and nowhere else.

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 解析时区名称 (IANA)
pub fn parse_tz(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::validation(format!("Unknown timezone: {}", name)))
}

/// 本地日期时间 → Unix millis (业务时区)
///
/// Ambiguous times (fall back) resolve to the later instant.
/// A time inside a DST gap moves forward by the gap: 02:30 on a night that
/// jumps 02:00 → 03:00 becomes 03:30.
pub fn local_to_millis(naive: NaiveDateTime, tz: Tz) -> i64 {
    match naive.and_local_timezone(tz) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(_, later) => later.timestamp_millis(),
        LocalResult::None => {
            // 按跳跃前的偏移换算
            let offset_secs = tz
                .offset_from_local_datetime(&(naive - Duration::hours(3)))
                .earliest()
                .map(|o| o.fix().local_minus_utc())
                .unwrap_or(0);
            (naive - Duration::seconds(i64::from(offset_secs)))
                .and_utc()
                .timestamp_millis()
        }
    }
}

/// 日期 + 时间 → Unix millis (业务时区)
pub fn date_time_to_millis(date: NaiveDate, time: NaiveTime, tz: Tz) -> i64 {
    local_to_millis(date.and_time(time), tz)
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_time_to_millis(date, NaiveTime::MIN, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// Unix millis → 本地日期时间 (业务时区)
pub fn millis_to_local(millis: i64, tz: Tz) -> Option<NaiveDateTime> {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.naive_local())
}

/// 当前业务日期 (业务时区)
pub fn local_date_of(millis: i64, tz: Tz) -> Option<NaiveDate> {
    millis_to_local(millis, tz).map(|dt| dt.date())
}

/// Weekday as stored in operating hours: 0=Sunday..6=Saturday
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn madrid_evening_to_utc() {
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        let date = parse_date("2026-07-10").unwrap();
        let time = parse_time("20:00").unwrap();
        // CEST = UTC+2
        let expected = NaiveDate::from_ymd_opt(2026, 7, 10)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(date_time_to_millis(date, time, tz), expected);
    }

    #[test]
    fn nonexistent_local_time_moves_past_the_gap() {
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        let date = parse_date("2026-03-29").unwrap();
        let utc = |h, m| {
            NaiveDate::from_ymd_opt(2026, 3, 29)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis()
        };
        // 02:00–03:00 does not exist; 02:30 lands on 03:30 CEST
        let gap = date_time_to_millis(date, parse_time("02:30").unwrap(), tz);
        assert_eq!(gap, utc(1, 30));
        assert_eq!(gap, date_time_to_millis(date, parse_time("03:30").unwrap(), tz));
        // still ordered after the last valid minute before the jump
        assert!(gap > date_time_to_millis(date, parse_time("01:59").unwrap(), tz));
    }

    #[test]
    fn ambiguous_local_time_takes_the_later_instant() {
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        let date = parse_date("2026-10-25").unwrap();
        // 02:30 happens twice; the second one is CET = UTC+1
        let expected = NaiveDate::from_ymd_opt(2026, 10, 25)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(date_time_to_millis(date, parse_time("02:30").unwrap(), tz), expected);
    }

    #[test]
    fn day_bounds_are_half_open() {
        let tz: Tz = "UTC".parse().unwrap();
        let date = parse_date("2026-01-01").unwrap();
        assert_eq!(day_end_millis(date, tz) - day_start_millis(date, tz), 86_400_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_tz("Mars/Olympus").is_err());
    }

    #[test]
    fn weekday_starts_on_sunday() {
        // 2026-10-18 is a Sunday
        assert_eq!(weekday_index(parse_date("2026-10-18").unwrap()), 0);
        assert_eq!(weekday_index(parse_date("2026-10-17").unwrap()), 6);
    }
}
