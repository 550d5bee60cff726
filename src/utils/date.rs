use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use regex::Regex;
use tracing::warn;

static ORDER_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid order date regex"));
static ORDER_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}):(\d{2}):(\d{2})").expect("valid order time regex"));

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses `DD-MM-YYYY`; anything else is the epoch date. Out-of-range days
/// and months roll over, so `31-02-2024` is the 2nd of March.
pub fn parse_order_date(fecha: Option<&str>) -> NaiveDate {
    let fecha = fecha.unwrap_or_default().trim();
    ORDER_DATE_RE
        .captures(fecha)
        .and_then(|caps| {
            let d: i64 = caps[1].parse().ok()?;
            let m: i32 = caps[2].parse().ok()?;
            let y: i32 = caps[3].parse().ok()?;

            let months = y * 12 + m - 1;
            let year = months.div_euclid(12);
            let month = months.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(TimeDelta::days(d - 1))
        })
        .unwrap_or_else(epoch_date)
}

/// Takes the first `HH:mm:ss` found in strings like
/// `0000-01-01 14:05:09 +0000 UTC` as an offset from midnight; anything else
/// is zero. Out-of-range fields carry into the next unit.
pub fn parse_order_time(hora: Option<&str>) -> TimeDelta {
    let hora = hora.unwrap_or_default().trim();
    ORDER_TIME_RE
        .captures(hora)
        .and_then(|caps| {
            let hh: i64 = caps[1].parse().ok()?;
            let mm: i64 = caps[2].parse().ok()?;
            let ss: i64 = caps[3].parse().ok()?;
            Some(TimeDelta::seconds(hh * 3600 + mm * 60 + ss))
        })
        .unwrap_or_else(TimeDelta::zero)
}

fn epoch_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

pub fn order_timestamp(fecha: Option<&str>, hora: Option<&str>) -> DateTime<Utc> {
    let midnight = parse_order_date(fecha).and_time(NaiveTime::MIN).and_utc();
    midnight
        .checked_add_signed(parse_order_time(hora))
        .unwrap_or(midnight)
}

/// Renders the UTC calendar date of `value` as `YYYY-MM-DD`, or `""` when
/// `value` is blank or not a recognizable date.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    match parse_utc(value) {
        Some(instant) => instant.format("%Y-%m-%d").to_string(),
        None => {
            warn!("Invalid date: {value}");
            String::new()
        }
    }
}

fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
