//! Normalization of browser supplied date-times into the booking timezone.
//!
//! Reservations are stored and compared as wall-clock times in one fixed
//! timezone with second precision, rendered as `YYYY-MM-DD HH:MM:SS`.

use chrono::{DateTime, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult};

pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// タイムゾーン表記のない入力として受け付ける形式
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy)]
pub struct BookingClock {
    timezone: Tz,
}

impl BookingClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Parses `raw` into a wall-clock time of the booking timezone.
    ///
    /// Values carrying an offset (RFC 3339, `Z` included) are converted into
    /// the booking timezone. Values without one are taken to already be
    /// booking-local. Sub-second precision is dropped.
    pub fn parse(&self, raw: &str) -> AppResult<NaiveDateTime> {
        let raw = raw.trim();

        let parsed = DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(|dt| dt.with_timezone(&self.timezone).naive_local())
            .ok()
            .or_else(|| {
                LOCAL_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            })
            .ok_or_else(|| AppError::BadRequest(format!("invalid date-time: `{raw}`")))?;

        parsed
            .with_nanosecond(0)
            .ok_or_else(|| AppError::BadRequest(format!("invalid date-time: `{raw}`")))
    }

    pub fn normalize(&self, raw: &str) -> AppResult<String> {
        self.parse(raw).map(|dt| format(&dt))
    }
}

pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}
