use crate::model::{reservation::TimeSlot, time::BookingClock};
use chrono::{Datelike, NaiveTime, Weekday};
use shared::{
    config::BookingConfig,
    error::{AppError, AppResult},
};

/// Daily window in which rooms can be booked, Monday to Friday.
#[derive(Debug, Clone, Copy)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl BusinessHours {
    pub fn new(open_hour: u32, close_hour: u32) -> AppResult<Self> {
        let open = NaiveTime::from_hms_opt(open_hour, 0, 0);
        let close = NaiveTime::from_hms_opt(close_hour, 0, 0);
        match (open, close) {
            (Some(open), Some(close)) if open < close => Ok(Self { open, close }),
            _ => Err(AppError::ConversionEntityError(format!(
                "invalid business hours {open_hour}..{close_hour}"
            ))),
        }
    }

    pub fn check(&self, slot: &TimeSlot) -> AppResult<()> {
        if slot.start >= slot.end {
            return Err(AppError::BadRequest(
                "the end time must be after the start time".into(),
            ));
        }

        if matches!(slot.start.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(AppError::BadRequest(
                "reservations are only allowed on weekdays".into(),
            ));
        }

        // 終了時刻ちょうど（例: 18:00）は許可し、1 秒でも超えたら拒否する
        if slot.start.date() != slot.end.date()
            || slot.start.time() < self.open
            || slot.end.time() > self.close
        {
            return Err(AppError::BadRequest(format!(
                "reservations are only allowed between {} and {}",
                self.open.format("%H:%M"),
                self.close.format("%H:%M"),
            )));
        }

        Ok(())
    }
}

/// Everything a new reservation is checked against before it reaches storage.
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    clock: BookingClock,
    hours: BusinessHours,
}

impl BookingPolicy {
    pub fn new(clock: BookingClock, hours: BusinessHours) -> Self {
        Self { clock, hours }
    }

    pub fn from_config(cfg: &BookingConfig) -> AppResult<Self> {
        Ok(Self::new(
            BookingClock::new(cfg.timezone),
            BusinessHours::new(cfg.open_hour, cfg.close_hour)?,
        ))
    }

    pub fn clock(&self) -> &BookingClock {
        &self.clock
    }

    pub fn check(&self, slot: &TimeSlot) -> AppResult<()> {
        self.hours.check(slot)
    }
}
