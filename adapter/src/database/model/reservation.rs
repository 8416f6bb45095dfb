use kernel::model::reservation::{Location, Reservation, TimeSlot};
use shared::error::AppError;
use sqlx::types::chrono::NaiveDateTime;
use std::str::FromStr;

// reservations テーブルの 1 行分
#[derive(Debug, sqlx::FromRow)]
pub struct ReservationRow {
    pub title: String,
    pub contact_person: String,
    pub email: Option<String>,
    pub location: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            title,
            contact_person,
            email,
            location,
            start_time,
            end_time,
        } = value;
        let location = Location::from_str(&location).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown location stored: `{location}`"))
        })?;
        Ok(Reservation {
            title,
            contact_person,
            email,
            location,
            slot: TimeSlot::new(start_time, end_time),
        })
    }
}
