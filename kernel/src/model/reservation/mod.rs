use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumString, VariantNames};

pub mod event;

// 予約可能な部屋の一覧。文字列表現はデータベースと API で共通
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, VariantNames,
)]
pub enum Location {
    #[strum(serialize = "Auditorium")]
    Auditorium,
    #[strum(serialize = "De Windmolen 10p")]
    DeWindmolen,
    #[strum(serialize = "De Kasteeltuin 8p")]
    DeKasteeltuin,
    #[strum(serialize = "De Peel 4p")]
    DePeel,
    #[strum(serialize = "Huiskamer")]
    Huiskamer,
}

/// A booked interval in the booking timezone's wall clock.
///
/// Both ends are inclusive: two slots that merely touch are considered
/// overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        other.start <= self.end && other.end >= self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub title: String,
    pub contact_person: String,
    pub email: Option<String>,
    pub location: Location,
    pub slot: TimeSlot,
}
