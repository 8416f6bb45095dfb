use garde::Validate;
use kernel::model::{
    identity::ContactPerson,
    reservation::{event::CreateReservation, Location, Reservation, TimeSlot},
    time::{self, BookingClock},
};
use serde::{Deserialize, Deserializer, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

// 予約一覧・作成結果として返す型。フィールド名はフロントエンドに合わせる
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationResponse {
    #[serde(rename = "Titel")]
    pub title: String,
    #[serde(rename = "Contactpersoon")]
    pub contact_person: String,
    #[serde(rename = "E_mail", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Locatie")]
    pub location: String,
    #[serde(rename = "Start_DT")]
    pub start: String,
    #[serde(rename = "End_DT")]
    pub end: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            title,
            contact_person,
            email,
            location,
            slot,
        } = value;
        Self {
            title,
            contact_person,
            email,
            location: location.to_string(),
            start: time::format(&slot.start),
            end: time::format(&slot.end),
        }
    }
}

// 一覧ではメールアドレスを返さない
#[derive(Debug, Serialize)]
pub struct ReservationSummary {
    #[serde(rename = "Titel")]
    pub title: String,
    #[serde(rename = "Contactpersoon")]
    pub contact_person: String,
    #[serde(rename = "Locatie")]
    pub location: String,
    #[serde(rename = "Start_DT")]
    pub start: String,
    #[serde(rename = "End_DT")]
    pub end: String,
}

impl From<Reservation> for ReservationSummary {
    fn from(value: Reservation) -> Self {
        Self {
            title: value.title,
            contact_person: value.contact_person,
            location: value.location.to_string(),
            start: time::format(&value.slot.start),
            end: time::format(&value.slot.end),
        }
    }
}

// 旧バージョンのフロントエンドが送るフィールド名も alias で受け付ける
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateReservationRequest {
    #[serde(rename = "Contactpersoon", alias = "contactperson", deserialize_with = "null_as_empty")]
    #[garde(length(min = 1))]
    pub contact_person: String,
    #[serde(rename = "E_mail", alias = "email")]
    #[garde(skip)]
    pub email: Option<String>,
    #[serde(rename = "Titel", alias = "title", deserialize_with = "null_as_empty")]
    #[garde(length(min = 1))]
    pub title: String,
    #[serde(
        rename = "Start_DT",
        alias = "Start_Date_Time",
        alias = "start-date",
        deserialize_with = "null_as_empty"
    )]
    #[garde(length(min = 1))]
    pub start: String,
    #[serde(
        rename = "End_DT",
        alias = "End_Date_Time",
        alias = "end-date",
        deserialize_with = "null_as_empty"
    )]
    #[garde(length(min = 1))]
    pub end: String,
    #[serde(rename = "Locatie", alias = "location", deserialize_with = "null_as_empty")]
    #[garde(length(min = 1))]
    pub location: String,
}

impl CreateReservationRequest {
    pub fn into_event(self, clock: &BookingClock) -> AppResult<CreateReservation> {
        let CreateReservationRequest {
            contact_person,
            email,
            title,
            start,
            end,
            location,
        } = self;

        let contact_person = ContactPerson::new(&contact_person)
            .ok_or_else(|| AppError::BadRequest("contact person must not be blank".into()))?;
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(CreateReservation::new(
            title.trim().to_string(),
            contact_person.as_str().to_string(),
            email,
            parse_location(&location)?,
            TimeSlot::new(clock.parse(&start)?, clock.parse(&end)?),
        ))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DeleteReservationQuery {
    #[serde(rename = "Start_DT", alias = "start")]
    #[garde(length(min = 1))]
    pub start: String,
    #[serde(rename = "End_DT", alias = "end")]
    #[garde(length(min = 1))]
    pub end: String,
    #[serde(rename = "Locatie", alias = "location")]
    #[garde(length(min = 1))]
    pub location: String,
    // フロントエンドが付けて送ってくるが照合には使わない
    #[serde(rename = "Titel", alias = "title")]
    #[garde(skip)]
    pub title: Option<String>,
}

impl DeleteReservationQuery {
    pub fn into_key(self, clock: &BookingClock) -> AppResult<(Location, TimeSlot)> {
        Ok((
            parse_location(&self.location)?,
            TimeSlot::new(clock.parse(&self.start)?, clock.parse(&self.end)?),
        ))
    }
}

fn parse_location(raw: &str) -> AppResult<Location> {
    Location::from_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("unknown location: `{}`", raw.trim())))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
