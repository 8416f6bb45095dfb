use crate::model::reservation::{Location, TimeSlot};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub title: String,
    pub contact_person: String,
    pub email: Option<String>,
    pub location: Location,
    pub slot: TimeSlot,
}

/// Removal of a reservation whose owner has already been verified.
///
/// `contact_person` is the owner exactly as stored.
#[derive(Debug, new)]
pub struct DeleteReservation {
    pub location: Location,
    pub slot: TimeSlot,
    pub contact_person: String,
}
