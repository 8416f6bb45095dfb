pub mod booking;
pub mod identity;
pub mod reservation;
pub mod time;
