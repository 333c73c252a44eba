pub mod bookings;
pub mod fees;
pub mod health;
pub mod reports;
