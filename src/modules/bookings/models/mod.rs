pub mod booking;

pub use booking::{
    Address, Booking, BookingItem, BookingStatus, CatalogueItem, Customer, CustomerRef,
};
