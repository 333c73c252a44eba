pub mod models;
pub mod repositories;

pub use models::{
    Address, Booking, BookingItem, BookingStatus, CatalogueItem, Customer, CustomerRef,
};
pub use repositories::{
    BookingSource, Condition, RbPayloadClient, WhereClause, WhereField, WhereOperator,
};
