pub mod booking_source;
pub mod where_clause;

pub use booking_source::{BookingSource, RbPayloadClient};
pub use where_clause::{Condition, WhereClause, WhereField, WhereOperator};
