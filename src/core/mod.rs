pub mod currency;
pub mod dates;
pub mod error;
pub mod money;
pub mod tenant;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use money::Cents;
pub use tenant::TenantContext;
