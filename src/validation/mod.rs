pub mod expiry;
pub mod format;
pub mod mrz;

pub use expiry::{ExpiryValidator, REMINDER_DAYS};
pub use format::FormatValidator;
pub use mrz::MrzValidator;
