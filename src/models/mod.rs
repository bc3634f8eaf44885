pub mod countries;
pub mod data;

pub use countries::country_code_to_nationality;
pub use data::*;
