pub mod validation;

pub use validation::{validate_new_contact, validate_update};
