pub mod identity;
pub mod validation;
