pub mod form;
pub mod plan;
