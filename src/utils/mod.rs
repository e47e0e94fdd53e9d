pub mod form;
pub mod in_flight;
