pub mod error;
pub mod roman;
