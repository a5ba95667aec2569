pub mod discount;
pub mod error;
pub mod weighted;
