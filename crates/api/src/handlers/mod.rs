pub mod reports;
pub mod statistics;
pub mod v2;
