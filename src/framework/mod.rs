pub mod config;

pub mod data;
pub use data::DataError;

pub mod logging;
pub mod poise;
pub mod secrets;
