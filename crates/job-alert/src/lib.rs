pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod profiles;
pub mod telemetry;
