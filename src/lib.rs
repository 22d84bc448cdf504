pub mod catalog;
pub mod db;
pub mod quiz;
pub mod server;
pub mod settings;
pub mod telemetry;
