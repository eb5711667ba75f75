pub mod analytics;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod providers;
