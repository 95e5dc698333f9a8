pub mod config;
pub mod controller;
pub mod domain;
pub mod email_client;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use startup::run;
