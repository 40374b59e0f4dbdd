// Library exports for EarthLens
// This allows integration tests and external code to use EarthLens modules

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod green;
pub mod nav;
pub mod reports;
pub mod routes;
pub mod state;
