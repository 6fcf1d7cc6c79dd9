pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod routes;
pub mod runner;
