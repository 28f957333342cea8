pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod ingest;
pub mod replay;
pub mod state;
pub mod store;
pub mod types;
pub mod verify;
