pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod report;
pub mod repository;
