//! Application service layer - use cases, config, repositories, logging

pub mod app;
pub mod config;
pub mod logging;
pub mod repository;
