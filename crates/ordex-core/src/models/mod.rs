//! Data models for extracted orders and pipeline configuration.

pub mod config;
pub mod order;
