//! Segment Engine HTTP Server Library
//!
//! Provides REST API components for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
