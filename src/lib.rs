//! TOPSIS Ranker - Multi-criteria ranking of alternatives
//!
//! This crate scores alternatives by their relative closeness to an ideal
//! solution (TOPSIS) and exposes the engine through a CLI and an HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
