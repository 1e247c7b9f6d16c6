//! Execution gateway for the practice site's "run code" button.
//!
//! A request passes the per-client rate limiter, is validated and base64
//! encoded, submitted to a Judge0 instance, polled until the judge reports a
//! terminal status, and returned as a decoded [`model::verdict::Verdict`].

pub mod config;
pub mod constants;
pub mod dao;
pub mod macros;
pub mod middleware;
pub mod model;
pub mod service;
pub mod types;
pub mod utils;
