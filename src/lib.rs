//! Coastwatch — coastal threat alert service.
//!
//! The core is [`location::resolve`], a total, deterministic mapping from a
//! location identifier to coordinates. Around it sit simulated or live coastal
//! readings ([`conditions`]), threshold alerts ([`alerts`]) and an HTTP API
//! ([`server`]).

pub mod alerts;
pub mod conditions;
pub mod config;
pub mod error;
pub mod location;
pub mod server;

pub use error::{CoastwatchError, Result};
