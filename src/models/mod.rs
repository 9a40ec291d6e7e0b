//! API data models
//!
//! This module contains data structures for the relay's own HTTP API and
//! for the Gemini generateContent wire format.

pub mod api;
pub mod gemini;
