//! Core application modules
//!
//! This module contains configuration, logging, the text generator
//! abstraction and its backend implementations.

pub mod backends;
pub mod config;
pub mod generator;
pub mod logging;
