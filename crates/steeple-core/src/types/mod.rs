//! Type definitions for Steeple configuration

mod license_config;

pub use license_config::*;
