//! Common test infrastructure for steeple-license tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Keys, dates, and fixed clocks
//! - `builders`: Config and store answer builders
//! - `mock_server`: Wiremock setup helpers for the licensing API
//! - `assertions`: Semantic assertions on cached license state

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod builders;
pub mod constants;
pub mod mock_server;

pub use assertions::*;
pub use builders::*;
pub use constants::*;
pub use mock_server::*;
