//! `placement-tracker` - keep track of job and placement applications
//!
//! This library holds the application records, persists them to a named
//! storage slot, and derives summary counts. The `placetrack` binary is a
//! thin command-line layer on top of it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod application;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod storage;
pub mod store;

pub use application::{ApplicationRecord, NewApplication, Outcome, Stage, Summary};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{MemorySlotStore, SlotStore, SqliteSlotStore};
pub use store::{ApplicationStore, Confirm, LoadOrigin, StoreOptions};
