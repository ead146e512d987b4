#![doc(test(attr(deny(warnings))))]

//! Networth is a single-user income/expense ledger: a durable entry store, date-bucketed views
//! over it (today, a given month, last month) and a scheduler that detects day rollover.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod scheduler;
pub mod storage;
pub mod utils;

pub use crate::core::Session;
pub use domain::{Entry, EntryKind};
pub use errors::{NetworthError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and logs the build this process is running.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(build = %utils::build_info::current().summary(), "networth initialized");
    });
}
