#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use networth::{
    config::Config,
    core::{FixedClock, Session},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh data directory registered for cleanup at process exit.
pub fn temp_data_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens an isolated session whose clock starts at the given local date, noon.
pub fn session_at(year: i32, month: u32, day: u32, opening: f64) -> (Session, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at(year, month, day, 12, 0, 0).expect("valid clock"));
    let config = Config::default()
        .with_data_dir(temp_data_dir())
        .with_opening_balance(opening);
    let session = Session::open_with_clock(config, clock.clone()).expect("open session");
    (session, clock)
}
