#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
pub use error::{ExtremaError, Result};

mod utils;
pub use utils::RingBuffer;

mod tick;
pub use tick::{Classification, Extremum, Tick};

mod sink;
pub use sink::ExtremumSink;

mod config;
pub use config::DetectorConfig;

mod extremum_detector;
pub use extremum_detector::{ExtremumDetector, classify};
