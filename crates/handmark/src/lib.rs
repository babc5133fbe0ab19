//! Hand landmark extraction on top of external hand pose models.
//!
//! Landmark inference is not performed by this crate. A model integration implements the
//! [`Backend`][detector::Backend] trait and hands back normalized landmarks; this crate turns those
//! into pixel coordinates, computes distances between them, and can visualize the results.
//!
//! # Coordinates
//!
//! Landmarks produced by a [`Backend`][detector::Backend] are *normalized*: X and Y are in range
//! 0.0 to 1.0 relative to the image width and height, X points right and Y points *down*. Z is a
//! unitless relative depth. Pixel coordinates are integers computed from those by multiplying with
//! the image dimensions and rounding.
//!
//! # Environment Variables
//!
//! [`DetectorConfig::from_env`][config::DetectorConfig::from_env] reads the following overrides:
//!
//! * `HANDMARK_STATIC_IMAGE_MODE`: `true` or `false`.
//! * `HANDMARK_MAX_HANDS`: maximum number of hands reported per frame.
//! * `HANDMARK_MIN_DETECTION_CONFIDENCE`: hands with a lower presence score are dropped.
//! * `HANDMARK_MIN_TRACKING_CONFIDENCE`: forwarded to the backend.

use log::LevelFilter;

pub mod config;
pub mod detector;
pub mod distance;
pub mod error;
pub mod extract;
pub mod hand;
pub mod image;
pub mod landmark;
pub mod render;
pub mod timer;

pub use error::{Error, Result};

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and handmark will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` can be used to override this.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
