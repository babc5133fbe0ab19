//! Hand detector configuration.

use std::{env, fmt::Display, str::FromStr};

use crate::{Error, Result};

const ENV_VAR_STATIC_IMAGE_MODE: &str = "HANDMARK_STATIC_IMAGE_MODE";
const ENV_VAR_MAX_HANDS: &str = "HANDMARK_MAX_HANDS";
const ENV_VAR_MIN_DETECTION_CONFIDENCE: &str = "HANDMARK_MIN_DETECTION_CONFIDENCE";
const ENV_VAR_MIN_TRACKING_CONFIDENCE: &str = "HANDMARK_MIN_TRACKING_CONFIDENCE";

/// Configuration of a [`HandDetector`][crate::detector::HandDetector].
///
/// The whole configuration is passed to the [`Backend`][crate::detector::Backend] on every frame.
/// [`max_hands`][Self::max_hands] and [`min_detection_confidence`][Self::min_detection_confidence]
/// are additionally enforced on the backend's output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Treat every frame as an unrelated still image instead of a video stream.
    pub static_image_mode: bool,
    /// Maximum number of hands reported per frame. Must be at least 1.
    pub max_hands: usize,
    /// Minimum presence score (0.0 to 1.0) for a hand to be reported.
    pub min_detection_confidence: f32,
    /// Minimum confidence (0.0 to 1.0) for the backend to keep tracking a hand between frames.
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            static_image_mode: false,
            max_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl DetectorConfig {
    /// Creates the default configuration and applies overrides from `HANDMARK_*` environment
    /// variables.
    ///
    /// The result is validated before it is returned.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        env_override(ENV_VAR_STATIC_IMAGE_MODE, &mut config.static_image_mode)?;
        env_override(ENV_VAR_MAX_HANDS, &mut config.max_hands)?;
        env_override(
            ENV_VAR_MIN_DETECTION_CONFIDENCE,
            &mut config.min_detection_confidence,
        )?;
        env_override(
            ENV_VAR_MIN_TRACKING_CONFIDENCE,
            &mut config.min_tracking_confidence,
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all values are in their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_hands == 0 {
            return Err(Error::InvalidConfig(
                "`max_hands` must be at least 1".into(),
            ));
        }
        check_confidence("min_detection_confidence", self.min_detection_confidence)?;
        check_confidence("min_tracking_confidence", self.min_tracking_confidence)?;
        Ok(())
    }
}

fn check_confidence(name: &str, value: f32) -> Result<()> {
    // Also rejects NaN.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "`{name}` must be in range 0.0 to 1.0, got {value}"
        )))
    }
}

fn env_override<T>(var: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(value) = env::var(var) else {
        return Ok(());
    };
    match value.trim().parse() {
        Ok(parsed) => {
            log::debug!("{var}={value} overrides detector configuration");
            *target = parsed;
            Ok(())
        }
        Err(e) => Err(Error::InvalidConfig(format!(
            "cannot parse {var}='{value}': {e}"
        ))),
    }
}
