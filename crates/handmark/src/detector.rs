//! Per-frame hand detection on top of a pluggable [`Backend`].

use crate::config::DetectorConfig;
use crate::extract::{self, LandmarkList};
use crate::hand::DetectionResult;
use crate::image::{Image, Resolution};
use crate::timer::Timer;
use crate::{Error, Result};

/// Trait implemented by hand pose models.
///
/// A backend receives every frame passed to [`HandDetector::find_hands`] along with the detector's
/// configuration, and returns the hands it found with *normalized* landmark coordinates.
///
/// `static_image_mode` and `min_tracking_confidence` are only meaningful to the model and are not
/// interpreted by [`HandDetector`].
pub trait Backend: Send + 'static {
    fn process(&mut self, image: &Image, config: &DetectorConfig)
        -> anyhow::Result<DetectionResult>;
}

/// A [`Backend`] that plays back previously recorded [`DetectionResult`]s.
///
/// Every call to [`Backend::process`] yields the next recorded frame, starting over after the last
/// one. With no recorded frames, every frame reports no hands.
#[derive(Debug, Clone, Default)]
pub struct ReplayBackend {
    frames: Vec<DetectionResult>,
    next: usize,
}

impl ReplayBackend {
    pub fn new(frames: Vec<DetectionResult>) -> Self {
        Self { frames, next: 0 }
    }

    /// Returns the number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Backend for ReplayBackend {
    fn process(&mut self, _: &Image, _: &DetectorConfig) -> anyhow::Result<DetectionResult> {
        if self.frames.is_empty() {
            return Ok(DetectionResult::empty());
        }

        let frame = self.frames[self.next].clone();
        self.next = (self.next + 1) % self.frames.len();
        Ok(frame)
    }
}

/// Runs a [`Backend`] on camera frames and converts its output to pixel coordinates.
///
/// Call [`HandDetector::find_hands`] once per frame, then [`HandDetector::find_position`] for every
/// hand of interest.
pub struct HandDetector {
    backend: Box<dyn Backend>,
    config: DetectorConfig,
    results: Option<DetectionResult>,
    resolution: Option<Resolution>,
    t_detect: Timer,
    t_extract: Timer,
}

impl HandDetector {
    /// Creates a detector running `backend` with the given configuration.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not pass
    /// [`DetectorConfig::validate`].
    pub fn new<B: Backend>(backend: B, config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        log::debug!("creating hand detector with {:?}", config);

        Ok(Self {
            backend: Box::new(backend),
            config,
            results: None,
            resolution: None,
            t_detect: Timer::new("detect"),
            t_extract: Timer::new("extract"),
        })
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs hand detection on `image`, replacing the results of the previous frame.
    ///
    /// Hands whose presence score is below `min_detection_confidence` are dropped, and at most
    /// `max_hands` hands are kept (in the order the backend reported them).
    ///
    /// Fails if `image` has a zero width or height, or if the backend fails. In both cases the
    /// results of the previous frame are discarded.
    pub fn find_hands(&mut self, image: &Image) -> anyhow::Result<&DetectionResult> {
        self.results = None;
        self.resolution = None;

        let res = image.resolution();
        if res.width() == 0 || res.height() == 0 {
            return Err(Error::InvalidDimensions {
                width: res.width(),
                height: res.height(),
            }
            .into());
        }

        let mut result = self
            .t_detect
            .time(|| self.backend.process(image, &self.config))?;
        let reported = result.len();

        let min_confidence = self.config.min_detection_confidence;
        result.retain(|hand| hand.presence() >= min_confidence);
        result.truncate(self.config.max_hands);
        log::trace!(
            "{}: backend reported {} hands, keeping {}",
            res,
            reported,
            result.len()
        );

        self.resolution = Some(res);
        Ok(self.results.insert(result))
    }

    /// Returns the hands found in the most recent frame, if [`HandDetector::find_hands`] has
    /// succeeded.
    pub fn results(&self) -> Option<&DetectionResult> {
        self.results.as_ref()
    }

    /// Returns the pixel landmarks of hand `hand_index` in the most recent frame.
    ///
    /// Returns an empty list if no frame has been processed yet or no hands were found. Fails with
    /// [`Error::InvalidHandIndex`] if hands were found, but fewer than `hand_index + 1`.
    pub fn find_position(&self, hand_index: usize) -> Result<LandmarkList> {
        let (results, res) = match (&self.results, self.resolution) {
            (Some(results), Some(res)) => (results, res),
            _ => return Ok(LandmarkList::empty()),
        };

        self.t_extract
            .time(|| extract::extract(results, res.width(), res.height(), hand_index))
    }

    /// Returns the detection and extraction timers.
    ///
    /// Displaying a timer with `{}` prints the average and resets it.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_detect, &self.t_extract].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::hand::{HandLandmarks, LandmarkIdx};
    use crate::image::Color;

    use super::*;

    fn frame() -> Image {
        Image::filled(Resolution::RES_VGA, Color::BLACK)
    }

    fn detector(frames: Vec<DetectionResult>) -> HandDetector {
        HandDetector::new(ReplayBackend::new(frames), DetectorConfig::default()).unwrap()
    }

    struct FailingBackend;

    impl Backend for FailingBackend {
        fn process(&mut self, _: &Image, _: &DetectorConfig) -> anyhow::Result<DetectionResult> {
            anyhow::bail!("model not loaded")
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = DetectorConfig {
            max_hands: 0,
            ..DetectorConfig::default()
        };
        let err = HandDetector::new(ReplayBackend::default(), config)
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn position_before_detection_is_empty() {
        let detector = detector(vec![DetectionResult::new(vec![HandLandmarks::uniform(
            0.5, 0.5,
        )])]);
        assert!(detector.results().is_none());
        assert!(detector.find_position(0).unwrap().is_empty());
        assert!(detector.find_position(3).unwrap().is_empty());
    }

    #[test]
    fn finds_positions() {
        let mut detector = detector(vec![DetectionResult::new(vec![
            HandLandmarks::uniform(0.5, 0.5),
            HandLandmarks::uniform(0.25, 0.75),
        ])]);
        assert_eq!(detector.find_hands(&frame()).unwrap().len(), 2);

        let first = detector.find_position(0).unwrap();
        assert_eq!(first.len(), 21);
        assert_eq!(first[LandmarkIdx::Wrist].position(), [320, 240]);
        let second = detector.find_position(1).unwrap();
        assert_eq!(second[LandmarkIdx::IndexFingerTip].position(), [160, 360]);

        let err = detector.find_position(2).unwrap_err();
        assert_eq!(err, Error::InvalidHandIndex { index: 2, hands: 2 });
    }

    #[test]
    fn no_hands_is_empty_for_any_index() {
        let mut detector = detector(vec![DetectionResult::empty()]);
        assert!(detector.find_hands(&frame()).unwrap().is_empty());
        assert!(detector.find_position(0).unwrap().is_empty());
        assert!(detector.find_position(1).unwrap().is_empty());
    }

    #[test]
    fn filters_by_confidence() {
        let mut detector = detector(vec![DetectionResult::new(vec![
            HandLandmarks::uniform(0.1, 0.1).with_presence(0.2),
            HandLandmarks::uniform(0.9, 0.9).with_presence(0.5),
        ])]);
        let result = detector.find_hands(&frame()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.hands()[0].presence(), 0.5);
    }

    #[test]
    fn truncates_to_max_hands() {
        let config = DetectorConfig {
            max_hands: 1,
            ..DetectorConfig::default()
        };
        let backend = ReplayBackend::new(vec![DetectionResult::new(vec![
            HandLandmarks::uniform(0.1, 0.1),
            HandLandmarks::uniform(0.9, 0.9),
        ])]);
        let mut detector = HandDetector::new(backend, config).unwrap();
        assert_eq!(detector.find_hands(&frame()).unwrap().len(), 1);
        assert_eq!(
            detector.find_position(0).unwrap()[LandmarkIdx::Wrist].position(),
            [64, 48]
        );
        assert!(detector.find_position(1).is_err());
    }

    #[test]
    fn rejects_empty_frame() {
        let mut detector = detector(vec![DetectionResult::new(vec![HandLandmarks::uniform(
            0.5, 0.5,
        )])]);
        detector.find_hands(&frame()).unwrap();

        let err = detector.find_hands(&Image::new(0, 480)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidDimensions {
                width: 0,
                height: 480
            })
        );
        assert!(detector.results().is_none());
        assert!(detector.find_position(0).unwrap().is_empty());
    }

    #[test]
    fn backend_errors_propagate() {
        let mut detector = HandDetector::new(FailingBackend, DetectorConfig::default()).unwrap();
        let err = detector.find_hands(&frame()).unwrap_err();
        assert_eq!(err.to_string(), "model not loaded");
        assert!(detector.find_position(0).unwrap().is_empty());
    }

    #[test]
    fn replay_cycles() {
        let one = DetectionResult::new(vec![HandLandmarks::uniform(0.5, 0.5)]);
        let mut backend = ReplayBackend::new(vec![one.clone(), DetectionResult::empty()]);
        let config = DetectorConfig::default();
        let image = frame();
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.process(&image, &config).unwrap(), one);
        assert!(backend.process(&image, &config).unwrap().is_empty());
        assert_eq!(backend.process(&image, &config).unwrap(), one);

        let mut empty = ReplayBackend::default();
        assert!(empty.is_empty());
        assert!(empty.process(&image, &config).unwrap().is_empty());
    }

    #[test]
    fn timers_record_frames() {
        let mut detector = detector(vec![DetectionResult::empty()]);
        detector.find_hands(&frame()).unwrap();
        detector.find_position(0).unwrap();
        let timers: Vec<_> = detector.timers().collect();
        assert_eq!(timers[0].name(), "detect");
        assert_eq!(timers[0].count(), 1);
        assert_eq!(timers[1].name(), "extract");
        assert_eq!(timers[1].count(), 1);
    }
}
