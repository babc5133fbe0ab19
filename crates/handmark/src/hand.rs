//! Hand landmarks as reported by a hand pose model.

use nalgebra::{Point2, Rotation2, Vector2};

use crate::landmark::{Landmark, Landmarks};
use crate::{Error, Result};

/// The number of landmarks a hand pose model outputs for every hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand pose landmarks.
///
/// The discriminant of each variant is its landmark id (`LandmarkIdx::ThumbTip as usize == 4`).
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkIdx {
    /// All landmarks, in id order.
    pub const ALL: [LandmarkIdx; NUM_LANDMARKS] = {
        use LandmarkIdx::*;
        [
            Wrist,
            ThumbCmc,
            ThumbMcp,
            ThumbIp,
            ThumbTip,
            IndexFingerMcp,
            IndexFingerPip,
            IndexFingerDip,
            IndexFingerTip,
            MiddleFingerMcp,
            MiddleFingerPip,
            MiddleFingerDip,
            MiddleFingerTip,
            RingFingerMcp,
            RingFingerPip,
            RingFingerDip,
            RingFingerTip,
            PinkyMcp,
            PinkyPip,
            PinkyDip,
            PinkyTip,
        ]
    };

    /// The five fingertips, thumb first.
    pub const FINGERTIPS: [LandmarkIdx; 5] = [
        LandmarkIdx::ThumbTip,
        LandmarkIdx::IndexFingerTip,
        LandmarkIdx::MiddleFingerTip,
        LandmarkIdx::RingFingerTip,
        LandmarkIdx::PinkyTip,
    ];

    /// Returns the landmark with id `id`, or [`None`] if `id` is not in range 0 to 20.
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for LandmarkIdx {
    type Error = Error;

    fn try_from(id: usize) -> Result<Self> {
        Self::from_id(id).ok_or(Error::UnknownLandmark { id })
    }
}

pub(crate) const PALM_LANDMARKS: &[LandmarkIdx] = {
    use LandmarkIdx::*;
    &[
        Wrist,
        ThumbCmc,
        IndexFingerMcp,
        MiddleFingerMcp,
        RingFingerMcp,
        PinkyMcp,
    ]
};

/// Pairs of landmarks connected by bones, used for drawing.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// The 21 normalized landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    landmarks: Landmarks,
    presence: f32,
    raw_handedness: f32,
}

impl HandLandmarks {
    /// Creates a hand from exactly [`NUM_LANDMARKS`] landmarks in id order.
    ///
    /// The hand starts out with a presence score of 1.0 and a neutral raw handedness of 0.5.
    pub fn from_landmarks<I>(landmarks: I) -> Result<Self>
    where
        I: IntoIterator<Item = Landmark>,
    {
        let landmarks = landmarks.into_iter().collect::<Vec<_>>();
        if landmarks.len() != NUM_LANDMARKS {
            return Err(Error::LandmarkCount {
                expected: NUM_LANDMARKS,
                actual: landmarks.len(),
            });
        }

        let mut lms = Landmarks::new(NUM_LANDMARKS);
        for (index, lm) in landmarks.into_iter().enumerate() {
            lms.set(index, lm);
        }
        Ok(Self {
            landmarks: lms,
            presence: 1.0,
            raw_handedness: 0.5,
        })
    }

    /// Creates a hand whose landmarks all sit at the same normalized position.
    pub fn uniform(x: f32, y: f32) -> Self {
        let mut landmarks = Landmarks::new(NUM_LANDMARKS);
        for index in 0..NUM_LANDMARKS {
            landmarks.set(index, Landmark::from_xy(x, y));
        }
        Self {
            landmarks,
            presence: 1.0,
            raw_handedness: 0.5,
        }
    }

    /// Sets the presence score (the model's confidence that this is a hand).
    pub fn with_presence(self, presence: f32) -> Self {
        Self { presence, ..self }
    }

    /// Sets the raw handedness score. Values above 0.5 indicate a right hand.
    pub fn with_raw_handedness(self, raw_handedness: f32) -> Self {
        Self {
            raw_handedness,
            ..self
        }
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    #[inline]
    pub fn landmark(&self, idx: LandmarkIdx) -> Landmark {
        self.landmarks.get(idx.id())
    }

    #[inline]
    pub fn presence(&self) -> f32 {
        self.presence
    }

    #[inline]
    pub fn raw_handedness(&self) -> f32 {
        self.raw_handedness
    }

    /// Returns the estimated handedness of the hand in the image.
    ///
    /// This assumes that the camera image was passed to the model as-is (not mirrored).
    pub fn handedness(&self) -> Handedness {
        if self.raw_handedness > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    /// Computes the center of the palm by averaging the landmarks surrounding it.
    pub fn palm_center(&self) -> [f32; 3] {
        let mut pos = [0.0; 3];
        for idx in PALM_LANDMARKS {
            let lm = self.landmark(*idx).position();
            for (acc, c) in pos.iter_mut().zip(lm) {
                *acc += c / PALM_LANDMARKS.len() as f32;
            }
        }
        pos
    }

    /// Computes the clockwise rotation of the palm compared to an upright position.
    ///
    /// A rotation of 0° means that fingers are pointed upwards. The angle is computed in normalized
    /// coordinates, so it is only exact for images with a square aspect ratio.
    pub fn rotation_radians(&self) -> f32 {
        let p = self.landmark(LandmarkIdx::MiddleFingerMcp);
        let finger = Point2::new(p.x(), p.y());
        let p = self.landmark(LandmarkIdx::Wrist);
        let wrist = Point2::new(p.x(), p.y());

        let rel = wrist - finger;
        Rotation2::rotation_between(&Vector2::y(), &rel).angle()
    }
}

/// All hands a model detected in a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionResult {
    hands: Vec<HandLandmarks>,
}

impl DetectionResult {
    pub fn new(hands: Vec<HandLandmarks>) -> Self {
        Self { hands }
    }

    /// A result without any hands.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of detected hands.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn hands(&self) -> &[HandLandmarks] {
        &self.hands
    }

    pub fn get(&self, hand_index: usize) -> Option<&HandLandmarks> {
        self.hands.get(hand_index)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &HandLandmarks> {
        self.hands.iter()
    }

    pub fn push(&mut self, hand: HandLandmarks) {
        self.hands.push(hand);
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&HandLandmarks) -> bool) {
        self.hands.retain(f);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.hands.truncate(len);
    }
}

impl FromIterator<HandLandmarks> for DetectionResult {
    fn from_iter<T: IntoIterator<Item = HandLandmarks>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn ids() {
        assert_eq!(LandmarkIdx::Wrist.id(), 0);
        assert_eq!(LandmarkIdx::ThumbTip.id(), 4);
        assert_eq!(LandmarkIdx::IndexFingerTip.id(), 8);
        assert_eq!(LandmarkIdx::MiddleFingerTip.id(), 12);
        assert_eq!(LandmarkIdx::RingFingerTip.id(), 16);
        assert_eq!(LandmarkIdx::PinkyTip.id(), 20);
        for (id, idx) in LandmarkIdx::ALL.iter().enumerate() {
            assert_eq!(idx.id(), id);
            assert_eq!(LandmarkIdx::from_id(id), Some(*idx));
        }
        assert_eq!(LandmarkIdx::from_id(21), None);
        assert_eq!(LandmarkIdx::try_from(4), Ok(LandmarkIdx::ThumbTip));
        assert_eq!(
            LandmarkIdx::try_from(21),
            Err(Error::UnknownLandmark { id: 21 })
        );
    }

    #[test]
    fn connectivity_covers_every_landmark() {
        // 20 bones of the skeleton tree, plus the edge closing the palm loop.
        assert_eq!(CONNECTIVITY.len(), NUM_LANDMARKS);
        for idx in LandmarkIdx::ALL {
            assert!(
                CONNECTIVITY.iter().any(|(a, b)| *a == idx || *b == idx),
                "{idx:?} is not connected"
            );
        }
    }

    #[test]
    fn landmark_count_checked() {
        let lms = std::iter::repeat(Landmark::from_xy(0.5, 0.5));
        assert!(HandLandmarks::from_landmarks(lms.clone().take(21)).is_ok());
        assert_eq!(
            HandLandmarks::from_landmarks(lms.clone().take(20)),
            Err(Error::LandmarkCount {
                expected: 21,
                actual: 20
            })
        );
        assert!(HandLandmarks::from_landmarks(lms.take(22)).is_err());
    }

    #[test]
    fn handedness() {
        let hand = HandLandmarks::uniform(0.5, 0.5);
        assert_eq!(hand.handedness(), Handedness::Left);
        assert_eq!(
            hand.with_raw_handedness(0.9).handedness(),
            Handedness::Right
        );
    }

    #[test]
    fn palm_and_rotation() {
        let mut lms = vec![Landmark::from_xy(0.5, 0.5); NUM_LANDMARKS];
        lms[LandmarkIdx::Wrist.id()] = Landmark::from_xy(0.5, 0.8);
        lms[LandmarkIdx::MiddleFingerMcp.id()] = Landmark::from_xy(0.5, 0.2);
        let upright = HandLandmarks::from_landmarks(lms.clone()).unwrap();
        assert_abs_diff_eq!(upright.rotation_radians(), 0.0, epsilon = 1e-6);

        let center = upright.palm_center();
        assert_abs_diff_eq!(center[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(center[1], 0.5, epsilon = 1e-6);

        // Fingers pointing right.
        lms[LandmarkIdx::Wrist.id()] = Landmark::from_xy(0.2, 0.5);
        lms[LandmarkIdx::MiddleFingerMcp.id()] = Landmark::from_xy(0.8, 0.5);
        let sideways = HandLandmarks::from_landmarks(lms).unwrap();
        assert_abs_diff_eq!(sideways.rotation_radians().abs(), FRAC_PI_2, epsilon = 1e-5);
    }
}
