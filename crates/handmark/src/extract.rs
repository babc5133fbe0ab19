//! Conversion of normalized hand landmarks to pixel coordinates.

use std::{ops::Index, slice};

use crate::distance::{self, Distance};
use crate::hand::{DetectionResult, HandLandmarks, LandmarkIdx};
use crate::{Error, Result};

/// A landmark id and its position in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLandmark {
    idx: LandmarkIdx,
    x: i32,
    y: i32,
}

impl PixelLandmark {
    pub fn new(idx: LandmarkIdx, x: i32, y: i32) -> Self {
        Self { idx, x, y }
    }

    #[inline]
    pub fn idx(&self) -> LandmarkIdx {
        self.idx
    }

    /// Returns the landmark id (0 to 20).
    #[inline]
    pub fn id(&self) -> usize {
        self.idx.id()
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn position(&self) -> [i32; 2] {
        [self.x, self.y]
    }
}

/// The pixel positions of one hand's landmarks in a single frame.
///
/// A list either holds all 21 landmarks in id order, or is empty when no hand was detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkList {
    landmarks: Vec<PixelLandmark>,
}

impl LandmarkList {
    /// The list returned when no hand was detected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, PixelLandmark> {
        self.landmarks.iter()
    }

    pub fn as_slice(&self) -> &[PixelLandmark] {
        &self.landmarks
    }

    /// Returns the given landmark, or [`None`] if the list is empty.
    pub fn get(&self, idx: LandmarkIdx) -> Option<&PixelLandmark> {
        self.landmarks.get(idx.id())
    }

    pub fn position(&self, idx: LandmarkIdx) -> Option<[i32; 2]> {
        self.get(idx).map(PixelLandmark::position)
    }

    /// Computes the [`Distance`] between two landmarks of this hand.
    ///
    /// Fails with [`Error::InvalidPoint`] if the list is empty.
    pub fn distance(&self, a: LandmarkIdx, b: LandmarkIdx) -> Result<Distance> {
        let missing = |idx: LandmarkIdx| {
            Error::InvalidPoint(format!("landmark {idx:?} is missing (no hand detected)"))
        };
        let a = *self.get(a).ok_or_else(|| missing(a))?;
        let b = *self.get(b).ok_or_else(|| missing(b))?;
        distance::distance(a, b)
    }
}

/// # Panics
///
/// Indexing panics if the list is empty. Use [`LandmarkList::get`] to handle that case.
impl Index<LandmarkIdx> for LandmarkList {
    type Output = PixelLandmark;

    fn index(&self, idx: LandmarkIdx) -> &PixelLandmark {
        &self.landmarks[idx.id()]
    }
}

impl<'a> IntoIterator for &'a LandmarkList {
    type Item = &'a PixelLandmark;
    type IntoIter = slice::Iter<'a, PixelLandmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Converts the landmarks of hand `hand_index` in `result` to pixel coordinates of a
/// `image_width x image_height` image.
///
/// Pixel coordinates are computed as `round(x * width)` and `round(y * height)`. Landmarks outside
/// the image are not clamped.
///
/// If `result` contains no hands, an empty [`LandmarkList`] is returned regardless of
/// `hand_index`. If it does contain hands, but none at `hand_index`, this fails with
/// [`Error::InvalidHandIndex`].
///
/// Landmarks with a non-finite coordinate, or one whose pixel coordinate does not fit into an
/// `i32`, fail with [`Error::InvalidLandmark`].
pub fn extract(
    result: &DetectionResult,
    image_width: u32,
    image_height: u32,
    hand_index: usize,
) -> Result<LandmarkList> {
    check_dimensions(image_width, image_height)?;

    if result.is_empty() {
        return Ok(LandmarkList::empty());
    }

    let hand = result.get(hand_index).ok_or(Error::InvalidHandIndex {
        index: hand_index,
        hands: result.len(),
    })?;
    extract_hand(hand, image_width, image_height)
}

/// Converts the landmarks of every hand in `result` to pixel coordinates.
///
/// The returned lists are in the same order as the hands in `result`.
pub fn extract_all(
    result: &DetectionResult,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<LandmarkList>> {
    check_dimensions(image_width, image_height)?;
    result
        .iter()
        .map(|hand| extract_hand(hand, image_width, image_height))
        .collect()
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

fn extract_hand(hand: &HandLandmarks, width: u32, height: u32) -> Result<LandmarkList> {
    let landmarks = LandmarkIdx::ALL
        .iter()
        .zip(hand.landmarks().iter())
        .map(|(&idx, lm)| {
            let invalid = || Error::InvalidLandmark { id: idx.id() };
            if !lm.is_finite() {
                return Err(invalid());
            }
            Ok(PixelLandmark {
                idx,
                x: to_pixel(lm.x(), width).ok_or_else(invalid)?,
                y: to_pixel(lm.y(), height).ok_or_else(invalid)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LandmarkList { landmarks })
}

/// Returns [`None`] if the pixel coordinate does not fit into an `i32`.
fn to_pixel(normalized: f32, extent: u32) -> Option<i32> {
    let px = (f64::from(normalized) * f64::from(extent)).round();
    (f64::from(i32::MIN)..=f64::from(i32::MAX))
        .contains(&px)
        .then_some(px as i32)
}
