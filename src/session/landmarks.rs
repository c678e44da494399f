//! Landmark containers handed in by the estimator, one frame at a time.
//!
//! Coordinates are normalized to the image: `(0, 0)` is top-left and `y`
//! grows downward, so a smaller `y` means higher in frame.

use thiserror::Error;

pub const HAND_LANDMARK_COUNT: usize = 21;
pub const POSE_LANDMARK_COUNT: usize = 33;
pub const MAX_HANDS: usize = 2;

// Hand landmark indices
pub const WRIST: usize = 0;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_TIP: usize = 12;

// Pose landmark indices
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn at(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum LandmarkDecodeError {
    #[error("expected {expected} landmark values, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("non-finite landmark coordinate at value {index}")]
    NonFinite { index: usize },
}

/// Fixed set of `N` points where any point may be missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet<const N: usize> {
    points: [Option<Landmark>; N],
}

pub type HandLandmarks = LandmarkSet<HAND_LANDMARK_COUNT>;
pub type PoseLandmarks = LandmarkSet<POSE_LANDMARK_COUNT>;

impl<const N: usize> Default for LandmarkSet<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> LandmarkSet<N> {
    pub const fn empty() -> Self {
        Self { points: [None; N] }
    }

    pub fn from_points(points: [Landmark; N]) -> Self {
        Self {
            points: points.map(Some),
        }
    }

    /// Decodes `N` consecutive `[x, y, z]` triples.
    pub fn from_flat(data: &[f32]) -> Result<Self, LandmarkDecodeError> {
        let expected = N * 3;
        if data.len() != expected {
            return Err(LandmarkDecodeError::Length {
                expected,
                actual: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(LandmarkDecodeError::NonFinite { index });
        }

        let mut set = Self::empty();
        for (slot, xyz) in set.points.iter_mut().zip(data.chunks_exact(3)) {
            *slot = Some(Landmark::new(xyz[0], xyz[1], xyz[2]));
        }
        Ok(set)
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points
            .get(index)
            .copied()
            .flatten()
            .filter(Landmark::is_finite)
    }

    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = Some(landmark);
        }
    }

    pub fn with(mut self, index: usize, landmark: Landmark) -> Self {
        self.set(index, landmark);
        self
    }

    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
}

/// Everything the estimator reported for one captured frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    pub hands: heapless::Vec<HandLandmarks, MAX_HANDS>,
    pub pose: Option<PoseLandmarks>,
}

impl LandmarkFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extra hands past `MAX_HANDS` are dropped.
    pub fn with_hands(hands: impl IntoIterator<Item = HandLandmarks>) -> Self {
        let mut frame = Self::empty();
        for hand in hands {
            if frame.hands.push(hand).is_err() {
                log::warn!("landmark frame: more than {MAX_HANDS} hands, extra dropped");
                break;
            }
        }
        frame
    }

    pub fn with_pose(pose: PoseLandmarks) -> Self {
        Self {
            hands: heapless::Vec::new(),
            pose: Some(pose),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty() && self.pose.is_none()
    }
}
