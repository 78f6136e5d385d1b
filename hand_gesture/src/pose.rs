//! Hand skeleton data model.
//!
//! A [`HandPose`] is the full 21-point skeleton for one detected hand in
//! one frame, in the MediaPipe landmark topology.  Coordinates are
//! frame-relative: x/y nominally in `[0, 1]` with y growing *downward*
//! (image convention), z unconstrained.
//!
//! ## Coordinate precondition
//!
//! Poses must be supplied in the **mirrored right-hand convention**
//! (selfie view, as produced by a detector running on a horizontally
//! flipped camera frame).  The classifier's thumb test compares x
//! coordinates and is only meaningful under this convention; sources
//! tracking an un-mirrored or left hand must mirror x at their boundary
//! before constructing a `HandPose`.

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices — fixed anatomical topology, never remapped
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in one hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One tracked 3-D point on the hand skeleton.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPose
// ════════════════════════════════════════════════════════════════════════════

/// A full 21-landmark hand skeleton for one frame.
///
/// The fixed array length makes the "exactly 21 landmarks" invariant a
/// construction-time guarantee rather than a runtime check.
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandPose { landmarks }
    }

    /// Build a pose from a flat `[x0, y0, z0, x1, y1, z1, …]` buffer, the
    /// layout landmark detectors typically hand over an FFI or channel
    /// boundary.  Returns `None` unless exactly 63 floats are supplied.
    pub fn from_flat(flat: &[f32]) -> Option<Self> {
        if flat.len() != LANDMARK_COUNT * 3 {
            return None;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            *lm = Landmark::new(flat[i * 3], flat[i * 3 + 1], flat[i * 3 + 2]);
        }
        Some(HandPose { landmarks })
    }

    /// The landmark at a topology index (use the module constants).
    pub fn point(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
