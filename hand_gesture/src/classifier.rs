//! Gesture classification — pure mapping from a [`HandPose`] to a
//! discrete [`Gesture`].
//!
//! A finger counts as extended when its tip sits above its MCP joint in
//! image coordinates (y grows downward); the thumb instead compares x,
//! which assumes the mirrored right-hand convention documented on
//! [`crate::pose`].

use crate::pose::{
    HandPose, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP,
    RING_TIP, THUMB_MCP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// The discrete symbol a hand pose represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// All fingers curled — the binary digit `0`.
    Fist,
    /// Index finger up, everything else curled — the binary digit `1`.
    One,
    /// Open palm (four or five fingers up) — convert the sequence.
    Palm,
    /// Anything else; ignored by the recognizer.
    Unknown,
}

impl Gesture {
    /// Short lowercase name for status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Fist => "fist",
            Gesture::One => "one",
            Gesture::Palm => "palm",
            Gesture::Unknown => "unknown",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// Per-finger extension flags, thumb first then index→pinky.
///
/// Exposed separately so the app can show the raw breakdown on screen
/// while tuning hand position.
pub fn extended_fingers(pose: &HandPose) -> [bool; 5] {
    let thumb = pose.point(THUMB_TIP).x > pose.point(THUMB_MCP).x;

    let up = |tip: usize, mcp: usize| pose.point(tip).y < pose.point(mcp).y;
    [
        thumb,
        up(INDEX_TIP, INDEX_MCP),
        up(MIDDLE_TIP, MIDDLE_MCP),
        up(RING_TIP, RING_MCP),
        up(PINKY_TIP, PINKY_MCP),
    ]
}

/// Classify one hand pose.  Total and deterministic: every well-formed
/// pose maps to exactly one [`Gesture`], with no error states.
pub fn classify(pose: &HandPose) -> Gesture {
    let fingers = extended_fingers(pose);
    let count = fingers.iter().filter(|&&f| f).count();

    if count == 0 {
        Gesture::Fist
    } else if count == 1 && fingers[1] {
        // Exactly one finger and it is the index; a lone thumb or pinky
        // does not count as "one".
        Gesture::One
    } else if count >= 4 {
        Gesture::Palm
    } else {
        Gesture::Unknown
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LANDMARK_COUNT};

    /// Build a pose with the requested fingers extended
    /// (thumb, index, middle, ring, pinky).
    fn pose_with(fingers: [bool; 5]) -> HandPose {
        let mut lm = [Landmark::default(); LANDMARK_COUNT];
        // Baseline: everything at mid-frame, tips below their MCPs.
        for l in lm.iter_mut() {
            *l = Landmark::new(0.5, 0.5, 0.0);
        }
        let pairs = [
            (THUMB_TIP, THUMB_MCP),
            (INDEX_TIP, INDEX_MCP),
            (MIDDLE_TIP, MIDDLE_MCP),
            (RING_TIP, RING_MCP),
            (PINKY_TIP, PINKY_MCP),
        ];
        for (i, &(tip, mcp)) in pairs.iter().enumerate() {
            lm[mcp] = Landmark::new(0.5, 0.5, 0.0);
            if i == 0 {
                // Thumb: extended = tip right of MCP.
                let x = if fingers[0] { 0.6 } else { 0.4 };
                lm[tip] = Landmark::new(x, 0.5, 0.0);
            } else {
                // Others: extended = tip above MCP (smaller y).
                let y = if fingers[i] { 0.3 } else { 0.7 };
                lm[tip] = Landmark::new(0.5, y, 0.0);
            }
        }
        HandPose::new(lm)
    }

    #[test]
    fn all_curled_is_fist() {
        assert_eq!(classify(&pose_with([false; 5])), Gesture::Fist);
    }

    #[test]
    fn lone_index_is_one() {
        assert_eq!(
            classify(&pose_with([false, true, false, false, false])),
            Gesture::One
        );
    }

    #[test]
    fn lone_thumb_is_unknown() {
        assert_eq!(
            classify(&pose_with([true, false, false, false, false])),
            Gesture::Unknown
        );
    }

    #[test]
    fn lone_pinky_is_unknown() {
        assert_eq!(
            classify(&pose_with([false, false, false, false, true])),
            Gesture::Unknown
        );
    }

    #[test]
    fn four_fingers_is_palm() {
        // Thumb tucked, all four fingers up.
        assert_eq!(
            classify(&pose_with([false, true, true, true, true])),
            Gesture::Palm
        );
    }

    #[test]
    fn five_fingers_is_palm() {
        assert_eq!(classify(&pose_with([true; 5])), Gesture::Palm);
    }

    #[test]
    fn two_fingers_is_unknown() {
        assert_eq!(
            classify(&pose_with([false, true, true, false, false])),
            Gesture::Unknown
        );
    }

    #[test]
    fn three_fingers_is_unknown() {
        assert_eq!(
            classify(&pose_with([false, true, true, true, false])),
            Gesture::Unknown
        );
    }

    #[test]
    fn classify_is_deterministic() {
        let pose = pose_with([false, true, false, false, false]);
        let first = classify(&pose);
        for _ in 0..10 {
            assert_eq!(classify(&pose), first);
        }
    }

    #[test]
    fn extended_fingers_reports_breakdown() {
        let flags = [true, false, true, false, true];
        assert_eq!(extended_fingers(&pose_with(flags)), flags);
    }
}
