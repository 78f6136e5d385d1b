//! Pose sources — both from LeapMotion hardware and keyboard simulation.
//!
//! The public interface is [`FrameEvent`] delivered over a `mpsc`
//! channel: at most one [`HandPose`] per frame (extra detected hands are
//! dropped by design).  Consumers don't need to know whether poses came
//! from real hardware or the keyboard simulator.

use std::sync::mpsc::Sender;
use std::thread;

use hand_gesture::pose::{
    HandPose, Landmark, INDEX_MCP, LANDMARK_COUNT, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_CMC,
    THUMB_MCP, WRIST,
};

// ════════════════════════════════════════════════════════════════════════════
// FrameEvent
// ════════════════════════════════════════════════════════════════════════════

/// One event from a pose source.
#[derive(Clone, Debug)]
pub enum FrameEvent {
    /// The first detected hand of a frame, in the mirrored frame
    /// convention documented on `hand_gesture::pose`.
    Pose(HandPose),
    /// Shut the application down.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`FrameEvent`]s over a channel.
pub trait PoseSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>);
}

/// Spawn a pose source on its own thread, feeding the given sender.
pub fn spawn_pose_source<S: PoseSource>(source: S, tx: Sender<FrameEvent>) {
    thread::spawn(move || Box::new(source).run(tx));
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Fist, // F (held = gesture held in front of the camera)
    One,  // O
    Palm, // P
    Quit, // Q
}

/// Pose source driven by [`SimInput`] events from the visualizer window.
///
/// Each key frame synthesizes a canonical 21-point pose, so the real
/// classifier runs in simulation exactly as it would on detector output.
pub struct SimPoseSource {
    pub rx: std::sync::mpsc::Receiver<SimInput>,
}

impl PoseSource for SimPoseSource {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>) {
        for input in self.rx {
            let event = match input {
                SimInput::KeyDown(SimKey::Fist) => FrameEvent::Pose(fist_pose()),
                SimInput::KeyDown(SimKey::One) => FrameEvent::Pose(one_pose()),
                SimInput::KeyDown(SimKey::Palm) => FrameEvent::Pose(palm_pose()),
                SimInput::KeyDown(SimKey::Quit) => {
                    let _ = tx.send(FrameEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canonical synthetic poses
// ════════════════════════════════════════════════════════════════════════════

/// MCP anchor positions for a hand centred in the frame, palm facing the
/// camera, in the mirrored convention (thumb on the left of the image
/// when curled, swinging right when extended).
const FINGER_MCPS: [(usize, f32, f32); 4] = [
    (INDEX_MCP, 0.45, 0.55),
    (MIDDLE_MCP, 0.50, 0.54),
    (RING_MCP, 0.55, 0.55),
    (PINKY_MCP, 0.60, 0.57),
];

/// Build a synthetic pose with the given fingers extended
/// (thumb, index, middle, ring, pinky).
fn synth_pose(extended: [bool; 5]) -> HandPose {
    let mut lm = [Landmark::default(); LANDMARK_COUNT];
    lm[WRIST] = Landmark::new(0.50, 0.80, 0.0);

    // Thumb column: cmc → mcp fixed, ip/tip swing right when extended.
    lm[THUMB_CMC] = Landmark::new(0.44, 0.72, 0.0);
    lm[THUMB_MCP] = Landmark::new(0.42, 0.64, 0.0);
    let thumb_dx = if extended[0] { 0.06 } else { -0.03 };
    lm[THUMB_MCP + 1] = Landmark::new(0.42 + thumb_dx, 0.60, 0.0);
    lm[THUMB_MCP + 2] = Landmark::new(0.42 + thumb_dx * 2.0, 0.57, 0.0);

    // Finger columns: mcp/pip/dip/tip stacked above (extended) or curled
    // back down toward the palm.
    for (i, &(mcp, x, y)) in FINGER_MCPS.iter().enumerate() {
        lm[mcp] = Landmark::new(x, y, 0.0);
        if extended[i + 1] {
            lm[mcp + 1] = Landmark::new(x, y - 0.07, 0.0);
            lm[mcp + 2] = Landmark::new(x, y - 0.13, 0.0);
            lm[mcp + 3] = Landmark::new(x, y - 0.18, 0.0);
        } else {
            lm[mcp + 1] = Landmark::new(x, y - 0.04, 0.0);
            lm[mcp + 2] = Landmark::new(x, y + 0.02, 0.0);
            lm[mcp + 3] = Landmark::new(x, y + 0.08, 0.0);
        }
    }

    HandPose::new(lm)
}

/// All fingers curled — classifies as `Fist`.
pub fn fist_pose() -> HandPose {
    synth_pose([false; 5])
}

/// Index finger up, rest curled — classifies as `One`.
pub fn one_pose() -> HandPose {
    synth_pose([false, true, false, false, false])
}

/// Open hand — classifies as `Palm`.
pub fn palm_pose() -> HandPose {
    synth_pose([true; 5])
}

// ════════════════════════════════════════════════════════════════════════════
// LeapPoseSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Pose source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library
/// installed.  Each tracking frame the first hand's digit joints are
/// mapped onto the 21-landmark topology and normalized from millimetres
/// into the frame-relative mirrored convention; left hands are mirrored
/// here at the boundary rather than inside the classifier.
#[cfg(feature = "leap")]
pub struct LeapPoseSource;

#[cfg(feature = "leap")]
impl PoseSource for LeapPoseSource {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>) {
        use leaprs::*;

        // Interaction volume half-width in mm, used to normalize into [0,1].
        const RANGE_MM: f32 = 200.0;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[leap] LeapC connection failed: {:?} — no hardware poses", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            eprintln!("[leap] device open failed: {:?} — no hardware poses", e);
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                // First hand only; extra hands are dropped by design.
                let hand = match hands.first() {
                    Some(h) => h,
                    None => continue,
                };
                let mirror = hand.hand_type() == HandType::Left;

                let palm = hand.palm().position();
                let norm = |x: f32, y: f32, z: f32| {
                    let mut nx = 0.5 + x / (2.0 * RANGE_MM);
                    if mirror {
                        nx = 1.0 - nx;
                    }
                    // Leap y grows upward; image y grows downward.
                    Landmark::new(nx, 0.5 - y / (2.0 * RANGE_MM), z / (2.0 * RANGE_MM))
                };

                let mut lm = [Landmark::default(); LANDMARK_COUNT];
                lm[WRIST] = norm(palm.x, palm.y, palm.z);

                let digits: Vec<_> = hand.digits().collect();
                for (d, digit) in digits.iter().enumerate().take(5) {
                    // Per-digit landmark base: thumb 1..=4, fingers 5,9,13,17.
                    let base = if d == 0 { 1 } else { 1 + d * 4 };
                    let joints = [
                        digit.proximal().prev_joint(),
                        digit.intermediate().prev_joint(),
                        digit.distal().prev_joint(),
                        digit.distal().next_joint(),
                    ];
                    for (j, p) in joints.iter().enumerate() {
                        lm[base + j] = norm(p.x, p.y, p.z);
                    }
                }

                if tx.send(FrameEvent::Pose(HandPose::new(lm))).is_err() {
                    return;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
