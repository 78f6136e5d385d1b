//! On-screen state for the sequence display.
//!
//! The accumulated binary sequence is shown as a strip of colored
//! bit-patches that scrolls as digits arrive.  A successful conversion
//! triggers a gold border sweep and posts the result to a banner that
//! expires after a few seconds.

/// Per-frame animation step (the render loop runs at ~60 fps).
const FRAME_DT: f32 = 1.0 / 60.0;

// ════════════════════════════════════════════════════════════════════════════
// Color palette — bit → RGB
// ════════════════════════════════════════════════════════════════════════════

/// Map a bit to an ARGB patch color: cool blue for `0`, warm amber for `1`.
pub fn bit_color(bit: char) -> u32 {
    match bit {
        '1' => hsv_to_argb(40.0, 0.82, 0.95),
        _ => hsv_to_argb(210.0, 0.72, 0.88),
    }
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h = h % 360.0;
    let hi = (h / 60.0) as u32;
    let f = h / 60.0 - hi as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0) as u32;
    let gi = (g * 255.0) as u32;
    let bi = (b * 255.0) as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

// ════════════════════════════════════════════════════════════════════════════
// BitPatch / BitStrip — the visible window onto the sequence
// ════════════════════════════════════════════════════════════════════════════

/// One bit-patch on the strip.
#[derive(Clone, Debug)]
pub struct BitPatch {
    pub bit: char,
    pub color: u32,
    /// 0-based position of this bit in the full sequence.
    pub position: usize,
}

/// Bounded window of the most recent sequence bits.
///
/// `capacity` patches are kept; the newest bit sits on the right and the
/// strip scrolls left with a little kick as each digit lands.
#[derive(Debug)]
pub struct BitStrip {
    pub patches: Vec<BitPatch>,
    pub capacity: usize,
    /// Sub-pixel scroll offset for smooth animation (pixels).
    pub scroll_px: f32,
    /// Scroll velocity in pixels/frame; set when a digit lands.
    pub scroll_vel: f32,
}

impl BitStrip {
    pub fn new(capacity: usize) -> Self {
        BitStrip {
            patches: Vec::with_capacity(capacity),
            capacity,
            scroll_px: 0.0,
            scroll_vel: 0.0,
        }
    }

    /// Push a new bit onto the right end (oldest falls off the left).
    pub fn push(&mut self, bit: char, position: usize) {
        if self.patches.len() >= self.capacity {
            self.patches.remove(0);
        }
        self.patches.push(BitPatch {
            bit,
            color: bit_color(bit),
            position,
        });
    }

    /// Drop all patches (sequence reset).
    pub fn clear(&mut self) {
        self.patches.clear();
        self.scroll_px = 0.0;
        self.scroll_vel = 0.0;
    }

    /// Advance the scroll animation by one frame.
    /// `patch_width` is the pixel width of each patch.
    pub fn tick(&mut self, patch_width: f32) {
        self.scroll_px += self.scroll_vel;
        while self.scroll_px >= patch_width {
            self.scroll_px -= patch_width;
        }
        // Friction
        self.scroll_vel *= 0.85;
        if self.scroll_vel.abs() < 0.1 {
            self.scroll_vel = 0.0;
        }
    }

    /// Kick the scroll when a digit lands.  `strength` is 0.0–1.0.
    pub fn kick(&mut self, strength: f32) {
        self.scroll_vel = (strength * 10.0).min(14.0);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ConvertFlash — border sweep over the strip on a successful conversion
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct ConvertFlash {
    /// Progress 0.0–1.0; drives the gold highlight sweep left→right.
    pub progress: f32,
    /// Number of patches the sweep covers.
    pub count: usize,
}

impl ConvertFlash {
    pub fn new(count: usize) -> Self {
        ConvertFlash {
            progress: 0.0,
            count,
        }
    }
    pub fn tick(&mut self) {
        self.progress = (self.progress + 0.05).min(1.0);
    }
    pub fn done(&self) -> bool {
        self.progress >= 1.0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ResultBanner — the last conversion result, shown for a few seconds
// ════════════════════════════════════════════════════════════════════════════

/// Slide-in banner holding the last conversion text.
#[derive(Debug)]
pub struct ResultBanner {
    text: String,
    /// Seconds the banner stays visible once shown.
    ttl: f32,
    /// Seconds since `show`; past `ttl` the banner is hidden.
    age: f32,
    /// Slide-in animation 0.0–1.0.
    pub slide_in: f32,
}

impl ResultBanner {
    pub fn new(ttl: f32) -> Self {
        ResultBanner {
            text: String::new(),
            ttl,
            age: f32::INFINITY,
            slide_in: 0.0,
        }
    }

    /// Post a fresh result, restarting the countdown and the slide-in.
    pub fn show(&mut self, text: String) {
        self.text = text;
        self.age = 0.0;
        self.slide_in = 0.0;
    }

    /// Clear immediately (sequence reset).
    pub fn dismiss(&mut self) {
        self.age = f32::INFINITY;
        self.text.clear();
    }

    pub fn visible(&self) -> bool {
        self.age < self.ttl
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        if self.age.is_finite() {
            self.age += FRAME_DT;
        }
        if self.visible() && self.slide_in < 1.0 {
            self.slide_in = (self.slide_in + 0.08).min(1.0);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_colors_distinct_and_opaque() {
        assert_ne!(bit_color('0'), bit_color('1'));
        assert_eq!(bit_color('0') >> 24, 0xFF);
        assert_eq!(bit_color('1') >> 24, 0xFF);
    }

    #[test]
    fn strip_respects_capacity() {
        let mut s = BitStrip::new(4);
        for i in 0..7 {
            s.push(if i % 2 == 0 { '0' } else { '1' }, i);
        }
        assert_eq!(s.patches.len(), 4);
        assert_eq!(s.patches.last().unwrap().position, 6);
    }

    #[test]
    fn strip_clear_empties_and_stops() {
        let mut s = BitStrip::new(4);
        s.push('1', 0);
        s.kick(1.0);
        s.clear();
        assert!(s.patches.is_empty());
        assert_eq!(s.scroll_vel, 0.0);
    }

    #[test]
    fn strip_scroll_friction_settles() {
        let mut s = BitStrip::new(8);
        s.kick(1.0);
        assert!(s.scroll_vel > 0.0);
        for _ in 0..100 {
            s.tick(48.0);
        }
        assert_eq!(s.scroll_vel, 0.0);
    }

    #[test]
    fn flash_completes() {
        let mut f = ConvertFlash::new(5);
        for _ in 0..100 {
            f.tick();
        }
        assert!(f.done());
    }

    #[test]
    fn banner_expires_after_ttl() {
        let mut b = ResultBanner::new(0.1);
        assert!(!b.visible());
        b.show("Binary: 110 -> Decimal: 6".to_string());
        assert!(b.visible());
        for _ in 0..20 {
            b.tick();
        }
        assert!(!b.visible());
    }

    #[test]
    fn banner_slide_in_completes_while_visible() {
        let mut b = ResultBanner::new(5.0);
        b.show("x".to_string());
        for _ in 0..30 {
            b.tick();
        }
        assert_eq!(b.slide_in, 1.0);
    }
}
