/// Frame interval used when the engine animates a scroll itself.
pub const TWEEN_FRAME_MS: u64 = 16;

/// Scroll animation from one document offset to another.
///
/// Offsets never go negative, so overshooting curves still stop at the top of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    /// Always at least 1ms.
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// The scroll offset at `now_ms`.
    pub fn sample(&self, now_ms: u64) -> f64 {
        let eased = self.easing.sample(self.progress(now_ms));
        let top = self.from + (self.to - self.from) * eased;
        top.max(0.0)
    }

    /// Heads for `to` from wherever the animation is at `now_ms`, over a fresh duration.
    pub fn retarget(&mut self, now_ms: u64, to: f64, duration_ms: u64) {
        *self = Self::new(self.sample(now_ms), to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    SmoothStep,
    /// Closest to the browser's native smooth scroll.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic if t < 0.5 => 4.0 * t.powi(3),
            Self::EaseInOutCubic => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
        }
    }
}
