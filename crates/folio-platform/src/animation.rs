//! Easing curves and the scroll tween behind headless smooth scrolling.

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Cubic ease-in-out (smooth start and end), the curve browsers use
    /// for `behavior: 'smooth'`.
    pub fn ease_in_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
        }
    }
}

/// Interpolates the scroll offset from where a smooth scroll started to
/// its target, one frame at a time.
#[derive(Debug, Clone)]
pub struct ScrollTween {
    from: f32,
    to: f32,
    duration_ms: u64,
    elapsed_ms: u64,
    curve: fn(f32) -> f32,
}

impl ScrollTween {
    pub fn new(from: f32, to: f32, duration_ms: u64, curve: fn(f32) -> f32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0,
            curve,
        }
    }

    /// Offset the scroll is heading for.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Move `dt_ms` forward and return the offset for this frame.
    pub fn advance(&mut self, dt_ms: u64) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.offset()
    }

    /// Offset at the current point of the animation.
    pub fn offset(&self) -> f32 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let progress = (self.curve)(self.elapsed_ms as f32 / self.duration_ms as f32);
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}
