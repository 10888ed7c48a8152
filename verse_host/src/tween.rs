/// Tween — an explicit, scene-owned animation task.
///
/// A tween interpolates one scalar from `from` to `to` over a fixed
/// duration with an easing curve. Scenes own their tweens and advance
/// them from `update`, so a tween can never fire into a scene that has
/// been deactivated or disposed. Vector animations are built from
/// per-component tweens or by lerping with the tween's output.

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SineInOut,
    ElasticOut,
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress.
    ///
    /// Endpoints are exact for every curve: `apply(0.0) == 0.0` and
    /// `apply(1.0) == 1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Ease::SineInOut => 0.5 * (1.0 - (std::f32::consts::PI * t).cos()),
            Ease::ElasticOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * std::f32::consts::PI) / 3.0;
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
        }
    }
}

/// One scalar animation from `from` to `to` over `duration` seconds
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    /// Create a tween. A non-positive duration snaps immediately to `to`.
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// A tween that is already finished, resting at `value`
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0, Ease::Linear)
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        let eased = self.ease.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `delta` seconds and return the new value
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration.max(0.0));
        self.value()
    }

    /// Whether the tween has reached its target
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Target value
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Restart toward a new target from the current value
    pub fn retarget(&mut self, to: f32, duration: f32, ease: Ease) {
        self.from = self.value();
        self.to = to;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.ease = ease;
    }
}

#[cfg(test)]
#[path = "tween_tests.rs"]
mod tests;
