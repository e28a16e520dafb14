use super::config::MotionConfig;
use glam::Vec2;

/// Latest raw pointer position (css px) and `performance.now()` time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub t_ms: f64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, t_ms: f64) -> Self {
        Self { x, y, t_ms }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Movement between the previously consumed sample and the latest one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDelta {
    pub delta: Vec2,
    pub elapsed_ms: f64,
}

/// Holds at most one unconsumed sample; new samples overwrite, never queue.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    latest: Option<PointerSample>,
    last: Option<PointerSample>,
    fresh: bool,
}

impl PointerTracker {
    #[inline]
    pub fn record(&mut self, sample: PointerSample) {
        self.latest = Some(sample);
        self.fresh = true;
    }

    /// Delta from the last consumed sample to the latest one.
    ///
    /// Returns `None` when nothing new arrived since the previous call, and for
    /// the very first sample, which only primes the tracker.
    pub fn take_delta(&mut self) -> Option<PointerDelta> {
        if !std::mem::take(&mut self.fresh) {
            return None;
        }
        let latest = self.latest?;
        let last = self.last.replace(latest)?;
        Some(PointerDelta {
            delta: latest.position() - last.position(),
            elapsed_ms: latest.t_ms - last.t_ms,
        })
    }
}

/// Visual parameters derived from pointer motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub wind: Vec2,
    pub speed_boost: f32,
    pub repulse_radius: f32,
    pub glow_opacity: f32,
    pub grab_radius: f32,
}

impl MotionState {
    pub fn idle(cfg: &MotionConfig) -> Self {
        Self {
            wind: Vec2::ZERO,
            speed_boost: 0.0,
            repulse_radius: cfg.idle_repulse,
            glow_opacity: cfg.idle_glow,
            grab_radius: cfg.idle_grab,
        }
    }

    /// One first-order low-pass step toward `target`.
    pub fn approach(&mut self, target: &MotionState, damping: f32) {
        self.wind = self.wind.lerp(target.wind, damping);
        self.speed_boost = lerp(self.speed_boost, target.speed_boost, damping);
        self.repulse_radius = lerp(self.repulse_radius, target.repulse_radius, damping);
        self.glow_opacity = lerp(self.glow_opacity, target.glow_opacity, damping);
        self.grab_radius = lerp(self.grab_radius, target.grab_radius, damping);
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalised pointer speed in \[0, 1\].
#[inline]
pub fn pointer_intensity(
    distance_px: f32,
    elapsed_ms: f64,
    reference_speed_px_s: f32,
    min_elapsed_ms: f64,
) -> f32 {
    let dt = elapsed_ms.max(min_elapsed_ms);
    let speed = (distance_px as f64 / dt) * 1000.0;
    (speed as f32 / reference_speed_px_s).clamp(0.0, 1.0)
}

#[inline]
pub fn unit_direction(delta: Vec2, epsilon: f32) -> Vec2 {
    let dist = delta.length();
    if dist > epsilon {
        delta / dist
    } else {
        Vec2::ZERO
    }
}

/// Scale `v` down to `vmax` if it is faster; direction is preserved.
#[inline]
pub fn clamp_speed(v: Vec2, vmax: f32) -> Vec2 {
    let speed = v.length();
    if speed > vmax {
        v * (vmax / speed)
    } else {
        v
    }
}

/// Turns raw pointer samples into damped [`MotionState`] values.
#[derive(Clone, Debug)]
pub struct MotionSmoother {
    cfg: MotionConfig,
    tracker: PointerTracker,
    target: MotionState,
    current: MotionState,
    quiet_frames: u32,
}

impl MotionSmoother {
    pub fn new(cfg: MotionConfig) -> Self {
        let idle = MotionState::idle(&cfg);
        Self {
            cfg,
            tracker: PointerTracker::default(),
            target: idle,
            current: idle,
            quiet_frames: 0,
        }
    }

    pub fn target(&self) -> &MotionState {
        &self.target
    }

    pub fn current(&self) -> &MotionState {
        &self.current
    }

    #[inline]
    pub fn record_pointer(&mut self, sample: PointerSample) {
        self.tracker.record(sample);
        self.quiet_frames = 0;
    }

    /// Recompute targets from a newly recorded pointer delta. Returns the
    /// intensity used, or `None` when no fresh delta was pending.
    pub fn update_targets(&mut self) -> Option<f32> {
        let d = self.tracker.take_delta()?;
        Some(self.retarget(d))
    }

    pub fn retarget(&mut self, d: PointerDelta) -> f32 {
        let cfg = &self.cfg;
        let intensity = pointer_intensity(
            d.delta.length(),
            d.elapsed_ms,
            cfg.reference_speed_px_s,
            cfg.min_elapsed_ms,
        );
        self.target.wind = unit_direction(d.delta, cfg.direction_epsilon_px);
        self.target.speed_boost = intensity;
        self.target.repulse_radius = cfg.repulse.map(intensity);
        self.target.glow_opacity = cfg.glow.map(intensity);
        if let Some(grab) = cfg.grab {
            self.target.grab_radius = grab.map(intensity);
        }
        intensity
    }

    /// Send every target back to its idle value.
    pub fn relax(&mut self) {
        self.target = MotionState::idle(&self.cfg);
    }

    #[inline]
    pub fn damp(&mut self) {
        self.current.approach(&self.target, self.cfg.damping);
    }

    /// Per-frame update: consume a fresh pointer delta if there is one, then
    /// damp. Targets hold between samples and relax once the pointer has been
    /// quiet for `relax_after_frames`.
    pub fn step(&mut self) -> MotionState {
        if self.update_targets().is_none() {
            self.quiet_frames = self.quiet_frames.saturating_add(1);
            if Some(self.quiet_frames) == self.cfg.relax_after_frames {
                log::debug!("[motion] pointer quiet, relaxing targets");
                self.relax();
            }
        }
        self.damp();
        log::trace!(
            "[motion] boost={:.3} repulse={:.1} glow={:.3}",
            self.current.speed_boost,
            self.current.repulse_radius,
            self.current.glow_opacity
        );
        self.current
    }

    pub fn grab_radius(&self) -> Option<f32> {
        self.cfg.grab.map(|_| self.current.grab_radius)
    }

    /// Speed cap applied after a velocity nudge at the current boost.
    #[inline]
    pub fn max_particle_speed(&self) -> f32 {
        self.cfg.vmax_base + self.current.speed_boost * self.cfg.vmax_span
    }

    /// Apply wind and speed boost to one particle velocity, then cap it.
    pub fn adjust_velocity(&self, v: Vec2) -> Vec2 {
        let boost = self.current.speed_boost;
        let wind_strength = self.cfg.wind_base + boost * self.cfg.wind_span;
        let speed_mul = 1.0 + boost * self.cfg.speed_mul_span;
        let nudged = v * speed_mul + self.current.wind * wind_strength;
        clamp_speed(nudged, self.max_particle_speed())
    }
}
