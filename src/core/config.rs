use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::str::FromStr;

/// Clamped linear mapping from pointer intensity (0..=1) to a visual parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMap {
    pub base: f32,
    pub span: f32,
    pub min: f32,
    pub max: f32,
}

impl LinearMap {
    pub const fn new(base: f32, span: f32, min: f32, max: f32) -> Self {
        Self {
            base,
            span,
            min,
            max,
        }
    }

    #[inline]
    pub fn map(&self, intensity: f32) -> f32 {
        (self.base + intensity * self.span).clamp(self.min, self.max)
    }
}

/// sRGB colour used for particles and links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Self((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn css(&self, alpha: f32) -> String {
        format!("rgba({},{},{},{:.3})", self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }
}

/// Tuning for the pointer-to-motion smoother.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Pointer speed (px/s) that maps to full intensity.
    pub reference_speed_px_s: f32,
    /// Lower bound on the elapsed time between two samples.
    pub min_elapsed_ms: f64,
    /// Deltas at or below this length carry no direction.
    pub direction_epsilon_px: f32,
    /// Fraction of the current→target gap closed per frame.
    pub damping: f32,
    /// Frames without a new pointer sample before targets fall back to the
    /// idle values; `None` holds the last targets indefinitely.
    pub relax_after_frames: Option<u32>,
    pub repulse: LinearMap,
    pub glow: LinearMap,
    /// Grab-link radius; `None` disables grab mode.
    pub grab: Option<LinearMap>,
    pub idle_repulse: f32,
    pub idle_glow: f32,
    pub idle_grab: f32,
    // velocity nudging
    pub wind_base: f32,
    pub wind_span: f32,
    pub speed_mul_span: f32,
    pub vmax_base: f32,
    pub vmax_span: f32,
}

/// Particle field appearance and behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: u32,
    /// Viewport area side (css px) at which exactly `count` particles spawn.
    pub density_area: f32,
    pub colors: SmallVec<[Rgb; 4]>,
    pub opacity: (f32, f32),
    pub size: (f32, f32),
    pub link_distance: f32,
    pub link_opacity: f32,
    pub link_width: f32,
    pub link_color: Rgb,
    pub move_speed: f32,
    /// Peak push (px per 60 Hz frame) at the pointer for the repulse mode.
    pub repulse_strength: f32,
    pub grab_link_opacity: f32,
    /// Opacity oscillation rate in rad/s; `None` keeps opacity fixed.
    pub twinkle_speed: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Site-wide background behind every section.
    #[default]
    Global,
    /// Denser, snappier field used behind the hero section.
    Hero,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Global => "global",
            Variant::Hero => "hero",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "global" => Ok(Variant::Global),
            "hero" => Ok(Variant::Hero),
            other => Err(anyhow::anyhow!("unknown backdrop variant '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropConfig {
    pub motion: MotionConfig,
    pub field: FieldConfig,
}

impl BackdropConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Global => Self::global(),
            Variant::Hero => Self::hero(),
        }
    }

    pub fn global() -> Self {
        Self {
            motion: MotionConfig {
                reference_speed_px_s: 2400.0,
                min_elapsed_ms: 8.0,
                direction_epsilon_px: 0.001,
                damping: 0.08,
                relax_after_frames: Some(30),
                repulse: LinearMap::new(140.0, 220.0, 120.0, 380.0),
                glow: LinearMap::new(0.10, 0.14, 0.08, 0.26),
                grab: None,
                idle_repulse: 160.0,
                idle_glow: 0.12,
                idle_grab: 0.0,
                wind_base: 0.03,
                wind_span: 0.14,
                speed_mul_span: 0.015,
                vmax_base: 1.8,
                vmax_span: 0.9,
            },
            field: FieldConfig {
                count: 55,
                density_area: 1100.0,
                colors: smallvec![Rgb::hex(0x63e6ff), Rgb::hex(0xb69bff)],
                opacity: (0.08, 0.32),
                size: (1.0, 2.5),
                link_distance: 160.0,
                link_opacity: 0.07,
                link_width: 1.0,
                link_color: Rgb::hex(0x7adfff),
                move_speed: 0.6,
                repulse_strength: 4.0,
                grab_link_opacity: 0.0,
                twinkle_speed: None,
            },
        }
    }

    pub fn hero() -> Self {
        Self {
            motion: MotionConfig {
                reference_speed_px_s: 2200.0,
                min_elapsed_ms: 8.0,
                direction_epsilon_px: 0.5,
                damping: 1.0,
                relax_after_frames: Some(30),
                repulse: LinearMap::new(130.0, 210.0, 110.0, 360.0),
                glow: LinearMap::new(0.08, 0.12, 0.06, 0.22),
                grab: Some(LinearMap::new(130.0, 90.0, 110.0, 260.0)),
                idle_repulse: 160.0,
                idle_glow: 0.08,
                idle_grab: 150.0,
                wind_base: 0.02,
                wind_span: 0.12,
                speed_mul_span: 0.0,
                vmax_base: 2.4,
                vmax_span: 0.9,
            },
            field: FieldConfig {
                count: 80,
                density_area: 1000.0,
                colors: smallvec![
                    Rgb::hex(0x00d4ff),
                    Rgb::hex(0xa855f7),
                    Rgb::hex(0x06b6d4)
                ],
                opacity: (0.1, 0.5),
                size: (1.0, 3.0),
                link_distance: 150.0,
                link_opacity: 0.1,
                link_width: 1.0,
                link_color: Rgb::hex(0x00d4ff),
                move_speed: 0.9,
                repulse_strength: 4.0,
                grab_link_opacity: 0.5,
                twinkle_speed: Some(0.5),
            },
        }
    }

    /// Reject configurations that would make clamping or damping misbehave.
    pub fn validate(&self) -> anyhow::Result<()> {
        let m = &self.motion;
        if m.reference_speed_px_s.is_nan() || m.reference_speed_px_s <= 0.0 {
            anyhow::bail!("reference speed must be positive");
        }
        if m.damping.is_nan() || m.damping <= 0.0 || m.damping > 1.0 {
            anyhow::bail!("damping {} outside (0, 1]", m.damping);
        }
        if m.min_elapsed_ms.is_nan() || m.min_elapsed_ms <= 0.0 {
            anyhow::bail!("minimum elapsed time must be positive");
        }
        if m.relax_after_frames == Some(0) {
            anyhow::bail!("relax delay must be at least one frame");
        }
        let maps = [("repulse", Some(m.repulse)), ("glow", Some(m.glow)), ("grab", m.grab)];
        for (name, map) in maps {
            if let Some(map) = map {
                if map.min.is_nan() || map.max.is_nan() || map.min > map.max {
                    anyhow::bail!("{} bounds inverted: [{}, {}]", name, map.min, map.max);
                }
            }
        }
        if m.vmax_base <= 0.0 || m.vmax_span < 0.0 {
            anyhow::bail!("particle speed bound must be positive");
        }

        let f = &self.field;
        if f.colors.is_empty() {
            anyhow::bail!("particle palette is empty");
        }
        if f.opacity.0 > f.opacity.1 || f.size.0 > f.size.1 {
            anyhow::bail!("particle opacity/size ranges inverted");
        }
        if f.density_area <= 0.0 {
            anyhow::bail!("density area must be positive");
        }
        Ok(())
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self::global()
    }
}
