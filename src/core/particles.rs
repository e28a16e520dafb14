use super::config::{FieldConfig, Rgb};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Narrow capability surface the motion controller drives a renderer through.
pub trait ParticleRenderer {
    fn configure_interaction(&mut self, repulse_radius: f32);
    fn configure_grab(&mut self, _grab_radius: f32) {}
    /// Hover position in css px, or `None` once the pointer left the page.
    fn track_pointer(&mut self, _position: Option<Vec2>) {}
    fn for_each_particle_velocity<F: FnMut(&mut Vec2)>(&mut self, f: F);
    /// Advance the simulation; `dt_sec` is wall time since the previous frame.
    fn step(&mut self, _dt_sec: f32) {}
    fn pause(&mut self);
    fn resume(&mut self);
}

// Velocities are expressed per 60 Hz frame.
const REFERENCE_FPS: f32 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: Rgb,
    twinkle_phase: f32,
}

/// A line to draw between two points with the given alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Bounded 2D particle field with hover repulse/grab, links and bounce edges.
pub struct ParticleField {
    cfg: FieldConfig,
    particles: Vec<Particle>,
    bounds: Vec2,
    pointer: Option<Vec2>,
    repulse_radius: f32,
    grab_radius: Option<f32>,
    paused: bool,
}

/// Particle count for a viewport, scaled by area and bounded around `count`.
pub fn population(cfg: &FieldConfig, width: f32, height: f32) -> usize {
    let base = cfg.count as f32;
    let scaled = base * (width.max(0.0) * height.max(0.0)) / (cfg.density_area * cfg.density_area);
    scaled.round().clamp((base / 2.0).floor(), base * 2.0) as usize
}

impl ParticleField {
    pub fn new(cfg: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let bounds = Vec2::new(width.max(1.0), height.max(1.0));
        let n = population(&cfg, bounds.x, bounds.y);
        let particles = (0..n).map(|_| spawn(&cfg, bounds, &mut rng)).collect();
        log::debug!(
            "[field] spawned {} particles in {:.0}x{:.0}",
            n,
            bounds.x,
            bounds.y
        );
        Self {
            cfg,
            particles,
            bounds,
            pointer: None,
            repulse_radius: 0.0,
            grab_radius: None,
            paused: false,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn repulse_radius(&self) -> f32 {
        self.repulse_radius
    }

    pub fn grab_radius(&self) -> Option<f32> {
        self.grab_radius
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Track a viewport resize. Particles outside the new bounds are pulled in.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(1.0), height.max(1.0));
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.position = p.position.clamp(Vec2::ZERO, bounds);
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        if self.paused {
            return;
        }
        let frames = dt_sec.max(0.0) * REFERENCE_FPS;
        let bounds = self.bounds;
        let (op_min, op_max) = self.cfg.opacity;
        let twinkle = self.cfg.twinkle_speed;
        let repulse = self
            .pointer
            .filter(|_| self.repulse_radius > 0.0)
            .map(|at| (at, self.repulse_radius, self.cfg.repulse_strength));

        for p in &mut self.particles {
            p.position += p.velocity * frames;
            if let Some((at, radius, strength)) = repulse {
                p.position += repulse_offset(p.position, at, radius, strength) * frames;
            }
            bounce(p, bounds);
            if let Some(speed) = twinkle {
                p.twinkle_phase = (p.twinkle_phase + speed * dt_sec.max(0.0)) % TAU;
                p.opacity = op_min + (op_max - op_min) * (0.5 + 0.5 * p.twinkle_phase.sin());
            }
        }
    }

    /// Links between particles closer than the configured distance.
    pub fn links(&self) -> Vec<Link> {
        let max_d = self.cfg.link_distance;
        if max_d <= 0.0 || self.cfg.link_opacity <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d = a.position.distance(b.position);
                if d < max_d {
                    out.push(Link {
                        from: a.position,
                        to: b.position,
                        alpha: self.cfg.link_opacity * (1.0 - d / max_d),
                    });
                }
            }
        }
        out
    }

    /// Lines from the hover point to particles inside the grab radius.
    pub fn grab_links(&self) -> Vec<Link> {
        let (Some(at), Some(radius)) = (self.pointer, self.grab_radius) else {
            return Vec::new();
        };
        if radius <= 0.0 || self.cfg.grab_link_opacity <= 0.0 {
            return Vec::new();
        }
        self.particles
            .iter()
            .filter_map(|p| {
                let d = p.position.distance(at);
                (d < radius).then(|| Link {
                    from: at,
                    to: p.position,
                    alpha: self.cfg.grab_link_opacity * (1.0 - d / radius),
                })
            })
            .collect()
    }
}

impl ParticleRenderer for ParticleField {
    fn configure_interaction(&mut self, repulse_radius: f32) {
        self.repulse_radius = repulse_radius.max(0.0);
    }

    fn configure_grab(&mut self, grab_radius: f32) {
        self.grab_radius = Some(grab_radius.max(0.0));
    }

    fn track_pointer(&mut self, position: Option<Vec2>) {
        self.pointer = position;
    }

    fn for_each_particle_velocity<F: FnMut(&mut Vec2)>(&mut self, mut f: F) {
        for p in &mut self.particles {
            f(&mut p.velocity);
        }
    }

    fn step(&mut self, dt_sec: f32) {
        self.advance(dt_sec);
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}

fn spawn(cfg: &FieldConfig, bounds: Vec2, rng: &mut SmallRng) -> Particle {
    let angle = rng.gen_range(0.0..TAU);
    let speed = cfg.move_speed * rng.gen_range(0.5..=1.0);
    let color = cfg.colors[rng.gen_range(0..cfg.colors.len())];
    Particle {
        position: Vec2::new(rng.gen_range(0.0..=bounds.x), rng.gen_range(0.0..=bounds.y)),
        velocity: Vec2::from_angle(angle) * speed,
        radius: rng.gen_range(cfg.size.0..=cfg.size.1),
        opacity: rng.gen_range(cfg.opacity.0..=cfg.opacity.1),
        color,
        twinkle_phase: rng.gen_range(0.0..TAU),
    }
}

/// Push away from `at`, strongest at the centre and zero at `radius`.
#[inline]
pub fn repulse_offset(position: Vec2, at: Vec2, radius: f32, strength: f32) -> Vec2 {
    let away = position - at;
    let d = away.length();
    if d >= radius || d <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let falloff = 1.0 - (d / radius) * (d / radius);
    away / d * falloff * strength
}

fn bounce(p: &mut Particle, bounds: Vec2) {
    let r = p.radius.min(bounds.x * 0.5).min(bounds.y * 0.5);
    if p.position.x < r {
        p.position.x = r;
        p.velocity.x = p.velocity.x.abs();
    } else if p.position.x > bounds.x - r {
        p.position.x = bounds.x - r;
        p.velocity.x = -p.velocity.x.abs();
    }
    if p.position.y < r {
        p.position.y = r;
        p.velocity.y = p.velocity.y.abs();
    } else if p.position.y > bounds.y - r {
        p.position.y = bounds.y - r;
        p.velocity.y = -p.velocity.y.abs();
    }
}
