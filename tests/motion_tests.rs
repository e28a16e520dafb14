// Host-side tests for the pointer-to-motion smoother.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod motion {
        include!("../src/core/motion.rs");
    }
}

use crate::core::config::*;
use crate::core::motion::*;
use glam::Vec2;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Feed one sample per 16 ms frame moving right at `speed_px_s`, stepping each frame.
fn drive(smoother: &mut MotionSmoother, frames: usize, speed_px_s: f32) {
    let mut x = 0.0_f32;
    let mut t = 0.0_f64;
    for _ in 0..frames {
        smoother.record_pointer(PointerSample::new(x, 0.0, t));
        smoother.step();
        x += speed_px_s * 0.016;
        t += 16.0;
    }
}

#[test]
fn worked_example_matches_expected_targets() {
    let mut s = MotionSmoother::new(BackdropConfig::global().motion);
    s.record_pointer(PointerSample::new(0.0, 0.0, 0.0));
    assert_eq!(s.update_targets(), None, "first sample only primes");

    s.record_pointer(PointerSample::new(100.0, 0.0, 100.0));
    let intensity = s.update_targets().expect("second sample yields a delta");

    assert!(approx(intensity, 1000.0 / 2400.0, 1e-5));
    assert!(approx(s.target().glow_opacity, 0.1583, 1e-3));
    assert!(approx(s.target().repulse_radius, 231.7, 0.1));
    assert_eq!(s.target().wind, Vec2::new(1.0, 0.0));
    assert!(approx(s.target().speed_boost, 0.4167, 1e-3));
}

#[test]
fn intensity_stays_in_unit_range() {
    let distances = [0.0, 0.5, 1.0, 10.0, 100.0, 1_000.0, 1e6, 1e12];
    let elapsed = [8.0, 9.0, 16.0, 100.0, 1_000.0, 1e7];
    for &d in &distances {
        for &dt in &elapsed {
            let i = pointer_intensity(d, dt, 2400.0, 8.0);
            assert!((0.0..=1.0).contains(&i), "d={} dt={} -> {}", d, dt, i);
        }
    }
}

#[test]
fn elapsed_time_is_floored() {
    // 10 px in 0 ms behaves like 10 px in 8 ms.
    let burst = pointer_intensity(10.0, 0.0, 2400.0, 8.0);
    let floored = pointer_intensity(10.0, 8.0, 2400.0, 8.0);
    assert_eq!(burst, floored);
    assert!(approx(burst, 1250.0 / 2400.0, 1e-5));

    // Negative elapsed (clock skew) is floored too.
    assert_eq!(pointer_intensity(10.0, -5.0, 2400.0, 8.0), floored);
}

#[test]
fn zero_distance_has_no_direction() {
    assert_eq!(unit_direction(Vec2::ZERO, 0.001), Vec2::ZERO);
    assert_eq!(unit_direction(Vec2::new(0.0005, 0.0), 0.001), Vec2::ZERO);

    let d = unit_direction(Vec2::new(3.0, 4.0), 0.001);
    assert!(approx(d.x, 0.6, 1e-6) && approx(d.y, 0.8, 1e-6));
}

#[test]
fn targets_hold_between_samples_then_relax() {
    let cfg = BackdropConfig::global().motion;
    let quiet = cfg.relax_after_frames.expect("preset relaxes");
    let mut s = MotionSmoother::new(cfg.clone());
    s.record_pointer(PointerSample::new(0.0, 0.0, 0.0));
    s.step();
    s.record_pointer(PointerSample::new(500.0, 0.0, 50.0));
    s.step();
    let moving = *s.target();
    assert!(moving.speed_boost > 0.0);

    // Frames without a new sample keep the last targets.
    for _ in 1..quiet {
        s.step();
        assert_eq!(*s.target(), moving);
    }

    s.step();
    assert_eq!(*s.target(), MotionState::idle(&cfg));
    assert_eq!(s.target().wind, Vec2::ZERO);
}

#[test]
fn new_sample_restarts_quiet_count() {
    let cfg = BackdropConfig::hero().motion;
    let quiet = cfg.relax_after_frames.expect("preset relaxes");
    let mut s = MotionSmoother::new(cfg);
    let mut t = 0.0;
    s.record_pointer(PointerSample::new(0.0, 0.0, t));
    for i in 1..=4 {
        for _ in 1..quiet {
            s.step();
        }
        t += 16.0;
        s.record_pointer(PointerSample::new(i as f32 * 16.0, 0.0, t));
        s.step();
    }
    // 16 px per 16 ms sample against a 2200 px/s reference.
    assert!(approx(s.target().speed_boost, 1000.0 / 2200.0, 1e-5));
}

#[test]
fn relaxing_can_be_disabled() {
    let mut cfg = BackdropConfig::global().motion;
    cfg.relax_after_frames = None;
    let mut s = MotionSmoother::new(cfg);
    s.record_pointer(PointerSample::new(0.0, 0.0, 0.0));
    s.step();
    s.record_pointer(PointerSample::new(0.0, 80.0, 40.0));
    s.step();
    let moving = *s.target();
    for _ in 0..500 {
        s.step();
    }
    assert_eq!(*s.target(), moving);
}

#[test]
fn damping_converges_monotonically() {
    let cfg = BackdropConfig::global().motion;
    let idle = MotionState::idle(&cfg);
    let target = MotionState {
        wind: Vec2::new(0.0, -1.0),
        speed_boost: 1.0,
        repulse_radius: 360.0,
        glow_opacity: 0.24,
        grab_radius: 0.0,
    };
    let initial_gap = (target.repulse_radius - idle.repulse_radius).abs();

    let mut cur = idle;
    let mut prev_gap = initial_gap;
    for i in 1..=300 {
        cur.approach(&target, cfg.damping);
        let gap = (target.repulse_radius - cur.repulse_radius).abs();
        assert!(gap <= prev_gap + 1e-6, "gap grew at step {}", i);
        assert!(cur.repulse_radius <= target.repulse_radius, "overshoot at step {}", i);
        if i == 50 {
            // (1 - 0.08)^50 ≈ 0.0155
            assert!(gap < initial_gap * 0.016);
        }
        prev_gap = gap;
    }
    assert!(prev_gap < initial_gap * 1e-4);
    assert!(approx(cur.speed_boost, 1.0, 1e-4));
    assert!(approx(cur.wind.y, -1.0, 1e-4));
}

#[test]
fn full_damping_jumps_straight_to_target() {
    let mut s = MotionSmoother::new(BackdropConfig::hero().motion);
    s.record_pointer(PointerSample::new(0.0, 0.0, 0.0));
    s.step();
    s.record_pointer(PointerSample::new(0.0, 50.0, 40.0));
    let state = s.step();
    let target = s.target();
    assert!(approx(state.repulse_radius, target.repulse_radius, 1e-4));
    assert!(approx(state.glow_opacity, target.glow_opacity, 1e-6));
    assert!(approx(state.grab_radius, target.grab_radius, 1e-4));
    assert_eq!(state.wind, Vec2::new(0.0, 1.0));
    // 50 px in 40 ms = 1250 px/s against a 2200 px/s reference.
    assert!(approx(state.speed_boost, 1250.0 / 2200.0, 1e-5));
}

#[test]
fn repulse_radius_clamped_for_pathological_input() {
    for cfg in [BackdropConfig::global().motion, BackdropConfig::hero().motion] {
        let deltas = [
            PointerDelta { delta: Vec2::ZERO, elapsed_ms: 0.0 },
            PointerDelta { delta: Vec2::ZERO, elapsed_ms: 1e9 },
            PointerDelta { delta: Vec2::new(1e9, -1e9), elapsed_ms: 0.0 },
            PointerDelta { delta: Vec2::new(1e30, 0.0), elapsed_ms: 8.0 },
            PointerDelta { delta: Vec2::new(0.1, 0.1), elapsed_ms: 1e6 },
        ];
        let mut s = MotionSmoother::new(cfg.clone());
        for d in deltas {
            s.retarget(d);
            for _ in 0..20 {
                s.damp();
            }
            let t = s.target();
            let c = s.current();
            for r in [t.repulse_radius, c.repulse_radius] {
                assert!(r >= cfg.repulse.min && r <= cfg.repulse.max, "repulse {}", r);
            }
            for g in [t.glow_opacity, c.glow_opacity] {
                assert!(g >= cfg.glow.min && g <= cfg.glow.max, "glow {}", g);
            }
        }
    }
}

#[test]
fn adjusted_velocity_never_exceeds_bound() {
    let velocities = [
        Vec2::ZERO,
        Vec2::new(0.3, -0.2),
        Vec2::new(1.8, 0.0),
        Vec2::new(-5.0, 12.0),
        Vec2::new(1e4, 1e4),
    ];
    for speed in [0.0, 300.0, 2_000.0, 50_000.0] {
        let mut s = MotionSmoother::new(BackdropConfig::global().motion);
        drive(&mut s, 40, speed);
        let vmax = s.max_particle_speed();
        for &v in &velocities {
            let mut out = v;
            for _ in 0..100 {
                out = s.adjust_velocity(out);
                assert!(out.length() <= vmax * (1.0 + 1e-5), "|v|={} vmax={}", out.length(), vmax);
            }
        }
    }
}

#[test]
fn clamp_speed_preserves_direction() {
    let v = clamp_speed(Vec2::new(30.0, 40.0), 5.0);
    assert!(approx(v.x, 3.0, 1e-5) && approx(v.y, 4.0, 1e-5));
    assert_eq!(clamp_speed(Vec2::new(0.1, 0.1), 5.0), Vec2::new(0.1, 0.1));
    assert_eq!(clamp_speed(Vec2::ZERO, 0.0), Vec2::ZERO);
}

#[test]
fn wind_pushes_along_pointer_direction() {
    let mut s = MotionSmoother::new(BackdropConfig::global().motion);
    drive(&mut s, 60, 1_500.0);
    assert!(s.current().wind.x > 0.9);
    let v = s.adjust_velocity(Vec2::ZERO);
    assert!(v.x > 0.0);
    assert!(approx(v.y, 0.0, 1e-6));
}

#[test]
fn grab_radius_only_for_variants_with_grab() {
    let mut global = MotionSmoother::new(BackdropConfig::global().motion);
    let mut hero = MotionSmoother::new(BackdropConfig::hero().motion);
    drive(&mut global, 10, 3_000.0);
    drive(&mut hero, 10, 3_000.0);
    assert_eq!(global.grab_radius(), None);
    let g = hero.grab_radius().expect("hero has grab");
    assert!((110.0..=260.0).contains(&g));
}

#[test]
fn samples_overwrite_rather_than_queue() {
    let mut tracker = PointerTracker::default();
    tracker.record(PointerSample::new(0.0, 0.0, 0.0));
    assert_eq!(tracker.take_delta(), None);

    tracker.record(PointerSample::new(10.0, 0.0, 10.0));
    tracker.record(PointerSample::new(20.0, 0.0, 20.0));
    tracker.record(PointerSample::new(30.0, 0.0, 30.0));
    let d = tracker.take_delta().expect("delta");
    assert_eq!(d.delta, Vec2::new(30.0, 0.0));
    assert_eq!(d.elapsed_ms, 30.0);

    // Nothing new since the last call.
    assert_eq!(tracker.take_delta(), None);

    tracker.record(PointerSample::new(30.0, 5.0, 46.0));
    let d = tracker.take_delta().expect("delta");
    assert_eq!(d.delta, Vec2::new(0.0, 5.0));
    assert_eq!(d.elapsed_ms, 16.0);
}
