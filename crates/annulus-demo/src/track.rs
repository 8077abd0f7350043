//! Ring race track scene.
//!
//! A circular track bounded by two lanes of tires, a start line of small
//! disks across it, a scatter of soft background blobs and a marker that
//! laps the center line.

use std::f32::consts::TAU;

use annulus_engine::paint::Rgba;
use annulus_engine::scene::{DrawList, Ring, ZIndex};
use glam::Vec2;
use noise::{NoiseFn, OpenSimplex};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Track dimensions in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackConfig {
    pub inner: f32,
    pub outer: f32,
    pub tire_radius: f32,
    /// Relative radius wobble of the tire lanes.
    pub wobble: f32,
    /// Max offset of background blobs from the center line, per axis.
    pub jitter: f32,
    pub start_line_markers: usize,
    /// Seeds the lane noise and the background scatter.
    pub seed: u32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            inner: 55.0,
            outer: 70.0,
            tire_radius: 1.0,
            wobble: 0.1,
            jitter: 5.0,
            start_line_markers: 10,
            seed: 0,
        }
    }
}

impl TrackConfig {
    #[inline]
    pub fn center_line(&self) -> f32 {
        (self.inner + self.outer) * 0.5
    }
}

/// Static part of the scene, built once.
#[derive(Debug, Clone)]
pub struct Track {
    pub config: TrackConfig,
    pub tires: Vec<Vec2>,
    pub background: Vec<Vec2>,
}

impl Track {
    pub fn new(config: TrackConfig) -> Self {
        let noise = OpenSimplex::new(config.seed);
        let mut tires = lane(&noise, config.inner, config.tire_radius, config.wobble);
        tires.extend(lane(&noise, config.outer, config.tire_radius, config.wobble));

        let mut rng = Pcg32::seed_from_u64(config.seed as u64);
        Self {
            background: scatter(&mut rng, config.center_line(), 3.0, config.jitter),
            tires,
            config,
        }
    }

    /// Records the static scene plus the lap marker at time `t` (seconds).
    pub fn record(&self, list: &mut DrawList, t: f32) {
        let cfg = &self.config;

        for &pos in &self.background {
            list.push(
                ZIndex::BACKGROUND,
                Ring::new(pos, 3.0, 10.0, Rgba::rgb(0.8, 0.8, 0.8).with_alpha(0.6)),
            );
        }

        let n = cfg.start_line_markers.max(1);
        for i in 0..=n {
            let x = cfg.inner + (cfg.outer - cfg.inner) * i as f32 / n as f32;
            list.push_ring(Ring::new(Vec2::new(x, 0.0), 0.2, 0.4, Rgba::GRAY));
        }

        for &pos in &self.tires {
            let r = cfg.tire_radius;
            let hub = r / 3.0;
            list.push_ring(Ring::new(pos, hub, r, Rgba::GRAY));
            list.push_ring(Ring::outline(pos, hub, 0.2, Rgba::BLACK));
            list.push_ring(Ring::outline(pos, r, 0.2, Rgba::BLACK));
        }

        let head = self.marker_position(t);
        list.push(ZIndex::OVERLAY, Ring::filled(head, 0.3, Rgba::BLUE));
        list.push(ZIndex::OVERLAY, Ring::outline(head, 0.3, 0.2, Rgba::BLACK));
    }

    /// Lap marker position: one lap every 20 s along the center line.
    pub fn marker_position(&self, t: f32) -> Vec2 {
        let angle = t / 20.0 * TAU;
        Vec2::from_angle(angle) * self.config.center_line()
    }
}

/// Tires spaced two radii apart around a circle of `radius`, whose radius
/// is perturbed by up to `wobble` (relative) with simplex noise.
fn lane(noise: &OpenSimplex, radius: f32, tire_radius: f32, wobble: f32) -> Vec<Vec2> {
    let mut result = Vec::new();
    let mut angle = 0.0f32;
    while angle < TAU {
        let n = noise.get([angle as f64 * 10.0, 0.0]).clamp(-1.0, 1.0) as f32;
        let r = radius * (1.0 + n * wobble);
        result.push(Vec2::from_angle(angle) * r);
        angle += 2.0 * tire_radius / r;
    }
    result
}

/// Blobs every `spacing` units along a circle, each axis offset by up to `jitter`.
fn scatter(rng: &mut impl Rng, radius: f32, spacing: f32, jitter: f32) -> Vec<Vec2> {
    let mut result = Vec::new();
    let mut angle = 0.0f32;
    while angle < TAU {
        let offset = Vec2::new(
            rng.random_range(-jitter..=jitter),
            rng.random_range(-jitter..=jitter),
        );
        result.push(Vec2::from_angle(angle) * radius + offset);
        angle += 2.0 * spacing / radius;
    }
    result
}
