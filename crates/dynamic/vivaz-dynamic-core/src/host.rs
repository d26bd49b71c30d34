//! Host environment consumed by evaluation: clock, frame counter, randomness,
//! noise and the named-range registry.
//!
//! `SystemHost` follows the wall clock; `ManualHost` is driven by the caller
//! and is what tests and offline renders use.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::noise::perlin1;
use crate::ranges::RangeRegistry;

pub trait Host {
    /// Monotonic time in milliseconds.
    fn time_ms(&self) -> f64;

    /// Frames rendered since start.
    fn frame_count(&self) -> u64;

    /// Uniform random number in [0, 1).
    fn random(&mut self) -> f64;

    /// Uniform random number in [min, max).
    fn random_range(&mut self, min: f64, max: f64) -> f64 {
        self.random() * (max - min) + min
    }

    /// 1-D noise in [0, 1].
    fn noise(&self, x: f64) -> f64 {
        perlin1(x)
    }

    fn ranges(&self) -> &RangeRegistry {
        RangeRegistry::builtin()
    }
}

/// Wall-clock host. Call [`SystemHost::tick`] once per rendered frame.
#[derive(Debug)]
pub struct SystemHost {
    start: Instant,
    frames: u64,
    rng: StdRng,
    ranges: RangeRegistry,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            start: Instant::now(),
            frames: 0,
            rng,
            ranges: RangeRegistry::with_builtins(),
        }
    }

    pub fn tick(&mut self) {
        self.frames = self.frames.wrapping_add(1);
    }

    pub fn ranges_mut(&mut self) -> &mut RangeRegistry {
        &mut self.ranges
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SystemHost {
    fn time_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn ranges(&self) -> &RangeRegistry {
        &self.ranges
    }
}

/// Deterministic host: time and frames only move when told to.
#[derive(Debug)]
pub struct ManualHost {
    time_ms: f64,
    frames: u64,
    rng: StdRng,
    ranges: RangeRegistry,
}

impl ManualHost {
    pub fn new(seed: u64) -> Self {
        Self {
            time_ms: 0.0,
            frames: 0,
            rng: StdRng::seed_from_u64(seed),
            ranges: RangeRegistry::with_builtins(),
        }
    }

    pub fn set_time(&mut self, ms: f64) {
        self.time_ms = ms;
    }

    /// Advance the clock by `ms` and count one frame.
    pub fn advance(&mut self, ms: f64) {
        self.time_ms += ms;
        self.frames = self.frames.wrapping_add(1);
    }

    pub fn ranges_mut(&mut self) -> &mut RangeRegistry {
        &mut self.ranges
    }
}

impl Host for ManualHost {
    fn time_ms(&self) -> f64 {
        self.time_ms
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn ranges(&self) -> &RangeRegistry {
        &self.ranges
    }
}
