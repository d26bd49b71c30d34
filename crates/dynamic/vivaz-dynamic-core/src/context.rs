//! Per-variable execution state: modulator in use, noise cursors and the
//! random-hold cache.

use log::debug;

use crate::config::Config;
use crate::host::Host;
use crate::noise::NoiseSampler;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomHold {
    pub value: f64,
    pub generated_at: f64,
}

#[derive(Clone, Debug)]
pub struct ExecutionContext {
    key: String,
    modulator: f64,
    pub(crate) sampler: NoiseSampler,
    jitter: Option<NoiseSampler>,
    pub(crate) hold: Option<RandomHold>,
}

impl ExecutionContext {
    /// Build the context for the variable `key`.
    ///
    /// The method sampler steps by `modulator`; a jitter sampler is created
    /// only when `jitter_speed` is given.
    pub fn new(
        key: impl Into<String>,
        modulator: f64,
        jitter_speed: Option<f64>,
        config: &Config,
        host: &mut dyn Host,
    ) -> Self {
        let key = key.into();
        let span = config.noise_offset_span;
        let sampler = NoiseSampler::new(0.0, 1.0, modulator, span, host);
        let jitter = jitter_speed.map(|speed| NoiseSampler::new(0.0, 1.0, speed, span, host));
        debug!(
            "{key}: execution context created at frame {} (modulator {modulator}, jitter {})",
            host.frame_count(),
            jitter.is_some()
        );
        Self {
            key,
            modulator,
            sampler,
            jitter,
            hold: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn modulator(&self) -> f64 {
        self.modulator
    }

    pub fn random_hold(&self) -> Option<RandomHold> {
        self.hold
    }

    /// Next jitter sample in [0, 1]; constant 1.0 without a jitter sampler.
    pub fn jitter(&mut self, host: &dyn Host) -> f64 {
        match self.jitter.as_mut() {
            Some(sampler) => sampler.sample(host),
            None => 1.0,
        }
    }
}
