use log::debug;

use crate::dsp::waveform::Waveform;
use crate::error::{AudioError, AudioResult};
use crate::DEFAULT_SAMPLE_RATE;

/// Stateless-per-call waveform synthesis into a caller-supplied buffer.
///
/// The only persistent state is the configured sample rate and a counter.
/// Each `generate` call produces a fresh buffer from absolute sample index,
/// so identical parameters always yield identical output.
#[derive(Debug)]
pub struct WaveformGenerator {
    sample_rate: f32,
    initialized: bool,
    waveforms_generated: u64,
}

impl WaveformGenerator {
    /// Create an idle generator. `DEFAULT_SAMPLE_RATE` is staged for the
    /// pipeline's no-argument init path; `initialize` overrides it.
    pub fn new() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            initialized: false,
            waveforms_generated: 0,
        }
    }

    pub fn initialize(&mut self, sample_rate: f32) -> AudioResult<()> {
        if self.initialized {
            return Err(AudioError::AlreadyInitialized);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AudioError::InvalidParameter {
                reason: "sample rate must be finite and positive",
            });
        }

        self.sample_rate = sample_rate;
        self.waveforms_generated = 0;
        self.initialized = true;

        debug!("waveform generator initialized at {sample_rate} Hz");
        Ok(())
    }

    /// Fill `out[..count]` with one buffer of the requested waveform.
    ///
    /// Sample `i` is evaluated at `t = i / sample_rate` with normalized phase
    /// `frac(frequency * t)`, so a zero frequency yields a constant buffer at
    /// the phase-0 value and a negative amplitude inverts the wave. Fails
    /// without touching the buffer when the generator has no sample rate
    /// configured or `count` exceeds the buffer's capacity.
    pub fn generate(
        &mut self,
        kind: Waveform,
        frequency: f32,
        amplitude: f32,
        out: &mut [f32],
        count: usize,
    ) -> AudioResult<()> {
        if !self.initialized {
            return Err(AudioError::InvalidParameter {
                reason: "generator has no sample rate configured",
            });
        }
        if count > out.len() {
            return Err(AudioError::InvalidParameter {
                reason: "sample count exceeds output buffer capacity",
            });
        }

        for (i, sample) in out[..count].iter_mut().enumerate() {
            let t = i as f32 / self.sample_rate;
            let phase = (frequency * t).fract();
            *sample = amplitude * kind.sample(phase);
        }

        self.waveforms_generated += 1;
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        debug!(
            "waveform generator shut down after {} buffers",
            self.waveforms_generated
        );
        self.initialized = false;
    }

    /// Render a short 440 Hz test buffer and make sure it lands in range.
    pub fn self_check(&mut self) -> bool {
        if !self.initialized {
            return false;
        }

        let mut buffer = [0.0f32; 64];
        let len = buffer.len();
        if self
            .generate(Waveform::Sine, 440.0, 0.5, &mut buffer, len)
            .is_err()
        {
            return false;
        }

        buffer.iter().all(|s| s.abs() <= 0.5)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn waveforms_generated(&self) -> u64 {
        self.waveforms_generated
    }
}

impl Default for WaveformGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn generator() -> WaveformGenerator {
        let mut g = WaveformGenerator::new();
        g.initialize(SAMPLE_RATE).unwrap();
        g
    }

    #[test]
    fn sine_buffer_stays_within_amplitude() {
        let mut g = generator();
        let mut buffer = vec![0.0f32; 256];

        g.generate(Waveform::Sine, 440.0, 0.5, &mut buffer, 256)
            .unwrap();

        assert_eq!(buffer[0], 0.0);
        assert!(buffer.iter().all(|s| s.abs() <= 0.5));
        // A 440 Hz tone over 256 samples at 48 kHz covers more than two full
        // cycles, so the buffer cannot be silent.
        assert!(buffer.iter().any(|s| s.abs() > 0.4));
    }

    #[test]
    fn sine_matches_closed_form() {
        let mut g = generator();
        let mut buffer = vec![0.0f32; 128];
        g.generate(Waveform::Sine, 440.0, 1.0, &mut buffer, 128)
            .unwrap();

        let i = 12;
        let expected =
            (std::f32::consts::TAU * (440.0 * i as f32 / SAMPLE_RATE).fract()).sin();
        assert!((buffer[i] - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_frequency_is_constant_at_phase_zero() {
        let mut g = generator();
        let mut buffer = vec![0.0f32; 32];

        g.generate(Waveform::Square, 0.0, 0.8, &mut buffer, 32)
            .unwrap();
        assert!(buffer.iter().all(|&s| s == 0.8));
    }

    #[test]
    fn negative_amplitude_inverts() {
        let mut g = generator();
        let mut up = vec![0.0f32; 64];
        let mut down = vec![0.0f32; 64];

        g.generate(Waveform::Sawtooth, 440.0, 0.5, &mut up, 64)
            .unwrap();
        g.generate(Waveform::Sawtooth, 440.0, -0.5, &mut down, 64)
            .unwrap();

        for (a, b) in up.iter().zip(&down) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn zero_count_is_a_no_op() {
        let mut g = generator();
        let mut buffer = [7.0f32; 4];
        g.generate(Waveform::Sine, 440.0, 1.0, &mut buffer, 0)
            .unwrap();
        assert_eq!(buffer, [7.0; 4]);
    }

    #[test]
    fn rejects_oversized_count_without_partial_writes() {
        let mut g = generator();
        let mut buffer = [7.0f32; 8];

        let result = g.generate(Waveform::Sine, 440.0, 1.0, &mut buffer, 9);
        assert_eq!(
            result,
            Err(AudioError::InvalidParameter {
                reason: "sample count exceeds output buffer capacity",
            })
        );
        assert_eq!(buffer, [7.0; 8]);
    }

    #[test]
    fn rejects_generate_before_initialize() {
        let mut g = WaveformGenerator::new();
        let mut buffer = [0.0f32; 8];
        assert!(matches!(
            g.generate(Waveform::Sine, 440.0, 1.0, &mut buffer, 8),
            Err(AudioError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn lifecycle_rejects_double_initialize_and_bad_rates() {
        let mut g = generator();
        assert_eq!(g.initialize(SAMPLE_RATE), Err(AudioError::AlreadyInitialized));

        g.shutdown();
        assert!(g.initialize(0.0).is_err());
        assert!(g.initialize(f32::NAN).is_err());
        assert!(g.initialize(SAMPLE_RATE).is_ok());
    }

    #[test]
    fn self_check_requires_initialization() {
        let mut g = WaveformGenerator::new();
        assert!(!g.self_check());

        g.initialize(SAMPLE_RATE).unwrap();
        assert!(g.self_check());
    }
}
