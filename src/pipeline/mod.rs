//! Frame-stepped orchestration of the audio stages.
//!
//! The pipeline owns one explicit instance of every stage and drives them in
//! a fixed order once per logical frame: input capture and randomness first,
//! then MIDI interpretation and effects, then synthesis and output. It makes
//! no assumption about how often frames occur; pacing belongs to the caller.

pub mod stage;

use log::{info, warn};

use crate::dsp::generator::WaveformGenerator;
use crate::dsp::waveform::Waveform;
use crate::error::{AudioError, AudioResult};
use crate::midi::channel::ChannelProcessor;
use crate::{DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE};

pub use stage::{AudioStage, ScalerStage, StubStage};

#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub sample_rate: f32,
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_size: MAX_BLOCK_SIZE,
        }
    }
}

/// The whole audio subsystem as one composable unit.
pub struct AudioPipeline {
    input: StubStage,
    entropy: StubStage,
    prng: StubStage,
    scaler: ScalerStage,
    midi: ChannelProcessor,
    effects: StubStage,
    waveform: WaveformGenerator,
    output: StubStage,
    config: PipelineConfig,
    frame_count: u64,
    initialized: bool,
}

impl AudioPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            input: StubStage::new("input_audio"),
            entropy: StubStage::new("audio_entropy"),
            prng: StubStage::new("prng"),
            scaler: ScalerStage::new(),
            midi: ChannelProcessor::new(),
            effects: StubStage::new("effect_engine"),
            waveform: WaveformGenerator::new(),
            output: StubStage::new("sound_output"),
            config,
            frame_count: 0,
            initialized: false,
        }
    }

    /// Bring every stage up in pipeline order, failing fast on the first
    /// stage that refuses.
    pub fn initialize(&mut self) -> AudioResult<()> {
        if self.initialized {
            return Err(AudioError::AlreadyInitialized);
        }

        self.input.init()?;
        self.entropy.init()?;
        self.prng.init()?;
        self.scaler.init()?;
        self.midi.initialize()?;
        self.effects.init()?;
        self.waveform.initialize(self.config.sample_rate)?;
        self.output.init()?;

        self.frame_count = 0;
        self.initialized = true;

        info!(
            "audio pipeline initialized: {} Hz, {} samples/buffer",
            self.config.sample_rate, self.config.buffer_size
        );
        Ok(())
    }

    /// Advance one logical frame: step every stage once, in order.
    pub fn update(&mut self) -> AudioResult<()> {
        if !self.initialized {
            return Err(AudioError::NotInitialized);
        }

        for stage in self.stages_mut() {
            stage.step()?;
        }

        self.frame_count += 1;
        Ok(())
    }

    /// Tear the stages down in reverse pipeline order. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.output.shutdown();
        self.waveform.shutdown();
        self.effects.shutdown();
        self.midi.shutdown();
        self.scaler.shutdown();
        self.prng.shutdown();
        self.entropy.shutdown();
        self.input.shutdown();

        info!("audio pipeline shut down after {} frames", self.frame_count);
        self.initialized = false;
    }

    /// Run every stage's self-check, then probe the two real components end
    /// to end: a Note-On/Note-Off pair through the processor and a 440 Hz
    /// half-amplitude buffer through the generator. All results are AND-ed.
    pub fn self_check(&mut self) -> bool {
        if !self.initialized {
            return false;
        }

        let mut all_valid = true;
        for stage in self.stages_mut() {
            let passed = stage.self_check();
            if !passed {
                warn!("{} self-check failed", stage.name());
            }
            all_valid &= passed;
        }

        all_valid &= self.midi.process_message(0x90, 60, 127).is_ok();
        all_valid &= self.midi.process_message(0x80, 60, 0).is_ok();

        let mut buffer = [0.0f32; 64];
        let len = buffer.len();
        all_valid &= self
            .waveform
            .generate(Waveform::Sine, 440.0, 0.5, &mut buffer, len)
            .is_ok();

        all_valid
    }

    fn stages_mut(&mut self) -> [&mut dyn AudioStage; 8] {
        [
            &mut self.input,
            &mut self.entropy,
            &mut self.prng,
            &mut self.scaler,
            &mut self.midi,
            &mut self.effects,
            &mut self.waveform,
            &mut self.output,
        ]
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    pub fn midi(&self) -> &ChannelProcessor {
        &self.midi
    }

    /// Feed real MIDI traffic between frames.
    pub fn midi_mut(&mut self) -> &mut ChannelProcessor {
        &mut self.midi
    }

    /// Render synthesis buffers between frames.
    pub fn waveform_mut(&mut self) -> &mut WaveformGenerator {
        &mut self.waveform
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
