mod scaler;
mod waveform;

pub use scaler::bench_scaler;
pub use waveform::bench_waveform;
