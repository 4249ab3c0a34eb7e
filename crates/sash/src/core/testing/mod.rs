/// Probe widget that records its callbacks.
pub mod probe;
/// Recording renderer and style.
pub mod render;

pub use probe::{Probe, Recorder};
pub use render::{CountingStyle, RecordingRenderer};
