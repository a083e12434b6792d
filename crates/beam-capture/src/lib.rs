pub mod buffer;
pub mod edge;
pub mod sweep;

pub use buffer::{snap_buffer_size, ChannelBuffer, BUFFER_SIZES, MAX_BUFFER_SIZE, MAX_LANES};
pub use edge::EdgeDetector;
pub use sweep::{AudioFrame, CaptureEngine, SweepState};
