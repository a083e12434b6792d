use beam_capture::ChannelBuffer;

/// Peak statistics for one axis of the captured sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub vpp: f32,
    pub min: f32,
    pub max: f32,
}

impl Stats {
    /// Scan the captured sweep across all active lanes. With no active
    /// lanes the extrema stay at their infinities, which the overlay
    /// renders as out-of-range.
    pub fn measure(buffer: &ChannelBuffer, sweep_len: usize) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for lane in 0..buffer.channels() {
            for &v in &buffer.lane(lane)[..sweep_len] {
                min = min.min(v);
                max = max.max(v);
            }
        }
        Self {
            vpp: max - min,
            min,
            max,
        }
    }
}
