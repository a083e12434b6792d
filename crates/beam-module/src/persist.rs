use serde::{Deserialize, Serialize};

/// One host grid unit, in screen units.
pub const GRID_WIDTH: f32 = 15.0;

/// Default panel width: 20 grid units.
pub const DEFAULT_WIDGET_WIDTH: f32 = GRID_WIDTH * 20.0;

pub const DEFAULT_BUFFER_SIZE: usize = 512;

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_widget_width() -> f32 {
    DEFAULT_WIDGET_WIDTH
}

/// The two fields that survive save/reload, under their patch-file keys.
/// Absent fields fall back to the compiled-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScopePatch {
    #[serde(rename = "bufferSize", default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(rename = "WidgetWidth", default = "default_widget_width")]
    pub widget_width: f32,
}

impl Default for ScopePatch {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            widget_width: DEFAULT_WIDGET_WIDTH,
        }
    }
}
