pub mod persist;

pub use persist::{ScopePatch, DEFAULT_BUFFER_SIZE, DEFAULT_WIDGET_WIDTH, GRID_WIDTH};

use beam_capture::{AudioFrame, CaptureEngine};
use beam_core::atomic::AtomicF32;
use beam_core::controls::{CaptureControls, RenderControls};
use beam_core::draw::DisplayList;
use beam_core::geom::Rect;
use beam_render::Renderer;
use crossbeam::channel::{bounded, Receiver, Sender};

/// Configuration pushes from the UI side, applied at the top of the next
/// audio tick so buffer changes stay synchronous with the audio callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeCommand {
    /// Select a sweep resolution; snapped to the nearest valid size.
    SetBufferSize(usize),
    /// Zero both axis buffers.
    ClearSweep,
}

/// The oscilloscope module behind an explicit lifecycle interface: the host
/// adapter calls `process` from its audio callback, `render` from its draw
/// callback, and `save`/`load` around patch persistence.
pub struct ScopeModule {
    capture: CaptureEngine,
    renderer: Renderer,
    widget_width: AtomicF32,
    command_tx: Sender<ScopeCommand>,
    command_rx: Receiver<ScopeCommand>,
}

impl ScopeModule {
    pub fn new() -> Self {
        let (command_tx, command_rx) = bounded(16);
        Self {
            capture: CaptureEngine::new(),
            renderer: Renderer::new(),
            widget_width: AtomicF32::new(DEFAULT_WIDGET_WIDTH),
            command_tx,
            command_rx,
        }
    }

    /// Cloneable sender for UI-side configuration pushes.
    pub fn command_sender(&self) -> Sender<ScopeCommand> {
        self.command_tx.clone()
    }

    pub fn capture(&self) -> &CaptureEngine {
        &self.capture
    }

    /// One audio tick. Returns true when this tick captured the sweep.
    pub fn process(&mut self, frame: &AudioFrame, controls: &CaptureControls) -> bool {
        while let Ok(command) = self.command_rx.try_recv() {
            log::debug!("applying {command:?}");
            match command {
                ScopeCommand::SetBufferSize(size) => self.capture.set_buffer_size(size),
                ScopeCommand::ClearSweep => self.capture.reset(),
            }
        }
        self.capture.process(frame, controls)
    }

    /// One render frame over the given display bounds.
    pub fn render(&mut self, controls: &RenderControls, bounds: Rect) -> DisplayList {
        self.renderer.render(&self.capture, controls, bounds)
    }

    /// Zero both axis buffers (host reset hook).
    pub fn reset(&mut self) {
        self.capture.reset();
    }

    pub fn widget_width(&self) -> f32 {
        self.widget_width.load()
    }

    pub fn set_widget_width(&self, width: f32) {
        self.widget_width.store(width);
    }

    pub fn save(&self) -> ScopePatch {
        ScopePatch {
            buffer_size: self.capture.buffer_size(),
            widget_width: self.widget_width.load(),
        }
    }

    pub fn load(&mut self, patch: &ScopePatch) {
        self.capture.set_buffer_size(patch.buffer_size);
        self.widget_width.store(patch.widget_width);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.save())
    }

    /// Restore from a serialized patch. Missing fields fall back to their
    /// defaults; a malformed document restores the default patch.
    pub fn from_json(&mut self, json: &str) {
        let patch = serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("malformed scope patch, using defaults: {err}");
            ScopePatch::default()
        });
        self.load(&patch);
    }
}

impl Default for ScopeModule {
    fn default() -> Self {
        Self::new()
    }
}
