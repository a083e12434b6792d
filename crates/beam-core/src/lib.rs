pub mod atomic;
pub mod color;
pub mod controls;
pub mod draw;
pub mod geom;

pub use atomic::AtomicF32;
pub use color::Rgba;
pub use controls::{CaptureControls, LineStyle, PlotType, RenderControls};
pub use draw::{DisplayList, DrawCommand};
pub use geom::{plot_area, rescale, Rect, PLOT_MARGIN};
