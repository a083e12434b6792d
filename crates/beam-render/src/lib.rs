pub mod overlay;
pub mod projection;
pub mod stats;
pub mod style;

pub use projection::{kaleidoscope_mirrors, Mirror, ProjectedTrace};
pub use stats::Stats;
pub use style::{stroke_trace, StrokeStyle};

use beam_capture::CaptureEngine;
use beam_core::color::{hsla, Rgba};
use beam_core::controls::RenderControls;
use beam_core::draw::DisplayList;
use beam_core::geom::{plot_area, Rect};
use glam::Vec2;

/// Fixed beam color for Y traces in the time-domain plot.
const Y_BEAM: Rgba = Rgba::rgba8(0xe1, 0x02, 0x78, 0xc0);

/// Saturation/lightness/alpha for hued beams.
const BEAM_SATURATION: f32 = 0.5;
const BEAM_LIGHTNESS: f32 = 0.5;
const BEAM_ALPHA: f32 = 200.0 / 255.0;

/// Recompute the statistics every this many render frames.
const STATS_INTERVAL: u32 = 4;

/// Builds one frame's display list from the shared sweep buffers and the
/// current control values.
///
/// The engine keeps filling the same buffers between captures; whatever is
/// in them when a frame renders is what gets drawn (the accepted
/// tear-for-a-frame tradeoff of the lock-free design).
pub struct Renderer {
    stats_frame: u32,
    stats_x: Stats,
    stats_y: Stats,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            stats_frame: 0,
            stats_x: Stats::default(),
            stats_y: Stats::default(),
        }
    }

    pub fn render(
        &mut self,
        capture: &CaptureEngine,
        controls: &RenderControls,
        bounds: Rect,
    ) -> DisplayList {
        let mut list = DisplayList::new(plot_area(bounds));

        let gain = Vec2::new(controls.gain_x(), controls.gain_y());
        let offset = Vec2::new(controls.offset_x(), controls.offset_y());
        let (line_style, blend) = controls.style();
        let style = StrokeStyle {
            style: line_style,
            blend,
            width: controls.beam_width(),
            fade: controls.fade,
            color: Rgba::WHITE,
        };
        let size = capture.buffer_size();
        let write_index = capture.write_index();
        let plot = controls.plot_type();

        if plot.pairs_axes() {
            let lanes = capture.x().channels().max(capture.y().channels());
            for lane in 0..lanes {
                let xs = &capture.x().lane(lane)[..size];
                let ys = &capture.y().lane(lane)[..size];

                let base = ProjectedTrace::new(
                    Some(xs),
                    ys,
                    size,
                    gain,
                    offset,
                    0.0,
                    0.0,
                    true,
                    bounds,
                );
                let base_color = hsla(
                    controls.beam_hue(),
                    BEAM_SATURATION,
                    BEAM_LIGHTNESS,
                    BEAM_ALPHA,
                );
                stroke_trace(
                    &mut list,
                    &base,
                    write_index,
                    &StrokeStyle {
                        color: base_color,
                        ..style
                    },
                );

                if plot.mirrored() {
                    let radius = controls.mirror_radius_px();
                    let mirrors = kaleidoscope_mirrors(
                        controls.mirror_count(),
                        controls.mirror_color_spread(),
                        controls.beam_hue(),
                    );
                    for mirror in mirrors {
                        // Reflected copy: X gain sign flipped, anchored out
                        // on the mirror radius.
                        let trace = ProjectedTrace::new(
                            Some(xs),
                            ys,
                            size,
                            Vec2::new(-gain.x, gain.y),
                            offset,
                            radius,
                            mirror.angle,
                            true,
                            bounds,
                        );
                        let color =
                            hsla(mirror.hue, BEAM_SATURATION, BEAM_LIGHTNESS, BEAM_ALPHA);
                        stroke_trace(
                            &mut list,
                            &trace,
                            write_index,
                            &StrokeStyle { color, ..style },
                        );
                    }
                }
            }
        } else {
            // Both axes render as independent time series: Y lanes in the
            // fixed beam color first, X lanes in the hue color on top.
            for lane in 0..capture.y().channels() {
                let ys = &capture.y().lane(lane)[..size];
                let trace = ProjectedTrace::new(
                    None,
                    ys,
                    size,
                    Vec2::new(0.0, gain.y),
                    Vec2::new(0.0, offset.y),
                    0.0,
                    0.0,
                    false,
                    bounds,
                );
                stroke_trace(
                    &mut list,
                    &trace,
                    write_index,
                    &StrokeStyle {
                        color: Y_BEAM,
                        ..style
                    },
                );
            }

            for lane in 0..capture.x().channels() {
                let xs = &capture.x().lane(lane)[..size];
                let trace = ProjectedTrace::new(
                    None,
                    xs,
                    size,
                    Vec2::new(0.0, gain.x),
                    Vec2::new(0.0, offset.x),
                    0.0,
                    0.0,
                    false,
                    bounds,
                );
                let color = hsla(
                    controls.beam_hue(),
                    BEAM_SATURATION,
                    BEAM_LIGHTNESS,
                    BEAM_ALPHA,
                );
                stroke_trace(
                    &mut list,
                    &trace,
                    write_index,
                    &StrokeStyle { color, ..style },
                );
            }

            let level = (controls.trigger_level() + offset.x) * gain.x;
            overlay::trigger_indicator(&mut list, level, bounds);
        }

        if controls.show_stats {
            self.stats_frame += 1;
            if self.stats_frame >= STATS_INTERVAL {
                self.stats_frame = 0;
                self.stats_x = Stats::measure(capture.x(), size);
                self.stats_y = Stats::measure(capture.y(), size);
            }
            overlay::stats_row(&mut list, Vec2::new(25.0, 0.0), "X", &self.stats_x);
            overlay::stats_row(
                &mut list,
                Vec2::new(25.0, bounds.size.y - 15.0),
                "Y",
                &self.stats_y,
            );
        }

        if controls.show_labels {
            overlay::control_labels(&mut list);
        }

        list
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
