use beam_core::color::Rgba;
use beam_core::controls::LineStyle;
use beam_core::draw::DisplayList;
use glam::Vec2;

use crate::projection::ProjectedTrace;

/// Beam alpha at the freshest sample; decays linearly to zero over one
/// buffer traversal when fade is enabled.
const MAX_ALPHA: f32 = 0.99;

/// Segment-start contraction for the vector style.
const VECTOR_SCALE: f32 = 0.998;

/// Segment-start contraction for the experimental style.
const EXPERIMENTAL_SCALE: f32 = 0.9;

/// Per-trace stroke parameters, resolved from the render controls.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub style: LineStyle,
    /// Morph toward the next style, in [0, 1).
    pub blend: f32,
    pub width: f32,
    pub fade: bool,
    pub color: Rgba,
}

/// First and last sample indices of the traversal. Fading starts just
/// behind the write cursor so the freshest samples draw at full intensity;
/// otherwise a fixed end-to-start order keeps frames stable.
fn traversal_bounds(size: usize, write_index: usize, fade: bool) -> (usize, usize) {
    let (start, end) = if fade {
        (write_index as isize - 3, write_index as isize - 2)
    } else {
        (size as isize - 2, 0)
    };
    (
        start.clamp(0, size as isize - 1) as usize,
        end.clamp(1, size as isize - 1) as usize,
    )
}

/// Walk one projected trace backward from its start index (wrapping at the
/// buffer seam) and append one beam segment per visited sample pair.
pub fn stroke_trace(
    out: &mut DisplayList,
    trace: &ProjectedTrace,
    write_index: usize,
    style: &StrokeStyle,
) {
    let size = trace.len();
    if size < 2 {
        return;
    }

    let (start, end) = traversal_bounds(size, write_index, style.fade);

    let alpha_step = MAX_ALPHA / size as f32;
    let width_step = style.width / size as f32;
    let mut alpha = MAX_ALPHA;
    let mut width = style.width;

    let t = trace.translation();
    let mut last: Option<Vec2> = None;
    let mut i = start as isize;
    while i != end as isize {
        if i < 0 {
            i = size as isize - 1;
        }
        let p = trace.local_point(i as usize);

        // The final slot starts a fresh sub-path, so the buffer seam is
        // never bridged with a segment.
        if i as usize == size - 1 || last.is_none() {
            last = Some(p);
        } else {
            let prev = last.unwrap();
            let color = style.color.with_alpha(alpha);
            let from = match style.style {
                // Morph toward the vector style by sliding the segment
                // start from the previous point toward the current one.
                LineStyle::Normal => prev + (p - prev) * style.blend,
                LineStyle::Vector => {
                    let scale = style.blend * (EXPERIMENTAL_SCALE - VECTOR_SCALE) + VECTOR_SCALE;
                    p * scale
                }
                LineStyle::Experimental => p * EXPERIMENTAL_SCALE,
            };
            out.stroke(t + from, t + p, color, width);
            last = Some(p);
        }

        if style.fade {
            alpha -= alpha_step;
            width -= width_step;
        }
        i -= 1;
    }
}
