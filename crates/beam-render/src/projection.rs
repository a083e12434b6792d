use beam_core::geom::{plot_area, rescale, Rect, PLOT_MARGIN};
use glam::Vec2;

/// One kaleidoscope reflection: anchor angle for the copy's translation
/// offset, and the beam hue it is drawn with. The point-space rotation
/// applied to the copy is twice the anchor angle — the doubled spacing is
/// what produces the expected kaleidoscopic symmetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    pub angle: f32,
    pub hue: f32,
}

/// Reflection plan for one lane: `count` copies at equal angular spacing,
/// hues spread over `color_spread` and wrapped into [0, 1).
pub fn kaleidoscope_mirrors(count: usize, color_spread: f32, base_hue: f32) -> Vec<Mirror> {
    let unit_rotation = std::f32::consts::TAU / count as f32;
    let unit_hue = color_spread / count as f32;
    (1..=count)
        .map(|i| Mirror {
            angle: i as f32 * unit_rotation,
            hue: (base_hue + i as f32 * unit_hue).rem_euclid(1.0),
        })
        .collect()
}

/// A captured lane projected into the plot area: a lazy source of local
/// screen points plus the trace's anchor translation.
///
/// Local points and the translation are kept separate so the line-style
/// pipeline can contract segment starts toward the trace anchor.
pub struct ProjectedTrace<'a> {
    x: Option<&'a [f32]>,
    y: &'a [f32],
    gain: Vec2,
    offset: Vec2,
    cos2r: f32,
    sin2r: f32,
    translation: Vec2,
    area: Rect,
    paired: bool,
    len: usize,
}

impl<'a> ProjectedTrace<'a> {
    /// Build a trace over `len` samples. `x` is `None` for time-series
    /// traces, which sweep the sample index across the width instead.
    /// `anchor_radius`/`anchor_angle` position a kaleidoscope copy; the
    /// base trace uses zero for both.
    pub fn new(
        x: Option<&'a [f32]>,
        y: &'a [f32],
        len: usize,
        gain: Vec2,
        offset: Vec2,
        anchor_radius: f32,
        anchor_angle: f32,
        paired: bool,
        bounds: Rect,
    ) -> Self {
        // Anchor at the viewport center, pushed out by the mirror radius
        // along the anchor angle. Time-series traces keep their left edge
        // at x = 0 instead of centering.
        let mut translation = Vec2::new(
            anchor_radius * anchor_angle.cos() + bounds.size.x / 2.0,
            anchor_radius * anchor_angle.sin() - (bounds.size.y - 2.0 * PLOT_MARGIN) / 2.0,
        );
        if !paired {
            translation.x -= bounds.size.x / 2.0;
        }

        let rotation = 2.0 * anchor_angle;
        Self {
            x,
            y,
            gain,
            offset,
            cos2r: rotation.cos(),
            sin2r: rotation.sin(),
            translation,
            area: plot_area(bounds),
            paired,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Local screen-space point for sample `i`, before the anchor
    /// translation is applied.
    pub fn local_point(&self, i: usize) -> Vec2 {
        let v = Vec2::new(
            match self.x {
                Some(x) => (x[i] + self.offset.x) * self.gain.x / 2.0,
                None => i as f32 / (self.len - 1) as f32,
            },
            (self.y[i] + self.offset.y) * self.gain.y / 2.0,
        );

        // Doubled-angle rotation about the anchor.
        let rotated = Vec2::new(
            v.x * self.cos2r + v.y * self.sin2r,
            -v.x * self.sin2r + v.y * self.cos2r,
        );

        let b = self.area;
        // Paired plots rescale X into the height range, preserving the
        // curve's aspect ratio in a non-square viewport.
        let px = if self.paired {
            rescale(rotated.x, 0.0, 1.0, b.pos.x, b.pos.y + b.size.y)
        } else {
            rescale(rotated.x, 0.0, 1.0, b.pos.x, b.pos.x + b.size.x)
        };
        let py = rescale(rotated.y, 0.0, 1.0, b.pos.y + b.size.y, b.pos.y);
        Vec2::new(px, py)
    }
}
