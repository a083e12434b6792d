use beam_core::color::Rgba;
use beam_core::draw::DisplayList;
use beam_core::geom::{plot_area, Rect};
use glam::Vec2;

use crate::stats::Stats;

/// Millimeters to screen units, at the host's 75 dpi panel scale.
const MM: f32 = 75.0 / 25.4;

const GUIDE: Rgba = Rgba::rgba8(0xff, 0xff, 0xff, 0x10);
const MARKER: Rgba = Rgba::rgba8(0xff, 0xff, 0xff, 0x60);
const MARKER_TEXT: Rgba = Rgba::rgba8(0x1e, 0x28, 0x2b, 0xff);
const TITLE: Rgba = Rgba::rgba8(0xff, 0xff, 0xff, 0x40);
const VALUE: Rgba = Rgba::rgba8(0xff, 0xff, 0xff, 0x80);

/// Horizontal guide line, arrow marker, and "T" glyph at the trigger
/// threshold's screen height. `value` is the threshold after the X
/// offset/gain mapping, in the normalized [-1, 1] plot range.
pub fn trigger_indicator(out: &mut DisplayList, value: f32, bounds: Rect) {
    let b = plot_area(bounds);
    let value = value / 2.0 + 0.5;
    let p = Vec2::new(bounds.size.x, b.pos.y + b.size.y * (1.0 - value));

    out.stroke(Vec2::new(p.x - 13.0, p.y), Vec2::new(0.0, p.y), GUIDE, 1.0);
    out.polygon(
        vec![
            Vec2::new(p.x - 2.0, p.y - 4.0),
            Vec2::new(p.x - 9.0, p.y - 4.0),
            Vec2::new(p.x - 13.0, p.y),
            Vec2::new(p.x - 9.0, p.y + 4.0),
            Vec2::new(p.x - 2.0, p.y + 4.0),
        ],
        MARKER,
    );
    out.text(Vec2::new(p.x - 8.0, p.y + 3.0), 9.0, MARKER_TEXT, "T");
}

/// One axis's statistics row: a title glyph plus peak-to-peak, max, and
/// min readouts. Values beyond the +-100 V display range render as dashes.
pub fn stats_row(out: &mut DisplayList, pos: Vec2, title: &str, stats: &Stats) {
    out.text(pos + Vec2::new(6.0, 11.0), 13.0, TITLE, title);

    let origin = pos + Vec2::new(22.0, 11.0);
    for (slot, (label, value)) in [
        ("pp ", stats.vpp),
        ("max ", stats.max),
        ("min ", stats.min),
    ]
    .into_iter()
    .enumerate()
    {
        out.text(
            origin + Vec2::new(58.0 * slot as f32, 0.0),
            13.0,
            VALUE,
            readout(label, value),
        );
    }
}

fn readout(label: &str, value: f32) -> String {
    if value.abs() <= 100.0 {
        format!("{label}{value:>6.2}")
    } else {
        format!("{label}  ---")
    }
}

/// Captions for the control column, drawn when labels are enabled.
pub fn control_labels(out: &mut DisplayList) {
    const LABELS: [&str; 16] = [
        "X Input",
        "X Scale",
        "X Position",
        "Y Input",
        "Y Scale",
        "Y Position",
        "Time",
        "Trigger Input",
        "Trigger Position",
        "Color",
        "Line Width",
        "Kaleidoscope Images",
        "Kaleidoscope Radius",
        "Color Spread",
        "Line Type",
        "Plot Type",
    ];

    let mut y = 6.5;
    for label in LABELS {
        out.text(Vec2::new(10.0 * MM, y * MM), 13.0, VALUE, label);
        y += 7.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beam_core::draw::DrawCommand;

    #[test]
    fn test_trigger_indicator_centered_at_zero() {
        let mut out = DisplayList::default();
        let bounds = Rect::new(0.0, 0.0, 300.0, 130.0);
        trigger_indicator(&mut out, 0.0, bounds);
        // Guide line sits at the vertical middle of the plot area.
        match &out.commands[0] {
            DrawCommand::Stroke { from, to, .. } => {
                assert_eq!(from.y, 65.0);
                assert_eq!(to.y, 65.0);
                assert_eq!(to.x, 0.0);
            }
            other => panic!("expected stroke, got {other:?}"),
        }
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_trigger_indicator_tracks_value() {
        let mut out = DisplayList::default();
        let bounds = Rect::new(0.0, 0.0, 300.0, 130.0);
        trigger_indicator(&mut out, 1.0, bounds);
        match &out.commands[0] {
            // value 1.0 maps to the top of the plot area.
            DrawCommand::Stroke { from, .. } => assert_eq!(from.y, 15.0),
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_readout_formats_in_range() {
        assert_eq!(readout("pp ", 1.5), "pp   1.50");
        assert_eq!(readout("min ", -10.0), "min -10.00");
    }

    #[test]
    fn test_readout_dashes_out_of_range() {
        assert_eq!(readout("max ", 250.0), "max   ---");
        assert_eq!(readout("max ", f32::NEG_INFINITY), "max   ---");
    }

    #[test]
    fn test_stats_row_emits_four_texts() {
        let mut out = DisplayList::default();
        let stats = Stats {
            vpp: 2.0,
            min: -1.0,
            max: 1.0,
        };
        stats_row(&mut out, Vec2::new(25.0, 0.0), "X", &stats);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_control_labels_full_column() {
        let mut out = DisplayList::default();
        control_labels(&mut out);
        assert_eq!(out.len(), 16);
    }
}
