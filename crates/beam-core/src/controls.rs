//! Control values handed to the core on every tick.
//!
//! Each field pairs a knob position with the summed voltage on its external
//! control input. The accessor methods apply the combination formulas and
//! clamp the result to the control's valid domain, so the engines never see
//! an out-of-range value.

/// How a captured sweep is projected to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotType {
    /// Two independent time-series traces, one per axis.
    Normal,
    /// X and Y paired into one parametric curve per lane.
    Lissajous,
    /// Lissajous plus rotated, mirrored, hue-shifted copies.
    Kaleidoscope,
}

impl PlotType {
    const COUNT: i32 = 3;

    /// Resolve the plot selector from knob + CV. A 3 V swing on the control
    /// input steps one plot type.
    pub fn from_control(knob: f32, cv: f32) -> Self {
        match ((knob + cv / 3.0) as i32).clamp(0, Self::COUNT - 1) {
            0 => PlotType::Normal,
            1 => PlotType::Lissajous,
            _ => PlotType::Kaleidoscope,
        }
    }

    /// X and Y samples are paired into one parametric curve.
    pub fn pairs_axes(self) -> bool {
        !matches!(self, PlotType::Normal)
    }

    pub fn mirrored(self) -> bool {
        matches!(self, PlotType::Kaleidoscope)
    }
}

/// Segment interpolation style. The selector is continuous: the fractional
/// part morphs toward the next style for smooth automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Vector,
    Experimental,
}

impl LineStyle {
    /// Decompose the raw control sum into a discrete style and the blend
    /// toward the next style. The sum is clamped to the [0, 2] selector span
    /// first, so the blend is always in [0, 1).
    pub fn from_control(knob: f32, cv: f32) -> (Self, f32) {
        let raw = (knob + cv).clamp(0.0, 2.0);
        let index = (raw as i32).min(2);
        let blend = raw - index as f32;
        let style = match index {
            0 => LineStyle::Normal,
            1 => LineStyle::Vector,
            _ => LineStyle::Experimental,
        };
        (style, blend)
    }
}

/// Controls sampled at each audio tick.
#[derive(Debug, Clone, Copy)]
pub struct CaptureControls {
    /// Time knob: power-of-two decimation exponent, 6..16.
    pub time: f32,
    pub time_cv: f32,
    /// Trigger threshold knob, -10..10 V.
    pub threshold: f32,
    pub threshold_cv: f32,
    /// Trigger from the external input instead of the X input.
    pub external: bool,
    /// Plot-type selector knob.
    pub plot: f32,
    pub plot_cv: f32,
}

impl Default for CaptureControls {
    fn default() -> Self {
        Self {
            time: 14.0,
            time_cv: 0.0,
            threshold: 0.0,
            threshold_cv: 0.0,
            external: false,
            plot: 0.0,
            plot_cv: 0.0,
        }
    }
}

impl CaptureControls {
    pub fn plot_type(&self) -> PlotType {
        PlotType::from_control(self.plot, self.plot_cv)
    }

    /// Trigger level in volts, clamped to the input voltage range.
    pub fn trigger_level(&self) -> f32 {
        (self.threshold + self.threshold_cv).clamp(-10.0, 10.0)
    }

    /// Audio ticks that must elapse before the next sample is stored.
    pub fn decimation_ticks(&self, sample_rate: f32) -> u32 {
        let t = (self.time + self.time_cv.abs()).clamp(6.0, 16.0);
        let delta_time = (2.0_f32).powf(-t);
        (delta_time * sample_rate).ceil() as u32
    }
}

/// Controls sampled at each render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderControls {
    /// Per-axis scale knobs: power-of-two gain exponents.
    pub x_scale: f32,
    pub x_scale_cv: f32,
    pub y_scale: f32,
    pub y_scale_cv: f32,
    /// Per-axis position offsets, in volts.
    pub x_pos: f32,
    pub x_pos_cv: f32,
    pub y_pos: f32,
    pub y_pos_cv: f32,
    /// Beam hue knob, 0..1.
    pub hue: f32,
    pub hue_cv: f32,
    pub line_width: f32,
    pub line_width_cv: f32,
    /// Line-style selector knob.
    pub line_style: f32,
    pub line_style_cv: f32,
    /// Per-sample alpha/width decay over the sweep.
    pub fade: bool,
    /// Plot-type selector knob (shared with the capture side).
    pub plot: f32,
    pub plot_cv: f32,
    /// Kaleidoscope mirror count knob, 3..12.
    pub mirrors: f32,
    pub mirrors_cv: f32,
    pub mirror_radius: f32,
    pub mirror_radius_cv: f32,
    pub color_spread: f32,
    pub color_spread_cv: f32,
    /// Trigger threshold, echoed here for the indicator overlay.
    pub threshold: f32,
    pub threshold_cv: f32,
    pub show_stats: bool,
    pub show_labels: bool,
}

impl Default for RenderControls {
    fn default() -> Self {
        Self {
            x_scale: 0.0,
            x_scale_cv: 0.0,
            y_scale: 0.0,
            y_scale_cv: 0.0,
            x_pos: 0.0,
            x_pos_cv: 0.0,
            y_pos: 0.0,
            y_pos_cv: 0.0,
            hue: 1.0,
            hue_cv: 0.0,
            line_width: 1.5,
            line_width_cv: 0.0,
            line_style: 0.0,
            line_style_cv: 0.0,
            fade: true,
            plot: 0.0,
            plot_cv: 0.0,
            mirrors: 3.0,
            mirrors_cv: 0.0,
            mirror_radius: 1.0,
            mirror_radius_cv: 0.0,
            color_spread: 0.0,
            color_spread_cv: 0.0,
            threshold: 0.0,
            threshold_cv: 0.0,
            show_stats: false,
            show_labels: false,
        }
    }
}

impl RenderControls {
    /// Power-of-two gain per axis. A 10 V signal at gain exponent 0 spans
    /// the full normalized range.
    pub fn gain_x(&self) -> f32 {
        (2.0_f32).powf(self.x_scale) / 10.0 + self.x_scale_cv / 10.0
    }

    pub fn gain_y(&self) -> f32 {
        (2.0_f32).powf(self.y_scale) / 10.0 + self.y_scale_cv / 10.0
    }

    pub fn offset_x(&self) -> f32 {
        self.x_pos + self.x_pos_cv
    }

    pub fn offset_y(&self) -> f32 {
        self.y_pos + self.y_pos_cv
    }

    /// Beam hue; conversion to RGB wraps it into [0, 1).
    pub fn beam_hue(&self) -> f32 {
        self.hue + self.hue_cv / 10.0
    }

    pub fn beam_width(&self) -> f32 {
        self.line_width + self.line_width_cv
    }

    pub fn plot_type(&self) -> PlotType {
        PlotType::from_control(self.plot, self.plot_cv)
    }

    pub fn style(&self) -> (LineStyle, f32) {
        LineStyle::from_control(self.line_style, self.line_style_cv)
    }

    pub fn mirror_count(&self) -> usize {
        (self.mirrors + self.mirrors_cv).clamp(3.0, 12.0) as usize
    }

    pub fn mirror_radius_px(&self) -> f32 {
        self.mirror_radius + self.mirror_radius_cv * 10.0
    }

    pub fn mirror_color_spread(&self) -> f32 {
        self.color_spread + self.color_spread_cv / 5.0
    }

    pub fn trigger_level(&self) -> f32 {
        (self.threshold + self.threshold_cv).clamp(-10.0, 10.0)
    }
}
