//! Color temperature curve over the daylight window.
//!
//! Maps a timestamp plus the day's sunrise/sunset bounds onto a mired value:
//! warmest (`max_mireds`) outside the window, coolest (`min_mireds`) at solar
//! noon, with a tanh-based S-curve in between. A tanh easing saturates cleanly
//! at both ends without overshoot and is symmetric around solar noon, unlike a
//! plain linear ramp.

/// Calibration targets for the sigmoid: the folded position 0 (solar noon)
/// must land within `Y1` of the bottom of the range, position 1 (window edge)
/// within `1 - Y2` of the top.
const Y1: f64 = 0.00001;
const Y2: f64 = 0.999;

/// Precomputed sigmoid parameters. Construct once, then call
/// [`target_temperature`](CurveEngine::target_temperature) freely.
#[derive(Debug, Clone, Copy)]
pub struct CurveEngine {
    a: f64,
    b: f64,
}

impl CurveEngine {
    pub fn new() -> Self {
        // Solve tanh(a * (0 - b)) = 2*Y1 - 1 and tanh(a * (1 - b)) = 2*Y2 - 1.
        let a = (2.0 * Y2 - 1.0).atanh() - (2.0 * Y1 - 1.0).atanh();
        let b = -((2.0 * Y1 - 1.0).atanh() / a);
        Self { a, b }
    }

    /// Target color temperature in mireds for `now`, given today's window.
    ///
    /// Timestamps are UNIX seconds. Caller guarantees `sunrise < sunset`,
    /// `min_mireds <= max_mireds` and `speed > 0`. Deterministic, no side
    /// effects. The result is rounded to one decimal place.
    pub fn target_temperature(
        &self,
        now: i64,
        sunrise: i64,
        sunset: i64,
        min_mireds: f32,
        max_mireds: f32,
        speed: f32,
    ) -> f32 {
        if now < sunrise || now > sunset {
            return max_mireds;
        }
        let position = (now - sunrise) as f64 / (sunset - sunrise) as f64;
        // Fold around solar noon: 0 at the middle of the window, 1 at the edges.
        let x_adj = (1.0 - 2.0 * position).abs().powf(f64::from(speed));
        let span = f64::from(max_mireds) - f64::from(min_mireds);
        let mireds = f64::from(min_mireds) + span * 0.5 * ((self.a * (x_adj - self.b)).tanh() + 1.0);
        ((mireds * 10.0).round() / 10.0) as f32
    }
}

impl Default for CurveEngine {
    fn default() -> Self {
        Self::new()
    }
}
