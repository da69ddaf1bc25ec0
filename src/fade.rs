//! The easing curve that maps scroll progress to overlay opacity.
//!
//! The curve is a saturating ramp: opacity rises linearly and reaches full
//! intensity at a fraction of the scroll range (70% by default), then holds
//! there. Scrolling the last 30% past the header changes nothing visually,
//! which keeps the header readable until it is mostly gone.

/// Saturating ramp from progress to opacity: `min(t, saturation) / saturation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeCurve {
    saturation: f32,
}

/// Fraction of the scroll range at which the fade reaches full intensity.
pub const SATURATION_DEFAULT: f32 = 0.7;

impl FadeCurve {
    /// A curve saturating at `saturation` of the range. Values are clamped
    /// into (0, 1] so the curve is always well defined.
    pub fn new(saturation: f32) -> Self {
        Self {
            saturation: saturation.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Evaluate the curve at progress `t`; input and output are in [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t.min(self.saturation) / self.saturation
    }
}

impl Default for FadeCurve {
    fn default() -> Self {
        Self::new(SATURATION_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_endpoints() {
        let curve = FadeCurve::default();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_saturates_at_seventy_percent() {
        let curve = FadeCurve::default();
        assert!(approx(curve.evaluate(0.7), 1.0));
        assert!(approx(curve.evaluate(0.85), 1.0));
        assert!(approx(curve.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_linear_below_saturation() {
        let curve = FadeCurve::default();
        // offset 10 of max 100
        assert!(approx(curve.evaluate(0.1), 0.142857));
        // offset 50 of max 100
        assert!(approx(curve.evaluate(0.5), 0.714286));
        assert!(approx(curve.evaluate(0.35), 0.5));
    }

    #[test]
    fn test_input_clamps() {
        let curve = FadeCurve::default();
        assert_eq!(curve.evaluate(-0.5), 0.0);
        assert_eq!(curve.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_custom_saturation() {
        let curve = FadeCurve::new(0.5);
        assert!(approx(curve.evaluate(0.25), 0.5));
        assert!(approx(curve.evaluate(0.5), 1.0));
        assert!(approx(curve.evaluate(0.9), 1.0));
    }

    #[test]
    fn test_degenerate_saturation_clamps() {
        // Zero would divide by zero; the constructor keeps it positive.
        let curve = FadeCurve::new(0.0);
        assert!(curve.saturation() > 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);

        let over = FadeCurve::new(5.0);
        assert_eq!(over.saturation(), 1.0);
    }
}
