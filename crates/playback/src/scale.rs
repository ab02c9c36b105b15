//! Continuous scales: linear, power and power-to-color
//!
//! Scales are unclamped unless asked otherwise, so inputs outside the
//! domain extrapolate. A degenerate domain maps every input to the start
//! of the range.

use gaia_shared::Rgb;

/// Position of `x` between `a` and `b`, 0 at `a` and 1 at `b`
fn normalize(x: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.0
    } else {
        (x - a) / span
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Sign-preserving power
fn signed_pow(x: f64, exponent: f64) -> f64 {
    if x < 0.0 {
        -(-x).powf(exponent)
    } else {
        x.powf(exponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, x: f64) -> f64 {
        let t = normalize(x, self.domain[0], self.domain[1]);
        lerp(self.range[0], self.range[1], t)
    }

    pub fn invert(&self, y: f64) -> f64 {
        let t = normalize(y, self.range[0], self.range[1]);
        lerp(self.domain[0], self.domain[1], t)
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowScale {
    exponent: f64,
    domain: [f64; 2],
    range: [f64; 2],
    clamp: bool,
}

impl PowScale {
    pub fn new(exponent: f64, domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            exponent,
            domain,
            range,
            clamp: false,
        }
    }

    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    fn position(&self, x: f64) -> f64 {
        let t = normalize(
            signed_pow(x, self.exponent),
            signed_pow(self.domain[0], self.exponent),
            signed_pow(self.domain[1], self.exponent),
        );
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        lerp(self.range[0], self.range[1], self.position(x))
    }
}

/// Power scale whose range is a pair of colors, interpolated in RGB
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    position: PowScale,
    range: [Rgb; 2],
}

impl ColorScale {
    pub fn new(exponent: f64, domain: [f64; 2], range: [Rgb; 2]) -> Self {
        Self {
            position: PowScale::new(exponent, domain, [0.0, 1.0]),
            range,
        }
    }

    pub fn clamped(mut self, clamp: bool) -> Self {
        self.position = self.position.clamped(clamp);
        self
    }

    pub fn apply(&self, x: f64) -> Rgb {
        self.range[0].lerp(self.range[1], self.position.position(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_apply_and_invert() {
        let percent_to_date = LinearScale::new([0.0, 100.0], [1000.0, 3000.0]);
        assert_eq!(percent_to_date.apply(0.0), 1000.0);
        assert_eq!(percent_to_date.apply(50.0), 2000.0);
        assert_eq!(percent_to_date.apply(100.0), 3000.0);
        assert_eq!(percent_to_date.invert(2500.0), 75.0);
        // Unclamped
        assert_eq!(percent_to_date.apply(150.0), 4000.0);
    }

    #[test]
    fn test_linear_degenerate_range_inverts_to_domain_start() {
        let scale = LinearScale::new([0.0, 100.0], [42.0, 42.0]);
        assert_eq!(scale.apply(30.0), 42.0);
        assert_eq!(scale.invert(42.0), 0.0);
        assert_eq!(scale.invert(99.0), 0.0);
    }

    #[test]
    fn test_pow_scale() {
        let scale = PowScale::new(3.0, [2.5, 10.0], [0.5, 15.0]);
        assert!((scale.apply(2.5) - 0.5).abs() < 1e-12);
        assert!((scale.apply(10.0) - 15.0).abs() < 1e-12);

        // 5^3 = 125 sits at (125 - 15.625) / (1000 - 15.625) of the way
        let expected = 0.5 + 14.5 * (125.0 - 15.625) / (1000.0 - 15.625);
        assert!((scale.apply(5.0) - expected).abs() < 1e-12);

        // Extrapolates below the domain unless clamped
        assert!(scale.apply(1.0) < 0.5);
        assert_eq!(scale.clamped(true).apply(1.0), 0.5);
        assert_eq!(scale.clamped(true).apply(20.0), 15.0);
    }

    #[test]
    fn test_signed_pow_is_odd() {
        assert_eq!(signed_pow(-2.0, 3.0), -8.0);
        assert_eq!(signed_pow(-4.0, 0.5), -2.0);
        assert_eq!(signed_pow(4.0, 0.5), 2.0);
    }

    #[test]
    fn test_color_scale_reversed_domain() {
        let red = Rgb::new(255, 0, 0);
        let yellow = Rgb::new(255, 255, 0);
        let scale = ColorScale::new(3.0, [3.0, 2.0], [red, yellow]);

        assert_eq!(scale.apply(3.0), red);
        assert_eq!(scale.apply(2.0), yellow);
        assert_eq!(scale.apply(6.0), red);
        assert_eq!(scale.apply(1.0), yellow);

        let mid = scale.apply(2.5);
        assert_eq!(mid.r, 255);
        assert!(mid.g > 0 && mid.g < 255);
    }
}
