//! Complex baseband symbol

/// One I/Q constellation sample.
///
/// Straight out of the modulator every symbol sits on the unit circle;
/// once channel noise is added the magnitude is no longer fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Symbol {
    /// In-phase (real) component
    pub i: f64,
    /// Quadrature (imaginary) component
    pub q: f64,
}

impl Symbol {
    #[inline]
    pub fn new(i: f64, q: f64) -> Self {
        Self { i, q }
    }

    #[inline]
    pub fn mag_sq(self) -> f64 {
        self.i * self.i + self.q * self.q
    }

    #[inline]
    pub fn mag(self) -> f64 {
        self.mag_sq().sqrt()
    }

    /// Phase in radians, (-π, π]
    #[inline]
    pub fn phase(self) -> f64 {
        self.q.atan2(self.i)
    }
}

impl From<(f64, f64)> for Symbol {
    #[inline]
    fn from((i, q): (f64, f64)) -> Self {
        Self { i, q }
    }
}

impl std::ops::Add for Symbol {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { i: self.i + rhs.i, q: self.q + rhs.q }
    }
}

impl std::ops::Sub for Symbol {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { i: self.i - rhs.i, q: self.q - rhs.q }
    }
}
