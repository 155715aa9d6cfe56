use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit `i`.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.real, self.imaginary) {
            (0.0, 0.0) => write!(f, "0"),
            (real, 0.0) => write!(f, "{real}"),
            (0.0, imaginary) => write!(f, "{imaginary}i"),
            (real, imaginary) if imaginary > 0.0 => write!(f, "{real} + {imaginary}i"),
            (real, imaginary) => write!(f, "{real} - {}i", -imaginary),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Converts to a `Value::Real` if the imaginary part is zero, otherwise
    /// returns `Value::Complex`.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::{complex::ComplexNumber, core::Value};
    /// let real = ComplexNumber::new(3.0, 0.0);
    /// assert_eq!(real.checked_as_real(), Value::Real(3.0));
    ///
    /// let complex = ComplexNumber::new(2.0, 1.0);
    /// assert!(matches!(complex.checked_as_real(), Value::Complex(_)));
    /// ```
    #[must_use]
    pub const fn checked_as_real(&self) -> Value {
        if self.imaginary == 0.0 {
            Value::Real(self.real)
        } else {
            Value::Complex(*self)
        }
    }

    /// Returns `true` if both parts are exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// Returns the absolute value (magnitude) of the complex number.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Returns the complex conjugate of the number.
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }

    /// Returns the argument (phase angle) in radians.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Returns the principal square root of the complex number.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(9.0, 0.0);
    /// let s = c.sqrt();
    /// assert!((s.real - 3.0).abs() < 1e-10);
    /// assert!(s.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = ((r + a) / 2.0).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt().copysign(b); // preserve sign of b

        Self { real, imaginary }
    }

    /// Returns the exponential of the complex number.
    #[must_use]
    pub fn exp(self) -> Self {
        let exp_r = self.real.exp();
        Self { real:      exp_r * self.imaginary.cos(),
               imaginary: exp_r * self.imaginary.sin(), }
    }

    /// Returns the natural logarithm of the complex number (principal branch).
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }

    /// Raises the complex number to an arbitrary complex power via
    /// `z^w = exp(w ln z)`. A zero base yields `1` for a zero exponent and
    /// `0` otherwise; the divisor-zero case of a negative real exponent is
    /// checked by the caller.
    #[must_use]
    pub fn powc(self, exp: Self) -> Self {
        if self.is_zero() {
            return if exp.is_zero() { ONE } else { ZERO };
        }
        (exp * self.ln()).exp()
    }

    /// Returns the sine of the complex number.
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }

    /// Returns the cosine of the complex number.
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }

    /// Returns the tangent of the complex number.
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// Returns the hyperbolic sine of the complex number.
    #[must_use]
    pub fn sinh(self) -> Self {
        Self { real:      self.real.sinh() * self.imaginary.cos(),
               imaginary: self.real.cosh() * self.imaginary.sin(), }
    }

    /// Returns the hyperbolic cosine of the complex number.
    #[must_use]
    pub fn cosh(self) -> Self {
        Self { real:      self.real.cosh() * self.imaginary.cos(),
               imaginary: self.real.sinh() * self.imaginary.sin(), }
    }

    /// Returns the hyperbolic tangent of the complex number.
    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    /// Returns the arcsine (principal branch):
    /// `asin(z) = -i ln(iz + sqrt(1 - z^2))`.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::complex::ComplexNumber;
    /// // asin(0.5 + 0i) agrees with the real arcsine.
    /// let z = ComplexNumber::new(0.5, 0.0);
    /// assert!((z.asin().real - 0.5_f64.asin()).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn asin(self) -> Self {
        let inner = (ONE - self * self).sqrt() + I * self;
        -(I * inner.ln())
    }

    /// Returns the arccosine (principal branch): `acos(z) = pi/2 - asin(z)`.
    #[must_use]
    pub fn acos(self) -> Self {
        ComplexNumber::new(std::f64::consts::FRAC_PI_2, 0.0) - self.asin()
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { real:      value.into(),
               imaginary: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.real).hash(state);
        OrderedFloat(self.imaginary).hash(state);
    }
}
