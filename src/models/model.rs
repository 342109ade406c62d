//! Parametric model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - evaluate `y` for a tagged input `(x, q)`
//! - optionally, build a design row for models that are linear in `q`
//!   (used for the closed-form least-squares reference)
//!
//! Built-in models live here; any closure can be wrapped with [`FnModel`].

use nalgebra::DVector;

use crate::domain::ModelKind;

/// Model input: the evaluation point `x` and the free parameters `q`.
///
/// Both helpers return fresh copies, so a perturbed evaluation never aliases
/// the caller's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamVector {
    pub x: f64,
    pub q: DVector<f64>,
}

impl ParamVector {
    pub fn new(x: f64, q: DVector<f64>) -> Self {
        Self { x, q }
    }

    pub fn from_slice(x: f64, q: &[f64]) -> Self {
        Self::new(x, DVector::from_column_slice(q))
    }

    /// Copy with the x slot replaced.
    pub fn at(&self, x: f64) -> Self {
        Self {
            x,
            q: self.q.clone(),
        }
    }

    /// Copy with `q[index] += delta`.
    ///
    /// # Panics
    /// Panics if `index >= self.q.len()`.
    pub fn perturbed(&self, index: usize, delta: f64) -> Self {
        let mut q = self.q.clone();
        q[index] += delta;
        Self { x: self.x, q }
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

/// A scalar model `y = f(x; q)`.
pub trait ParametricModel: Send + Sync {
    fn name(&self) -> &str;

    /// Number of free parameters `q`.
    fn param_len(&self) -> usize;

    fn eval(&self, p: &ParamVector) -> f64;

    /// `row(x)` such that `y = row(x) · q`, for models linear in `q`.
    fn design_row(&self, _x: f64) -> Option<Vec<f64>> {
        None
    }
}

/// `q0 e^{-(x-q1)^2/q2^2} + q3`
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianOffset;

impl ParametricModel for GaussianOffset {
    fn name(&self) -> &str {
        ModelKind::Gaussian.display_name()
    }

    fn param_len(&self) -> usize {
        4
    }

    fn eval(&self, p: &ParamVector) -> f64 {
        let q = &p.q;
        let dx = p.x - q[1];
        q[0] * (-(dx * dx) / (q[2] * q[2])).exp() + q[3]
    }
}

/// `q0 + q1 x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Line;

impl ParametricModel for Line {
    fn name(&self) -> &str {
        ModelKind::Line.display_name()
    }

    fn param_len(&self) -> usize {
        2
    }

    fn eval(&self, p: &ParamVector) -> f64 {
        p.q[0] + p.q[1] * p.x
    }

    fn design_row(&self, x: f64) -> Option<Vec<f64>> {
        Some(vec![1.0, x])
    }
}

/// `q0 (x-q1)^2 + q2`
#[derive(Debug, Clone, Copy, Default)]
pub struct Parabola;

impl ParametricModel for Parabola {
    fn name(&self) -> &str {
        ModelKind::Parabola.display_name()
    }

    fn param_len(&self) -> usize {
        3
    }

    fn eval(&self, p: &ParamVector) -> f64 {
        let dx = p.x - p.q[1];
        p.q[0] * dx * dx + p.q[2]
    }
}

/// `q0 + q1 e^{-(q2-x)^2/q3^2} + q4 e^{-(q5-x)^2/q6^2}`
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleGaussian;

impl ParametricModel for DoubleGaussian {
    fn name(&self) -> &str {
        ModelKind::DoubleGaussian.display_name()
    }

    fn param_len(&self) -> usize {
        7
    }

    fn eval(&self, p: &ParamVector) -> f64 {
        let q = &p.q;
        let d1 = q[2] - p.x;
        let d2 = q[5] - p.x;
        q[0] + q[1] * (-(d1 * d1) / (q[3] * q[3])).exp() + q[4] * (-(d2 * d2) / (q[6] * q[6])).exp()
    }
}

/// Wrap a closure `f(x, q)` as a model.
pub struct FnModel<F> {
    name: String,
    param_len: usize,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(f64, &DVector<f64>) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, param_len: usize, f: F) -> Self {
        Self {
            name: name.into(),
            param_len,
            f,
        }
    }
}

impl<F> ParametricModel for FnModel<F>
where
    F: Fn(f64, &DVector<f64>) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn param_len(&self) -> usize {
        self.param_len
    }

    fn eval(&self, p: &ParamVector) -> f64 {
        (self.f)(p.x, &p.q)
    }
}

/// Built-in model for `kind`.
pub fn model_for(kind: ModelKind) -> Box<dyn ParametricModel> {
    match kind {
        ModelKind::Gaussian => Box::new(GaussianOffset),
        ModelKind::Line => Box::new(Line),
        ModelKind::Parabola => Box::new(Parabola),
        ModelKind::DoubleGaussian => Box::new(DoubleGaussian),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perturbed_leaves_the_source_untouched() {
        let p = ParamVector::from_slice(3.0, &[1.0, 2.0]);
        let moved = p.perturbed(1, 0.5);
        assert_eq!(p.q[1], 2.0);
        assert_eq!(moved.q[1], 2.5);
        assert_eq!(moved.x, 3.0);
        assert_eq!(p.at(7.0).x, 7.0);
    }

    #[test]
    fn gaussian_offset_peaks_at_center() {
        let p = ParamVector::from_slice(10.0, &[300.0, 10.0, 2.0, 5.0]);
        assert_eq!(GaussianOffset.eval(&p), 305.0);
        let far = p.at(1e3);
        assert!((GaussianOffset.eval(&far) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn built_ins_agree_with_model_kind_sizes() {
        for kind in [
            ModelKind::Gaussian,
            ModelKind::Line,
            ModelKind::Parabola,
            ModelKind::DoubleGaussian,
        ] {
            let model = model_for(kind);
            assert_eq!(model.param_len(), kind.param_len());
            assert_eq!(kind.default_initial().len(), kind.param_len());
            let p = ParamVector::from_slice(0.5, &kind.default_initial());
            assert!(model.eval(&p).is_finite(), "{}", model.name());
        }
    }

    #[test]
    fn line_design_row_reproduces_eval() {
        let p = ParamVector::from_slice(2.0, &[1.5, -0.25]);
        let row = Line.design_row(p.x).unwrap();
        let dot: f64 = row.iter().zip(p.q.iter()).map(|(a, b)| a * b).sum();
        assert_eq!(dot, Line.eval(&p));
        assert!(Parabola.design_row(1.0).is_none());
    }

    #[test]
    fn closures_can_be_models() {
        let cubic = FnModel::new("cubic", 1, |x, q: &DVector<f64>| q[0] * x * x * x);
        let p = ParamVector::from_slice(2.0, &[0.5]);
        assert_eq!(cubic.eval(&p), 4.0);
        assert_eq!(cubic.name(), "cubic");
    }
}
