use stencil_fit::data::sample;
use stencil_fit::domain::{Domain, FunctionKind, Grid, SincPolicy, StencilKind};
use stencil_fit::error::NumericError;
use stencil_fit::stencil::{estimator_for, rms_error, score_stencils};

fn grid_of(f: impl Fn(f64) -> f64, start: f64, step: f64, n: usize) -> Grid {
    let x: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    let y = x.iter().map(|&x| f(x)).collect();
    Grid::new(x, y).unwrap()
}

/// Interior indices where `kind` produces a real derivative.
fn interior(kind: StencilKind, n: usize) -> std::ops::Range<usize> {
    match kind {
        StencilKind::TwoPoint => 0..n - 1,
        StencilKind::ThreePoint | StencilKind::Parabolic => 1..n - 1,
        StencilKind::FivePoint => 2..n - 2,
    }
}

fn boundary(kind: StencilKind, n: usize) -> Vec<usize> {
    (0..n).filter(|j| !interior(kind, n).contains(j)).collect()
}

#[test]
fn every_stencil_is_exact_on_lines() {
    let cases = [(2.5, -1.0, -3.0, 0.25), (-0.7, 4.0, 10.0, 0.01), (0.0, 3.0, 0.0, 1.0)];
    for (m, b, start, step) in cases {
        let g = grid_of(|x| m * x + b, start, step, 12);
        for kind in StencilKind::ALL {
            let e = estimator_for(kind, None).estimate(&g).unwrap();
            assert_eq!(e.len(), g.len());
            for j in interior(kind, g.len()) {
                assert!((e.y[j] - m).abs() < 1e-7, "{} j={j}: {}", kind.display_name(), e.y[j]);
            }
        }
    }
}

#[test]
fn two_point_on_parabola_is_twice_the_midpoint() {
    let g = grid_of(|x| x * x, -2.0, 0.1, 41);
    let e = estimator_for(StencilKind::TwoPoint, None).estimate(&g).unwrap();
    for j in 0..g.len() - 1 {
        assert!((e.y[j] - 2.0 * e.x[j]).abs() < 1e-9, "j={j}");
    }
}

#[test]
fn error_shrinks_with_stencil_order() {
    let x0: f64 = 0.5;
    let exact = x0.cos();
    let centre_error = |kind: StencilKind, h: f64| {
        let g = grid_of(f64::sin, x0 - 2.0 * h, h, 5);
        let e = estimator_for(kind, Some(h)).estimate(&g).unwrap();
        (e.y[2] - exact).abs()
    };

    let (h1, h2) = (0.1, 0.05);
    let ratio = |kind: StencilKind| centre_error(kind, h1) / centre_error(kind, h2);
    // Read as an estimate of f'(x[2]), the forward difference is first order.
    let two = ratio(StencilKind::TwoPoint);
    let three = ratio(StencilKind::ThreePoint);
    let parabolic = ratio(StencilKind::Parabolic);
    let five = ratio(StencilKind::FivePoint);

    assert!((3.5..4.5).contains(&three), "three-point ratio {three}");
    assert!((3.5..4.5).contains(&parabolic), "parabolic ratio {parabolic}");
    assert!(five > 12.0, "five-point ratio {five}");
    assert!((1.7..2.3).contains(&two), "two-point ratio {two}");

    for h in [h1, h2] {
        let five = centre_error(StencilKind::FivePoint, h);
        let three = centre_error(StencilKind::ThreePoint, h);
        let two = centre_error(StencilKind::TwoPoint, h);
        assert!(five < three && three < two, "h={h}: {five} {three} {two}");
    }
}

#[test]
fn boundary_values_are_copied_bit_for_bit() {
    let grids = [
        grid_of(|x| (-(x * x)).exp(), -1.0, 0.5, 5),
        grid_of(|x| x.sin() * 1e6, 0.3, 0.7, 9),
        Grid::new(
            vec![0.0, 0.1, 0.5, 1.5, 1.6],
            vec![f64::MIN_POSITIVE, -0.0, 3.3, 1e-300, -7.25],
        )
        .unwrap(),
    ];
    for g in &grids {
        for kind in StencilKind::ALL {
            let e = estimator_for(kind, None).estimate(g).unwrap();
            for j in boundary(kind, g.len()) {
                assert_eq!(e.y[j].to_bits(), g.y[j].to_bits(), "{} j={j}", kind.display_name());
            }
        }
    }
}

#[test]
fn short_grids_are_rejected() {
    let four = grid_of(|x| x, 0.0, 1.0, 4);
    let two = grid_of(|x| x, 0.0, 1.0, 2);
    let one = grid_of(|x| x, 0.0, 1.0, 1);

    let err = estimator_for(StencilKind::FivePoint, None).estimate(&four).unwrap_err();
    assert_eq!(
        err,
        NumericError::InsufficientSamples {
            stencil: "five-point".to_string(),
            required: 5,
            actual: 4,
        }
    );
    for kind in [StencilKind::ThreePoint, StencilKind::Parabolic] {
        assert!(matches!(
            estimator_for(kind, None).estimate(&two),
            Err(NumericError::InsufficientSamples { required: 3, actual: 2, .. })
        ));
    }
    assert!(matches!(
        estimator_for(StencilKind::TwoPoint, None).estimate(&one),
        Err(NumericError::InsufficientSamples { required: 2, actual: 1, .. })
    ));
}

#[test]
fn rms_self_identity_and_shape_mismatch() {
    let g = sample(FunctionKind::Sinc, Domain::new(0.5, 10.0), 0.5, SincPolicy::Error).unwrap();
    assert_eq!(rms_error(&g, &g).unwrap(), 0.0);

    for n in 0..g.len() {
        let shorter = Grid::new(g.x[..n].to_vec(), g.y[..n].to_vec()).unwrap();
        assert!(matches!(rms_error(&g, &shorter), Err(NumericError::ShapeMismatch { .. })));
        assert!(matches!(rms_error(&shorter, &g), Err(NumericError::ShapeMismatch { .. })));
    }
}

#[test]
fn gaussian_unit_domain_sampling() {
    let g = sample(FunctionKind::Gaussian, Domain::new(-1.0, 1.0), 0.5, SincPolicy::Error).unwrap();
    assert_eq!(g.x, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    for (x, y) in g.points() {
        assert_eq!(y, (-(x * x)).exp());
    }
}

#[test]
fn sinc_through_zero_needs_a_policy() {
    let domain = Domain::new(-1.0, 1.0);
    assert!(matches!(
        sample(FunctionKind::Sinc, domain, 0.5, SincPolicy::Error),
        Err(NumericError::DomainError { index: 2, .. })
    ));

    let scores = score_stencils(
        FunctionKind::Sinc,
        Domain::new(-5.0, 5.0),
        0.05,
        SincPolicy::Limit,
        &StencilKind::ALL,
    )
    .unwrap();
    assert_eq!(scores.len(), 4);
    assert!(scores.iter().all(|s| s.rms.is_finite()));
}
