mod test_utils;

use anyhow::Result;
use pretty_assertions::assert_eq;
use test_utils::{arbitrary, assert_float_eq, hazard_curve, init_logger};

use discretized_func::{
    BasicInterpolator, DiscretizedFunc, DiscretizedFuncMut, EvenlyDiscretizedFunc,
    EvenlyPrecomputedInterpolator, FuncError, Interpolate, InterpolationOptions, Interpolator,
    LightFixedXFunc, PrecomputedInterpolator, RepeatedUseInterpolator,
};

const ALL_OPTIONS: [InterpolationOptions; 4] = [
    InterpolationOptions::LINEAR,
    InterpolationOptions::LOG_X,
    InterpolationOptions::LOG_Y,
    InterpolationOptions::LOG_LOG,
];

fn query_points(func: &impl DiscretizedFunc, count: usize) -> Vec<f64> {
    let (min_x, max_x) = (func.x(0), func.x(func.size() - 1));
    (0..count)
        .map(|i| min_x + (max_x - min_x) * i as f64 / count as f64)
        .collect()
}

#[test]
fn test_strategies_agree_bit_for_bit() -> Result<()> {
    init_logger();
    let func = hazard_curve();

    for options in ALL_OPTIONS {
        let basic = BasicInterpolator::new(&func, options);
        let precomputed = PrecomputedInterpolator::new(&func, options)?;
        let repeated = RepeatedUseInterpolator::new(&func, options, 5);

        for x in query_points(&func, 250) {
            let expected = basic.find_y(x)?.to_bits();
            assert_eq!(precomputed.find_y(x)?.to_bits(), expected, "x={} {}", x, options);
            assert_eq!(repeated.find_y(x)?.to_bits(), expected, "x={} {}", x, options);
        }
        assert!(repeated.is_precomputed());
    }
    Ok(())
}

#[test]
fn test_boundaries_snap_to_end_values() -> Result<()> {
    let func = hazard_curve();
    let last = func.size() - 1;

    for options in ALL_OPTIONS {
        let interp = PrecomputedInterpolator::new(&func, options)?;
        assert_eq!(interp.find_y(func.min_x()?)?, func.y(0));
        assert_eq!(interp.find_y(func.max_x()?)?, func.y(last));
    }
    Ok(())
}

#[test]
fn test_out_of_domain_queries() {
    let func = arbitrary(&[(1.0, 1.0), (2.0, 4.0)]);
    for x in [0.5, 2.5, f64::NAN] {
        let err = func.interpolated_y(x).unwrap_err();
        assert!(err.is_domain_range(), "x={}", x);
    }

    let empty = arbitrary(&[]);
    assert!(empty.interpolated_y(1.0).is_err());
}

#[test]
fn test_tolerance_widens_domain() -> Result<()> {
    let mut func = arbitrary(&[(1.0, 1.0), (2.0, 4.0)]);
    func.set_tolerance(0.1)?;

    assert_eq!(func.interpolated_y(0.95)?, 1.0);
    assert_eq!(func.interpolated_y(2.05)?, 4.0);
    assert!(func.interpolated_y(2.2).is_err());
    Ok(())
}

#[test]
fn test_zero_segments_stay_zero_in_log_space() -> Result<()> {
    let func = arbitrary(&[(1.0, 0.0), (2.0, 0.0), (4.0, 8.0)]);
    assert_eq!(func.interpolated_y_in_log_x_log_y(1.5)?, 0.0);
    assert_eq!(func.interpolated_y_in_log_y(1.5)?, 0.0);
    Ok(())
}

#[test]
fn test_log_log_is_exact_for_power_laws() -> Result<()> {
    let mut func = EvenlyDiscretizedFunc::new(1.0, 10, 1.0)?;
    for i in 0..func.size() {
        let x = func.x(i);
        func.set_y(i, 3.0 * x.powf(-2.0))?;
    }

    for x in [1.5, 2.25, 7.75] {
        assert_float_eq(func.interpolated_y_in_log_x_log_y(x)?, 3.0 * x.powf(-2.0), 1e-12);
    }
    Ok(())
}

#[test]
fn test_evenly_precomputed_matches_basic() -> Result<()> {
    let mut func = EvenlyDiscretizedFunc::from_range(0.0, 2.0, 21)?;
    for i in 0..func.size() {
        let x = func.x(i);
        func.set_y(i, (x * 1.7).sin() + 2.0)?;
    }

    for options in [InterpolationOptions::LINEAR, InterpolationOptions::LOG_Y] {
        let basic = BasicInterpolator::new(&func, options);
        let evenly = EvenlyPrecomputedInterpolator::new(&func, options)?;
        for x in query_points(&func, 97) {
            assert_float_eq(evenly.find_y(x)?, basic.find_y(x)?, 1e-12);
        }
    }

    let err = EvenlyPrecomputedInterpolator::new(&func, InterpolationOptions::LOG_X).unwrap_err();
    assert!(matches!(err, FuncError::InvalidConfiguration { .. }));
    Ok(())
}

#[test]
fn test_inverse_interpolation_on_fixed_function() -> Result<()> {
    let cdf = LightFixedXFunc::new(vec![1.0, 2.0, 3.0], vec![0.2, 0.6, 1.0])?;
    assert_float_eq(cdf.first_interpolated_x(0.4)?, 1.5, 1e-12);
    assert_float_eq(cdf.first_interpolated_x(0.8)?, 2.5, 1e-12);
    assert!(cdf.first_interpolated_x(0.1).is_err());
    Ok(())
}

#[test]
fn test_log_y_extrapolation() -> Result<()> {
    let func = arbitrary(&[(1.0, 10.0), (2.0, 1.0), (3.0, 0.1)]);
    assert_float_eq(func.interp_extrap_y_in_log_y(4.0)?, 0.01, 1e-12);
    assert_float_eq(func.interp_extrap_y_in_log_y(0.0)?, 100.0, 1e-9);
    assert_float_eq(func.interp_extrap_y_in_log_y(1.5)?, 10f64.sqrt(), 1e-12);
    Ok(())
}

#[test]
fn test_options_round_trip_through_strings() -> Result<()> {
    for options in ALL_OPTIONS {
        let parsed: InterpolationOptions = options.to_string().parse()?;
        assert_eq!(parsed, options);
    }
    Ok(())
}
