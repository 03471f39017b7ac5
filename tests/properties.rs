use proptest::prelude::*;

use discretized_func::{
    ArbitrarilyDiscretizedFunc, BasicInterpolator, DiscretizedFunc, DiscretizedFuncMut,
    EmpiricalDistribution, EvenlyDiscretizedFunc, InterpolationOptions, Interpolator,
    PrecomputedInterpolator,
};

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1.0e3..1.0e3f64, 1.0e-6..1.0e3f64), 1..60)
}

fn build(points: &[(f64, f64)]) -> ArbitrarilyDiscretizedFunc {
    let mut func = ArbitrarilyDiscretizedFunc::new();
    for &(x, y) in points {
        func.set(x, y).unwrap();
    }
    func
}

proptest! {
    #[test]
    fn prop_points_stay_sorted(points in points()) {
        let func = build(&points);
        let xs = func.x_values();
        prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
        for i in 0..func.size() {
            prop_assert_eq!(func.x_index(func.x(i)), Some(i));
        }
    }

    #[test]
    fn prop_evenly_index_round_trip(
        min_x in -100.0..100.0f64,
        num in 1usize..200,
        delta in 1.0e-3..10.0f64,
    ) {
        let func = EvenlyDiscretizedFunc::new(min_x, num, delta).unwrap();
        for i in 0..func.size() {
            prop_assert_eq!(func.x_index(func.x(i)), Some(i));
        }
    }

    #[test]
    fn prop_precomputed_is_bit_identical(points in points(), t in 0.0..1.0f64) {
        let func = build(&points);
        let x = func.x(0) + t * (func.x(func.size() - 1) - func.x(0));
        for options in [InterpolationOptions::LINEAR, InterpolationOptions::LOG_Y] {
            let basic = BasicInterpolator::new(&func, options).find_y(x).unwrap();
            let precomputed = PrecomputedInterpolator::new(&func, options)
                .unwrap()
                .find_y(x)
                .unwrap();
            prop_assert_eq!(basic.to_bits(), precomputed.to_bits());
        }
    }

    #[test]
    fn prop_boundaries_snap(points in points()) {
        let func = build(&points);
        let interp = BasicInterpolator::new(&func, InterpolationOptions::LINEAR);
        prop_assert_eq!(interp.find_y(func.x(0)).unwrap(), func.y(0));
        let last = func.size() - 1;
        prop_assert_eq!(interp.find_y(func.x(last)).unwrap(), func.y(last));
    }

    #[test]
    fn prop_cdf_monotone_ending_at_one(points in points()) {
        let mut dist = EmpiricalDistribution::new();
        for &(value, weight) in &points {
            dist.add(value, weight).unwrap();
        }
        let cdf = dist.normalized_cumulative_distribution().unwrap();
        let ys = cdf.y_values();
        prop_assert!(ys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!((ys[ys.len() - 1] - 1.0).abs() < 1e-12);

        for i in 0..cdf.size() {
            prop_assert_eq!(dist.discrete_fractile(cdf.y(i)).unwrap(), cdf.x(i));
        }
    }

    #[test]
    fn prop_clones_are_independent(points in points(), y in -10.0..10.0f64) {
        let original = build(&points);
        let mut copy = original.clone();
        copy.set_y(0, y + 1.0e4).unwrap();
        prop_assert_ne!(copy.y(0), original.y(0));
        prop_assert_eq!(copy.size(), original.size());
    }
}
