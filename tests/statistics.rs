mod test_utils;

use anyhow::Result;
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use test_utils::{assert_float_eq, init_logger};

use discretized_func::{
    DiscretizedFunc, DiscretizedFuncMut, EmpiricalDistribution, FuncError, HistogramFunction,
    IntegerPdfSampler,
    stats::{calc_fractile_from_norm_cdf, calc_quick_norm_cdf},
};

#[test]
fn test_empirical_moments() -> Result<()> {
    let dist = EmpiricalDistribution::from_samples(&[2.0, 3.0, 4.0], &[1.0, 1.0, 1.0])?;
    assert_eq!(dist.mean(), 3.0);
    assert_float_eq(dist.std_dev(), 0.816496580927726, 1e-12);
    assert_float_eq(dist.cov(), 0.816496580927726 / 3.0, 1e-12);
    Ok(())
}

#[test]
fn test_repeated_values_accumulate_weight() -> Result<()> {
    let mut dist = EmpiricalDistribution::new();
    for (value, weight) in [(1.0, 1.0), (2.0, 2.0), (1.0, 3.0)] {
        dist.add(value, weight)?;
    }
    assert_eq!(dist.size(), 2);
    assert_eq!(dist.y_values(), vec![4.0, 2.0]);
    assert_eq!(dist.apparent_mode()?, 1.0);
    assert!(!dist.is_multi_modal());
    Ok(())
}

#[test]
fn test_cdf_is_monotone_and_ends_at_one() -> Result<()> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(11);
    let mut dist = EmpiricalDistribution::new();
    for _ in 0..500 {
        dist.add(rng.gen_range(-5.0..5.0), rng.gen_range(0.0..2.0))?;
    }

    let cdf = dist.normalized_cumulative_distribution()?;
    let ys = cdf.y_values();
    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
    assert_float_eq(*ys.last().unwrap(), 1.0, 1e-12);

    for i in 0..cdf.size() {
        assert_eq!(dist.discrete_fractile(cdf.y(i))?, cdf.x(i));
    }
    Ok(())
}

#[test]
fn test_fractiles_and_median() -> Result<()> {
    let dist = EmpiricalDistribution::from_samples(&[1.0, 2.0, 3.0, 4.0], &[1.0; 4])?;
    assert_eq!(dist.discrete_fractile(0.5)?, 2.0);
    assert_eq!(dist.discrete_fractile(0.51)?, 3.0);
    assert_float_eq(dist.median()?, 2.0, 1e-12);
    assert_float_eq(dist.interpolated_fractile(0.625)?, 2.5, 1e-12);
    assert!(dist.interpolated_fractile(1.5).unwrap_err().is_domain_range());
    Ok(())
}

#[test]
fn test_quick_cdf_matches_incremental() -> Result<()> {
    let values = [3.0, 1.0, 2.0, 1.0, 5.0];
    let weights = [1.0, 2.0, 1.0, 1.0, 5.0];

    let quick = calc_quick_norm_cdf(&values, Some(&weights))?;
    let incremental = EmpiricalDistribution::from_samples(&values, &weights)?
        .normalized_cumulative_distribution()?;

    assert_eq!(quick.x_values(), incremental.x_values());
    for (a, b) in quick.y_values().into_iter().zip(incremental.y_values()) {
        assert_float_eq(a, b, 1e-15);
    }

    for fraction in [0.0, 0.1, 0.3, 0.5, 0.75, 1.0] {
        let fractile = calc_fractile_from_norm_cdf(&quick, fraction)?;
        assert!((1.0..=5.0).contains(&fractile), "fraction {}", fraction);
    }
    Ok(())
}

#[test]
fn test_quick_cdf_rejects_bad_input() {
    assert!(matches!(
        calc_quick_norm_cdf(&[], None),
        Err(FuncError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        calc_quick_norm_cdf(&[1.0, 2.0], Some(&[1.0])),
        Err(FuncError::InvalidConfiguration { .. })
    ));
    assert!(calc_quick_norm_cdf(&[1.0, f64::NAN], None).is_err());
}

#[test]
fn test_sampler_reference_weights() -> Result<()> {
    let sampler = IntegerPdfSampler::from_weights(&[1.0, 10.0, 0.01, 5.0, 100.0, 6.0, 0.1])?;
    assert_eq!(sampler.get_int(0.0)?, 0);
    assert_eq!(sampler.get_int(0.089)?, 1);
    assert_eq!(sampler.get_int(0.1)?, 3);
    assert!(sampler.get_int(1.0).unwrap_err().is_domain_range());
    Ok(())
}

#[test]
fn test_sampler_draws_stay_in_range() -> Result<()> {
    let mut sampler = IntegerPdfSampler::new(5)?;
    for i in 0..5 {
        sampler.set_y(i, (i + 1) as f64)?;
    }

    let mut rng = StdRng::seed_from_u64(3);
    let mut counts = [0usize; 5];
    for _ in 0..3000 {
        counts[sampler.get_random_int_with(&mut rng)?] += 1;
    }
    assert!(counts.iter().all(|&c| c > 0));
    assert!(counts[4] > counts[0]);
    Ok(())
}

#[test]
fn test_histogram_uniform_adds() -> Result<()> {
    let mut hist = HistogramFunction::new(0.5, 10, 1.0)?;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        hist.add(rng.gen_range(0.0..10.0), 1.0)?;
    }
    assert_eq!(hist.sum_of_y(), 1000.0);

    hist.normalize_by_sum_of_y_vals()?;
    let cumulative = hist.cumulative_dist_function()?;
    assert_float_eq(cumulative.y(cumulative.size() - 1), 1.0, 1e-12);
    Ok(())
}

#[test]
fn test_histogram_of_empirical_samples() -> Result<()> {
    let samples = [0.2, 0.4, 0.9, 1.1, 1.3, 2.4];
    let mut hist = HistogramFunction::encompassing_histogram(0.2, 2.4, 1.0, true)?;
    for &s in &samples {
        hist.add(s, 1.0)?;
    }
    assert_eq!(hist.x_values(), vec![0.0, 1.0, 2.0]);
    assert_eq!(hist.y_values(), vec![2.0, 3.0, 1.0]);
    assert_eq!(hist.mode(), 1.0);
    Ok(())
}
