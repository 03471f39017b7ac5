use std::cell::{Cell, OnceCell};

use log::debug;

use super::{
    BasicInterpolator, InterpolationOptions, Interpolator, PrecomputedInterpolator,
    first_x_for_y,
};
use crate::{errors::FuncResult, function::DiscretizedFunc};

/// Number of basic calls after which segments are precomputed by default.
pub const DEFAULT_SWITCH_AFTER: usize = 10;

/// Interpolator for functions queried an unknown number of times.
///
/// The first `switch_after` calls use the basic strategy. The next call
/// precomputes every segment and all later calls use the cache. Results are
/// identical either way.
#[derive(Debug)]
pub struct RepeatedUseInterpolator<'a, F> {
    basic: BasicInterpolator<'a, F>,
    switch_after: usize,
    calls: Cell<usize>,
    precomputed: OnceCell<Option<PrecomputedInterpolator<'a, F>>>,
}

impl<'a, F: DiscretizedFunc> RepeatedUseInterpolator<'a, F> {
    pub fn new(func: &'a F, options: InterpolationOptions, switch_after: usize) -> Self {
        RepeatedUseInterpolator {
            basic: BasicInterpolator::new(func, options),
            switch_after,
            calls: Cell::new(0),
            precomputed: OnceCell::new(),
        }
    }

    pub fn with_default_switch(func: &'a F, options: InterpolationOptions) -> Self {
        Self::new(func, options, DEFAULT_SWITCH_AFTER)
    }

    /// True once segments have been precomputed.
    pub fn is_precomputed(&self) -> bool {
        matches!(self.precomputed.get(), Some(Some(_)))
    }

    fn precomputed(&self) -> Option<&PrecomputedInterpolator<'a, F>> {
        if let Some(cached) = self.precomputed.get() {
            return cached.as_ref();
        }

        let calls = self.calls.get() + 1;
        self.calls.set(calls);
        if calls <= self.switch_after {
            return None;
        }

        self.precomputed
            .get_or_init(|| {
                match PrecomputedInterpolator::new(self.basic.func(), self.basic.options()) {
                    Ok(interp) => {
                        debug!(
                            "switching to precomputed interpolation after {} calls ({} points, {})",
                            calls - 1,
                            self.basic.func().size(),
                            self.basic.options()
                        );
                        Some(interp)
                    }
                    Err(err) => {
                        debug!("staying with basic interpolation: {}", err);
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl<F: DiscretizedFunc> Interpolator for RepeatedUseInterpolator<'_, F> {
    fn options(&self) -> InterpolationOptions {
        self.basic.options()
    }

    fn find_y(&self, x: f64) -> FuncResult<f64> {
        match self.precomputed() {
            Some(interp) => interp.find_y(x),
            None => self.basic.find_y(x),
        }
    }

    fn find_x(&self, y: f64) -> FuncResult<f64> {
        first_x_for_y(self.basic.func(), y, self.basic.options())
    }
}
