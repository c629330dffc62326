// src/nlod_opt.rs
//
// Options controlling how per-row scores are normalised and aggregated.

use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::NlodError;

/// What to do when an origin row has zero demand in both matrices.
///
/// The normalisation denominator is the combined demand of the row pair,
/// so such a row has no defined local NLOD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroDemandPolicy {
    /// Fail the whole call with `NlodError::DegenerateRow`.
    #[default]
    Error,
    /// Treat the row as structurally identical (local NLOD = 0.0).
    Zero,
}

impl FromStr for ZeroDemandPolicy {
    type Err = NlodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(ZeroDemandPolicy::Error),
            "zero" => Ok(ZeroDemandPolicy::Zero),
            other => Err(NlodError::InvalidOption(format!(
                "unknown zero-demand policy '{}', expected 'error' or 'zero'",
                other
            ))),
        }
    }
}

impl fmt::Display for ZeroDemandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroDemandPolicy::Error => write!(f, "error"),
            ZeroDemandPolicy::Zero => write!(f, "zero"),
        }
    }
}

/// NLOD computation options
#[derive(Debug, Clone)]
pub struct NlodOpt {
    pub zero_demand: ZeroDemandPolicy, // Policy for rows with zero combined demand
    pub parallel: bool,                // Distribute origin rows over the rayon pool
    pub min_parallel_rows: usize,      // Below this many rows, stay on the calling thread
    pub n_threads: usize,              // Worker threads for the binary's pool (0 = rayon default)
}

impl Default for NlodOpt {
    fn default() -> Self {
        NlodOpt {
            zero_demand: ZeroDemandPolicy::default(),
            parallel: defaults::PARALLEL,
            min_parallel_rows: defaults::MIN_PARALLEL_ROWS,
            n_threads: defaults::THREADS,
        }
    }
}

impl NlodOpt {
    /// Options that never leave the calling thread.
    pub fn serial() -> Self {
        NlodOpt {
            parallel: false,
            ..Default::default()
        }
    }

    /// Builder-style override of the zero-demand policy.
    pub fn with_zero_demand(mut self, policy: ZeroDemandPolicy) -> Self {
        self.zero_demand = policy;
        self
    }

    /// Returns true if `rows` origin rows should be processed in parallel.
    #[inline]
    pub fn use_parallel(&self, rows: usize) -> bool {
        self.parallel && rows >= self.min_parallel_rows.max(2)
    }

    /// Validate option values, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.n_threads > defaults::MAX_THREADS {
            errors.push(format!(
                "n_threads ({}) exceeds the maximum of {}",
                self.n_threads,
                defaults::MAX_THREADS
            ));
        }
        if self.parallel && self.min_parallel_rows == 0 {
            errors.push("min_parallel_rows must be at least 1 when parallel is enabled".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
