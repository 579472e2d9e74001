use std::ops::Range;

use indexmap::IndexMap;
use tergm_core::errors::{ErrorInfo, TergmError};
use tergm_core::Dyad;
use tergm_net::Network;

/// A model term contributing one or more sufficient statistics.
///
/// Terms only report how their statistics would change if a single dyad were
/// toggled in the given network; the [`Model`] takes care of toggle sets.
pub trait ChangeStatistic: Send {
    /// Label of the term, unique within a model.
    fn name(&self) -> &str;

    /// Number of statistics contributed by the term.
    fn n_stats(&self) -> usize {
        1
    }

    /// Adds the change caused by toggling `dyad` in `network` into `delta`.
    ///
    /// `delta` has exactly [`n_stats`](Self::n_stats) entries.
    fn change(&self, dyad: Dyad, network: &Network, delta: &mut [f64]);
}

/// Ordered collection of terms plus the workspace holding the latest deltas.
pub struct Model {
    terms: Vec<Box<dyn ChangeStatistic>>,
    ranges: IndexMap<String, Range<usize>>,
    workspace: Vec<f64>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("terms", &self.ranges)
            .field("workspace", &self.workspace)
            .finish()
    }
}

impl Model {
    /// Builds a model, laying term statistics out in the given order.
    pub fn new(terms: Vec<Box<dyn ChangeStatistic>>) -> Result<Self, TergmError> {
        let mut ranges = IndexMap::with_capacity(terms.len());
        let mut offset = 0;
        for term in &terms {
            let width = term.n_stats();
            if width == 0 {
                return Err(TergmError::Model(
                    ErrorInfo::new("empty-term", "term contributes no statistics")
                        .with_context("term", term.name()),
                ));
            }
            if ranges
                .insert(term.name().to_string(), offset..offset + width)
                .is_some()
            {
                return Err(TergmError::Model(
                    ErrorInfo::new("duplicate-term", "term names must be unique")
                        .with_context("term", term.name()),
                ));
            }
            offset += width;
        }
        Ok(Self {
            terms,
            ranges,
            workspace: vec![0.0; offset],
        })
    }

    /// Total number of statistics.
    pub fn n_stats(&self) -> usize {
        self.workspace.len()
    }

    /// Term labels in statistic order.
    pub fn term_names(&self) -> Vec<String> {
        self.ranges.keys().cloned().collect()
    }

    /// Statistic positions of a named term.
    pub fn term_range(&self, name: &str) -> Option<Range<usize>> {
        self.ranges.get(name).cloned()
    }

    /// Deltas written by the latest [`change_stats`](Self::change_stats) call.
    pub fn workspace(&self) -> &[f64] {
        &self.workspace
    }

    /// Computes the statistic change of applying `toggles` in order to `network`.
    ///
    /// Each dyad is evaluated against the network with all earlier dyads of the
    /// set already toggled. The network is restored before returning.
    pub fn change_stats(&mut self, toggles: &[Dyad], network: &mut Network) -> &[f64] {
        self.workspace.iter_mut().for_each(|value| *value = 0.0);
        let last = toggles.len().saturating_sub(1);
        for (index, dyad) in toggles.iter().enumerate() {
            for (term, range) in self.terms.iter().zip(self.ranges.values()) {
                term.change(*dyad, network, &mut self.workspace[range.clone()]);
            }
            if index < last {
                network.toggle(*dyad);
            }
        }
        for dyad in toggles[..last].iter().rev() {
            network.toggle(*dyad);
        }
        &self.workspace
    }

    /// Inner product of `theta` with the workspace.
    pub fn log_odds(&self, theta: &[f64]) -> f64 {
        theta
            .iter()
            .zip(&self.workspace)
            .map(|(weight, delta)| weight * delta)
            .sum()
    }

    /// Checks that a parameter vector matches the statistic layout.
    pub fn check_parameters(&self, theta: &[f64]) -> Result<(), TergmError> {
        if theta.len() != self.n_stats() {
            return Err(TergmError::Model(
                ErrorInfo::new(
                    "parameter-length",
                    "parameter vector length differs from the number of statistics",
                )
                .with_context("parameters", theta.len().to_string())
                .with_context("statistics", self.n_stats().to_string()),
            ));
        }
        Ok(())
    }
}
