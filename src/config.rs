//! Session configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bandwidth::DEFAULT_BANDWIDTH;
use crate::error::{Result, check_bandwidth, check_step};
use crate::kde::DEFAULT_STEP;

/// Options recognized by a [`Session`](crate::Session).
///
/// # Defaults
///
/// - Bandwidth: `5.0` for every cell
/// - Step: `1.0` view-box units for the selected cell's curve
/// - Preview step: `1.0` view-box units for the grid previews
/// - Labels: `x0`, `x1`, ...
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarginalsConfig {
    bandwidth: f64,
    step: f64,
    preview_step: f64,
    labels: Option<Vec<String>>,
}

impl Default for MarginalsConfig {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            step: DEFAULT_STEP,
            preview_step: DEFAULT_STEP,
            labels: None,
        }
    }
}

impl MarginalsConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> MarginalsConfigBuilder {
        MarginalsConfigBuilder {
            config: Self::default(),
        }
    }

    /// Default per-cell bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Mesh step for the selected cell.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Mesh step for the preview grid.
    #[must_use]
    pub fn preview_step(&self) -> f64 {
        self.preview_step
    }

    /// Configured axis labels, if any.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Replace the axis labels; `None` restores the defaults.
    pub fn set_labels(&mut self, labels: Option<Vec<String>>) {
        self.labels = labels;
    }

    /// Check every numeric option.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` naming the first bad option.
    pub fn validate(&self) -> Result<()> {
        check_bandwidth(self.bandwidth)?;
        check_step("step", self.step)?;
        check_step("preview_step", self.preview_step)?;
        Ok(())
    }

    /// Axis labels for a grid of dimension `d`.
    ///
    /// Configured labels are used only when there are exactly `d` of them;
    /// otherwise the axes are named `x0..x{d-1}`.
    #[must_use]
    pub fn resolve_labels(&self, d: usize) -> Vec<String> {
        match &self.labels {
            Some(labels) if labels.len() == d => labels.clone(),
            _ => (0..d).map(|i| format!("x{i}")).collect(),
        }
    }
}

/// A builder for [`MarginalsConfig`].
///
/// # Examples
///
/// ```
/// use marginals::MarginalsConfig;
///
/// let config = MarginalsConfig::builder()
///     .bandwidth(2.0)
///     .step(0.5)
///     .labels(["height", "weight"])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.resolve_labels(2), vec!["height", "weight"]);
/// assert_eq!(config.resolve_labels(3), vec!["x0", "x1", "x2"]);
/// ```
#[derive(Clone, Debug)]
pub struct MarginalsConfigBuilder {
    config: MarginalsConfig,
}

impl MarginalsConfigBuilder {
    /// Set the default per-cell bandwidth.
    #[must_use]
    pub fn bandwidth(mut self, bandwidth: f64) -> Self {
        self.config.bandwidth = bandwidth;
        self
    }

    /// Set the mesh step for the selected cell.
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.config.step = step;
        self
    }

    /// Set the mesh step for the preview grid.
    #[must_use]
    pub fn preview_step(mut self, step: f64) -> Self {
        self.config.preview_step = step;
        self
    }

    /// Set the axis labels.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a non-positive bandwidth or a
    /// step outside `[1e-4, 100]`.
    pub fn build(self) -> Result<MarginalsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
