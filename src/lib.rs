#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Marginal distribution plots for datasets of fixed-dimension vectors.
//!
//! A dataset of `d`-component vectors is shown as a lower-triangular grid of
//! `d * (d + 1) / 2` cells: diagonal cells hold the 1-D density of one
//! component, the others the joint 2-D density of a pair. A [`Session`]
//! lets a user enlarge one cell and tune its smoothing bandwidth.
//!
//! # Getting Started
//!
//! ```
//! use marginals::prelude::*;
//!
//! let data = Dataset::new(vec![
//!     vec![0.0, 1.0, 4.0],
//!     vec![1.0, 0.5, 3.0],
//!     vec![2.0, 2.5, 1.0],
//! ])
//! .unwrap();
//!
//! let mut session = Session::new(data).unwrap();
//! session.select(GridCoord::new(2, 2)).unwrap();
//! session.set_bandwidth(GridCoord::new(2, 2), 1.5).unwrap();
//!
//! let view = session.current_view().unwrap();
//! assert_eq!(view.density.as_ref().unwrap().len(), 101);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`GridCoord`] | A `(row, col)` cell with `col <= row`; see [`grid`] for the linear-index bijection. |
//! | [`Dataset`] | Validated equal-length vectors; derives a [`CellSample`] per cell. |
//! | [`KernelDensityEstimator`](kde::KernelDensityEstimator) | Epanechnikov KDE producing a [`DensityCurve`] in view-box coordinates. |
//! | [`BandwidthMatrix`] | One positive bandwidth per cell. |
//! | [`ContourEstimator`](contour::ContourEstimator) | The external 2-D contouring service for off-diagonal cells. |
//! | [`Session`] | Selection and bandwidth edits, with eagerly recomputed views and previews. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on coordinates, samples, curves, bandwidths and config | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) on session transitions | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod bandwidth;
mod config;
pub mod contour;
mod curve;
mod error;
pub mod grid;
pub mod kde;
mod marginal;
mod report;
pub mod scale;
mod session;

pub use bandwidth::{BandwidthMatrix, DEFAULT_BANDWIDTH, parse_bandwidth};
pub use config::{MarginalsConfig, MarginalsConfigBuilder};
pub use curve::DensityCurve;
pub use error::{Error, Result};
pub use grid::GridCoord;
pub use kde::estimate_1d;
pub use marginal::{CellSample, Dataset, MarginalGrid, extract_marginals};
pub use report::{render_html, write_html_report};
pub use session::{Preview, Session, SessionEvent, View};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use marginals::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bandwidth::{BandwidthMatrix, DEFAULT_BANDWIDTH};
    pub use crate::config::MarginalsConfig;
    pub use crate::contour::{ContourEstimator, Ring};
    pub use crate::curve::DensityCurve;
    pub use crate::error::{Error, Result};
    pub use crate::grid::{GridCoord, enumerate_coords, enumerate_rows, to_grid, to_linear};
    pub use crate::kde::{KernelDensityEstimator, estimate_1d};
    pub use crate::marginal::{CellSample, Dataset, MarginalGrid, extract_marginals};
    pub use crate::report::{render_html, write_html_report};
    pub use crate::session::{Preview, Session, SessionEvent, View};
}
