//! The interactive session: selection, per-cell bandwidths and derived views.
//!
//! A [`Session`] owns the bandwidth matrix and the current selection and
//! reacts to [`SessionEvent`]s. Everything shown on screen is derived state
//! and is recomputed eagerly by the transition that invalidates it:
//!
//! | Transition | Recomputes |
//! |---|---|
//! | [`set_data`](Session::set_data) | marginals, labels, all previews, view |
//! | [`set_labels`](Session::set_labels) | labels |
//! | [`set_bandwidth_rows`](Session::set_bandwidth_rows) | all previews, view |
//! | [`set_bandwidth`](Session::set_bandwidth) | that cell's preview, view if selected |
//! | [`select`](Session::select) / [`deselect`](Session::deselect) | view |
//!
//! A rejected event returns an error and leaves the session exactly as it was.
//!
//! # Example
//!
//! ```
//! use marginals::{Dataset, GridCoord, Session};
//!
//! let data = Dataset::new(vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
//! let mut session = Session::new(data).unwrap();
//!
//! session.select(GridCoord::new(1, 0)).unwrap();
//! assert_eq!(session.current_view().unwrap().bandwidth, 5.0);
//!
//! session.set_bandwidth(GridCoord::new(1, 0), 2.5).unwrap();
//! assert_eq!(session.current_view().unwrap().bandwidth, 2.5);
//! assert_eq!(session.selection(), Some(GridCoord::new(1, 0)));
//! ```

use std::sync::Arc;

use crate::bandwidth::BandwidthMatrix;
use crate::config::MarginalsConfig;
use crate::contour::{ContourEstimator, Ring};
use crate::curve::DensityCurve;
use crate::error::{Error, Result};
use crate::grid::{GridCoord, enumerate_rows};
use crate::kde::KernelDensityEstimator;
use crate::marginal::{CellSample, Dataset, MarginalGrid};

/// An input to the session state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Enlarge a cell, replacing any previous selection.
    Select(GridCoord),
    /// Enlarge the cell named by a `"row,col"` string.
    SelectText(String),
    /// Return to the grid with nothing enlarged.
    Deselect,
    /// Change one cell's bandwidth.
    SetBandwidth {
        /// The edited cell.
        coord: GridCoord,
        /// The new bandwidth.
        value: f64,
    },
    /// Change one cell's bandwidth from user-entered text.
    SetBandwidthText {
        /// The edited cell.
        coord: GridCoord,
        /// The raw input text.
        text: String,
    },
}

/// The enlarged cell and everything needed to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// The selected cell.
    pub coord: GridCoord,
    /// The cell's sample.
    pub sample: CellSample,
    /// The cell's current bandwidth.
    pub bandwidth: f64,
    /// The density curve of a diagonal cell; `None` off the diagonal, where
    /// drawing goes through a [`ContourEstimator`].
    pub density: Option<DensityCurve>,
}

/// Low-resolution content of one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    /// The density curve of a diagonal cell.
    Curve(DensityCurve),
    /// The scaled points of an off-diagonal cell, ready for contouring.
    Points(Vec<(f64, f64)>),
}

/// Interactive state over one dataset.
#[derive(Clone, Debug)]
pub struct Session {
    config: MarginalsConfig,
    data: Arc<Dataset>,
    marginals: MarginalGrid,
    labels: Vec<String>,
    bandwidths: BandwidthMatrix,
    selection: Option<GridCoord>,
    view: Option<View>,
    previews: Vec<Vec<Preview>>,
}

impl Session {
    /// Start a session over `data` with the default configuration.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors while building the previews.
    pub fn new(data: impl Into<Arc<Dataset>>) -> Result<Self> {
        Self::with_config(data, MarginalsConfig::default())
    }

    /// Start a session over `data` with `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `config` does not validate.
    pub fn with_config(data: impl Into<Arc<Dataset>>, config: MarginalsConfig) -> Result<Self> {
        config.validate()?;
        let data = data.into();
        let dim = data.dim();
        let marginals = data.marginals();
        let bandwidths = BandwidthMatrix::new(dim, config.bandwidth())?;
        let previews = build_previews(&marginals, &bandwidths, config.preview_step())?;
        let labels = config.resolve_labels(dim);
        trace_info!(n_vectors = data.len(), dim, "session started");

        Ok(Self {
            config,
            data,
            marginals,
            labels,
            bandwidths,
            selection: None,
            view: None,
            previews,
        })
    }

    /// Dispatch an event to the matching transition.
    ///
    /// # Errors
    ///
    /// Whatever the transition returns; the session is unchanged on error.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Select(coord) => self.select(coord),
            SessionEvent::SelectText(text) => self.select_text(&text),
            SessionEvent::Deselect => {
                self.deselect();
                Ok(())
            }
            SessionEvent::SetBandwidth { coord, value } => self.set_bandwidth(coord, value),
            SessionEvent::SetBandwidthText { coord, text } => {
                self.set_bandwidth_text(coord, &text).map(|_| ())
            }
        }
    }

    /// Enlarge `coord`, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if the dataset is empty and
    /// [`Error::CellOutOfRange`] if `coord` is outside the grid.
    pub fn select(&mut self, coord: GridCoord) -> Result<()> {
        if self.data.is_empty() {
            return Err(Error::NoData);
        }
        let coord = coord.check(self.dim())?;
        let view = self.build_view(coord)?;
        trace_debug!(row = coord.row(), col = coord.col(), "cell selected");
        self.selection = Some(coord);
        self.view = Some(view);
        Ok(())
    }

    /// Enlarge the cell named by a `"row,col"` string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] for unparseable text, plus
    /// everything [`select`](Self::select) returns.
    pub fn select_text(&mut self, text: &str) -> Result<()> {
        self.select(text.parse()?)
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            trace_debug!("selection cleared");
        }
        self.view = None;
    }

    /// Change the bandwidth of one cell.
    ///
    /// The selection is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfRange`] for a cell outside the grid and
    /// `Error::InvalidParameter` for a non-positive or non-finite value.
    pub fn set_bandwidth(&mut self, coord: GridCoord, value: f64) -> Result<()> {
        let mut bandwidths = self.bandwidths.clone();
        if let Err(err) = bandwidths.set(coord, value) {
            trace_debug!(error = %err, "bandwidth edit rejected");
            return Err(err);
        }
        self.apply_bandwidth_edit(bandwidths, coord)?;
        trace_debug!(row = coord.row(), col = coord.col(), value, "bandwidth edited");
        Ok(())
    }

    /// Change the bandwidth of one cell from user-entered text.
    ///
    /// Returns the parsed bandwidth.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `text` is not a positive number,
    /// plus everything [`set_bandwidth`](Self::set_bandwidth) returns.
    pub fn set_bandwidth_text(&mut self, coord: GridCoord, text: &str) -> Result<f64> {
        let mut bandwidths = self.bandwidths.clone();
        let value = match bandwidths.set_text(coord, text) {
            Ok(value) => value,
            Err(err) => {
                trace_debug!(error = %err, "bandwidth edit rejected");
                return Err(err);
            }
        };
        self.apply_bandwidth_edit(bandwidths, coord)?;
        trace_debug!(row = coord.row(), col = coord.col(), value, "bandwidth edited");
        Ok(value)
    }

    /// Replace the whole bandwidth matrix from nested rows.
    ///
    /// A malformed matrix resets every cell to the configured default.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors while rebuilding the previews.
    pub fn set_bandwidth_rows(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let bandwidths =
            BandwidthMatrix::from_rows(self.dim(), rows, self.config.bandwidth())?;
        let previews = build_previews(&self.marginals, &bandwidths, self.config.preview_step())?;
        let view = self
            .selection
            .map(|coord| build_view(&self.marginals, &bandwidths, coord, self.config.step()))
            .transpose()?;
        self.bandwidths = bandwidths;
        self.previews = previews;
        self.view = view;
        Ok(())
    }

    /// Replace the dataset.
    ///
    /// Bandwidths survive when the dimension is unchanged and are reset to
    /// the default otherwise. The selection survives if it is still inside
    /// the new grid.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors while rebuilding the previews.
    pub fn set_data(&mut self, data: impl Into<Arc<Dataset>>) -> Result<()> {
        let data = data.into();
        let dim = data.dim();
        let marginals = data.marginals();
        let bandwidths = if dim == self.dim() {
            self.bandwidths.clone()
        } else {
            BandwidthMatrix::new(dim, self.config.bandwidth())?
        };
        let previews = build_previews(&marginals, &bandwidths, self.config.preview_step())?;
        let selection = self
            .selection
            .filter(|coord| !data.is_empty() && coord.row() < dim);
        let view = selection
            .map(|coord| build_view(&marginals, &bandwidths, coord, self.config.step()))
            .transpose()?;
        trace_info!(n_vectors = data.len(), dim, "dataset replaced");

        self.labels = self.config.resolve_labels(dim);
        self.data = data;
        self.marginals = marginals;
        self.bandwidths = bandwidths;
        self.previews = previews;
        self.selection = selection;
        self.view = view;
        Ok(())
    }

    /// Replace the axis labels; `None` restores `x0..x{d-1}`.
    pub fn set_labels(&mut self, labels: Option<Vec<String>>) {
        self.config.set_labels(labels);
        self.labels = self.config.resolve_labels(self.dim());
    }

    /// The view of the selected cell, if any.
    #[must_use]
    pub fn current_view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Contours for the selected cell when it is off the diagonal.
    #[must_use]
    pub fn current_contours(&self, estimator: &dyn ContourEstimator) -> Option<Vec<Ring>> {
        let view = self.view.as_ref()?;
        let points = view.sample.scaled_points()?;
        Some(estimator.contours(&points, view.bandwidth))
    }

    /// The selected cell, if any.
    #[must_use]
    pub fn selection(&self) -> Option<GridCoord> {
        self.selection
    }

    /// Grid dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.dim()
    }

    /// The dataset.
    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.data
    }

    /// The samples of every cell.
    #[must_use]
    pub fn marginals(&self) -> &MarginalGrid {
        &self.marginals
    }

    /// The resolved axis labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The per-cell bandwidths.
    #[must_use]
    pub fn bandwidths(&self) -> &BandwidthMatrix {
        &self.bandwidths
    }

    /// Preview content row by row; row `r` holds columns `0..=r`.
    #[must_use]
    pub fn previews(&self) -> &[Vec<Preview>] {
        &self.previews
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MarginalsConfig {
        &self.config
    }

    fn build_view(&self, coord: GridCoord) -> Result<View> {
        build_view(&self.marginals, &self.bandwidths, coord, self.config.step())
    }

    /// Commit a bandwidth matrix that already accepted an edit of `coord`.
    fn apply_bandwidth_edit(&mut self, bandwidths: BandwidthMatrix, coord: GridCoord) -> Result<()> {
        let sample = cell_sample(&self.marginals, coord)?;
        let preview = build_preview(sample, bandwidths.get(coord)?, self.config.preview_step())?;
        let refreshed = if self.selection == Some(coord) {
            Some(build_view(
                &self.marginals,
                &bandwidths,
                coord,
                self.config.step(),
            )?)
        } else {
            None
        };

        if let Some(slot) = self
            .previews
            .get_mut(coord.row())
            .and_then(|row| row.get_mut(coord.col()))
        {
            *slot = preview;
        }
        self.bandwidths = bandwidths;
        if refreshed.is_some() {
            self.view = refreshed;
        }
        Ok(())
    }
}

fn cell_sample(marginals: &MarginalGrid, coord: GridCoord) -> Result<&CellSample> {
    marginals.get(coord).ok_or(Error::CellOutOfRange {
        row: coord.row(),
        col: coord.col(),
        dim: marginals.dim(),
    })
}

fn build_view(
    marginals: &MarginalGrid,
    bandwidths: &BandwidthMatrix,
    coord: GridCoord,
    step: f64,
) -> Result<View> {
    let sample = cell_sample(marginals, coord)?;
    let bandwidth = bandwidths.get(coord)?;
    let density = match sample {
        CellSample::Univariate(values) => Some(
            KernelDensityEstimator::new(bandwidth)?
                .with_step(step)?
                .estimate(values)?,
        ),
        CellSample::Bivariate(_) => None,
    };
    Ok(View {
        coord,
        sample: sample.clone(),
        bandwidth,
        density,
    })
}

fn build_preview(sample: &CellSample, bandwidth: f64, step: f64) -> Result<Preview> {
    Ok(match sample {
        CellSample::Univariate(values) => Preview::Curve(
            KernelDensityEstimator::new(bandwidth)?
                .with_step(step)?
                .estimate(values)?,
        ),
        CellSample::Bivariate(_) => Preview::Points(sample.scaled_points().unwrap_or_default()),
    })
}

fn build_previews(
    marginals: &MarginalGrid,
    bandwidths: &BandwidthMatrix,
    step: f64,
) -> Result<Vec<Vec<Preview>>> {
    enumerate_rows(marginals.dim())
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|coord| {
                    build_preview(cell_sample(marginals, coord)?, bandwidths.get(coord)?, step)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let data = Dataset::new(vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
        Session::new(data).unwrap()
    }

    #[test]
    fn starts_unselected() {
        let s = session();
        assert_eq!(s.selection(), None);
        assert!(s.current_view().is_none());
        assert_eq!(s.labels(), ["x0", "x1"]);
        assert_eq!(s.previews().len(), 2);
        assert!(matches!(s.previews()[0][0], Preview::Curve(_)));
        assert!(matches!(s.previews()[1][0], Preview::Points(_)));
    }

    #[test]
    fn select_then_edit() {
        let mut s = session();
        s.select(GridCoord::new(1, 0)).unwrap();
        let view = s.current_view().unwrap();
        assert!((view.bandwidth - 5.0).abs() < f64::EPSILON);
        assert_eq!(
            view.sample,
            CellSample::Bivariate(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
        );
        assert!(view.density.is_none());

        s.set_bandwidth(GridCoord::new(1, 0), 2.5).unwrap();
        let view = s.current_view().unwrap();
        assert!((view.bandwidth - 2.5).abs() < f64::EPSILON);
        assert_eq!(s.selection(), Some(GridCoord::new(1, 0)));
        assert!((s.bandwidths().get(GridCoord::new(0, 0)).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((s.bandwidths().get(GridCoord::new(1, 1)).unwrap() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn diagonal_view_has_curve() {
        let mut s = session();
        s.select(GridCoord::new(0, 0)).unwrap();
        let view = s.current_view().unwrap();
        assert_eq!(view.density.as_ref().map(DensityCurve::len), Some(101));
    }

    #[test]
    fn editing_other_cell_keeps_view() {
        let mut s = session();
        s.select(GridCoord::new(0, 0)).unwrap();
        let before = s.current_view().cloned();
        s.set_bandwidth(GridCoord::new(1, 1), 1.0).unwrap();
        assert_eq!(s.current_view().cloned(), before);
    }

    #[test]
    fn rejected_edit_is_not_applied() {
        let mut s = session();
        s.select(GridCoord::new(1, 0)).unwrap();
        let bandwidths = s.bandwidths().clone();
        let view = s.current_view().cloned();

        assert!(s.set_bandwidth(GridCoord::new(1, 0), 0.0).is_err());
        assert!(s.set_bandwidth_text(GridCoord::new(1, 0), "wide").is_err());
        assert!(s.set_bandwidth(GridCoord::new(5, 0), 1.0).is_err());

        assert_eq!(s.bandwidths(), &bandwidths);
        assert_eq!(s.current_view().cloned(), view);
    }

    #[test]
    fn select_out_of_grid() {
        let mut s = session();
        assert!(matches!(
            s.select(GridCoord::new(2, 0)),
            Err(Error::CellOutOfRange { .. })
        ));
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn events_dispatch() {
        let mut s = session();
        s.handle(SessionEvent::SelectText("1,1".into())).unwrap();
        assert_eq!(s.selection(), Some(GridCoord::new(1, 1)));
        s.handle(SessionEvent::SetBandwidthText {
            coord: GridCoord::new(1, 1),
            text: "0.5".into(),
        })
        .unwrap();
        assert!((s.current_view().unwrap().bandwidth - 0.5).abs() < f64::EPSILON);
        s.handle(SessionEvent::Deselect).unwrap();
        assert_eq!(s.selection(), None);
        assert!(s.current_view().is_none());
    }

    #[test]
    fn empty_dataset() {
        let mut s = Session::new(Dataset::default()).unwrap();
        assert_eq!(s.dim(), 0);
        assert!(s.previews().is_empty());
        assert_eq!(s.select(GridCoord::new(0, 0)), Err(Error::NoData));
    }
}
