/// Errors returned by grid indexing, density estimation and the session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a numeric parameter (bandwidth, mesh step) is unusable.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the rejected parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when a linear index lies outside the triangular grid.
    #[error("linear index {index} out of range for a grid of {len} cells")]
    OutOfRange {
        /// The requested linear index.
        index: usize,
        /// The number of cells in the grid.
        len: usize,
    },

    /// Returned when a `(row, col)` pair is not in the lower triangle.
    #[error("cell ({row}, {col}) is not in the lower triangle of a {dim}x{dim} grid")]
    CellOutOfRange {
        /// The requested row.
        row: usize,
        /// The requested column.
        col: usize,
        /// The grid dimension.
        dim: usize,
    },

    /// Returned when the estimator is given no values.
    #[error("density estimation requires at least one sample")]
    EmptySample,

    /// Returned when a dataset vector has a different length than the first.
    #[error(
        "dimension mismatch: expected {expected} components but vector {vector_index} has {got}"
    )]
    DimensionMismatch {
        /// The dimension inferred from the first vector.
        expected: usize,
        /// The length of the offending vector.
        got: usize,
        /// The index of the offending vector.
        vector_index: usize,
    },

    /// Returned when a dataset entry is NaN or infinite.
    #[error("non-finite value at vector {vector_index}, component {component}")]
    NonFiniteValue {
        /// The index of the offending vector.
        vector_index: usize,
        /// The component within that vector.
        component: usize,
    },

    /// Returned when a coordinate string cannot be parsed as `row,col`.
    #[error("invalid cell coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// Returned when an operation needs data but the dataset is empty.
    #[error("no data: the dataset is empty")]
    NoData,
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

/// Validate a smoothing bandwidth: finite and strictly positive.
pub(crate) fn check_bandwidth(bandwidth: f64) -> Result<f64> {
    if !bandwidth.is_finite() {
        return Err(Error::invalid_parameter(
            "bandwidth",
            format!("{bandwidth} is not finite"),
        ));
    }
    if bandwidth <= 0.0 {
        return Err(Error::invalid_parameter(
            "bandwidth",
            format!("{bandwidth} must be positive"),
        ));
    }
    Ok(bandwidth)
}

/// Validate a mesh step: finite and in `[MIN_STEP, 100]`.
pub(crate) fn check_step(name: &'static str, step: f64) -> Result<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::invalid_parameter(
            name,
            format!("{step} must be a positive finite number"),
        ));
    }
    if step < crate::scale::MIN_STEP {
        return Err(Error::invalid_parameter(
            name,
            format!("{step} is finer than the minimum step {}", crate::scale::MIN_STEP),
        ));
    }
    if step > crate::scale::RANGE_MAX {
        return Err(Error::invalid_parameter(
            name,
            format!("{step} exceeds the mesh width {}", crate::scale::RANGE_MAX),
        ));
    }
    Ok(step)
}
