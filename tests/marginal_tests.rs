//! Integration tests for marginal extraction.

use marginals::{CellSample, Dataset, Error, GridCoord, extract_marginals};

#[test]
fn small_diagonal_dataset() {
    let grid = extract_marginals(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
    assert_eq!(grid.dim(), 2);
    assert_eq!(
        grid.get(GridCoord::new(0, 0)).unwrap(),
        &CellSample::Univariate(vec![0.0, 1.0, 2.0])
    );
    assert_eq!(
        grid.get(GridCoord::new(1, 1)).unwrap(),
        &CellSample::Univariate(vec![0.0, 1.0, 2.0])
    );
    assert_eq!(
        grid.get(GridCoord::new(1, 0)).unwrap(),
        &CellSample::Bivariate(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
    );
}

#[test]
fn every_cell_has_one_observation_per_vector() {
    let mut rng = fastrand::Rng::with_seed(3);
    let data: Vec<Vec<f64>> = (0..25)
        .map(|_| (0..4).map(|_| rng.f64()).collect())
        .collect();
    let grid = extract_marginals(&data).unwrap();
    assert_eq!(grid.iter().count(), 10);
    for (coord, sample) in grid.iter() {
        assert_eq!(sample.len(), 25);
        assert_eq!(coord.is_diagonal(), sample.as_univariate().is_some());
    }
}

#[test]
fn off_diagonal_pairs_are_column_then_row() {
    let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let grid = extract_marginals(&data).unwrap();
    assert_eq!(
        grid.get(GridCoord::new(2, 1)).unwrap().as_bivariate().unwrap(),
        &[(2.0, 3.0), (5.0, 6.0)]
    );
}

#[test]
fn ragged_dataset_is_rejected() {
    let err = extract_marginals(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]]).unwrap_err();
    assert_eq!(
        err,
        Error::DimensionMismatch {
            expected: 2,
            got: 1,
            vector_index: 2
        }
    );
}

#[test]
fn empty_dataset_yields_empty_grid() {
    let grid = extract_marginals(&[]).unwrap();
    assert_eq!(grid.dim(), 0);
    assert!(Dataset::new(Vec::new()).unwrap().is_empty());
}
