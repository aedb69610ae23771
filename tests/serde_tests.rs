#![cfg(feature = "serde")]

use marginals::{BandwidthMatrix, CellSample, GridCoord, MarginalsConfig, estimate_1d};

#[test]
fn config_round_trip() {
    let config = MarginalsConfig::builder()
        .bandwidth(2.0)
        .labels(["a", "b"])
        .build()
        .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: MarginalsConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: MarginalsConfig = serde_json::from_str(r#"{ "bandwidth": 3.0 }"#).unwrap();
    assert!((config.bandwidth() - 3.0).abs() < f64::EPSILON);
    assert!((config.step() - 1.0).abs() < f64::EPSILON);
    assert!(config.labels().is_none());
}

#[test]
fn coord_and_matrix_serialize() {
    let json = serde_json::to_string(&GridCoord::new(2, 1)).unwrap();
    assert_eq!(json, r#"{"row":2,"col":1}"#);

    let mut matrix = BandwidthMatrix::new(2, 5.0).unwrap();
    matrix.set(GridCoord::new(1, 0), 2.5).unwrap();
    let back: BandwidthMatrix =
        serde_json::from_str(&serde_json::to_string(&matrix).unwrap()).unwrap();
    assert_eq!(back, matrix);
}

#[test]
fn samples_and_curves_serialize() {
    let sample = CellSample::Bivariate(vec![(1.0, 2.0)]);
    let json = serde_json::to_string(&sample).unwrap();
    assert!(json.contains("Bivariate"));

    let curve = estimate_1d(&[1.0, 2.0], 1.0, 50.0).unwrap();
    let json = serde_json::to_string(&curve).unwrap();
    assert!(json.contains("points"));
}

#[test]
fn upper_triangle_coord_is_rejected() {
    assert!(serde_json::from_str::<GridCoord>(r#"{"row":1,"col":2}"#).is_err());
    let coord: GridCoord = serde_json::from_str(r#"{"row":2,"col":1}"#).unwrap();
    assert_eq!(coord, GridCoord::new(1, 2));
}

#[test]
fn malformed_matrix_is_rejected() {
    // too few values for the dimension
    assert!(serde_json::from_str::<BandwidthMatrix>(r#"{"dim":3,"values":[1.0]}"#).is_err());
    // right length, non-positive entry
    assert!(
        serde_json::from_str::<BandwidthMatrix>(r#"{"dim":2,"values":[1.0,-1.0,2.0]}"#).is_err()
    );
    assert!(
        serde_json::from_str::<BandwidthMatrix>(r#"{"dim":2,"values":[1.0,0.0,2.0]}"#).is_err()
    );

    let matrix: BandwidthMatrix =
        serde_json::from_str(r#"{"dim":2,"values":[1.0,2.0,3.0]}"#).unwrap();
    assert_eq!(matrix.to_rows(), vec![vec![1.0], vec![2.0, 3.0]]);
}
