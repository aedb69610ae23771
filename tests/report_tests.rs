//! Integration tests for the HTML rendering.

use marginals::contour::Ring;
use marginals::{Dataset, GridCoord, MarginalsConfig, Session, render_html, write_html_report};

fn session() -> Session {
    let data = Dataset::new(vec![
        vec![0.0, 1.0, 2.0],
        vec![1.0, 3.0, 0.5],
        vec![2.0, 2.0, 4.0],
        vec![3.0, 0.0, 1.0],
    ])
    .unwrap();
    let config = MarginalsConfig::builder()
        .labels(["alpha", "beta", "<gamma>"])
        .build()
        .unwrap();
    Session::with_config(data, config).unwrap()
}

#[test]
fn report_contains_every_cell() {
    let html = render_html(&session(), None);
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("4 vectors"));
    for row in 0..3 {
        for col in 0..=row {
            assert!(html.contains(&format!("data-cell=\"{row},{col}\"")));
        }
    }
    assert!(!html.contains("data-cell=\"0,1\""));
    assert_eq!(html.matches("<svg").count(), 6);
    assert!(html.contains("&lt;gamma&gt;"));
    assert!(!html.contains("id=\"selected\""));
}

#[test]
fn report_shows_selected_cell() {
    let mut session = session();
    session.select(GridCoord::new(2, 0)).unwrap();
    session.set_bandwidth(GridCoord::new(2, 0), 1.5).unwrap();
    let html = render_html(&session, None);
    assert!(html.contains("id=\"selected\""));
    assert!(html.contains("&lt;gamma&gt; vs alpha"));
    assert!(html.contains("value=\"1.5\""));
    assert_eq!(html.matches("<svg").count(), 7);
}

#[test]
fn report_uses_contour_service() {
    let rings = |_points: &[(f64, f64)], _bandwidth: f64| -> Vec<Ring> {
        vec![
            vec![(10.0, 10.0), (90.0, 10.0), (90.0, 90.0)],
            vec![(40.0, 40.0), (60.0, 40.0), (60.0, 60.0)],
        ]
    };
    let html = render_html(&session(), Some(&rings));
    // two rings in each of the three off-diagonal cells
    assert_eq!(html.matches("M10,10L90,10L90,90Z").count(), 3);
    assert_eq!(html.matches("M40,40L60,40L60,60Z").count(), 3);
    assert!(!html.contains("<circle"));
}

#[test]
fn report_writes_file() {
    let path = std::env::temp_dir().join("marginals_report_writes_file.html");
    write_html_report(&session(), None, &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<table id=\"grid\">"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn report_for_empty_dataset() {
    let session = Session::new(Dataset::default()).unwrap();
    let html = render_html(&session, None);
    assert!(html.contains("0 vectors"));
    assert!(!html.contains("<table"));
}
