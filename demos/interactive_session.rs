use marginals::prelude::*;

/// A stand-in for a real contouring service: one ring per quartile of the
/// points' distance from their centroid.
fn centroid_rings(points: &[(f64, f64)], bandwidth: f64) -> Vec<Ring> {
    if points.is_empty() {
        return Vec::new();
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.1).sum::<f64>() / n;
    let mut distances: Vec<f64> = points
        .iter()
        .map(|&(x, y)| (x - cx).hypot(y - cy))
        .collect();
    distances.sort_by(f64::total_cmp);

    [0.75, 0.5, 0.25]
        .iter()
        .map(|q| {
            let radius = distances[((distances.len() - 1) as f64 * q) as usize] + bandwidth;
            (0..24)
                .map(|k| {
                    let angle = f64::from(k) * core::f64::consts::TAU / 24.0;
                    (cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect()
        })
        .collect()
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Three correlated components.
    let mut rng = fastrand::Rng::with_seed(3);
    let vectors = (0..300)
        .map(|_| {
            let a = rng.f64() * 10.0;
            let b = a + rng.f64() * 4.0;
            let c = (a - 5.0).powi(2) + rng.f64() * 3.0;
            vec![a, b, c]
        })
        .collect();
    let data = Dataset::new(vectors)?;

    let config = MarginalsConfig::builder()
        .labels(["a", "a + noise", "(a - 5)^2"])
        .preview_step(2.0)
        .build()?;
    let mut session = Session::with_config(data, config)?;

    session.handle(SessionEvent::SelectText("0,0".into()))?;
    session.handle(SessionEvent::SetBandwidthText {
        coord: GridCoord::new(0, 0),
        text: "1.5".into(),
    })?;
    if let Some(view) = session.current_view() {
        let curve = view.density.as_ref().map_or(0, DensityCurve::len);
        println!(
            "cell {} at bandwidth {}: {curve} curve points",
            view.coord, view.bandwidth
        );
    }

    if let Err(err) = session.handle(SessionEvent::SetBandwidthText {
        coord: GridCoord::new(0, 0),
        text: "-3".into(),
    }) {
        println!("rejected: {err}");
    }

    session.select(GridCoord::new(2, 0))?;
    if let Some(rings) = session.current_contours(&centroid_rings) {
        println!("cell 2,0: {} contour rings", rings.len());
    }

    let path = "marginals_report.html";
    write_html_report(&session, Some(&centroid_rings), path)?;
    println!("\nReport saved to {path}");
    Ok(())
}
