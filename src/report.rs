//! Static HTML rendering of a session.
//!
//! Produce a self-contained HTML page with the triangular table of cells the
//! interactive widget shows, for offline inspection. No scripts or external
//! assets are needed.
//!
//! # Layout
//!
//! | Part | Description |
//! |---|---|
//! | **Grid** | One row per axis with its label on the left; diagonal cells draw the density curve, the others draw contours (or the scaled points when no contour service is given) |
//! | **Axis labels** | A final row naming each column |
//! | **Selected cell** | An enlarged copy of the selected cell with a bandwidth input, when something is selected |
//!
//! Every cell carries a `data-cell="row,col"` attribute, the same form
//! [`SessionEvent::SelectText`](crate::SessionEvent::SelectText) parses.
//!
//! # Usage
//!
//! ```no_run
//! use marginals::{Dataset, Session, write_html_report};
//!
//! let data = Dataset::new(vec![vec![0.0, 1.0], vec![1.0, 3.0], vec![2.0, 2.0]]).unwrap();
//! let session = Session::new(data).unwrap();
//! write_html_report(&session, None, "marginals.html").unwrap();
//! ```

use core::fmt::Write as _;
use std::path::Path;

use crate::contour::{ContourEstimator, level_intensity, ring_path_data};
use crate::grid::GridCoord;
use crate::session::{Preview, Session, View};

/// Side length in pixels of a grid cell.
const CELL_SIZE: u32 = 100;
/// Side length in pixels of the enlarged cell.
const ENLARGED_SIZE: u32 = 400;
const STROKE: &str = "#081d58";

/// Write the HTML rendering of `session` to `path`.
///
/// # Errors
///
/// Return an I/O error if the file cannot be created or written.
pub fn write_html_report(
    session: &Session,
    contours: Option<&dyn ContourEstimator>,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    std::fs::write(path, render_html(session, contours))
}

/// Render `session` as an HTML page.
///
/// Off-diagonal cells are contoured through `contours` when given.
#[must_use]
pub fn render_html(session: &Session, contours: Option<&dyn ContourEstimator>) -> String {
    let mut html = String::with_capacity(8192);
    let labels = session.labels();

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Marginals</title>
<style>
  svg {{ border: 1px solid black; }}
  td.axis {{ text-align: center; }}
</style>
</head>
<body>
<p class="subtitle">{n} vectors &middot; {d} dimensions</p>
"#,
        n = session.dataset().len(),
        d = session.dim(),
    );

    if session.dim() == 0 {
        html.push_str("</body>\n</html>\n");
        return html;
    }

    html.push_str("<table id=\"grid\">\n<tbody>\n");
    for (row, cells) in session.previews().iter().enumerate() {
        let _ = write!(
            html,
            "<tr><td>{}</td>",
            escape_html(labels.get(row).map_or("", String::as_str))
        );
        for (col, preview) in cells.iter().enumerate() {
            let coord = GridCoord::new(row, col);
            let bandwidth = session.bandwidths().get(coord).unwrap_or_default();
            let selected = if session.selection() == Some(coord) {
                " class=\"selected\""
            } else {
                ""
            };
            let _ = write!(html, "<td data-cell=\"{coord}\"{selected}>");
            write_svg(&mut html, CELL_SIZE, |body| {
                write_preview(body, preview, bandwidth, contours);
            });
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("<tr><td></td>");
    for label in labels {
        let _ = write!(html, "<td class=\"axis\">{}</td>", escape_html(label));
    }
    html.push_str("</tr>\n</tbody>\n</table>\n");

    if let Some(view) = session.current_view() {
        write_selected(&mut html, view, labels, contours);
    }

    html.push_str("</body>\n</html>\n");
    html
}

// ---------------------------------------------------------------------------
// Cell renderers
// ---------------------------------------------------------------------------

fn write_svg(html: &mut String, size: u32, body: impl FnOnce(&mut String)) {
    let _ = write!(
        html,
        r#"<svg width="{size}" height="{size}" viewBox="0 0 100 100">"#
    );
    body(html);
    html.push_str("</svg>");
}

fn write_preview(
    html: &mut String,
    preview: &Preview,
    bandwidth: f64,
    contours: Option<&dyn ContourEstimator>,
) {
    match preview {
        Preview::Curve(curve) => write_curve_path(html, &curve.to_path_data()),
        Preview::Points(points) => write_points(html, points, bandwidth, contours),
    }
}

fn write_curve_path(html: &mut String, path: &str) {
    let _ = write!(
        html,
        r#"<path d="{path}" fill="none" stroke="{STROKE}" />"#
    );
}

/// Contours when a service is available, otherwise a dot per point.
fn write_points(
    html: &mut String,
    points: &[(f64, f64)],
    bandwidth: f64,
    contours: Option<&dyn ContourEstimator>,
) {
    if let Some(estimator) = contours {
        let rings = estimator.contours(points, bandwidth);
        for (i, ring) in rings.iter().enumerate() {
            let _ = write!(
                html,
                r#"<path d="{d}" fill="none" stroke="{STROKE}" stroke-opacity="{opacity:.3}" stroke-width="1" />"#,
                d = ring_path_data(ring),
                opacity = level_intensity(i, rings.len()),
            );
        }
    } else {
        for &(x, y) in points {
            let _ = write!(html, r#"<circle cx="{x}" cy="{y}" r="1" fill="{STROKE}" />"#);
        }
    }
}

fn write_selected(
    html: &mut String,
    view: &View,
    labels: &[String],
    contours: Option<&dyn ContourEstimator>,
) {
    let coord = view.coord;
    let label = |axis: usize| escape_html(labels.get(axis).map_or("", String::as_str));
    let title = if coord.is_diagonal() {
        label(coord.row())
    } else {
        format!("{} vs {}", label(coord.row()), label(coord.col()))
    };

    let _ = write!(
        html,
        r#"<div id="selected" data-cell="{coord}">
<p>{title}</p>
"#
    );
    write_svg(html, ENLARGED_SIZE, |body| {
        if let Some(curve) = &view.density {
            write_curve_path(body, &curve.to_path_data());
        } else if let Some(points) = view.sample.scaled_points() {
            write_points(body, &points, view.bandwidth, contours);
        }
    });
    let _ = write!(
        html,
        r#"
<label>bandwidth <input type="number" name="bandwidth" data-cell="{coord}" value="{bandwidth}"></label>
</div>
"#,
        bandwidth = view.bandwidth,
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn svg_wrapper() {
        let mut html = String::new();
        write_svg(&mut html, 100, |body| body.push_str("<g/>"));
        assert_eq!(
            html,
            r#"<svg width="100" height="100" viewBox="0 0 100 100"><g/></svg>"#
        );
    }
}
