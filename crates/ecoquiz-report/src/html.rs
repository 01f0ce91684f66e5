//! HTML result page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined and the radar
//! chart drawn as inline SVG.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use ecoquiz_core::report::QuizOutcome;
use ecoquiz_core::scoring::{RadarChart, ResultTier};

const CHART_SIZE: f64 = 420.0;
const CHART_RADIUS: f64 = 140.0;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn tier_class(tier: ResultTier) -> &'static str {
    match tier {
        ResultTier::Great => "result-great",
        ResultTier::Good => "result-good",
        ResultTier::Improve => "result-improve",
    }
}

/// Generate an HTML result page from a quiz outcome.
pub fn generate_html(outcome: &QuizOutcome) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>ecoquiz result: {}</title>\n",
        html_escape(&outcome.quiz.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&outcome.quiz.name)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {}</p>\n",
        outcome.quiz.question_count,
        outcome.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    let (icon, title, text) = match &outcome.headline {
        Some(h) => (h.icon.as_str(), h.title.clone(), h.text.as_str()),
        None => ("", format!("Result: {}", outcome.tier), ""),
    };
    html.push_str(&format!(
        "<section class=\"result-summary {}\">\n",
        tier_class(outcome.tier)
    ));
    if !icon.is_empty() {
        html.push_str(&format!("<div class=\"result-icon\">{}</div>\n", html_escape(icon)));
    }
    html.push_str(&format!("<h2 class=\"result-title\">{}</h2>\n", html_escape(&title)));
    html.push_str(&format!(
        "<div class=\"result-score\"><span>Final score</span> <strong class=\"score-value\">{}</strong> / {}</div>\n",
        outcome.report.total, outcome.report.max_total
    ));
    if !text.is_empty() {
        html.push_str(&format!("<p class=\"result-text\">{}</p>\n", html_escape(text)));
    }
    html.push_str("</section>\n");

    // Chart
    html.push_str("<section class=\"chart\">\n");
    html.push_str(&generate_radar_chart(&outcome.radar_chart()));
    html.push_str("</section>\n");

    // Breakdown
    html.push_str("<section class=\"result-breakdown\">\n");
    html.push_str("<h3>By category</h3>\n<ul>\n");
    for (score, feedback) in outcome.report.categories.iter().zip(&outcome.feedback) {
        html.push_str(&format!(
            "<li class=\"level-{}\"><strong>{}:</strong> {} / {} points",
            feedback.level,
            html_escape(&score.label),
            score.score,
            score.max_score
        ));
        if let Some(text) = &feedback.text {
            html.push_str(&format!("<span>{}</span>", html_escape(text)));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(outcome).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML result page to a file.
pub fn write_html_report(outcome: &QuizOutcome, path: &Path) -> Result<()> {
    let html = generate_html(outcome);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Point on axis `i` of `n` at `fraction` of the radius. Axis 0 points up.
fn axis_point(i: usize, n: usize, fraction: f64) -> (f64, f64) {
    let center = CHART_SIZE / 2.0;
    let angle = -PI / 2.0 + 2.0 * PI * i as f64 / n as f64;
    (
        center + CHART_RADIUS * fraction * angle.cos(),
        center + CHART_RADIUS * fraction * angle.sin(),
    )
}

fn polygon_points(n: usize, fraction: impl Fn(usize) -> f64) -> String {
    (0..n)
        .map(|i| {
            let (x, y) = axis_point(i, n, fraction(i));
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Radar chart with one axis per category, scaled to `chart.scale_max`.
pub fn generate_radar_chart(chart: &RadarChart) -> String {
    let n = chart.labels.len();
    let mut svg = format!(
        "<svg class=\"radar\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        size = CHART_SIZE
    );
    if n == 0 {
        svg.push_str("</svg>\n");
        return svg;
    }

    // Grid rings and axes
    for ring in [0.25, 0.5, 0.75, 1.0] {
        let _ = writeln!(
            svg,
            "  <polygon class=\"grid\" points=\"{}\" fill=\"none\" stroke=\"currentColor\" stroke-opacity=\"0.2\"/>",
            polygon_points(n, |_| ring)
        );
    }
    let center = CHART_SIZE / 2.0;
    for i in 0..n {
        let (x, y) = axis_point(i, n, 1.0);
        let _ = writeln!(
            svg,
            "  <line x1=\"{center:.1}\" y1=\"{center:.1}\" x2=\"{x:.1}\" y2=\"{y:.1}\" stroke=\"currentColor\" stroke-opacity=\"0.2\"/>"
        );
    }

    // Score polygon; labels without a value plot at the center
    let scale = f64::from(chart.scale_max.max(1));
    let value = |i: usize| chart.values.get(i).copied().unwrap_or(0);
    let fraction = |i: usize| (f64::from(value(i)) / scale).min(1.0);
    let _ = writeln!(
        svg,
        "  <polygon class=\"score\" points=\"{}\" fill=\"rgba(0, 255, 153, 0.2)\" stroke=\"rgba(0, 255, 153, 1)\" stroke-width=\"2\"/>",
        polygon_points(n, &fraction)
    );
    for i in 0..n {
        let (x, y) = axis_point(i, n, fraction(i));
        let _ = writeln!(
            svg,
            "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"3\" fill=\"rgba(0, 255, 153, 1)\"/>"
        );
    }

    // Labels just outside the outer ring
    for (i, label) in chart.labels.iter().enumerate() {
        let (x, y) = axis_point(i, n, 1.18);
        let _ = writeln!(
            svg,
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"middle\" dominant-baseline=\"middle\">{} ({})</text>",
            html_escape(label),
            value(i)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --great: #dcfce7; --good: #fef9c3; --improve: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f5f5f5; --border: #374151; --great: #064e3b; --good: #713f12; --improve: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 52rem; padding: 2rem; background: var(--bg); color: var(--fg); }
.meta { color: #6b7280; }
.result-summary { border-radius: 12px; padding: 1.5rem; text-align: center; }
.result-great { background: var(--great); }
.result-good { background: var(--good); }
.result-improve { background: var(--improve); }
.result-icon { font-size: 3rem; }
.score-value { font-size: 2rem; }
.chart { display: flex; justify-content: center; margin: 2rem 0; }
.result-breakdown li { margin: 0.75rem 0; list-style: none; border-left: 4px solid var(--border); padding-left: 0.75rem; }
.result-breakdown li span { display: block; color: #6b7280; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
