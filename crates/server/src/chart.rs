//! Hand-rolled SVG pie chart for the analytics page.
//!
//! The output is embedded into templates with the `safe` filter, so every
//! piece of user text that ends up here must go through [`escape`].

use std::fmt::Write;

use tracker::MoneyCents;

const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];
const SIZE: f64 = 320.0;
const RADIUS: f64 = 140.0;

pub(crate) const NO_DATA: &str = r#"<p class="no-data">No expense data for this period.</p>"#;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn point_at(angle: f64) -> (f64, f64) {
    let center = SIZE / 2.0;
    (center + RADIUS * angle.cos(), center + RADIUS * angle.sin())
}

/// Render the per-category totals as a pie chart with a legend.
///
/// Totals are expected positive and sorted; a period without expenses
/// renders the [`NO_DATA`] placeholder instead of an empty circle.
pub(crate) fn pie_chart(totals: &[(String, MoneyCents)]) -> String {
    let total: i64 = totals.iter().map(|(_, amount)| amount.cents()).sum();
    if totals.is_empty() || total <= 0 {
        return NO_DATA.to_string();
    }

    let center = SIZE / 2.0;
    let mut svg = format!(
        r#"<svg class="pie-chart" viewBox="0 0 {SIZE} {SIZE}" width="{SIZE}" height="{SIZE}" role="img">"#
    );

    if totals.len() == 1 {
        let color = PALETTE[0];
        let _ = write!(
            svg,
            r#"<circle cx="{center}" cy="{center}" r="{RADIUS}" fill="{color}"/>"#
        );
    } else {
        // Slices start at twelve o'clock and run clockwise.
        let mut angle = -std::f64::consts::FRAC_PI_2;
        for (index, (name, amount)) in totals.iter().enumerate() {
            let fraction = amount.cents() as f64 / total as f64;
            let sweep = fraction * std::f64::consts::TAU;
            let (x1, y1) = point_at(angle);
            let (x2, y2) = point_at(angle + sweep);
            let large_arc = i32::from(sweep > std::f64::consts::PI);
            let color = PALETTE[index % PALETTE.len()];
            let label = escape(name);

            let _ = write!(
                svg,
                r#"<path d="M {center:.2} {center:.2} L {x1:.2} {y1:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{color}"><title>{label}: {amount}</title></path>"#
            );
            angle += sweep;
        }
    }
    svg.push_str("</svg>");

    let mut legend = String::from(r#"<ul class="chart-legend">"#);
    for (index, (name, amount)) in totals.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let label = escape(name);
        let _ = write!(
            legend,
            r#"<li><span class="swatch" style="background:{color}"></span>{label}: {amount}</li>"#
        );
    }
    legend.push_str("</ul>");

    format!(r#"<figure class="category-chart">{svg}{legend}</figure>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_totals_render_placeholder() {
        assert_eq!(pie_chart(&[]), NO_DATA);
    }

    #[test]
    fn single_category_renders_full_circle() {
        let totals = vec![("Food".to_string(), MoneyCents::new(4550))];
        let chart = pie_chart(&totals);
        assert!(chart.contains("<circle"));
        assert!(chart.contains("Food: 45.50"));
    }

    #[test]
    fn slices_and_legend_cover_every_category() {
        let totals = vec![
            ("Food".to_string(), MoneyCents::new(4550)),
            ("Transport".to_string(), MoneyCents::new(1200)),
        ];
        let chart = pie_chart(&totals);
        assert_eq!(chart.matches("<path").count(), 2);
        assert!(chart.contains("Food: 45.50"));
        assert!(chart.contains("Transport: 12.00"));
    }

    #[test]
    fn category_names_are_escaped() {
        let totals = vec![("A&B <shop>".to_string(), MoneyCents::new(100))];
        let chart = pie_chart(&totals);
        assert!(chart.contains("A&amp;B &lt;shop&gt;"));
        assert!(!chart.contains("<shop>"));
    }
}
