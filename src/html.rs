//! HTML report rendering (`--html`).

use crate::{pretty_time, ProfileInfo, Task, TaskCategory, TaskStats};

#[derive(Debug, Clone, Copy)]
pub struct HtmlOptions {
    /// Scale of the time axis in the task chart.
    pub pixels_per_second: u32,
    /// Include every task in the table instead of only the tree roots.
    pub details: bool,
    /// Include the SVG task chart.
    pub chart: bool,
    /// Include per-category duration histograms (effective with `details`).
    pub histograms: bool,
}

/// Renders a self-contained HTML report for one profile.
pub fn render_html(info: &ProfileInfo, stats: &TaskStats, opts: &HtmlOptions) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>Profile {}</h1>", escape_html(info.name())));

    if opts.chart {
        body.push_str(&task_chart(info, opts.pixels_per_second));
    }

    body.push_str("<table><thead><tr><th>category</th><th>description</th><th>thread</th><th>start</th><th>duration</th><th>statistics</th></tr></thead><tbody>");
    if opts.details {
        for task in info.all() {
            body.push_str(&task_row(task, stats));
        }
    } else {
        for task in info.roots() {
            body.push_str(&task_row(task, stats));
        }
    }
    body.push_str("</tbody></table>");

    if opts.details && opts.histograms {
        body.push_str(&histograms(info));
    }

    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Profile {title}</title><style>body{{font-family:ui-monospace,Menlo,monospace;background:#0b1020;color:#e5e7eb;padding:20px}}table{{border-collapse:collapse;width:100%}}th,td{{padding:6px 8px;border-bottom:1px solid #1f2937;text-align:left}}</style></head><body>{body}</body></html>",
        title = escape_html(info.name()),
    )
}

fn task_row(task: &Task, stats: &TaskStats) -> String {
    let mut fragments = String::new();
    if let Some(per_category) = stats.get(task.id) {
        for (category, attr) in per_category {
            fragments.push_str(&format!(
                "{category}=({}, {}) ",
                attr.count,
                pretty_time(attr.total_time_ns)
            ));
        }
    }
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        task.category,
        escape_html(&task.description),
        task.thread_id,
        pretty_time(task.start_time_ns),
        pretty_time(task.duration_ns),
        escape_html(fragments.trim_end()),
    )
}

/// One SVG bar per root task, offset and scaled by pixels-per-second.
fn task_chart(info: &ProfileInfo, pixels_per_second: u32) -> String {
    let roots: Vec<&Task> = info.roots().collect();
    let scale = pixels_per_second.max(1) as f64;
    let bar_h = 18;
    let gap = 4;
    let to_px = |ns: u64| (ns as f64 / 1e9 * scale).round() as i64;
    let width = roots
        .iter()
        .map(|t| to_px(t.start_time_ns.saturating_add(t.duration_ns)))
        .max()
        .unwrap_or(0)
        + 40;
    let height = (roots.len() as i64) * (bar_h + gap) + 40;

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">"
    ));
    out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#111827\"/>");
    for (i, task) in roots.iter().enumerate() {
        let y = 20 + (i as i64) * (bar_h + gap);
        let x = 20 + to_px(task.start_time_ns);
        let w = to_px(task.duration_ns).max(1);
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{bar_h}\" fill=\"#2563eb\"/>"
        ));
        out.push_str(&format!(
            "<text x=\"{tx}\" y=\"{ty}\" fill=\"#e5e7eb\" font-size=\"12\">{label}</text>",
            tx = x + 4,
            ty = y + 13,
            label = escape_html(&format!(
                "{} ({})",
                task.description,
                pretty_time(task.duration_ns)
            )),
        ));
    }
    out.push_str("</svg>");
    out
}

fn histograms(info: &ProfileInfo) -> String {
    const BUCKETS: [(&str, u64); 5] = [
        ("0-1ms", 1_000_000),
        ("1-10ms", 10_000_000),
        ("10-100ms", 100_000_000),
        ("100ms-1s", 1_000_000_000),
        ("1s+", u64::MAX),
    ];

    let mut out = String::new();
    out.push_str("<h2>Duration histograms</h2>");
    for category in TaskCategory::ALL {
        let mut counts = [0u64; BUCKETS.len()];
        for task in info.all().iter().filter(|t| t.category == category) {
            let slot = BUCKETS
                .iter()
                .position(|(_, upper)| task.duration_ns < *upper)
                .unwrap_or(BUCKETS.len() - 1);
            counts[slot] += 1;
        }
        if counts.iter().all(|c| *c == 0) {
            continue;
        }
        out.push_str(&format!("<h3>{category}</h3><table><tbody>"));
        for ((label, _), count) in BUCKETS.iter().zip(counts) {
            out.push_str(&format!("<tr><td>{label}</td><td>{count}</td></tr>"));
        }
        out.push_str("</tbody></table>");
    }
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::testutil::profile_from;
    use crate::TaskCategory::{Action, Phase};

    fn sample() -> ProfileInfo {
        profile_from(&[
            (1, 0, Phase, "execute <fast>", 0, 1000),
            (2, 1, Action, "compile", 10, 40),
        ])
    }

    fn render(opts: &HtmlOptions) -> String {
        let info = sample();
        let stats = aggregate(&info).expect("aggregate");
        render_html(&info, &stats, opts)
    }

    #[test]
    fn chart_flag_gates_the_svg_section() {
        let with_chart = render(&HtmlOptions {
            pixels_per_second: 50,
            details: false,
            chart: true,
            histograms: false,
        });
        assert!(with_chart.contains("<svg"));

        let without_chart = render(&HtmlOptions {
            pixels_per_second: 50,
            details: false,
            chart: false,
            histograms: false,
        });
        assert!(!without_chart.contains("<svg"));
    }

    #[test]
    fn aggregated_table_lists_only_roots_while_details_list_all() {
        let aggregated = render(&HtmlOptions {
            pixels_per_second: 50,
            details: false,
            chart: false,
            histograms: false,
        });
        assert!(!aggregated.contains("<td>compile</td>"));

        let detailed = render(&HtmlOptions {
            pixels_per_second: 50,
            details: true,
            chart: false,
            histograms: false,
        });
        assert!(detailed.contains("<td>compile</td>"));
    }

    #[test]
    fn histograms_require_details() {
        let detailed = render(&HtmlOptions {
            pixels_per_second: 50,
            details: true,
            chart: false,
            histograms: true,
        });
        assert!(detailed.contains("Duration histograms"));

        let aggregated = render(&HtmlOptions {
            pixels_per_second: 50,
            details: false,
            chart: false,
            histograms: true,
        });
        assert!(!aggregated.contains("Duration histograms"));
    }

    #[test]
    fn descriptions_are_escaped() {
        let html = render(&HtmlOptions {
            pixels_per_second: 50,
            details: false,
            chart: true,
            histograms: false,
        });
        assert!(html.contains("execute &lt;fast&gt;"));
        assert!(!html.contains("execute <fast>"));
    }
}
