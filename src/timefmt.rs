//! Human-readable time formatting for report output.

const NS_PER_MS: f64 = 1_000_000.0;
const NS_PER_S: f64 = 1_000_000_000.0;

/// Formats a nanosecond quantity the way reports print times: millisecond
/// resolution below one second, seconds above.
pub fn pretty_time(ns: u64) -> String {
    let ms = ns as f64 / NS_PER_MS;
    if ms < 10.0 {
        format!("{ms:.2} ms")
    } else if ms < 1000.0 {
        format!("{ms:.1} ms")
    } else {
        format!("{:.3} s", ns as f64 / NS_PER_S)
    }
}
