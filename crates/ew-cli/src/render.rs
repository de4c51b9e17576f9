//! Terminal rendering helpers

use ew_core::Chips;

const BAR_WIDTH: usize = 30;
const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Horizontal progress bar for a ratio in [0, 1]
pub fn ratio_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        ratio.clamp(0.0, 1.0) * 100.0
    )
}

/// Sparkline of the cumulative loss series, at most `width` columns
pub fn sparkline(series: &[Chips], width: usize) -> String {
    if series.is_empty() || width == 0 {
        return String::new();
    }
    let step = series.len().div_ceil(width);
    let sampled: Vec<Chips> = series.chunks(step).map(|c| c[c.len() - 1]).collect();
    let max = sampled.iter().copied().max().unwrap_or(0);
    if max <= 0 {
        return SPARK[0].to_string().repeat(sampled.len());
    }
    sampled
        .iter()
        .map(|&v| {
            let level = (v.max(0) as f64 / max as f64 * (SPARK.len() - 1) as f64).round();
            SPARK[level as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bar_clamps() {
        assert!(ratio_bar(-1.0).ends_with("] 0%"));
        assert!(ratio_bar(2.0).ends_with("] 100%"));
        assert_eq!(ratio_bar(0.5).matches('█').count(), 15);
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[], 10), "");
        assert_eq!(sparkline(&[0, 0], 10), "▁▁");
        assert_eq!(sparkline(&[0, 10, 20, 70], 10), "▁▂▃█");
        // Downsampled to width
        assert_eq!(sparkline(&(0..100).collect::<Vec<_>>(), 10).chars().count(), 10);
    }
}
