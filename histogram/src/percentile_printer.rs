// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Human-readable percentile reports, in the CLASSIC (fixed-width, with a
//! summary footer) and CSV styles.

use std::io::{self, Write};

use crate::counts::CountsBackend;
use crate::histogram::Histogram;

/// Selects the textual layout of a percentile report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportMode {
    /// Fixed-width columns with a trailing summary footer.
    Classic,
    /// Comma-separated values, one header row, no footer.
    Csv,
}

/// Formats and writes percentile reports for a histogram.
pub struct PercentilePrinter {
    mode: ReportMode,
    ticks_per_half_distance: u32,
    value_scale: f64,
}

impl Default for PercentilePrinter {
    fn default() -> Self {
        PercentilePrinter {
            mode: ReportMode::Classic,
            ticks_per_half_distance: 5,
            value_scale: 1.0,
        }
    }
}

impl PercentilePrinter {
    /// A printer using the given report mode, with default tick density
    /// and a `1.0` value scale.
    pub fn new(mode: ReportMode) -> Self {
        PercentilePrinter {
            mode,
            ..Default::default()
        }
    }

    /// Set how many percentile samples to take per halving of the
    /// remaining distance to 100%.
    pub fn ticks_per_half_distance(mut self, ticks: u32) -> Self {
        self.ticks_per_half_distance = ticks.max(1);
        self
    }

    /// Divide every printed value by `scale` (e.g. `1000.0` to report
    /// microseconds recorded as nanoseconds in milliseconds).
    pub fn value_scale(mut self, scale: f64) -> Self {
        self.value_scale = scale;
        self
    }

    /// Write the full percentile report for `histogram` to `writer`.
    pub fn print<W: Write, C: CountsBackend>(
        &self,
        writer: &mut W,
        histogram: &Histogram<C>,
    ) -> io::Result<()> {
        match self.mode {
            ReportMode::Classic => self.print_classic(writer, histogram),
            ReportMode::Csv => self.print_csv(writer, histogram),
        }
    }

    fn print_classic<W: Write, C: CountsBackend>(
        &self,
        writer: &mut W,
        histogram: &Histogram<C>,
    ) -> io::Result<()> {
        writeln!(
            writer,
            "{:>12} {:>14} {:>10} {:>14}",
            "Value", "Percentile", "TotalCount", "1/(1-Percentile)"
        )?;
        for sample in histogram.iter_percentiles(self.ticks_per_half_distance) {
            let inverse = if sample.percentile >= 100.0 {
                f64::INFINITY
            } else {
                1.0 / (1.0 - sample.percentile / 100.0)
            };
            writeln!(
                writer,
                "{:>12.3} {:>13.4}% {:>10} {:>14.2}",
                sample.value as f64 / self.value_scale,
                sample.percentile,
                sample.count_to_value,
                inverse
            )?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "#[Mean    = {:>12.3}, StdDeviation   = {:>12.3}]",
            histogram.mean() / self.value_scale,
            histogram.stddev() / self.value_scale
        )?;
        writeln!(
            writer,
            "#[Max     = {:>12.3}, Total count    = {:>12}]",
            histogram.max() as f64 / self.value_scale,
            histogram.total_count()
        )?;
        writeln!(
            writer,
            "#[Buckets = {:>12}, SubBuckets     = {:>12}]",
            histogram.config().bucket_count(),
            histogram.config().sub_bucket_count()
        )?;
        Ok(())
    }

    fn print_csv<W: Write, C: CountsBackend>(
        &self,
        writer: &mut W,
        histogram: &Histogram<C>,
    ) -> io::Result<()> {
        writeln!(writer, "Value,Percentile,TotalCount,1/(1-Percentile)")?;
        for sample in histogram.iter_percentiles(self.ticks_per_half_distance) {
            let inverse = if sample.percentile >= 100.0 {
                f64::INFINITY
            } else {
                1.0 / (1.0 - sample.percentile / 100.0)
            };
            writeln!(
                writer,
                "{:.3},{:.4},{},{:.2}",
                sample.value as f64 / self.value_scale,
                sample.percentile,
                sample.count_to_value,
                inverse
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::PlainCounts;

    #[test]
    fn classic_report_has_three_line_footer() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        for v in 1..=1000u64 {
            h.record(v);
        }
        let mut out = Vec::new();
        PercentilePrinter::new(ReportMode::Classic)
            .print(&mut out, &h)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let footer_lines: Vec<_> = text
            .lines()
            .filter(|line| line.starts_with("#["))
            .collect();
        assert_eq!(footer_lines.len(), 3);
        assert!(footer_lines[0].starts_with("#[Mean"));
        assert!(footer_lines[1].starts_with("#[Max"));
        assert!(footer_lines[2].starts_with("#[Buckets"));
    }

    #[test]
    fn csv_report_has_no_footer() {
        let h = Histogram::<PlainCounts>::new(1, 3_600_000_000, 3).unwrap();
        h.record(1000);
        let mut out = Vec::new();
        PercentilePrinter::new(ReportMode::Csv)
            .print(&mut out, &h)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("#["));
        assert!(text.starts_with("Value,Percentile,TotalCount"));
    }
}
