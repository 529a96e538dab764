//! Hand-off point for chart rendering.
//!
//! The library only prepares the numeric series; drawing is left to whatever
//! implements [`ChartRenderer`]. [`CsvChartRenderer`] writes the series for
//! external plotting tools.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::Schedule;

fn two_dp(m: Money) -> Decimal {
    m.rounded().as_decimal()
}

/// one plotted point per period, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartRow {
    pub period: u32,
    pub installment: Decimal,
    pub interest: Decimal,
    pub capital: Decimal,
    pub excess: Decimal,
}

/// installment composition over time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub title: String,
    pub rows: Vec<ChartRow>,
}

impl ChartSeries {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let rows = schedule
            .iter()
            .map(|r| ChartRow {
                period: r.period,
                installment: two_dp(r.installment),
                interest: two_dp(r.interest),
                capital: two_dp(r.capital),
                excess: two_dp(r.excess),
            })
            .collect();

        Self {
            title: format!("{} installments", schedule.policy),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// renders a series; implemented by charting backends
pub trait ChartRenderer {
    fn render(&self, series: &ChartSeries) -> Result<()>;
}

/// writes the series as csv, one row per period
pub struct CsvChartRenderer {
    path: PathBuf,
}

impl CsvChartRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// write the series to any writer
    pub fn write_to<W: Write>(series: &ChartSeries, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in &series.rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }
}

impl ChartRenderer for CsvChartRenderer {
    fn render(&self, series: &ChartSeries) -> Result<()> {
        let file = File::create(&self.path)?;
        Self::write_to(series, file)?;
        info!(
            "wrote {} chart rows for '{}' to {}",
            series.len(),
            series.title,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanParameters;
    use crate::decimal::Rate;
    use crate::schedule::compute;
    use crate::types::InstallmentPolicy;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;

    fn schedule() -> Schedule {
        let params = LoanParameters::new(Money::from_major(20_000), Rate::from_percentage(4), 5)
            .with_policy(InstallmentPolicy::Decreasing);
        compute(&params).unwrap()
    }

    #[test]
    fn test_series_from_schedule() {
        let series = ChartSeries::from_schedule(&schedule());
        assert_eq!(series.title, "decreasing installments");
        assert_eq!(series.len(), 5);
        assert_eq!(series.rows[0].installment, dec!(4066.67));
        assert_eq!(series.rows[0].capital, dec!(4000));
        assert_eq!(series.rows[4].interest, dec!(13.33));
    }

    #[test]
    fn test_csv_output() {
        let series = ChartSeries::from_schedule(&schedule());
        let mut buf = Vec::new();
        CsvChartRenderer::write_to(&series, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("period,installment,interest,capital,excess"));
        assert_eq!(lines.next(), Some("1,4066.67,66.67,4000.00,0.00"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_render_to_file() {
        let path =
            std::env::temp_dir().join(format!("mortgage-rs-chart-{}.csv", std::process::id()));
        let renderer = CsvChartRenderer::new(&path);
        renderer.render(&ChartSeries::from_schedule(&schedule())).unwrap();

        let text = std::fs::read_to_string(renderer.path()).unwrap();
        assert_eq!(text.lines().count(), 6);
        std::fs::remove_file(&path).unwrap();
    }

    struct RecordingRenderer {
        seen: RefCell<Vec<usize>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, series: &ChartSeries) -> Result<()> {
            self.seen.borrow_mut().push(series.len());
            Ok(())
        }
    }

    #[test]
    fn test_custom_renderer_receives_series() {
        let renderer = RecordingRenderer { seen: RefCell::new(Vec::new()) };
        renderer.render(&ChartSeries::from_schedule(&schedule())).unwrap();
        assert_eq!(*renderer.seen.borrow(), vec![5]);
    }
}
