//! Plain-text reports for schedules and policy comparisons.
//!
//! All figures are rounded to 2 decimal places here and nowhere earlier.

use std::fmt::Write;

use crate::decimal::{to_display, Money};
use crate::schedule::{InstallmentRecord, PolicyComparison, Schedule, ScheduleSummary};

fn amount(m: Money) -> String {
    m.rounded().to_string()
}

fn record_line(record: &InstallmentRecord) -> String {
    format!(
        "installment: {}, interest: {}, capital: {}, excess: {}",
        amount(record.installment),
        amount(record.interest),
        amount(record.capital),
        amount(record.excess)
    )
}

fn calculation_line(summary: &ScheduleSummary) -> String {
    format!(
        "Loan real value: {}, costs: {}, fees vs value: {}%",
        amount(summary.total_real_value),
        amount(summary.costs),
        to_display(summary.fees_vs_value_percent)
    )
}

/// render the installment table followed by the calculation block
pub fn render_schedule(schedule: &Schedule) -> String {
    let mut out = String::from("Loan installments:\n");
    for record in schedule {
        let _ = writeln!(out, "{}. {}", record.period, record_line(record));
    }

    out.push_str("Calculation:\n");
    let _ = writeln!(out, "{}", calculation_line(&schedule.summary));
    out
}

/// render both policies side by side with the difference between them
pub fn render_comparison(comparison: &PolicyComparison) -> String {
    let mut out = String::from("Loan installments (equal || decreasing):\n");
    let rows = comparison.equal.len().max(comparison.decreasing.len());

    for idx in 0..rows {
        let period = idx as u32 + 1;
        let equal = comparison.equal.get(period).map(record_line);
        let decreasing = comparison.decreasing.get(period).map(record_line);
        let _ = writeln!(
            out,
            "{}. {} || {}",
            period,
            equal.unwrap_or_else(|| "paid off".to_string()),
            decreasing.unwrap_or_else(|| "paid off".to_string())
        );
    }

    out.push_str("Calculation:\n");
    let _ = writeln!(out, "Equal: {}", calculation_line(&comparison.equal.summary));
    let _ = writeln!(out, "Decreasing: {}", calculation_line(&comparison.decreasing.summary));
    let _ = writeln!(
        out,
        "Difference: cash={}, periods={};{}, years={};{}",
        amount(comparison.cash_difference),
        comparison.equal_periods(),
        comparison.decreasing_periods(),
        to_display(comparison.equal_years()),
        to_display(comparison.decreasing_years())
    );
    out
}
