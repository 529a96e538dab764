/// compare equal and decreasing installments for a 30 year mortgage
use mortgage_rs::{
    compare, ChartRenderer, ChartSeries, CsvChartRenderer, LoanParameters, Money, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = LoanParameters::builder()
        .value(Money::from_major(1_000_000))
        .percentage(Rate::from_percentage(4))
        .length(360)
        .excess_payment(2, Money::from_major(10_000))
        .excess_payment(4, Money::from_major(20_000))
        .build()?;

    let comparison = compare(&params)?;
    println!(
        "equal: {} (costs {}), decreasing: {} (costs {})",
        comparison.equal.summary.total_real_value.rounded(),
        comparison.equal.summary.costs.rounded(),
        comparison.decreasing.summary.total_real_value.rounded(),
        comparison.decreasing.summary.costs.rounded(),
    );
    println!(
        "difference: cash={}, periods={};{}, cheaper={}",
        comparison.cash_difference.rounded(),
        comparison.equal_periods(),
        comparison.decreasing_periods(),
        comparison.cheaper()
    );

    // hand the series to an external charting tool
    let path = std::env::temp_dir().join("mortgage-equal.csv");
    CsvChartRenderer::new(&path).render(&ChartSeries::from_schedule(&comparison.equal))?;
    println!("chart series written to {}", path.display());

    Ok(())
}
