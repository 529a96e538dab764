//! Loan amortization calculator
//!
//! Prints the installment table and cost summary for a loan, optionally
//! comparing both installment policies and exporting a chart series.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use mortgage_rs::{
    compare, compute, render_comparison, render_schedule, ChartRenderer, ChartSeries,
    CsvChartRenderer, ExcessPayment, ExcessStrategy, InstallmentPolicy, LoanParameters, Money,
    Rate, DEFAULT_PAYMENTS_PER_YEAR,
};

#[derive(Parser, Debug)]
#[command(
    name = "mortgage",
    version,
    about = "Calculate loan installments and credit costs"
)]
struct Cli {
    /// Credit value (principal)
    #[arg(long, required_unless_present = "config", allow_negative_numbers = true)]
    value: Option<Money>,

    /// Nominal interest rate as a fraction, e.g. 0.04
    #[arg(long, required_unless_present = "config", allow_negative_numbers = true)]
    percentage: Option<Rate>,

    /// Loan length in installment periods
    #[arg(long, required_unless_present = "config")]
    length: Option<u32>,

    /// One-time commission added to the credit cost
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    commission: Money,

    /// Credit type: 0 = equal installments, 1 = decreasing installments
    #[arg(long = "credit-type", alias = "credittype", default_value_t = 0)]
    credit_type: u8,

    /// Extra principal payment as PERIOD=AMOUNT, repeatable
    #[arg(long = "excess", alias = "excesspayments", value_name = "PERIOD=AMOUNT")]
    excess: Vec<ExcessPayment>,

    /// How excess payments are absorbed (default depends on credit type)
    #[arg(long, value_enum)]
    excess_strategy: Option<StrategyArg>,

    /// Installments per year; the rate is divided by this to get the periodic rate
    #[arg(long, default_value_t = DEFAULT_PAYMENTS_PER_YEAR)]
    payments_per_year: u32,

    /// Load loan parameters from a json file instead of flags
    #[arg(
        long,
        conflicts_with_all = [
            "value",
            "percentage",
            "length",
            "commission",
            "credit_type",
            "excess",
            "excess_strategy",
            "payments_per_year",
        ]
    )]
    config: Option<PathBuf>,

    /// Export the installment series for charting
    #[arg(long)]
    plots: bool,

    /// Where the chart series is written
    #[arg(long, default_value = "schedule.csv")]
    plot_output: PathBuf,

    /// Show equal and decreasing schedules side by side
    #[arg(long)]
    compare: bool,

    /// Print json instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    ReduceInstallment,
    ReduceTerm,
}

impl From<StrategyArg> for ExcessStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ReduceInstallment => ExcessStrategy::ReduceInstallment,
            StrategyArg::ReduceTerm => ExcessStrategy::ReduceTerm,
        }
    }
}

impl Cli {
    fn loan_parameters(&self) -> Result<LoanParameters> {
        if let Some(path) = &self.config {
            return LoanParameters::from_json_file(path)
                .with_context(|| format!("loading loan parameters from {}", path.display()));
        }

        let mut builder = LoanParameters::builder()
            .commission(self.commission)
            .policy(InstallmentPolicy::from_code(self.credit_type)?)
            .excess_payments(self.excess.iter().copied())
            .payments_per_year(self.payments_per_year);

        // clap guarantees these without --config
        if let Some(value) = self.value {
            builder = builder.value(value);
        }
        if let Some(percentage) = self.percentage {
            builder = builder.percentage(percentage);
        }
        if let Some(length) = self.length {
            builder = builder.length(length);
        }
        if let Some(strategy) = self.excess_strategy {
            builder = builder.excess_strategy(strategy.into());
        }

        Ok(builder.build()?)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.loan_parameters().context("invalid loan parameters")?;
    debug!("{:?}", params);

    if cli.compare {
        let comparison = compare(&params)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            print!("{}", render_comparison(&comparison));
        }
        if cli.plots {
            let renderer = CsvChartRenderer::new(&cli.plot_output);
            renderer.render(&ChartSeries::from_schedule(&comparison.equal))?;
            let decreasing =
                CsvChartRenderer::new(cli.plot_output.with_extension("decreasing.csv"));
            decreasing.render(&ChartSeries::from_schedule(&comparison.decreasing))?;
        }
        return Ok(());
    }

    let schedule = compute(&params)?;
    if cli.json {
        println!("{}", schedule.to_json()?);
    } else {
        print!("{}", render_schedule(&schedule));
    }

    if cli.plots {
        CsvChartRenderer::new(&cli.plot_output)
            .render(&ChartSeries::from_schedule(&schedule))
            .with_context(|| format!("writing chart series to {}", cli.plot_output.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "mortgage",
            "--value",
            "20000",
            "--percentage",
            "0.04",
            "--length",
            "5",
            "--credit-type",
            "1",
            "--excess",
            "2=1000",
            "--excess",
            "3=500",
        ])
        .unwrap();

        let params = cli.loan_parameters().unwrap();
        assert_eq!(params.value, Money::from_major(20_000));
        assert_eq!(params.policy, InstallmentPolicy::Decreasing);
        assert_eq!(params.excess_payments.len(), 2);
        assert_eq!(params.payments_per_year, 12);
        assert!(!cli.plots);
    }

    #[test]
    fn test_config_rejects_loan_flags() {
        assert!(Cli::try_parse_from(["mortgage", "--config", "loan.json"]).is_ok());

        for extra in [
            ["--commission", "5"],
            ["--credit-type", "1"],
            ["--excess", "2=100"],
            ["--excess-strategy", "reduce-term"],
            ["--payments-per-year", "1"],
        ] {
            let args = ["mortgage", "--config", "loan.json", extra[0], extra[1]];
            assert!(Cli::try_parse_from(args).is_err(), "{extra:?} accepted with --config");
        }
    }

    #[test]
    fn test_missing_required_flags() {
        assert!(Cli::try_parse_from(["mortgage", "--value", "20000"]).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cli = Cli::try_parse_from([
            "mortgage", "--value=-5", "--percentage", "0.04", "--length", "5",
        ])
        .unwrap();
        assert!(cli.loan_parameters().is_err());

        let cli = Cli::try_parse_from([
            "mortgage",
            "--value",
            "100",
            "--percentage",
            "0.04",
            "--length",
            "5",
            "--credit-type",
            "7",
        ])
        .unwrap();
        assert!(cli.loan_parameters().is_err());
    }
}
