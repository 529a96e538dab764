pub mod config;
pub mod decimal;
pub mod errors;
pub mod plot;
pub mod report;
pub mod schedule;
pub mod types;

// re-export key types
pub use config::{LoanParameters, LoanParametersBuilder, DEFAULT_PAYMENTS_PER_YEAR};
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use plot::{ChartRenderer, ChartRow, ChartSeries, CsvChartRenderer};
pub use report::{render_comparison, render_schedule};
pub use schedule::{
    compare, compute, AmortizationCalculator, ExcessPlan, InstallmentRecord, PolicyComparison,
    Schedule, ScheduleSummary,
};
pub use types::{ExcessPayment, ExcessStrategy, InstallmentPolicy};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
