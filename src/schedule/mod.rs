pub mod amortization;
pub mod comparison;
pub mod excess;

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{ExcessStrategy, InstallmentPolicy};

pub use amortization::{annuity_installment, AmortizationCalculator, InstallmentRecord};
pub use comparison::{compare, PolicyComparison};
pub use excess::{AppliedExcess, ExcessPlan};

/// aggregate figures for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// sum of installments plus commission
    pub total_real_value: Money,
    pub total_installments: Money,
    pub total_interest: Money,
    /// capital plus excess repaid
    pub total_capital: Money,
    pub total_excess: Money,
    /// total real value minus principal
    pub costs: Money,
    pub fees_vs_value_percent: Decimal,
    pub periods: u32,
}

impl ScheduleSummary {
    pub fn from_records(
        records: &[InstallmentRecord],
        principal: Money,
        commission: Money,
    ) -> Self {
        let total_installments: Money = records.iter().map(|r| r.installment).sum();
        let total_interest: Money = records.iter().map(|r| r.interest).sum();
        let total_capital: Money = records.iter().map(|r| r.principal_repaid()).sum();
        let total_excess: Money = records.iter().map(|r| r.excess).sum();

        let total_real_value = total_installments + commission;
        let costs = total_real_value - principal;

        Self {
            total_real_value,
            total_installments,
            total_interest,
            total_capital,
            total_excess,
            costs,
            fees_vs_value_percent: costs.percent_of(principal),
            periods: records.len() as u32,
        }
    }
}

/// amortization schedule for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub principal: Money,
    pub percentage: Rate,
    pub periodic_rate: Rate,
    pub length: u32,
    pub commission: Money,
    pub policy: InstallmentPolicy,
    pub excess_strategy: ExcessStrategy,
    pub records: Vec<InstallmentRecord>,
    pub summary: ScheduleSummary,
}

impl Schedule {
    /// validate parameters and generate the schedule
    pub fn generate(params: &LoanParameters) -> Result<Self> {
        params.validate()?;

        let periodic_rate = params.periodic_rate();
        let excess_strategy = params.effective_excess_strategy();
        let plan = ExcessPlan::from_payments(&params.excess_payments);

        let calculator = AmortizationCalculator::new(params.policy, excess_strategy);
        let records =
            calculator.calculate_schedule(params.value, periodic_rate, params.length, &plan)?;
        let summary = ScheduleSummary::from_records(&records, params.value, params.commission);

        info!(
            "{} schedule: {} periods, real value {}, costs {}",
            params.policy,
            summary.periods,
            summary.total_real_value.rounded(),
            summary.costs.rounded()
        );

        Ok(Self {
            principal: params.value,
            percentage: params.percentage,
            periodic_rate,
            length: params.length,
            commission: params.commission,
            policy: params.policy,
            excess_strategy,
            records,
            summary,
        })
    }

    /// get record for a 1-based period
    pub fn get(&self, period: u32) -> Option<&InstallmentRecord> {
        period
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx as usize))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstallmentRecord> {
        self.records.iter()
    }

    /// repaid before the declared term
    pub fn paid_off_early(&self) -> bool {
        (self.records.len() as u32) < self.length
    }

    /// balance after a period; the principal before the first one
    pub fn balance_after(&self, period: u32) -> Money {
        self.get(period)
            .map(|r| r.remaining)
            .unwrap_or(self.principal)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a InstallmentRecord;
    type IntoIter = std::slice::Iter<'a, InstallmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// compute the amortization schedule for the given parameters
pub fn compute(params: &LoanParameters) -> Result<Schedule> {
    Schedule::generate(params)
}
