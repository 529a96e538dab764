use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{ExcessStrategy, InstallmentPolicy};

use super::excess::ExcessPlan;

/// one period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    pub period: u32,
    /// total paid this period: interest + capital + excess
    pub installment: Money,
    pub interest: Money,
    pub capital: Money,
    pub excess: Money,
    /// balance left after this period
    pub remaining: Money,
}

impl InstallmentRecord {
    /// principal repaid this period including any excess
    pub fn principal_repaid(&self) -> Money {
        self.capital + self.excess
    }
}

/// amortization calculator
pub struct AmortizationCalculator {
    policy: InstallmentPolicy,
    strategy: ExcessStrategy,
}

impl AmortizationCalculator {
    pub fn new(policy: InstallmentPolicy, strategy: ExcessStrategy) -> Self {
        Self { policy, strategy }
    }

    /// calculate the full schedule; stops early once the balance is repaid
    pub fn calculate_schedule(
        &self,
        principal: Money,
        periodic_rate: Rate,
        periods: u32,
        excess: &ExcessPlan,
    ) -> Result<Vec<InstallmentRecord>> {
        let records = match self.policy {
            InstallmentPolicy::Equal => {
                self.calculate_equal_installments(principal, periodic_rate, periods, excess)
            }
            InstallmentPolicy::Decreasing => {
                self.calculate_decreasing_installments(principal, periodic_rate, periods, excess)
            }
        };

        if (records.len() as u32) < periods {
            info!(
                "loan repaid after {} of {} periods",
                records.len(),
                periods
            );
        }

        Ok(records)
    }

    /// equal installments (annuity)
    fn calculate_equal_installments(
        &self,
        principal: Money,
        periodic_rate: Rate,
        periods: u32,
        excess: &ExcessPlan,
    ) -> Vec<InstallmentRecord> {
        let r = periodic_rate.as_decimal();
        let mut installment = annuity_installment(principal, periodic_rate, periods);
        debug!("base installment {} over {} periods", installment, periods);

        let mut records = Vec::with_capacity(periods as usize);
        let mut balance = principal;

        for period in 1..=periods {
            let interest = balance * r;
            // last period clears any residue left by rounding
            let capital = if period == periods {
                balance
            } else {
                (installment - interest).min(balance).max(Money::ZERO)
            };

            let applied = excess.apply(period, balance - capital);
            balance = (balance - capital - applied.applied).max(Money::ZERO);

            let record = InstallmentRecord {
                period,
                installment: interest + capital + applied.applied,
                interest,
                capital,
                excess: applied.applied,
                remaining: balance,
            };
            debug!("{:?}", record);
            records.push(record);

            if balance.is_zero() {
                break;
            }

            if applied.applied.is_positive() && self.strategy == ExcessStrategy::ReduceInstallment {
                installment = annuity_installment(balance, periodic_rate, periods - period);
                debug!("installment recalculated to {} after excess", installment);
            }
        }

        records
    }

    /// decreasing installments (equal principal portions)
    fn calculate_decreasing_installments(
        &self,
        principal: Money,
        periodic_rate: Rate,
        periods: u32,
        excess: &ExcessPlan,
    ) -> Vec<InstallmentRecord> {
        let r = periodic_rate.as_decimal();
        let mut capital_portion = principal / Decimal::from(periods);

        let mut records = Vec::with_capacity(periods as usize);
        let mut balance = principal;

        for period in 1..=periods {
            let interest = balance * r;
            let capital = if period == periods {
                balance
            } else {
                capital_portion.min(balance)
            };

            let applied = excess.apply(period, balance - capital);
            balance = (balance - capital - applied.applied).max(Money::ZERO);

            let record = InstallmentRecord {
                period,
                installment: capital + interest + applied.applied,
                interest,
                capital,
                excess: applied.applied,
                remaining: balance,
            };
            debug!("{:?}", record);
            records.push(record);

            if balance.is_zero() {
                break;
            }

            if applied.applied.is_positive() && self.strategy == ExcessStrategy::ReduceInstallment {
                capital_portion = balance / Decimal::from(periods - period);
                debug!("capital portion recalculated to {} after excess", capital_portion);
            }
        }

        records
    }
}

/// fixed installment repaying `principal` over `periods`
///
/// A = P * r / (1 - d) with discount factor d = (1 + r)^-n
pub fn annuity_installment(principal: Money, periodic_rate: Rate, periods: u32) -> Money {
    if periods == 0 {
        return principal;
    }

    if periodic_rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let r = periodic_rate.as_decimal();
    let denominator = Decimal::ONE - discount_factor(r, periods);
    if denominator.is_zero() {
        // rate below decimal resolution
        return principal / Decimal::from(periods);
    }

    (principal * r) / denominator
}

/// (1 + r)^-n; only shrinks, underflowing to zero for steep rates or long terms
fn discount_factor(r: Decimal, periods: u32) -> Decimal {
    let base = Decimal::ONE + r;
    let mut discount = Decimal::ONE;
    for _ in 0..periods {
        discount /= base;
        if discount.is_zero() {
            break;
        }
    }
    discount
}
