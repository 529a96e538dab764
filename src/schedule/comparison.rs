use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::InstallmentPolicy;

use super::Schedule;

/// the same loan under both installment policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    pub equal: Schedule,
    pub decreasing: Schedule,
    /// equal real value minus decreasing real value
    pub cash_difference: Money,
    pub payments_per_year: u32,
}

impl PolicyComparison {
    pub fn equal_periods(&self) -> u32 {
        self.equal.summary.periods
    }

    pub fn decreasing_periods(&self) -> u32 {
        self.decreasing.summary.periods
    }

    pub fn equal_years(&self) -> Decimal {
        self.years(self.equal_periods())
    }

    pub fn decreasing_years(&self) -> Decimal {
        self.years(self.decreasing_periods())
    }

    /// the policy with the lower real value, equal on a tie
    pub fn cheaper(&self) -> InstallmentPolicy {
        if self.cash_difference.is_positive() {
            InstallmentPolicy::Decreasing
        } else {
            InstallmentPolicy::Equal
        }
    }

    fn years(&self, periods: u32) -> Decimal {
        Decimal::from(periods) / Decimal::from(self.payments_per_year.max(1))
    }
}

/// compute both schedules for the same loan parameters
pub fn compare(params: &LoanParameters) -> Result<PolicyComparison> {
    let equal = Schedule::generate(&params.with_policy(InstallmentPolicy::Equal))?;
    let decreasing = Schedule::generate(&params.with_policy(InstallmentPolicy::Decreasing))?;

    let cash_difference = equal.summary.total_real_value - decreasing.summary.total_real_value;

    Ok(PolicyComparison {
        equal,
        decreasing,
        cash_difference,
        payments_per_year: params.payments_per_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::ExcessPayment;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compare_sample_loan() {
        let params = LoanParameters::new(Money::from_major(20_000), Rate::from_percentage(4), 5);
        let comparison = compare(&params).unwrap();

        assert_eq!(comparison.equal.policy, InstallmentPolicy::Equal);
        assert_eq!(comparison.decreasing.policy, InstallmentPolicy::Decreasing);
        // 200.44 vs 200.00 in interest
        assert_eq!(comparison.cash_difference.rounded(), Money::from(dec!(0.44)));
        assert_eq!(comparison.cheaper(), InstallmentPolicy::Decreasing);
        assert_eq!(comparison.equal_periods(), 5);
        assert_eq!(comparison.decreasing_periods(), 5);
    }

    #[test]
    fn test_compare_reports_years() {
        let params = LoanParameters::builder()
            .value(Money::from_major(1_000_000))
            .percentage(Rate::from_percentage(4))
            .length(360)
            .excess_payment(2, Money::from_major(10_000))
            .excess_payment(4, Money::from_major(20_000))
            .build()
            .unwrap();
        let comparison = compare(&params).unwrap();

        assert_eq!(comparison.equal_years(), dec!(30));
        // decreasing keeps its capital portion and finishes early
        assert!(comparison.decreasing_periods() < 360);
        assert!(comparison.decreasing_years() < dec!(30));
        assert!(comparison.cash_difference.is_positive());
    }

    #[test]
    fn test_compare_validates() {
        let mut params =
            LoanParameters::new(Money::from_major(20_000), Rate::from_percentage(4), 5);
        params.excess_payments = vec![ExcessPayment::new(9, Money::ONE)];
        assert!(compare(&params).unwrap_err().is_invalid_parameter());
    }
}
