use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Money;
use crate::errors::{MortgageError, Result};

/// installment policy for a fixed-term loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentPolicy {
    /// equal payment amounts throughout term (annuity)
    #[default]
    Equal,
    /// equal principal portion, interest on remaining balance
    Decreasing,
}

impl InstallmentPolicy {
    /// numeric credit type code: 0 = equal, 1 = decreasing
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(InstallmentPolicy::Equal),
            1 => Ok(InstallmentPolicy::Decreasing),
            other => Err(MortgageError::invalid(
                "credittype",
                format!("unknown credit type {other}, expected 0 (equal) or 1 (decreasing)"),
            )),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            InstallmentPolicy::Equal => 0,
            InstallmentPolicy::Decreasing => 1,
        }
    }

    /// how an excess payment is absorbed unless the caller chooses otherwise
    pub fn default_excess_strategy(&self) -> ExcessStrategy {
        match self {
            InstallmentPolicy::Equal => ExcessStrategy::ReduceInstallment,
            InstallmentPolicy::Decreasing => ExcessStrategy::ReduceTerm,
        }
    }
}

impl fmt::Display for InstallmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallmentPolicy::Equal => write!(f, "equal"),
            InstallmentPolicy::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// excess payment application method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcessStrategy {
    /// spread the lower balance over the remaining periods
    ReduceInstallment,
    /// keep the regular payment, finish the loan earlier
    ReduceTerm,
}

/// single extra principal payment made in a given period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessPayment {
    /// 1-based period the payment is made in
    pub period: u32,
    pub amount: Money,
}

impl ExcessPayment {
    pub fn new(period: u32, amount: Money) -> Self {
        Self { period, amount }
    }
}

impl fmt::Display for ExcessPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.period, self.amount)
    }
}

/// parses `PERIOD=AMOUNT`, e.g. `2=10000`
impl FromStr for ExcessPayment {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| MortgageError::invalid("excesspayments", message);

        let (period, amount) = s
            .split_once(&['=', ':'][..])
            .ok_or_else(|| invalid(format!("expected PERIOD=AMOUNT, got '{s}'")))?;

        let period = period
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(format!("bad period '{period}': {e}")))?;
        let amount = Money::from_str_exact(amount)
            .map_err(|e| invalid(format!("bad amount '{amount}': {e}")))?;

        Ok(Self { period, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_policy_codes() {
        assert_eq!(InstallmentPolicy::from_code(0).unwrap(), InstallmentPolicy::Equal);
        assert_eq!(InstallmentPolicy::from_code(1).unwrap(), InstallmentPolicy::Decreasing);
        assert!(InstallmentPolicy::from_code(2).unwrap_err().is_invalid_parameter());
        assert_eq!(InstallmentPolicy::Decreasing.code(), 1);
    }

    #[test]
    fn test_default_excess_strategy() {
        assert_eq!(
            InstallmentPolicy::Equal.default_excess_strategy(),
            ExcessStrategy::ReduceInstallment
        );
        assert_eq!(
            InstallmentPolicy::Decreasing.default_excess_strategy(),
            ExcessStrategy::ReduceTerm
        );
    }

    #[test]
    fn test_parse_excess_payment() {
        let payment: ExcessPayment = "2=10000".parse().unwrap();
        assert_eq!(payment, ExcessPayment::new(2, Money::from_major(10_000)));

        let payment: ExcessPayment = " 4 : 250.50".parse().unwrap();
        assert_eq!(payment.period, 4);
        assert_eq!(payment.amount, Money::from(dec!(250.50)));

        assert!("10000".parse::<ExcessPayment>().is_err());
        assert!("x=1".parse::<ExcessPayment>().is_err());
        assert!("3=abc".parse::<ExcessPayment>().is_err());
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&InstallmentPolicy::Decreasing).unwrap();
        assert_eq!(json, "\"decreasing\"");
        let strategy: ExcessStrategy = serde_json::from_str("\"reduce_term\"").unwrap();
        assert_eq!(strategy, ExcessStrategy::ReduceTerm);
    }
}
