use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::types::{ExcessPayment, ExcessStrategy, InstallmentPolicy};

/// installments per year used to turn the nominal rate into a periodic one
pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 12;

fn default_payments_per_year() -> u32 {
    DEFAULT_PAYMENTS_PER_YEAR
}

/// loan parameters for a single schedule calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// credit principal
    pub value: Money,
    /// nominal rate, e.g. 0.04; divided by `payments_per_year` per period
    pub percentage: Rate,
    /// term in installment periods
    pub length: u32,
    /// one-time fee added to the real cost
    #[serde(default)]
    pub commission: Money,
    #[serde(default)]
    pub policy: InstallmentPolicy,
    #[serde(default)]
    pub excess_payments: Vec<ExcessPayment>,
    /// set to 1 when `percentage` already is a per-period rate
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
    /// overrides the policy's default handling of excess payments
    #[serde(default)]
    pub excess_strategy: Option<ExcessStrategy>,
}

impl LoanParameters {
    /// equal-installment loan without commission or excess payments
    pub fn new(value: Money, percentage: Rate, length: u32) -> Self {
        Self {
            value,
            percentage,
            length,
            commission: Money::ZERO,
            policy: InstallmentPolicy::Equal,
            excess_payments: Vec::new(),
            payments_per_year: DEFAULT_PAYMENTS_PER_YEAR,
            excess_strategy: None,
        }
    }

    pub fn builder() -> LoanParametersBuilder {
        LoanParametersBuilder::new()
    }

    /// interest rate applied to the balance each period
    pub fn periodic_rate(&self) -> Rate {
        self.percentage.periodic(self.payments_per_year)
    }

    pub fn effective_excess_strategy(&self) -> ExcessStrategy {
        self.excess_strategy
            .unwrap_or_else(|| self.policy.default_excess_strategy())
    }

    /// same loan under a different installment policy
    pub fn with_policy(&self, policy: InstallmentPolicy) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }

    /// basic argument sanity
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_positive() {
            return Err(MortgageError::invalid(
                "value",
                format!("credit value must be positive, got {}", self.value),
            ));
        }
        if self.percentage.is_negative() {
            return Err(MortgageError::invalid(
                "percentage",
                format!("rate must not be negative, got {}", self.percentage.as_decimal()),
            ));
        }
        if self.length == 0 {
            return Err(MortgageError::invalid("length", "term must be at least one period"));
        }
        if self.commission.is_negative() {
            return Err(MortgageError::invalid(
                "commission",
                format!("commission must not be negative, got {}", self.commission),
            ));
        }
        if self.payments_per_year == 0 {
            return Err(MortgageError::invalid(
                "payments_per_year",
                "at least one payment per year is required",
            ));
        }

        for payment in &self.excess_payments {
            if payment.amount.is_negative() {
                return Err(MortgageError::invalid(
                    "excesspayments",
                    format!(
                        "excess payment in period {} is negative: {}",
                        payment.period, payment.amount
                    ),
                ));
            }
            if payment.period == 0 || payment.period > self.length {
                return Err(MortgageError::invalid(
                    "excesspayments",
                    format!(
                        "excess payment period {} outside of term 1..={}",
                        payment.period, self.length
                    ),
                ));
            }
        }

        Ok(())
    }

    /// load and validate parameters from json
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: LoanParameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| MortgageError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// builder for loan parameters
#[derive(Debug, Clone, Default)]
pub struct LoanParametersBuilder {
    value: Option<Money>,
    percentage: Option<Rate>,
    length: Option<u32>,
    commission: Option<Money>,
    policy: Option<InstallmentPolicy>,
    excess_payments: Vec<ExcessPayment>,
    payments_per_year: Option<u32>,
    excess_strategy: Option<ExcessStrategy>,
}

impl LoanParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: Money) -> Self {
        self.value = Some(value);
        self
    }

    pub fn percentage(mut self, rate: Rate) -> Self {
        self.percentage = Some(rate);
        self
    }

    pub fn length(mut self, periods: u32) -> Self {
        self.length = Some(periods);
        self
    }

    pub fn commission(mut self, commission: Money) -> Self {
        self.commission = Some(commission);
        self
    }

    pub fn policy(mut self, policy: InstallmentPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn excess_payment(mut self, period: u32, amount: Money) -> Self {
        self.excess_payments.push(ExcessPayment::new(period, amount));
        self
    }

    pub fn excess_payments(mut self, payments: impl IntoIterator<Item = ExcessPayment>) -> Self {
        self.excess_payments.extend(payments);
        self
    }

    pub fn payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = Some(payments);
        self
    }

    pub fn excess_strategy(mut self, strategy: ExcessStrategy) -> Self {
        self.excess_strategy = Some(strategy);
        self
    }

    pub fn build(self) -> Result<LoanParameters> {
        let value = self
            .value
            .ok_or_else(|| MortgageError::invalid("value", "credit value is required"))?;
        let percentage = self
            .percentage
            .ok_or_else(|| MortgageError::invalid("percentage", "rate is required"))?;
        let length = self
            .length
            .ok_or_else(|| MortgageError::invalid("length", "term length is required"))?;

        let params = LoanParameters {
            value,
            percentage,
            length,
            commission: self.commission.unwrap_or(Money::ZERO),
            policy: self.policy.unwrap_or_default(),
            excess_payments: self.excess_payments,
            payments_per_year: self.payments_per_year.unwrap_or(DEFAULT_PAYMENTS_PER_YEAR),
            excess_strategy: self.excess_strategy,
        };
        params.validate()?;
        Ok(params)
    }
}
