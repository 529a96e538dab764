use std::collections::BTreeMap;

use log::warn;

use crate::decimal::Money;
use crate::types::ExcessPayment;

/// extra principal payments keyed by period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcessPlan {
    payments: BTreeMap<u32, Money>,
}

/// amount actually applied in a period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedExcess {
    pub requested: Money,
    pub applied: Money,
}

impl AppliedExcess {
    pub fn was_capped(&self) -> bool {
        self.applied < self.requested
    }
}

impl ExcessPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// build from a list of payments; payments sharing a period are summed
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a ExcessPayment>) -> Self {
        let mut plan = Self::new();
        for payment in payments {
            plan.add(payment.period, payment.amount);
        }
        plan
    }

    pub fn add(&mut self, period: u32, amount: Money) {
        *self.payments.entry(period).or_insert(Money::ZERO) += amount;
    }

    /// configured amount for a period, zero when none
    pub fn amount_for(&self, period: u32) -> Money {
        self.payments.get(&period).copied().unwrap_or(Money::ZERO)
    }

    /// apply the period's excess against the balance still outstanding
    pub fn apply(&self, period: u32, outstanding: Money) -> AppliedExcess {
        let requested = self.amount_for(period);
        let applied = requested.min(outstanding.max(Money::ZERO));

        let excess = AppliedExcess { requested, applied };
        if excess.was_capped() {
            warn!(
                "excess payment of {} in period {} capped to outstanding balance {}",
                requested.rounded(),
                period,
                applied.rounded()
            );
        }
        excess
    }

    pub fn total(&self) -> Money {
        self.payments.values().copied().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.values().all(Money::is_zero)
    }

    /// periods with a configured payment, in order
    pub fn periods(&self) -> impl Iterator<Item = u32> + '_ {
        self.payments.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_periods_are_summed() {
        let payments = vec![
            ExcessPayment::new(4, Money::from_major(20_000)),
            ExcessPayment::new(2, Money::from_major(10_000)),
            ExcessPayment::new(4, Money::from_major(5_000)),
        ];
        let plan = ExcessPlan::from_payments(&payments);

        assert_eq!(plan.amount_for(2), Money::from_major(10_000));
        assert_eq!(plan.amount_for(4), Money::from_major(25_000));
        assert_eq!(plan.amount_for(3), Money::ZERO);
        assert_eq!(plan.total(), Money::from_major(35_000));
        assert_eq!(plan.periods().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_apply_caps_at_outstanding() {
        let mut plan = ExcessPlan::new();
        plan.add(1, Money::from_major(500));

        let applied = plan.apply(1, Money::from_major(1_000));
        assert_eq!(applied.applied, Money::from_major(500));
        assert!(!applied.was_capped());

        let applied = plan.apply(1, Money::from_major(300));
        assert_eq!(applied.requested, Money::from_major(500));
        assert_eq!(applied.applied, Money::from_major(300));
        assert!(applied.was_capped());

        let applied = plan.apply(2, Money::from_major(300));
        assert_eq!(applied.applied, Money::ZERO);
    }

    #[test]
    fn test_empty_plan() {
        assert!(ExcessPlan::new().is_empty());

        let mut plan = ExcessPlan::new();
        plan.add(3, Money::ZERO);
        assert!(plan.is_empty());
        plan.add(3, Money::ONE);
        assert!(!plan.is_empty());
    }
}
