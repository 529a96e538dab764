/// excess payments - overpay twice and watch the schedule shrink
use mortgage_rs::{
    compute, render_schedule, ExcessStrategy, InstallmentPolicy, LoanParameters, Money, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = LoanParameters::builder()
        .value(Money::from_major(300_000))
        .percentage(Rate::from_bps(650))
        .length(120)
        .commission(Money::from_major(1_500))
        .policy(InstallmentPolicy::Equal)
        .excess_payment(12, Money::from_major(25_000))
        .excess_payment(24, Money::from_major(25_000));

    // lower installment, same term
    let lower = compute(&base.clone().excess_strategy(ExcessStrategy::ReduceInstallment).build()?)?;
    println!("-- reduce installment --");
    print!("{}", render_schedule(&lower));

    // same installment, shorter term
    let shorter = compute(&base.excess_strategy(ExcessStrategy::ReduceTerm).build()?)?;
    println!("-- reduce term --");
    println!(
        "paid off after {} of {} periods, costs {}",
        shorter.len(),
        shorter.length,
        shorter.summary.costs.rounded()
    );

    Ok(())
}
