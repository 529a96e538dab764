/// quick start - print the schedule for a small equal-installment loan
use mortgage_rs::{compute, render_schedule, LoanParameters, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 20,000 at 4% over 5 monthly installments
    let params = LoanParameters::builder()
        .value(Money::from_major(20_000))
        .percentage(Rate::from_percentage(4))
        .length(5)
        .build()?;

    let schedule = compute(&params)?;
    print!("{}", render_schedule(&schedule));

    Ok(())
}
