//! Financial Calc CLI
//!
//! Command-line access to the calculation library. Every subcommand prints
//! labelled results, or JSON with `--json`.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use financial_calc::{annuity, capitalization, investment, rates};
use financial_calc::{IrrConfig, PaymentTiming, Regime, Term};

#[derive(Parser)]
#[command(name = "financial_calc", version, about = "Financial mathematics calculator")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Number of periods, given directly or as a term in days over a day basis
#[derive(Args)]
struct PeriodArgs {
    /// Number of rate periods (may be fractional)
    #[arg(long, conflicts_with = "days")]
    periods: Option<f64>,

    /// Term length in days
    #[arg(long)]
    days: Option<f64>,

    /// Days per rate period (30 for a monthly rate, 360 for a yearly rate)
    #[arg(long, default_value_t = 1.0)]
    day_basis: f64,
}

impl PeriodArgs {
    fn resolve(&self) -> Result<f64> {
        match (self.periods, self.days) {
            (Some(periods), None) => Ok(periods),
            (None, Some(days)) => Ok(Term::new(days, self.day_basis)?.period_count()),
            _ => bail!("either --periods or --days is required"),
        }
    }
}

/// Cash flow sequence, inline or from a CSV file with `period,cash_flow` columns
#[derive(Args)]
struct CashFlowArgs {
    /// Comma-separated cash flows starting at period 0
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, conflicts_with = "file")]
    flows: Vec<f64>,

    /// CSV file of cash flows
    #[arg(long)]
    file: Option<PathBuf>,
}

impl CashFlowArgs {
    fn resolve(&self) -> Result<Vec<f64>> {
        match &self.file {
            Some(path) => investment::load_cash_flows(path)
                .with_context(|| format!("loading cash flows from {}", path.display())),
            None if !self.flows.is_empty() => Ok(self.flows.clone()),
            None => bail!("either --flows or --file is required"),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Grow a present amount to its future value
    FutureValue {
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        term: PeriodArgs,
        /// simple (lin) or compound (exp)
        #[arg(long, default_value = "compound")]
        regime: Regime,
        /// Use continuous compounding instead of the regime
        #[arg(long)]
        continuous: bool,
    },
    /// Discount a future amount to its present value
    PresentValue {
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        term: PeriodArgs,
        #[arg(long, default_value = "compound")]
        regime: Regime,
        #[arg(long)]
        continuous: bool,
    },
    /// Rate per period implied by a present and a future amount
    TransactionRate {
        #[arg(long, allow_negative_numbers = true)]
        future: f64,
        #[arg(long, allow_negative_numbers = true)]
        present: f64,
        #[command(flatten)]
        term: PeriodArgs,
        #[arg(long, default_value = "compound")]
        regime: Regime,
        #[arg(long)]
        continuous: bool,
    },
    /// Present and future value of a level payment series
    Annuity {
        #[arg(long, allow_negative_numbers = true)]
        payment: f64,
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        term: PeriodArgs,
        /// ordinary (end of period) or due (start of period)
        #[arg(long, default_value = "ordinary")]
        timing: PaymentTiming,
    },
    /// Level payment that finances a present value or accumulates a future value
    Payment {
        #[arg(long, allow_negative_numbers = true, conflicts_with = "future_value")]
        present_value: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        future_value: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        term: PeriodArgs,
        #[arg(long, default_value = "ordinary")]
        timing: PaymentTiming,
    },
    /// Net present value of a cash flow sequence
    Npv {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// Internal rate of return of a cash flow sequence
    Irr {
        #[arg(long, default_value_t = investment::DEFAULT_GUESS, allow_negative_numbers = true)]
        guess: f64,
        #[arg(long, default_value_t = investment::DEFAULT_TOLERANCE)]
        tolerance: f64,
        #[arg(long, default_value_t = investment::DEFAULT_MAX_ITERATIONS)]
        max_iterations: u32,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// Payback period, discounted when a rate is given
    Payback {
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// Profitability index of a sequence with a leading outflow
    ProfitabilityIndex {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// Every investment metric at one discount rate
    Evaluate {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// NPV over a grid of discount rates
    Profile {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, default_value_t = 0.3)]
        to: f64,
        #[arg(long, default_value_t = 0.01)]
        step: f64,
        #[command(flatten)]
        cash_flows: CashFlowArgs,
    },
    /// Convert between rate conventions
    #[command(subcommand)]
    Rate(RateCommand),
}

#[derive(Subcommand)]
enum RateCommand {
    /// Effective annual rate of a nominal rate
    EffectiveFromNominal {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        /// Compounding periods per year
        #[arg(long)]
        per_year: f64,
    },
    /// Nominal rate with the given effective annual rate
    NominalFromEffective {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[arg(long)]
        per_year: f64,
    },
    /// Periodic rate over another period length
    Equivalent {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        /// Periods per year of the quoted rate
        #[arg(long)]
        from: f64,
        /// Periods per year of the wanted rate
        #[arg(long)]
        to: f64,
    },
    /// Rate per `to_days` equivalent to a rate per `from_days`
    Days {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[arg(long)]
        from_days: f64,
        #[arg(long)]
        to_days: f64,
        #[arg(long, default_value = "compound")]
        regime: Regime,
    },
    /// Continuously compounded rate of a nominal rate
    ContinuousFromPeriodic {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[arg(long)]
        per_year: f64,
    },
    /// Nominal rate of a continuously compounded rate
    PeriodicFromContinuous {
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        #[arg(long)]
        per_year: f64,
    },
}

fn run(command: Command) -> Result<Value> {
    let value = match command {
        Command::FutureValue {
            principal,
            rate,
            term,
            regime,
            continuous,
        } => {
            let n = term.resolve()?;
            let fv = if continuous {
                capitalization::continuous_future_value(principal, rate, n)?
            } else {
                capitalization::future_value(principal, rate, n, regime)?
            };
            json!({ "periods": n, "future_value": fv })
        }
        Command::PresentValue {
            amount,
            rate,
            term,
            regime,
            continuous,
        } => {
            let n = term.resolve()?;
            let pv = if continuous {
                capitalization::continuous_present_value(amount, rate, n)?
            } else {
                capitalization::present_value(amount, rate, n, regime)?
            };
            json!({ "periods": n, "present_value": pv })
        }
        Command::TransactionRate {
            future,
            present,
            term,
            regime,
            continuous,
        } => {
            let n = term.resolve()?;
            let rate = if continuous {
                capitalization::continuous_transaction_rate(future, present, n)?
            } else {
                capitalization::effective_transaction_rate(future, present, n, regime)?
            };
            json!({ "periods": n, "rate": rate })
        }
        Command::Annuity {
            payment,
            rate,
            term,
            timing,
        } => {
            let n = term.resolve()?;
            let (pv, fv) = match timing {
                PaymentTiming::Ordinary => (
                    annuity::present_value_ordinary(payment, rate, n)?,
                    annuity::future_value_ordinary(payment, rate, n)?,
                ),
                PaymentTiming::Due => (
                    annuity::present_value_due(payment, rate, n)?,
                    annuity::future_value_due(payment, rate, n)?,
                ),
            };
            json!({
                "timing": timing,
                "periods": n,
                "present_value": pv,
                "future_value": fv,
            })
        }
        Command::Payment {
            present_value,
            future_value,
            rate,
            term,
            timing,
        } => {
            let n = term.resolve()?;
            match (present_value, future_value) {
                (Some(pv), None) => {
                    let payment = annuity::payment_from_present_value(pv, rate, n, timing)?;
                    let coefficient = annuity::financing_coefficient(rate, n, timing)?;
                    json!({
                        "timing": timing,
                        "payment": payment,
                        "financing_coefficient": coefficient,
                    })
                }
                (None, Some(fv)) => {
                    let payment = annuity::payment_from_future_value(fv, rate, n, timing)?;
                    json!({ "timing": timing, "payment": payment })
                }
                _ => bail!("either --present-value or --future-value is required"),
            }
        }
        Command::Npv { rate, cash_flows } => {
            let flows = cash_flows.resolve()?;
            json!({ "net_present_value": investment::net_present_value(&flows, rate)? })
        }
        Command::Irr {
            guess,
            tolerance,
            max_iterations,
            cash_flows,
        } => {
            let flows = cash_flows.resolve()?;
            let config = IrrConfig::default()
                .with_guess(guess)
                .with_tolerance(tolerance)
                .with_max_iterations(max_iterations);
            let irr = investment::internal_rate_of_return_with(&flows, &config)?;
            json!({ "internal_rate_of_return": irr })
        }
        Command::Payback { rate, cash_flows } => {
            let flows = cash_flows.resolve()?;
            match rate {
                Some(rate) => {
                    let payback = investment::discounted_payback_period(&flows, rate)?;
                    json!({ "discounted_payback_period": payback })
                }
                None => json!({ "payback_period": investment::payback_period(&flows)? }),
            }
        }
        Command::ProfitabilityIndex { rate, cash_flows } => {
            let flows = cash_flows.resolve()?;
            json!({ "profitability_index": investment::profitability_index(&flows, rate)? })
        }
        Command::Evaluate { rate, cash_flows } => {
            let flows = cash_flows.resolve()?;
            serde_json::to_value(investment::evaluate(&flows, rate)?)?
        }
        Command::Profile {
            from,
            to,
            step,
            cash_flows,
        } => {
            if step.is_nan() || step <= 0.0 || to < from {
                bail!("profile needs --step > 0 and --to >= --from");
            }
            let flows = cash_flows.resolve()?;
            let count = ((to - from) / step).floor() as usize + 1;
            let grid: Vec<f64> = (0..count).map(|i| from + i as f64 * step).collect();
            let profile = investment::npv_profile(&flows, &grid)?;
            let points: Vec<Value> = profile
                .into_iter()
                .map(|(rate, npv)| json!({ "rate": rate, "net_present_value": npv }))
                .collect();
            json!({ "profile": points })
        }
        Command::Rate(rate_command) => run_rate(rate_command)?,
    };

    Ok(value)
}

fn run_rate(command: RateCommand) -> Result<Value> {
    let rate = match command {
        RateCommand::EffectiveFromNominal { rate, per_year } => {
            rates::effective_from_nominal(rate, per_year)?
        }
        RateCommand::NominalFromEffective { rate, per_year } => {
            rates::nominal_from_effective(rate, per_year)?
        }
        RateCommand::Equivalent { rate, from, to } => rates::equivalent_rate(rate, from, to)?,
        RateCommand::Days {
            rate,
            from_days,
            to_days,
            regime,
        } => {
            rates::equivalent_rate_for_days(rate, from_days, to_days, regime)?
        }
        RateCommand::ContinuousFromPeriodic { rate, per_year } => {
            rates::continuous_from_periodic(rate, per_year)?
        }
        RateCommand::PeriodicFromContinuous { rate, per_year } => {
            rates::periodic_from_continuous(rate, per_year)?
        }
    };
    Ok(json!({ "rate": rate }))
}

fn print_labelled(value: &Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                match field {
                    Value::Array(items) => {
                        println!("{}:", key);
                        for item in items {
                            print_labelled(item);
                        }
                    }
                    Value::Number(n) => match n.as_f64() {
                        Some(x) if n.is_f64() => println!("{:>28}: {:.6}", key, x),
                        _ => println!("{:>28}: {}", key, n),
                    },
                    Value::Null => println!("{:>28}: n/a", key),
                    Value::String(s) => println!("{:>28}: {}", key, s),
                    other => println!("{:>28}: {}", key, other),
                }
            }
        }
        other => println!("{}", other),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let value = run(cli.command)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_labelled(&value);
    }

    Ok(())
}
