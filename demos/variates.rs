//! Profile the samplers in `rand` and `rand_distr`.
//!
//! Every discrete sampler is run through the distribution timer, so its
//! latency is followed by the observed frequency of each value. Continuous
//! samplers only get the latency report.
//!
//! Run with:
//! ```bash
//! cargo run --release --example variates
//! RUST_LOG=debug cargo run --release --example variates
//! ```

use std::cell::RefCell;
use std::error::Error;
use std::io::{self, Write};

use monkey_timer::{Bench, MeasureError, ScopeTimer};
use rand::rngs::ThreadRng;
use rand::Rng;
use rand_distr::{
    Beta, Binomial, Cauchy, ChiSquared, Distribution, Exp, FisherF, Gamma, Geometric, Gumbel,
    LogNormal, Normal, Pareto, Poisson, StudentT, Triangular, Weibull,
};

type Rand = RefCell<ThreadRng>;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let _total = ScopeTimer::new(io::stdout(), "Total Time");
    let mut out = io::stdout();
    let bench = Bench::new();
    let rng: Rand = RefCell::new(rand::rng());

    writeln!(out, "\nMonkeyTimer")?;
    writeln!(out, "monkey-timer version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "===========\n")?;

    min_max(&mut out)?;
    booleans(&mut out, &bench, &rng)?;
    integers(&mut out, &bench, &rng)?;
    indices(&mut out, &bench, &rng)?;
    floats(&mut out, &bench, &rng)?;
    clamps(&mut out, &bench)?;

    writeln!(out, "============================")?;
    Ok(())
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}\n{}", title, "-".repeat(title.len()))
}

/// Callable panics are already reported in the output; only I/O stops the run.
fn keep_going(result: Result<(), MeasureError>) -> io::Result<()> {
    match result {
        Err(MeasureError::Io(err)) => Err(err),
        _ => Ok(()),
    }
}

fn min_max(out: &mut impl Write) -> io::Result<()> {
    section(out, "Min/Max Tests")?;
    writeln!(out, "Maximum Unsigned Integer: {}", u64::MAX)?;
    writeln!(out, "Minimum Integer: {}", i64::MIN)?;
    writeln!(out, "Maximum Integer:  {}", i64::MAX)?;
    writeln!(out, "Minimum Float: {:e}", f64::MIN)?;
    writeln!(out, "Maximum Float:  {:e}", f64::MAX)?;
    writeln!(out, "Minimum Below: {:e}", -f64::from_bits(1))?;
    writeln!(out, "Minimum Above:  {:e}", f64::from_bits(1))?;
    writeln!(out)
}

fn booleans(out: &mut impl Write, bench: &Bench, rng: &Rand) -> io::Result<()> {
    section(out, "Random Boolean")?;
    keep_going(bench.distribution_timer(&mut *out, "percent_true(25.0)", || {
        rng.borrow_mut().random_range(0.0..100.0) < 25.0
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "random_bool(0.25)", || {
        rng.borrow_mut().random_bool(0.25)
    }))
}

fn d(rng: &Rand, sides: i64) -> i64 {
    if sides > 0 {
        rng.borrow_mut().random_range(1..=sides)
    } else {
        0
    }
}

fn dice(rng: &Rand, rolls: i64, sides: i64) -> i64 {
    (0..rolls).map(|_| d(rng, sides)).sum()
}

/// Sum of the best three of `number` six-sided dice.
fn ability_dice(rng: &Rand, number: usize) -> i64 {
    let mut rolls: Vec<i64> = (0..number.clamp(3, 9)).map(|_| d(rng, 6)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls.iter().take(3).sum()
}

fn integers(out: &mut impl Write, bench: &Bench, rng: &Rand) -> Result<(), Box<dyn Error>> {
    section(out, "Random Integer")?;
    keep_going(bench.distribution_timer(&mut *out, "random_range(0..10)", || {
        rng.borrow_mut().random_range(0..10)
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "random_range(0..=9)", || {
        rng.borrow_mut().random_range(0..=9)
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "random_range(-10..=10)", || {
        rng.borrow_mut().random_range(-10..=10)
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "random_range(0..10) * 2", || {
        rng.borrow_mut().random_range(0..10) * 2
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "random_range(0..10) * -2", || {
        rng.borrow_mut().random_range(0..10) * -2
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "plus_or_minus(5)", || {
        rng.borrow_mut().random_range(-5..=5)
    }))?;
    keep_going(bench.distribution_timer(&mut *out, "plus_or_minus_linear(5)", || {
        let mut rng = rng.borrow_mut();
        (rng.random_range(-5..=5) + rng.random_range(-5..=5)) / 2
    }))?;
    let gauss = Normal::new(0.0, 5.0 / 3.0)?;
    keep_going(bench.distribution_timer(&mut *out, "plus_or_minus_gauss(5)", || {
        let x: f64 = gauss.sample(&mut *rng.borrow_mut());
        (x.round() as i64).clamp(-5, 5)
    }))?;

    let binomial = Binomial::new(10, 0.5)?;
    keep_going(bench.distribution_timer(&mut *out, "binomial(10, 0.5)", || {
        binomial.sample(&mut *rng.borrow_mut())
    }))?;
    let geometric = Geometric::new(0.75)?;
    keep_going(bench.distribution_timer(&mut *out, "geometric(0.75)", || {
        geometric.sample(&mut *rng.borrow_mut())
    }))?;
    let poisson = Poisson::new(4.0)?;
    keep_going(bench.distribution_timer(&mut *out, "poisson(4.0)", || {
        let x: f64 = poisson.sample(&mut *rng.borrow_mut());
        x as u64
    }))?;

    section(out, "Random Dice")?;
    keep_going(bench.distribution_timer(&mut *out, "d(10)", || d(rng, 10)))?;
    keep_going(bench.distribution_timer(&mut *out, "dice(3, 6)", || dice(rng, 3, 6)))?;
    keep_going(bench.distribution_timer(&mut *out, "dice(0, 6)", || dice(rng, 0, 6)))?;
    keep_going(bench.distribution_timer(&mut *out, "ability_dice(4)", || ability_dice(rng, 4)))?;
    Ok(())
}

/// Uniform index into a sequence of length `n`; negative `n` indexes from
/// the back.
fn random_index(rng: &Rand, n: i64) -> i64 {
    match n {
        0 => 0,
        n if n > 0 => rng.borrow_mut().random_range(0..n),
        n => rng.borrow_mut().random_range(n..0),
    }
}

fn front_linear(rng: &Rand, n: i64) -> i64 {
    let (a, b) = (random_index(rng, n), random_index(rng, n));
    if n >= 0 { a.min(b) } else { a.max(b) }
}

fn back_linear(rng: &Rand, n: i64) -> i64 {
    let (a, b) = (random_index(rng, n), random_index(rng, n));
    if n >= 0 { a.max(b) } else { a.min(b) }
}

fn middle_linear(rng: &Rand, n: i64) -> i64 {
    (random_index(rng, n) + random_index(rng, n)) / 2
}

fn quantum_linear(rng: &Rand, n: i64) -> i64 {
    let pick = rng.borrow_mut().random_range(0..3);
    match pick {
        0 => front_linear(rng, n),
        1 => middle_linear(rng, n),
        _ => back_linear(rng, n),
    }
}

fn indices(out: &mut impl Write, bench: &Bench, rng: &Rand) -> io::Result<()> {
    const N: i64 = 10;
    section(out, "Random Index")?;
    let samplers: [(&str, fn(&Rand, i64) -> i64); 5] = [
        ("random_index", random_index),
        ("front_linear", front_linear),
        ("middle_linear", middle_linear),
        ("back_linear", back_linear),
        ("quantum_linear", quantum_linear),
    ];

    for n in [N, -N] {
        writeln!(out, "F({}N) where N = {}", if n < 0 { "-" } else { "" }, N)?;
        for (name, sampler) in samplers {
            let label = format!("{}({}N)", name, if n < 0 { "-" } else { "" });
            keep_going(bench.distribution_timer(&mut *out, &label, || sampler(rng, n)))?;
        }
    }
    Ok(())
}

fn floats(out: &mut impl Write, bench: &Bench, rng: &Rand) -> Result<(), Box<dyn Error>> {
    section(out, "Random Float: timer only")?;

    macro_rules! time_sampler {
        ($label:expr, $dist:expr) => {{
            let dist = $dist?;
            keep_going(bench.function_timer(&mut *out, $label, || {
                let x: f64 = dist.sample(&mut *rng.borrow_mut());
                x
            }))?;
        }};
    }

    keep_going(bench.function_timer(&mut *out, "random::<f64>()", || {
        rng.borrow_mut().random::<f64>()
    }))?;
    keep_going(bench.function_timer(&mut *out, "random_range(1.0..10.0)", || {
        rng.borrow_mut().random_range(1.0..10.0)
    }))?;
    time_sampler!("exponential(1.0)", Exp::new(1.0));
    time_sampler!("gamma(1.0, 1.0)", Gamma::new(1.0, 1.0));
    time_sampler!("weibull(1.0, 1.0)", Weibull::new(1.0, 1.0));
    time_sampler!("normal(5.0, 2.0)", Normal::new(5.0, 2.0));
    time_sampler!("log_normal(1.6, 0.25)", LogNormal::new(1.6, 0.25));
    time_sampler!("gumbel(0.0, 1.0)", Gumbel::new(0.0, 1.0));
    time_sampler!("chi_squared(1.0)", ChiSquared::new(1.0));
    time_sampler!("cauchy(0.0, 0.00005)", Cauchy::new(0.0, 0.00005));
    time_sampler!("fisher_f(1.0, 1.0)", FisherF::new(1.0, 1.0));
    time_sampler!("student_t(1.0)", StudentT::new(1.0));
    time_sampler!("beta(10.0, 1.0)", Beta::new(10.0, 1.0));
    time_sampler!("pareto(1.0, 5.0)", Pareto::new(1.0, 5.0));
    time_sampler!("triangular(0.0, 10.0, 5.0)", Triangular::new(0.0, 10.0, 5.0));
    writeln!(out)?;
    Ok(())
}

/// Clamp that accepts its bounds in either order.
fn clamp<T: PartialOrd>(target: T, a: T, b: T) -> T {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if target < lo {
        lo
    } else if target > hi {
        hi
    } else {
        target
    }
}

fn clamps(out: &mut impl Write, bench: &Bench) -> io::Result<()> {
    section(out, "Clamp Tests")?;

    // Ord::clamp panics on reversed bounds; the timer reports the failure.
    keep_going(bench.function_timer(&mut *out, "Ord::clamp(3, 2, 1)", || {
        std::hint::black_box(3i64).clamp(2, 1)
    }))?;
    keep_going(bench.function_timer(&mut *out, "clamp(3, 2, 1)", || {
        clamp(std::hint::black_box(3i64), 2, 1)
    }))?;
    let got = clamp(3i64, 2, 1);
    writeln!(out, "is {} should be 2: {}", got, if got == 2 { "Pass" } else { "Fail" })?;

    keep_going(bench.function_timer(&mut *out, "clamp(1.3, 1.2, 1.1)", || {
        clamp(std::hint::black_box(1.3f64), 1.2, 1.1)
    }))?;
    let got = clamp(1.3f64, 1.2, 1.1);
    writeln!(out, "is {} should be 1.2: {}", got, if got == 1.2 { "Pass" } else { "Fail" })?;
    writeln!(out)
}
