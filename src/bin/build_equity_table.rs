//! Preflop equity table generator.
//!
//! Simulates every one of the 169 canonical holdings against a random hand
//! and writes the table the agent loads at startup.
//!
//! Usage: `build_equity_table [--samples N] [--seed S] [--out PATH]`

use std::env;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triboard_agent::cards::{PairKey, NUM_PAIR_KEYS};
use triboard_agent::equity::{EquityEstimator, EquityTable, PairEquity};

struct Args {
    samples: usize,
    seed: u64,
    out: String,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        samples: 40_000,
        seed: 2021,
        out: "data/preflop_equity.json".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--samples" | "-n", Some(v)) => {
                parsed.samples = v.parse().with_context(|| format!("bad sample count {v:?}"))?;
            }
            ("--seed" | "-s", Some(v)) => {
                parsed.seed = v.parse().with_context(|| format!("bad seed {v:?}"))?;
            }
            ("--out" | "-o", Some(v)) => parsed.out = v.clone(),
            (flag, _) => bail!("unexpected argument {flag:?}"),
        }
        i += 2;
    }
    if parsed.samples == 0 {
        bail!("--samples must be positive");
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    info!(samples = args.samples, seed = args.seed, out = %args.out, "building preflop table");
    let start = Instant::now();

    let progress = ProgressBar::new(NUM_PAIR_KEYS as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} holdings [{elapsed_precise}]")?,
    );

    let estimator = EquityEstimator::new();
    let keys: Vec<PairKey> = PairKey::all().collect();
    let results: Vec<PairEquity> = keys
        .par_iter()
        .map(|key| {
            // One stream per holding keeps the output independent of scheduling.
            let mut rng = StdRng::seed_from_u64(args.seed ^ (key.index() as u64).wrapping_mul(0x9E37_79B9));
            let wd = estimator.win_draw(&key.representative(), args.samples, &mut rng);
            progress.inc(1);
            PairEquity {
                win_prob: wd.win,
                draw_prob: wd.draw,
            }
        })
        .collect();
    progress.finish_and_clear();

    let table = EquityTable::from_fn(|key| results[key.index()]);
    table
        .save_json(&args.out, Some(args.samples as u64))
        .with_context(|| format!("writing {}", args.out))?;

    let aces = table.baseline("AA".parse()?);
    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        aces,
        "wrote {}",
        args.out
    );
    Ok(())
}
