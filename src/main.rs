use anyhow::{Context, Result, bail};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use sched_sim::{
    Sim, SimConfig, Workload,
    sim::{bernoulli_workload, read_workload, write_report},
};

const USAGE: &str = "usage: sched_sim [INPUT] [--out DIR] [--quantum N] [--alpha F] \
                     [--initial-guess N] [--bernoulli TICKS SEED] [--trace]";

enum Source {
    File(PathBuf),
    Bernoulli { ticks: u64, seed: u64 },
}

struct Args {
    source: Source,
    out_dir: PathBuf,
    config: SimConfig,
    trace: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args> {
    let mut source = Source::File(PathBuf::from("input.txt"));
    let mut out_dir = PathBuf::from(".");
    let mut config = SimConfig::default();
    let mut trace = false;

    fn value(argv: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
        argv.next()
            .with_context(|| format!("{flag} expects a value\n{USAGE}"))
    }

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--out" => out_dir = PathBuf::from(value(&mut argv, &arg)?),
            "--quantum" => {
                config.time_quantum = value(&mut argv, &arg)?
                    .parse()
                    .context("--quantum expects an integer")?
            }
            "--alpha" => {
                config.alpha = value(&mut argv, &arg)?
                    .parse()
                    .context("--alpha expects a number")?
            }
            "--initial-guess" => {
                config.initial_guess = value(&mut argv, &arg)?
                    .parse()
                    .context("--initial-guess expects an integer")?
            }
            "--bernoulli" => {
                let ticks = value(&mut argv, &arg)?
                    .parse()
                    .context("--bernoulli expects TICKS")?;
                let seed = value(&mut argv, &arg)?
                    .parse()
                    .context("--bernoulli expects SEED")?;
                source = Source::Bernoulli { ticks, seed };
            }
            "--trace" => trace = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            path => source = Source::File(PathBuf::from(path)),
        }
    }

    Ok(Args {
        source,
        out_dir,
        config,
        trace,
    })
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let level = if args.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .context("failed to install logger")?;

    // Reject bad parameters before touching the input
    args.config.validate()?;

    let records = match &args.source {
        Source::File(path) => {
            read_workload(path).with_context(|| format!("reading {}", path.display()))?
        }
        Source::Bernoulli { ticks, seed } => bernoulli_workload(*ticks, 0.3, 0.3, 2, 6, *seed),
    };
    for record in &records {
        log::info!(
            "[id {} : arrive_time {}, burst_time {}]",
            record.id,
            record.arrival_time,
            record.burst_time
        );
    }

    let sim = Sim::new(Workload::new(records), args.config)?.with_trace(args.trace);

    // Everything is simulated before the first file is written
    let results = sim.run_all();
    for (policy, result) in &results {
        write_report(&args.out_dir, *policy, result)
            .with_context(|| format!("writing {}", policy.file_name()))?;
    }

    for (_, result) in &results {
        println!(
            "{:<5} average waiting time: {:.2}",
            result.policy, result.average_waiting_time
        );
    }
    Ok(())
}
