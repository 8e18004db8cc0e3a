use clap::Parser;
use ps_app::AppResult;
use ps_controls::ThresholdPolicy;
use ps_sim::{BenchReport, Recorder, SimulationEngine, SimulationProfile, run_bench};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Parser)]
#[command(name = "pistor-sim")]
#[command(about = "Run the fan bench scenario against the simulated board", long_about = None)]
struct Cli {
    /// Number of sample/command passes
    #[arg(long, default_value_t = 150)]
    passes: u64,
    /// Pause between passes in milliseconds
    #[arg(long, default_value_t = 100)]
    pause_ms: u64,
    /// Append the temperature trace to this file
    #[arg(long)]
    record: Option<PathBuf>,
    /// Label for the recorded trace
    #[arg(long, default_value = "bench")]
    name: String,
    /// Log every simulated sample
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let pause = Duration::from_millis(cli.pause_ms);
    let profile = SimulationProfile::default();

    let report = match &cli.record {
        Some(path) => {
            let mut engine = SimulationEngine::with_recorder(profile, Recorder::append_to(path)?);
            let report = bench(&mut engine, &cli.name, cli.passes, pause)?;
            engine.finish()?;
            println!("Trace appended to {}", path.display());
            report
        }
        None => {
            let mut engine = SimulationEngine::new(profile);
            bench(&mut engine, &cli.name, cli.passes, pause)?
        }
    };

    let peak = report
        .passes
        .iter()
        .map(|p| p.temperature)
        .fold(f64::NEG_INFINITY, f64::max);
    println!(
        "{} passes, peak CPU {peak}, loop state {:?}",
        report.passes.len(),
        report.loop_report.state
    );
    Ok(())
}

fn bench<W: Write>(
    engine: &mut SimulationEngine<W>,
    name: &str,
    passes: u64,
    pause: Duration,
) -> AppResult<BenchReport> {
    engine.start_named_test(name)?;
    let report = run_bench(engine, ThresholdPolicy::bench(), passes, pause, |p| {
        println!("Pass {} CPU {} Fan {}", p.pass, p.temperature, p.fan);
    })?;
    Ok(report)
}
