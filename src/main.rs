use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use uuid::Uuid;

use fog_parking::cli::Cli;
use fog_parking::domain::simulator::report::SimulationReport;
use fog_parking::domain::utils::statistics::write_report_file;
use fog_parking::{logger, run_scenario};

fn main() -> ExitCode {
    let cli = Cli::parse();

    logger::init();
    log::info!("Starting smart car parking system...");

    match execute(&cli) {
        Ok(()) => {
            log::info!("Simulation finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Unwanted error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.to_config().context("invalid scenario configuration")?;
    let run_id = Uuid::new_v4().to_string();

    let report = run_scenario(config).context("scenario run failed")?;
    print_summary(&run_id, &report);

    if let Some(path) = &cli.report {
        write_report_file(path, &run_id, &report).with_context(|| format!("could not write report to '{}'", path.display()))?;
    }
    Ok(())
}

fn print_summary(run_id: &str, report: &SimulationReport) {
    println!("{} {} ({} placement)", "Run".bold(), run_id, report.strategy.cyan());
    println!("  emitted: {}, delivered: {}, dropped: {}", report.total_emitted(), report.total_delivered(), report.dropped);

    for (sensor, mean) in &report.emission_mean {
        println!("  {} emits every {:.3} on average", sensor, mean);
    }

    for (module, devices) in &report.placement {
        println!("  {} -> {}", module, devices.join(", "));
    }

    for latency in &report.loops {
        match latency.average() {
            Some(average) => println!("  loop [{}]: {} avg over {} samples", latency.label, format!("{:.3}", average).green(), latency.samples),
            None => println!("  loop [{}]: {}", latency.label, "no completed samples".yellow()),
        }
    }
}
