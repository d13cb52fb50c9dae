//! # SchedSim Host Daemon
//!
//! Main entry point for the scheduler simulation.

use schedsimd::{HostConfig, HostError};
use std::env;
use std::process;
use std::time::Duration;
use task_loader::LoadError;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    match schedsimd::run_host(&config) {
        Ok(_) => {}
        Err(HostError::Load(LoadError::SourceUnavailable { .. })) => {
            eprintln!("Error: task list could not be loaded.");
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<HostConfig, String> {
    let mut input = None;
    let mut pace = None;
    let mut color = true;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--pace-ms" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --pace-ms".to_string());
                }
                let millis: u64 = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid pace value: {}", args[i]))?;
                pace = Some(Duration::from_millis(millis));
            }
            "--real-time" => {
                pace = Some(Duration::from_secs(sim_dispatch::TICK_UNIT_SECS));
            }
            "--no-color" => {
                color = false;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {}", other));
            }
            path => {
                if input.is_some() {
                    return Err(format!("Unexpected extra argument: {}", path));
                }
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    let input = input.ok_or_else(|| "Missing task list file".to_string())?;
    let mut config = HostConfig::new(input);
    config.pace = pace;
    config.color = color;
    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <task-file> [OPTIONS]", program);
    eprintln!();
    eprintln!("Task file: one task per line, 'arrival, priority, burst'");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --pace-ms <N>   Sleep N milliseconds per simulated tick during replay");
    eprintln!("  --real-time     Replay at one tick unit per wall-clock second");
    eprintln!("  --no-color      Disable ANSI colors in the trace");
    eprintln!("  -h, --help      Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {} tasks.txt --pace-ms 100", program);
}
