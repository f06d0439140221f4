//! Weldpass CLI
//!
//! Usage:
//!   weldpass --scenario pass.json             # Replay a scripted pass
//!   weldpass --interactive                    # Drive a station from stdin
//!   weldpass --serve                          # HTTP API server
//!   weldpass --scenario pass.json --json      # JSON output

use clap::Parser;
use colored::Colorize;
use glam::Vec3;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

use weldpass::core::scenario::plate_under;
use weldpass::core::{apply_event, run_server, Scenario, StationEvent, WeldRig, WeldSession};
use weldpass::types::{Effect, PassReport, Seam, StepOutput, Verdict, WeldConfig, WeldResult, WeldState};
use weldpass::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "weldpass",
    version = VERSION,
    about = "Weldpass - weld-pass evaluation engine for a VR welding trainer",
    long_about = "Weldpass tracks the welding gun tip against a seam, lays bead marks\n\
                  while the trigger is held and grades the pass when the tool is put down.\n\n\
                  Modes:\n  \
                  --scenario     Replay a JSON scenario\n  \
                  --interactive  One station event per line\n  \
                  --serve        HTTP API server mode\n\n\
                  States:\n  \
                  IDLE     - Tool on the bench\n  \
                  ARMED    - Tool in hand, trigger up\n  \
                  WELDING  - Arc struck, beads being laid"
)]
struct Args {
    /// Scenario file to replay
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Interactive mode - read station commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Weld configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print every effect, not just the step line
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weldpass=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_serve(&args).await
    } else if args.interactive {
        run_interactive(&args)
    } else if let Some(ref path) = args.scenario {
        run_scenario(path, &args)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "weldpass failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Config from --config, or defaults
fn load_config(args: &Args) -> WeldResult<WeldConfig> {
    match args.config {
        Some(ref path) => WeldConfig::load(path),
        None => Ok(WeldConfig::default()),
    }
}

/// Replay a scenario file and print every step plus the report
fn run_scenario(path: &Path, args: &Args) -> WeldResult<()> {
    let mut scenario = Scenario::load(path)?;
    if args.config.is_some() {
        scenario.config = load_config(args)?;
    }
    let outcome = scenario.replay();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_header("Scenario Replay");
    for output in &outcome.outputs {
        print_output(output, args);
    }
    println!();
    match outcome.report {
        Some(ref report) => print_report(report),
        None => println!("{}", "No pass was graded (tool never released)".dimmed()),
    }
    Ok(())
}

/// Interactive mode: one station command per line
fn run_interactive(args: &Args) -> WeldResult<()> {
    let config = load_config(args)?;
    let seam = Seam::new(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0));
    let mut session = WeldSession::new(seam, config);
    let mut rig = WeldRig::new().with_plate(plate_under(&seam));

    print_header("Interactive Station");
    println!("Seam runs from (-0.1, 0, 0) to (0.1, 0, 0). Gas and display start off.");
    println!("Commands: gas | display | dial | heat N | knob T | aim x y z dx dy dz | hover x y z h");
    println!("          sweep x0 y0 z0 x1 y1 z1 h steps | grab | press | tick [ms] | up | release");
    println!("Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(&session, &rig, args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Events: {}", session.event_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let event = match StationEvent::parse_command(line) {
            Ok(event) => event,
            Err(e) => {
                println!("{} {}", "⚠".yellow(), e);
                continue;
            }
        };

        let outputs = apply_event(&mut session, &mut rig, &event);
        if outputs.is_empty() && !args.json {
            println!(
                "  gas={} display={} heat={}",
                on_off(rig.gas.is_on()),
                on_off(rig.display.is_on()),
                rig.dial.value()
            );
            if rig.gas_warning_visible() {
                println!("  {}", "⚠ Gas is off".yellow());
            }
        }
        for output in &outputs {
            print_output(output, args);
        }
        if matches!(event, StationEvent::Release) && !args.json {
            if let Some(report) = session.last_report() {
                print_report(report);
            }
        }
    }
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> WeldResult<()> {
    let config = load_config(args)?;
    if let Err(e) = run_server(&args.addr, config).await {
        error!(error = %e, "server error");
        return Err(io::Error::other(e.to_string()).into());
    }
    Ok(())
}

/// Print one step
fn print_output(output: &StepOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "could not encode step"),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    // Bead marks only with --verbose, they arrive every few frames
    for effect in &output.effects {
        if args.verbose || !matches!(effect, Effect::BeadPlaced { .. }) {
            println!("    {} {}", "↳".dimmed(), effect.label());
        }
    }
}

/// Print the graded pass
fn print_report(report: &PassReport) {
    let verdict = match report.verdict {
        Verdict::Excellent => report.verdict.to_string().green().bold(),
        Verdict::Good => report.verdict.to_string().yellow().bold(),
        Verdict::Bad => report.verdict.to_string().red().bold(),
    };
    println!("{} {} {}", report.verdict.emoji(), "Pass graded:".bold(), verdict);
    println!("  {}", report.to_summary_string());
}

/// Print header
fn print_header(mode: &str) {
    let title = format!("Weldpass v{} - {}", VERSION, mode);
    println!("{}", "=".repeat(title.len() + 4).bold());
    println!("  {}", title.bold());
    println!("{}", "=".repeat(title.len() + 4).bold());
    println!();
}

/// Prompt showing state and the rig readout
fn format_prompt(session: &WeldSession, rig: &WeldRig, no_color: bool) -> String {
    let state = session.state();
    let readout = rig.dial.display_text(rig.display.is_on());
    let readout = if readout.is_empty() { "---".to_string() } else { readout };
    if no_color {
        return format!("[{}] heat {} > ", state, readout);
    }
    format!(
        "{}{} [{}]{} heat {} > ",
        state.color_code(),
        state.emoji(),
        state,
        WeldState::color_reset(),
        readout
    )
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
