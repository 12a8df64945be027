//! EvoLaunch CLI
//!
//! Usage:
//!   evolaunch --mss 82 --phase growth          # Single phase evaluation
//!   evolaunch --interactive                    # Interactive MSS feed
//!   evolaunch --vault vault.json --mss 65      # Evaluate vault unlocks
//!   evolaunch --serve                          # HTTP API server
//!   evolaunch --mss 82 --json                  # JSON output

use clap::Parser;
use std::io::{self, BufRead, Write};

use evolaunch::core::{liquidity, phase, run_server, PhaseTracker};
use evolaunch::types::{Phase, PhaseDecision, RiskSignals, VaultDefinition};
use evolaunch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "evolaunch",
    version = VERSION,
    about = "EvoLaunch decision core - evaluate phase evolution and liquidity unlocks",
    long_about = "Decision core for the EvoLaunch token-launch protocol.\n\n\
                  Evolves a token's lifecycle phase from the Market Stability\n\
                  Score (MSS) and gates liquidity tranche unlocks.\n\n\
                  Modes:\n  \
                  --interactive  Feed MSS values line by line\n  \
                  --vault FILE   Evaluate tranche unlocks for a vault\n  \
                  --serve        HTTP API server mode\n\n\
                  Phases:\n  \
                  PROTECTIVE  - Maximum protections, tight limits\n  \
                  GROWTH      - Normal conditions\n  \
                  EXPANSION   - Relaxed limits\n  \
                  GOVERNANCE  - Community controlled"
)]
struct Args {
    /// MSS to evaluate (single mode, 0-100)
    #[arg(short, long)]
    mss: Option<u8>,

    /// Current phase (protective/growth/expansion/governance or 0-3)
    #[arg(short, long, default_value = "protective")]
    phase: String,

    /// Volatility risk signal (0.0-1.0)
    #[arg(long, default_value_t = evolaunch::DEFAULT_VOLATILITY_RISK)]
    volatility_risk: f64,

    /// Liquidity stress signal (0.0-1.0)
    #[arg(long, default_value_t = evolaunch::DEFAULT_LIQUIDITY_STRESS)]
    liquidity_stress: f64,

    /// Assert the governance freeze flag
    #[arg(long)]
    frozen: bool,

    /// Interactive mode - read MSS values from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Evaluate tranche unlocks for a vault definition (JSON file)
    #[arg(long)]
    vault: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the band target and risk signals behind each decision
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let current_phase = match Phase::from_label(&args.phase) {
        Some(p) => p,
        None => {
            eprintln!("Unknown phase '{}' (use protective/growth/expansion/governance or 0-3)", args.phase);
            std::process::exit(2);
        }
    };

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref vault_path) = args.vault {
        run_vault(vault_path, current_phase, &args);
    } else if args.interactive {
        run_interactive(current_phase, &args);
    } else if let Some(mss) = args.mss {
        run_single(mss, current_phase, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(current_phase, &args);
    }
}

/// Run single phase evaluation
fn run_single(mss: u8, current_phase: Phase, args: &Args) {
    let risk = RiskSignals {
        volatility_risk: args.volatility_risk,
        liquidity_stress: args.liquidity_stress,
    };
    let decision = phase::evaluate(current_phase, mss.min(100), &risk, args.frozen);

    print_decision(&decision, args);
}

/// Run interactive mode - MSS values line by line, tracker evolving
fn run_interactive(start_phase: Phase, args: &Args) {
    let mut tracker = PhaseTracker::with_phase(start_phase);
    let risk = RiskSignals {
        volatility_risk: args.volatility_risk,
        liquidity_stress: args.liquidity_stress,
    };
    tracker.set_governance_frozen(args.frozen);

    print_header(args.no_color);
    println!("Type an MSS value (0-100) and press Enter to evaluate.");
    println!("Commands: 'freeze' / 'unfreeze' toggle governance, 'quit' exits.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&tracker, args.no_color);
        print!("{}", prompt);
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Cycles: {}", tracker.update_count());
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("freeze") {
            tracker.set_governance_frozen(true);
            println!("Governance freeze ASSERTED");
            continue;
        }
        if line.eq_ignore_ascii_case("unfreeze") {
            tracker.set_governance_frozen(false);
            println!("Governance freeze lifted");
            continue;
        }

        let mss: u8 = match line.parse::<u16>() {
            Ok(v) if v <= 100 => v as u8,
            _ => {
                println!("Enter an MSS between 0 and 100");
                continue;
            }
        };

        let decision = tracker.update(mss, &risk);
        print_decision(&decision, args);
    }
}

/// Evaluate every tranche of a vault definition
fn run_vault(path: &str, current_phase: Phase, args: &Args) {
    let mss = match args.mss {
        Some(v) => v.min(100),
        None => {
            eprintln!("--vault requires --mss");
            std::process::exit(2);
        }
    };

    let vault = match VaultDefinition::load(path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Failed to load vault '{}': {}", path, e);
            std::process::exit(1);
        }
    };

    let decisions = liquidity::evaluate_vault(mss, current_phase, &vault.tranches);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decisions).unwrap());
        return;
    }

    println!("Vault: {} tranches at MSS={} phase={}", vault.tranches.len(), mss, current_phase);
    for decision in &decisions {
        let marker = if decision.should_freeze {
            "FREEZE"
        } else if decision.should_unlock {
            "RELEASE"
        } else {
            "HOLD"
        };
        println!("  [{:>7}] {}", marker, decision.to_parseable_string());
    }
}

/// Print a phase decision in the selected output mode
fn print_decision(decision: &PhaseDecision, args: &Args) {
    if args.json {
        println!("{}", serde_json::to_string(decision).unwrap());
    } else if args.verbose {
        print_verbose(decision, args);
    } else if args.no_color {
        println!("{}", decision.to_parseable_string());
    } else {
        println!("{}", decision.to_terminal_string());
        if decision.should_transition && decision.next_phase == Phase::Protective {
            println!("\x1b[31m  ⚠ Downgraded to PROTECTIVE\x1b[0m");
        } else if decision.should_transition && decision.next_phase == Phase::Governance {
            println!("\x1b[36m  ✓ GOVERNANCE reached - community control\x1b[0m");
        }
    }
}

/// Print verbose decision breakdown
fn print_verbose(decision: &PhaseDecision, args: &Args) {
    let color = if args.no_color { "" } else { decision.next_phase.color_code() };
    let reset = if args.no_color { "" } else { Phase::color_reset() };

    println!("{}┌─────────────────────────────────────────┐{}", color, reset);
    println!("{}│ MSS = {} | band target = {}{}", color, decision.mss, Phase::from_mss(decision.mss), reset);
    println!("{}│ volatility_risk = {:.2} | liquidity_stress = {:.2}{}",
        color, args.volatility_risk, args.liquidity_stress, reset);
    println!("{}├─────────────────────────────────────────┤{}", color, reset);
    println!("{}│ Phase: {} -> {} | transition: {}{}",
        color, decision.current_phase, decision.next_phase, decision.should_transition, reset);
    println!("{}│ Reason: {}{}", color, decision.reason, reset);
    println!("{}└─────────────────────────────────────────┘{}", color, reset);
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  EvoLaunch v{} - Interactive", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  EvoLaunch v{} - Interactive\x1b[0m", VERSION);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}

/// Format interactive prompt
fn format_prompt(tracker: &PhaseTracker, no_color: bool) -> String {
    let phase = tracker.phase();
    let freeze = if tracker.governance_frozen() { " 🔒" } else { "" };
    if no_color {
        format!("[{}] > ", phase)
    } else {
        format!(
            "{}{} [{}]{}{} > ",
            phase.color_code(),
            phase.emoji(),
            phase,
            Phase::color_reset(),
            freeze
        )
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("========================================");
    println!("  EvoLaunch decision API v{}", VERSION);
    println!("========================================");
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
