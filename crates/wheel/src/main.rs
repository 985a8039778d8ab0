//! Superhero wheel CLI
//!
//! Run prediction rounds, update weights, and generate wheel input files.

use std::env;
use std::process;

use hero_core::{build_population, derive_snapshot, Result, Tuning};
use wheel::{
    parse_batch, print_changes, print_odds, run_setup, Orchestrator, StdinInput, Store,
};

fn print_usage() {
    println!("Superhero Selection Wheel");
    println!();
    println!("Usage:");
    println!("  wheel setup                          - create the initial team roster");
    println!("  wheel spin                           - generate wheel input and odds files");
    println!("  wheel round                          - interactive prediction round");
    println!("  wheel update <person> <winner> [guess]");
    println!("  wheel batch <predictions-json> <winner>");
    println!("  wheel odds                           - show current probabilities");
    println!();
    println!("Options:");
    println!("  --dry-run     preview weight changes without saving (any command)");
    println!();
    println!("Examples:");
    println!("  wheel update Johan Ali Sam           (Johan predicted Sam, Ali won)");
    println!("  wheel update Johan Ali               (Johan made no prediction, Ali won)");
    println!("  wheel batch '[{{\"person\":\"Johan\",\"guess\":\"Sam\"}}]' Ali");
    println!();
    println!("Note: people not in the batch list are treated as 'no prediction'.");
    println!("Config and output files are stored in the io/ folder.");
}

fn run_spin(tuning: &Tuning, store: &Store) -> Result<()> {
    let roster = store.load()?;
    let snapshot = derive_snapshot(tuning, &roster)?;
    let population = build_population(tuning, &roster, &mut rand::thread_rng())?;

    store.write_wheel_input(&population)?;
    store.write_odds_display(&snapshot)?;
    println!(
        "Generated {} and updated {}",
        store.wheel_input_path().display(),
        store.odds_display_path().display()
    );
    Ok(())
}

fn run_update(tuning: &Tuning, store: &Store, dry_run: bool, args: &[String]) -> Result<()> {
    let person = &args[0];
    let winner = &args[1];
    let guess = args.get(2).map(String::as_str);

    println!("Processing single person update...");
    println!();

    let orchestrator = Orchestrator::new(tuning, store, dry_run);
    let change = orchestrator.apply_single(person, winner, guess)?;
    print_changes(std::slice::from_ref(&change));

    println!("Updated probabilities:");
    print_odds(tuning, &store.load()?)
}

fn run_batch(tuning: &Tuning, store: &Store, dry_run: bool, args: &[String]) -> Result<()> {
    let predictions = parse_batch(&args[0])?;
    let winner = &args[1];

    println!("Processing weight updates for superhero: {}", winner);
    println!();

    let orchestrator = Orchestrator::new(tuning, store, dry_run);
    let changes = orchestrator.apply_batch(&predictions, winner)?;
    print_changes(&changes);

    println!("Updated probabilities after weight changes:");
    print_odds(tuning, &store.load()?)
}

fn show_odds(tuning: &Tuning, store: &Store) -> Result<()> {
    print_odds(tuning, &store.load()?)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        return;
    }

    let dry_run = args.iter().any(|arg| arg == "--dry-run");
    let args: Vec<String> = args.into_iter().filter(|arg| arg != "--dry-run").collect();

    if dry_run {
        println!("DRY RUN MODE - no changes will be saved");
        println!();
    }

    let store = Store::open_default();
    let tuning = match Tuning::load_or_default(&store.tuning_path()) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let command = args.first().map(String::as_str).unwrap_or("help");
    let result = match command {
        "setup" => run_setup(&store, &mut StdinInput),
        "spin" => run_spin(&tuning, &store),
        "round" | "--interactive" | "-i" => Orchestrator::new(&tuning, &store, dry_run)
            .run_interactive(&mut StdinInput)
            .map(|_| ()),
        "odds" | "show" | "--show" => show_odds(&tuning, &store),
        "update" if args.len() >= 3 => run_update(&tuning, &store, dry_run, &args[1..]),
        "batch" if args.len() == 3 => run_batch(&tuning, &store, dry_run, &args[1..]),
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        _ => {
            eprintln!("Invalid arguments. Run 'wheel help' to see usage.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
