//! First-run roster creation.

use hero_core::{Result, Roster};

use crate::input::InputSource;
use crate::store::Store;

/// Starting weight offered during setup.
pub const DEFAULT_INITIAL_WEIGHT: f64 = 5.0;

/// Interactively create the initial roster with a uniform weight.
///
/// Refuses to touch an existing store; re-running setup is always safe.
pub fn run_setup(store: &Store, input: &mut dyn InputSource) -> Result<()> {
    if store.exists() {
        println!(
            "Config file already exists at {}",
            store.config_path().display()
        );
        println!("Run 'wheel spin' to generate your first wheel!");
        return Ok(());
    }

    println!("=== Superhero Selection Setup ===");
    println!("Let's create your initial team configuration.");
    println!();
    println!("Enter your team members (press Enter with an empty name when done):");

    let mut names: Vec<String> = Vec::new();
    loop {
        let name = input.ask(&format!("Team member {}: ", names.len() + 1))?;
        if name.is_empty() {
            break;
        }
        if names
            .iter()
            .any(|existing| existing.to_lowercase() == name.to_lowercase())
        {
            println!("That name is already added. Please enter a different name.");
            continue;
        }
        names.push(name);
    }

    if names.is_empty() {
        println!("No team members entered. Setup cancelled.");
        return Ok(());
    }

    println!();
    println!("Found {} team members: {}", names.len(), names.join(", "));

    let weight = loop {
        let answer = input.ask(&format!(
            "Enter initial weight for all members (default: {}): ",
            DEFAULT_INITIAL_WEIGHT
        ))?;
        if answer.is_empty() {
            break DEFAULT_INITIAL_WEIGHT;
        }
        match answer.parse::<f64>() {
            Ok(weight) if weight > 0.0 && weight.is_finite() => break weight,
            _ => println!("Please enter a positive number."),
        }
    };

    let roster = Roster::uniform(&names, weight)?;
    store.commit(&roster)?;

    println!();
    println!("Created {}", store.config_path().display());
    println!();
    println!("Initial configuration:");
    for member in roster.members() {
        println!("  {}: {}", member.name, member.weight);
    }
    println!();
    println!("Next steps:");
    println!("  1. Run 'wheel spin' to generate your first wheel");
    println!("  2. Paste {} into the wheel tool", store.wheel_input_path().display());
    println!("  3. Run 'wheel round' after each selection");
    Ok(())
}
