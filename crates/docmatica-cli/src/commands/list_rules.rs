//! List rules command implementation.

use docmatica_rules::default_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in default_rules() {
        println!(
            "{:<8} {:<22} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nUse --rules to run a subset, e.g.:");
    println!("  docmatica --rules file-type,back-to-top-anchor");
    println!("  docmatica --rules DM001,DM003");
}
