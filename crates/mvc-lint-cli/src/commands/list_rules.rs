//! List rules command implementation.

use mvc_lint_rules::{all_descriptors, all_rules};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<32} Title", "Code", "Name");
    println!("{}", "-".repeat(96));

    for descriptor in all_descriptors() {
        println!(
            "{:<10} {:<32} {}",
            descriptor.id, descriptor.name, descriptor.title
        );
    }

    println!("\nRule families:");
    for rule in all_rules() {
        println!("  {:<32} {}", rule.name(), rule.description());
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  mvc-lint check --rules controller-brain,god-class");
    println!("  mvc-lint check --rules RA07-001,RA15-002");
}
