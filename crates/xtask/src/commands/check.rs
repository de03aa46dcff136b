//! Check a maps document
//!
//! Loads the document the same way the game does and lists every entry and
//! floor that would be skipped.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use crate::utils;

/// Load a maps document and report skipped entries
#[derive(Parser, Debug)]
pub struct Check {
    /// Maps document to check (defaults to MAPS_DATABASE_PATH)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Fail if any entry or floor was skipped
    #[arg(long)]
    strict: bool,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let config = utils::resolve_config(self.file)?;
        let (db, report) = utils::load_database(&config)?;

        println!(
            "{} {}",
            style("Maps File:").bold().cyan(),
            config.path.display()
        );
        println!(
            "{} {}",
            style("Duplicate Policy:").bold().cyan(),
            config.duplicate_policy
        );
        println!();

        println!("{}", style("=== Load Summary ===").bold().green());
        println!("  Maps loaded: {}", db.len());
        println!("  Duplicates: {}", report.duplicates.len());
        println!("  Skipped entries: {}", report.skipped.len());
        println!("  Skipped floors: {}", report.skipped_floors.len());
        println!();

        if !db.is_empty() {
            println!("{}", style("Maps:").bold().yellow());
            for map in db.iter() {
                println!(
                    "  {} {} ({} floors)",
                    style(map.id).bold(),
                    map.map_path,
                    map.floors.len()
                );
            }
            println!();
        }

        if !report.duplicates.is_empty() {
            println!("{}", style("Duplicate ids:").bold().yellow());
            let outcome = utils::duplicate_outcome(config.duplicate_policy);
            for id in &report.duplicates {
                println!("  {} {}", style(id).bold(), outcome);
            }
            println!();
        }

        if !report.skipped.is_empty() {
            println!("{}", style("Skipped entries:").bold().red());
            for entry in &report.skipped {
                println!("  {} {}", style(&entry.key).bold(), entry.error);
            }
            println!();
        }

        if !report.skipped_floors.is_empty() {
            println!("{}", style("Skipped floors:").bold().red());
            for floor in &report.skipped_floors {
                println!(
                    "  {} floors[{}] {}",
                    style(floor.map).bold(),
                    floor.index,
                    floor.error
                );
            }
            println!();
        }

        if report.is_clean() {
            println!("{} Document is clean", style("✓").green().bold());
        } else if self.strict {
            anyhow::bail!(
                "{} skipped entries, {} skipped floors, {} duplicate ids",
                report.skipped.len(),
                report.skipped_floors.len(),
                report.duplicates.len()
            );
        }

        Ok(())
    }
}
