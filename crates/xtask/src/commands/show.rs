//! Print a single map record

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_maps::{MapId, MapRecord};

use crate::utils;

/// Print one map record
#[derive(Parser)]
pub struct Show {
    /// Id of the map to print
    #[arg(value_name = "ID", allow_negative_numbers = true)]
    id: i32,

    /// Maps document to read (defaults to MAPS_DATABASE_PATH)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (paths, markers, floors)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Show {
    pub fn execute(self) -> Result<()> {
        let config = utils::resolve_config(self.file)?;
        let (db, _) = utils::load_database(&config)?;

        let id = MapId::from(self.id);
        let Some(map) = db.get(id) else {
            anyhow::bail!(
                "Map {} not found in {}\n\nHint: run `cargo xtask check` to list loaded maps",
                id,
                config.path.display()
            );
        };

        match self.format {
            OutputFormat::Summary => print_summary(map),
            OutputFormat::Json => print_json(map)?,
            OutputFormat::Debug => println!("{:#?}", map),
        }

        Ok(())
    }
}

fn print_summary(map: &MapRecord) {
    println!("{} {}", style("=== Map").bold().green(), style(map.id).bold().green());
    println!();
    println!("  {} {}", style("Path:").bold().cyan(), map.map_path);
    println!("  {} {}", style("Wall:").bold().cyan(), map.wall_property);
    println!(
        "  {} {}",
        style("Player Spawn:").bold().cyan(),
        map.spawn_player_property
    );
    println!(
        "  {} {}",
        style("Enemy Spawn:").bold().cyan(),
        map.spawn_enemy_property
    );
    println!();

    println!("{}", style("Floors:").bold().yellow());
    if map.floors.is_empty() {
        println!("  (none)");
    }
    for floor in &map.floors {
        println!("  Level {}: {}", floor.level, floor.layers.join(", "));
    }
}

fn print_json(map: &MapRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(map).context("Failed to serialize map to JSON")?;
    println!("{}", json);
    Ok(())
}
