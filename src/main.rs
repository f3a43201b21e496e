mod core;
mod decoder;
mod palette;
mod renderer;
mod shared;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::core::converter::Converter;
use crate::core::settings::{Overrides, Settings};
use crate::palette::PaletteKind;
use crate::shared::constants;

#[derive(Parser)]
#[command(author, version, about = "Turn images into Minecraft block-art HTML guides", long_about = None)]
struct Cli {
    /// Defaults to `convert` with configured settings
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every image in the input directory
    Convert {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print a built-in palette as JSON
    Palette {
        /// Defaults to the configured palette
        #[arg(short, long, value_enum)]
        name: Option<PaletteKind>,
    },
    /// Print the effective settings as JSON
    Settings,
}

fn main() -> Result<()> {
    crate::utils::logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::load(Path::new(constants::BLOCKART_CONFIG_FILE))?;

    match cli.command.unwrap_or(Commands::Convert { overrides: Overrides::default() }) {
        Commands::Convert { overrides } => {
            settings.apply(&overrides);
            let converter = Converter::new(&settings)?;
            let summary = converter.run(&settings.input_dir, &settings.output_dir)?;
            println!(
                "{} converted, {} failed, {} skipped, {} overwritten",
                summary.converted, summary.failed, summary.skipped, summary.overwritten
            );
            crate::utils::logger::info(&format!("run finished: {:?}", summary));
        }
        Commands::Palette { name } => {
            let palette = name.unwrap_or(settings.palette_kind()).build()?;
            println!("{}", serde_json::to_string_pretty(&palette)?);
        }
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings.resolved())?);
        }
    }

    Ok(())
}
