// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{crate_version, Parser, Subcommand};
use saberfont::config;
use saberfont::sound::{self, SoundCategory, SoundFont, DEFAULT_FONT_DIR_NAME_BASE};
use saberfont::storage::FsStorage;
use saberfont::trigger::TriggerCommand;
use tracing::warn;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A sound font manager for motion-reactive props."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discovers the sounds in a font and prints how many of each were found.
    Inventory {
        /// The directory the sound fonts are stored in.
        root: String,
        /// The font directory name base.
        #[arg(short, long, default_value = DEFAULT_FONT_DIR_NAME_BASE)]
        base: String,
        /// The zero-based font index.
        #[arg(short, long, default_value_t = 0)]
        font: u8,
    },
    /// Prints the asset path each sound category resolves to.
    Paths {
        /// The font directory name base.
        #[arg(short, long, default_value = DEFAULT_FONT_DIR_NAME_BASE)]
        base: String,
        /// The zero-based font index.
        #[arg(short, long, default_value_t = 0)]
        font: u8,
        /// The zero-based sound index.
        #[arg(short, long, default_value_t = 0)]
        index: u16,
    },
    /// Drives a sound manager with trigger commands read from stdin, one per line.
    /// Commands are: play <category> [index], random <category>, font <index>,
    /// volume <category> <volume>, pitch <category> <pitch>, master <percent>, poll.
    Simulate {
        /// The path to the sound config.
        config_path: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inventory { root, base, font } => {
            let storage = FsStorage::new(&root);
            let font = SoundFont::discover(&storage, &base, font);

            if font.total() == 0 {
                println!("No sounds found in {}/{}.", root, font.base_dir());
                return Ok(());
            }

            print!("{}", font);
            println!("Total: {}", font.total());
        }
        Commands::Paths { base, font, index } => {
            let base_dir = sound::font_base_dir(&base, font);
            println!("Paths for {} (index {}):", base_dir, index);
            for category in SoundCategory::ALL {
                match sound::asset_path(&base_dir, category, index) {
                    Ok(path) => println!("- {}: {}", category, path),
                    Err(e) => println!("- {}: {}", category, e),
                }
            }
        }
        Commands::Simulate { config_path } => {
            let mut manager = config::init_sound_manager(&PathBuf::from(&config_path))?;

            for line in io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() || line.trim_start().starts_with('#') {
                    continue;
                }

                let command = match line.parse::<TriggerCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        warn!(err = e.as_ref(), "Ignoring trigger");
                        println!("! {}", e);
                        continue;
                    }
                };

                match command.execute(&mut manager) {
                    Ok(outcome) => println!("{}: {}", command, outcome),
                    Err(e) => println!("{}: failed: {}", command, e),
                }
            }
        }
    }

    Ok(())
}
