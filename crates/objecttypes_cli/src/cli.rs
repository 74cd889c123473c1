//! Command line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// objecttypes CLI arguments
///
/// Examples:
///   objecttypes list                               # List types in res/objecttypes.xml
///   objecttypes --dir maps/forest list --json      # Another project, as JSON
///   objecttypes add Chest --class Container       # Add a type and save
///   objecttypes set Chest hitbox 0,4,16,12         # Edit one property
///   objecttypes image Chest                        # Check Chest.png next to the XML
#[derive(Parser, Debug)]
#[clap(
    name = "objecttypes",
    version,
    about = "Edit the object types of a tile map project"
)]
pub struct CliArgs {
    /// Config file with the project directory and file name
    #[clap(long = "config", short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the XML file and images (overrides the config)
    #[clap(long = "dir", short = 'd', global = true)]
    pub directory: Option<PathBuf>,

    /// Name of the XML file (overrides the config)
    #[clap(long = "file", short = 'f', global = true)]
    pub file_name: Option<String>,

    /// More log output (-v info, -vv debug)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write an empty objecttypes file
    Init {
        /// Replace an existing file
        #[clap(long)]
        force: bool,
    },
    /// List all object types
    List {
        /// Print JSON instead of a table
        #[clap(long)]
        json: bool,
    },
    /// Show one object type with all its properties
    Show { name: String },
    /// Add an object type and save
    Add {
        name: String,
        #[clap(long, default_value = "")]
        drawbox: String,
        #[clap(long, default_value = "")]
        hitbox: String,
        #[clap(long, default_value = "")]
        class: String,
        #[clap(long)]
        color: Option<String>,
    },
    /// Remove an object type and save
    Remove { name: String },
    /// Set a property (or "name" / "color") of an object type and save
    Set {
        name: String,
        field: String,
        value: String,
    },
    /// Load `<name>.png` from the project directory and print its size
    Image { name: String },
}

impl CliArgs {
    /// Log filter for the verbosity flag, `None` to defer to RUST_LOG
    pub fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}
