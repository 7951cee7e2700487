use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use exif_edit::config::Config;
use exif_edit::datetime::DateTimeValue;
use exif_edit::editor::PhotoEditor;

#[derive(Parser, Debug)]
#[command(
    name = "exif-edit",
    version,
    about = "High-level EXIF/IPTC metadata editor — rotate, mirror, keywords, and timestamps through exiftool"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Keep exiftool's backup copy of the original file
    #[arg(long, global = true)]
    backup: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rotate the photo in 90° increments (via the orientation tag)
    Rotate {
        /// Rotation direction
        #[arg(value_enum)]
        direction: Direction,

        /// Number of 90° increments
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// Photo to edit
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
    },

    /// Mirror the photo across an axis
    Mirror {
        /// Mirror axis
        #[arg(value_enum)]
        axis: Axis,

        /// Photo to edit
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
    },

    /// Manage the photo's keyword list
    #[command(subcommand)]
    Keywords(KeywordsCommand),

    /// Set the photo's timestamp fields
    #[command(subcommand)]
    Datetime(DatetimeCommand),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Subcommand, Debug)]
enum KeywordsCommand {
    /// Print the photo's keywords, one per line
    Get {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
    },
    /// Add keywords (duplicates are not filtered)
    Add {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
        #[arg(value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,
    },
    /// Replace all keywords
    Set {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
        #[arg(value_name = "KEYWORD", required = true)]
        keywords: Vec<String>,
    },
    /// Remove all keywords
    Clear {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum DatetimeCommand {
    /// Set when the picture was taken (DateTimeOriginal)
    SetOriginal {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
        /// YYYY:MM:DD or "YYYY:MM:DD HH:MM:SS"; defaults to now
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },
    /// Set the file modification time, like touch (FileModifyDate)
    SetModified {
        #[arg(value_name = "PHOTO")]
        photo: PathBuf,
        /// YYYY:MM:DD or "YYYY:MM:DD HH:MM:SS"; defaults to now
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command specified. Use --help for usage.");
    };

    // Load config; the --backup flag overrides the configured policy
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.backup {
        config.output.keep_backup = true;
    }

    let editor = |photo: &PathBuf| PhotoEditor::with_config(&config, photo);

    match command {
        Command::Rotate { direction, count, photo } => {
            let editor = editor(&photo)?;
            match direction {
                Direction::Cw => editor.rotate_cw(count)?,
                Direction::Ccw => editor.rotate_ccw(count)?,
            }
            log::info!(
                "Rotated {} by {}° {}",
                photo.display(),
                90 * count,
                match direction {
                    Direction::Cw => "clockwise",
                    Direction::Ccw => "counter-clockwise",
                },
            );
        }

        Command::Mirror { axis, photo } => {
            let editor = editor(&photo)?;
            match axis {
                Axis::Horizontal => editor.mirror_horizontally()?,
                Axis::Vertical => editor.mirror_vertically()?,
            }
            log::info!(
                "Mirrored {} {}",
                photo.display(),
                match axis {
                    Axis::Horizontal => "horizontally",
                    Axis::Vertical => "vertically",
                },
            );
        }

        Command::Keywords(cmd) => match cmd {
            KeywordsCommand::Get { photo } => {
                for keyword in editor(&photo)?.keywords()? {
                    println!("{keyword}");
                }
            }
            KeywordsCommand::Add { photo, keywords } => {
                editor(&photo)?.add_keywords(&keywords)?;
                log::info!("Added {} keyword(s) to {}", keywords.len(), photo.display());
            }
            KeywordsCommand::Set { photo, keywords } => {
                editor(&photo)?.set_keywords(&keywords)?;
                log::info!("Set {} keyword(s) on {}", keywords.len(), photo.display());
            }
            KeywordsCommand::Clear { photo } => {
                editor(&photo)?.clear_keywords()?;
                log::info!("Cleared keywords on {}", photo.display());
            }
        },

        Command::Datetime(cmd) => match cmd {
            DatetimeCommand::SetOriginal { photo, value } => {
                editor(&photo)?.set_original_date_time(value.map(DateTimeValue::from))?;
                log::info!("Set DateTimeOriginal on {}", photo.display());
            }
            DatetimeCommand::SetModified { photo, value } => {
                editor(&photo)?.set_modification_date_time(value.map(DateTimeValue::from))?;
                log::info!("Set FileModifyDate on {}", photo.display());
            }
        },
    }

    Ok(())
}
