//! Yamala CLI
//!
//! Command-line tool that stores the list attributes of YAML files in an
//! Excel workbook, one sheet per attribute.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use yamala_core::{parse_dataset_str, Converter, InputSpec, Writer, XlsxWriter};

const DEFAULT_NAME: &str = "yamala";

#[derive(Parser, Debug)]
#[command(name = "yamala")]
#[command(about = "Store differences in YAML list attributes in an Excel file", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Read one or more YAML files
    ReadFiles {
        /// YAML files to read
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Folder to write the workbook in (defaults to the current directory)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Workbook file name, without extension
        #[arg(short, long, default_value = DEFAULT_NAME)]
        name: String,
    },

    /// Read every YAML file inside one or more folders
    ReadFolders {
        /// Folders to search
        #[arg(required = true)]
        folders: Vec<PathBuf>,

        /// Folder to write the workbook in (defaults to the current directory)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Also search subfolders
        #[arg(short, long)]
        recursive: bool,

        /// Workbook file name, without extension
        #[arg(short, long, default_value = DEFAULT_NAME)]
        name: String,
    },

    /// Write a dataset stored as JSON
    WriteDataset {
        /// JSON file holding the dataset
        input: PathBuf,

        /// Folder to write the workbook in (defaults to the current directory)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Workbook file name, without extension
        #[arg(short, long, default_value = DEFAULT_NAME)]
        name: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> yamala_core::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let written = match cli.command {
        Commands::ReadFiles {
            files,
            destination,
            name,
        } => cmd_convert(&InputSpec::Files(files), destination, &name)?,
        Commands::ReadFolders {
            folders,
            destination,
            recursive,
            name,
        } => cmd_convert(
            &InputSpec::Folders {
                paths: folders,
                recursive,
            },
            destination,
            &name,
        )?,
        Commands::WriteDataset {
            input,
            destination,
            name,
        } => cmd_write_dataset(&input, destination, &name)?,
    };

    println!("Wrote {}", written.display());
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn resolve_destination(destination: Option<PathBuf>) -> yamala_core::Result<PathBuf> {
    match destination {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

fn cmd_convert(
    input: &InputSpec,
    destination: Option<PathBuf>,
    name: &str,
) -> yamala_core::Result<PathBuf> {
    let mut converter = Converter::new(input, resolve_destination(destination)?, name)?;
    let path = converter.execute()?;

    println!(
        "Converted {} file(s) into {} sheet(s)",
        converter.processed_files(),
        converter.dataset().len()
    );
    Ok(path)
}

fn cmd_write_dataset(
    input: &Path,
    destination: Option<PathBuf>,
    name: &str,
) -> yamala_core::Result<PathBuf> {
    let content = fs::read_to_string(input).map_err(|e| yamala_core::Error::FileRead {
        path: input.to_path_buf(),
        source: e,
    })?;
    let dataset = parse_dataset_str(&content)?;

    let mut writer = XlsxWriter::new(resolve_destination(destination)?);
    writer.process(&dataset)?;
    writer.save(name)
}
