//! Quarry CLI
//!
//! Command-line tool for extracting Old World game data to structured JSON.

use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use quarry_core::{
    categories, extract_category, infos_dir, load_document, CategoryEntries,
    TextResolver,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Extract Old World game data to structured JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract categories to JSON files
    Extract {
        /// Path to Old World installation directory
        #[arg(short, long)]
        game_path: PathBuf,

        /// Language code for localization
        #[arg(short, long, default_value = "en-US")]
        language: String,

        /// Directory to write JSON output files
        #[arg(short, long, default_value = "./output")]
        output_dir: PathBuf,

        /// Game version string to embed in output metadata
        #[arg(long = "game-version")]
        game_version: Option<String>,

        /// Specific categories to extract (default: all)
        #[arg(short, long, num_args = 0..)]
        categories: Vec<String>,
    },

    /// Decode and display a single Infos XML file
    Parse {
        /// Path to XML file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of entries to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Resolve text keys to display strings
    Resolve {
        /// Path to Old World installation directory
        #[arg(short, long)]
        game_path: PathBuf,

        /// Language code for localization
        #[arg(short, long, default_value = "en-US")]
        language: String,

        /// Text keys to resolve
        #[arg(required = true)]
        keys: Vec<String>,

        /// Also print every tilde-separated form
        #[arg(long)]
        forms: bool,
    },

    /// List all known categories
    ListCategories,
}

/// Run metadata written alongside each category's entries
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Meta<'a> {
    category: &'a str,
    language: &'a str,
    extracted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    game_version: Option<&'a str>,
}

#[derive(Serialize)]
struct CategoryOutput<'a> {
    meta: Meta<'a>,
    entries: &'a CategoryEntries,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> quarry_core::Result<()> {
    match cli.command {
        Commands::Extract {
            game_path,
            language,
            output_dir,
            game_version,
            categories,
        } => cmd_extract(
            &game_path,
            &language,
            &output_dir,
            game_version.as_deref(),
            &categories,
        ),
        Commands::Parse { file, limit } => cmd_parse(&file, limit),
        Commands::Resolve {
            game_path,
            language,
            keys,
            forms,
        } => cmd_resolve(&game_path, &language, &keys, forms),
        Commands::ListCategories => cmd_list_categories(),
    }
}

fn cmd_extract(
    game_path: &Path,
    language: &str,
    output_dir: &Path,
    game_version: Option<&str>,
    requested: &[String],
) -> quarry_core::Result<()> {
    let infos = infos_dir(game_path)?;
    fs::create_dir_all(output_dir)?;

    println!("Loading text dictionary for '{}'...", language);
    let resolver = TextResolver::build(&infos, language)?;
    println!("  {} text entries loaded", resolver.len());

    let selected = categories::select(requested);

    for category in selected {
        println!("Processing '{}'...", category.display_name);
        let entries = extract_category(category, &infos, &resolver)?;

        let output = CategoryOutput {
            meta: Meta {
                category: category.name,
                language,
                extracted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
                game_version,
            },
            entries: &entries,
        };

        let out_path = output_dir.join(format!("{}.json", category.name));
        write_json(&out_path, &output)?;

        println!("  {} entries -> {}", entries.len(), out_path.display());
    }

    Ok(())
}

fn cmd_parse(file: &Path, limit: usize) -> quarry_core::Result<()> {
    let records = load_document(file)?;

    println!("File: {}", file.display());
    println!("Entries: {}", records.len());
    println!();

    for record in records.iter().take(limit) {
        for (tag, value) in record.iter() {
            println!("  {}: {}", tag, value);
        }
        println!();
    }

    if records.len() > limit {
        println!("... ({} more entries)", records.len() - limit);
    }

    Ok(())
}

fn cmd_resolve(
    game_path: &Path,
    language: &str,
    keys: &[String],
    show_forms: bool,
) -> quarry_core::Result<()> {
    let infos = infos_dir(game_path)?;
    let resolver = TextResolver::build(&infos, language)?;

    for key in keys {
        match resolver.resolve(key) {
            Some(text) => println!("{}: {}", key, text),
            None => println!("{}: <not found>", key),
        }

        if show_forms {
            if let Some(forms) = resolver.lookup(key) {
                for (i, form) in forms.iter().enumerate() {
                    println!("  [{}] {}", i, form);
                }
            }
        }
    }

    Ok(())
}

fn cmd_list_categories() -> quarry_core::Result<()> {
    println!("Categories ({}):", categories::all().len());
    println!();

    for category in categories::all() {
        println!("  {} ({})", category.name, category.display_name);
        println!("    source: {}", category.xml_file);
        for expansion in category.expansion_files {
            println!("    expansion: {}", expansion);
        }
    }

    Ok(())
}

/// Write a value as pretty-printed JSON
fn write_json<T: Serialize>(path: &Path, value: &T) -> quarry_core::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
