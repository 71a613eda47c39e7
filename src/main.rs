//! Tabula CLI - inspect string tables and shader lookup tables in asset files.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use tabula::prelude::*;
use tabula::props::{window, LutColor, LutFloat, LutValue, LutVector2, LutVector3};

/// Tabula - asset property and string table inspector
#[derive(Parser)]
#[command(name = "tabula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log decoding decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entries of a string table
    StrtableDump {
        /// File containing the table
        #[arg(short, long, env = "TABULA_INPUT")]
        input: PathBuf,

        /// Byte offset of the table
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Byte offset of the structure after the table (default: end of file)
        #[arg(short, long)]
        end: Option<usize>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the layout of a string table and verify it re-encodes identically
    StrtableCheck {
        /// File containing the table
        #[arg(short, long, env = "TABULA_INPUT")]
        input: PathBuf,

        /// Byte offset of the table
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Byte offset of the structure after the table (default: end of file)
        #[arg(short, long)]
        end: Option<usize>,
    },

    /// Print a run of little-endian floats as shader LUT tuples
    LutDump {
        /// File containing the floats
        #[arg(short, long, env = "TABULA_INPUT")]
        input: PathBuf,

        /// Byte offset of the first float
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Number of floats to read
        #[arg(short, long)]
        count: usize,

        /// Floats per tuple (1-4)
        #[arg(short, long, default_value_t = 4)]
        width: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::StrtableDump {
            input,
            offset,
            end,
            json,
        } => {
            cmd_strtable_dump(&input, offset, end, json)?;
        }
        Commands::StrtableCheck { input, offset, end } => {
            cmd_strtable_check(&input, offset, end)?;
        }
        Commands::LutDump {
            input,
            offset,
            count,
            width,
        } => {
            cmd_lut_dump(&input, offset, count, width)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: &Path, offset: usize) -> Result<Vec<u8>> {
    let data = fs::read(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    if offset > data.len() {
        bail!("Offset {} is past the end of the file ({} bytes)", offset, data.len());
    }
    Ok(data)
}

fn load_table(data: &[u8], offset: usize, end: Option<usize>) -> Result<(LocalizationTable, usize)> {
    let end = end.unwrap_or(data.len());
    if end < offset || end > data.len() {
        bail!("End offset {} is outside {}..={}", end, offset, data.len());
    }

    let start = Instant::now();
    let mut reader = BinaryReader::new_at(data, offset);
    let table = LocalizationTable::read(&mut reader, end).context("Failed to parse string table")?;
    debug!(elapsed = ?start.elapsed(), consumed = reader.position() - offset, "string table loaded");

    Ok((table, reader.position()))
}

fn cmd_strtable_dump(input: &Path, offset: usize, end: Option<usize>, json: bool) -> Result<()> {
    let data = read_input(input, offset)?;
    let (table, _) = load_table(&data, offset, end)?;

    if json {
        return print_json(&table);
    }

    let layout = if table.is_tagged() { "tagged" } else { "plain" };
    println!("Layout: {}", layout);
    println!(
        "Namespace: {}",
        table.namespace().map_or("<null>", FString::as_str)
    );
    for entry in &table {
        println!("{} = {}", entry.key(), entry.value_str());
    }
    println!("\nTotal: {} entries", table.len());

    Ok(())
}

#[cfg(feature = "json")]
fn print_json(table: &LocalizationTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table).context("Failed to serialize table")?;
    println!("{json}");
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print_json(_table: &LocalizationTable) -> Result<()> {
    bail!("This build does not include JSON output (enable the `json` feature)")
}

fn cmd_strtable_check(input: &Path, offset: usize, end: Option<usize>) -> Result<()> {
    let data = read_input(input, offset)?;
    let (table, stop) = load_table(&data, offset, end)?;

    let layout = if table.is_tagged() { "tagged" } else { "plain" };
    println!("Layout: {}", layout);
    println!("Entries: {}", table.len());
    println!("Bytes: {} ({}..{})", stop - offset, offset, stop);
    if let Some(tags) = table.per_entry_tags() {
        let tagged = tags.iter().filter(|t| !t.is_empty()).count();
        println!("Records with tags: {}/{}", tagged, tags.len());
    }

    let mut writer = BinaryWriter::new(Vec::new());
    table.write(&mut writer).context("Failed to re-encode table")?;
    let encoded = writer.into_inner();

    if encoded.as_slice() == &data[offset..stop] {
        println!("Re-encode: identical");
    } else {
        // Duplicate keys collapse on read, so the re-encoded table can be shorter.
        println!(
            "Re-encode: differs ({} bytes vs {} bytes)",
            encoded.len(),
            stop - offset
        );
    }

    Ok(())
}

fn cmd_lut_dump(input: &Path, offset: usize, count: usize, width: usize) -> Result<()> {
    let data = read_input(input, offset)?;
    let mut reader = BinaryReader::new_at(&data, offset);

    match window::check_width(width)? {
        1 => print_lut::<LutFloat>(&mut reader, count),
        2 => print_lut::<LutVector2>(&mut reader, count),
        3 => print_lut::<LutVector3>(&mut reader, count),
        _ => print_lut::<LutColor>(&mut reader, count),
    }
}

fn print_lut<T: LutValue + Display>(reader: &mut BinaryReader<'_>, count: usize) -> Result<()> {
    let lut = ShaderLut::<T>::read(reader, count).context("Failed to read LUT floats")?;

    for (i, value) in lut.iter().enumerate() {
        println!("[{:4}] {}", i, value);
    }

    let orphaned = window::orphaned(count, T::WIDTH);
    println!("\nTotal: {} tuples of width {}", lut.len(), T::WIDTH);
    if orphaned > 0 {
        println!("Dropped {} trailing floats", orphaned);
    }

    Ok(())
}
