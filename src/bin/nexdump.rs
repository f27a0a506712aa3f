// src/bin/nexdump.rs
use anyhow::{bail, Context, Result};
use clap::builder::BoolishValueParser;
use clap::Parser;
use nex_rs::{NexReader, ReaderOptions, VariableType};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
mod common;

/// Print the header and variable index of a NEX file
#[derive(Parser, Debug)]
#[command(name = "nexdump", version, about)]
struct Cli {
    /// NEX file to inspect
    file: PathBuf,

    /// Only list variables of this type (neuron, event, interval, waveform,
    /// population, continuous, marker)
    #[arg(short = 't', long = "type")]
    var_type: Option<String>,

    /// Print the interval table of every interval variable with this name
    #[arg(short, long)]
    intervals: Option<String>,

    /// Match interval names exactly instead of ignoring case
    #[arg(long)]
    case_sensitive: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Refuse beta format versions and intervals that end before they start.
    /// NEX_STRICT accepts 1/0, true/false, yes/no and on/off.
    #[arg(long, env = "NEX_STRICT", value_parser = BoolishValueParser::new())]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Dump<'a> {
    header: &'a nex_rs::FileHeader,
    variables: Vec<nex_rs::VariableHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intervals: Option<Vec<nex_rs::IntervalRecord>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let type_filter = match cli.var_type.as_deref() {
        Some(name) => match VariableType::from_name(name) {
            Some(t) => Some(t),
            None => bail!("unknown variable type '{}'", name),
        },
        None => None,
    };

    let options = ReaderOptions {
        reject_beta_versions: cli.strict,
        check_interval_order: cli.strict,
        ..ReaderOptions::default()
    };
    let mut reader = NexReader::open_with_options(&cli.file, options)
        .with_context(|| format!("failed to open {}", cli.file.display()))?;
    debug!(file = %cli.file.display(), "opened");

    let variables = reader.list_variables(type_filter);
    let intervals = match cli.intervals.as_deref() {
        Some(name) => Some(
            reader
                .read_intervals(name, cli.case_sensitive, None)
                .with_context(|| format!("failed to read interval '{}'", name))?,
        ),
        None => None,
    };

    if cli.json {
        let dump = Dump {
            header: reader.header(),
            variables,
            intervals,
        };
        serde_json::to_writer_pretty(&mut *out, &dump)?;
        writeln!(out)?;
        return Ok(());
    }

    let header = reader.header();
    writeln!(out, "File:       {}", cli.file.display())?;
    writeln!(out, "Version:    {}", header.version)?;
    writeln!(out, "Comment:    {}", header.comment)?;
    writeln!(out, "Frequency:  {} Hz", header.frequency)?;
    writeln!(out, "Duration:   {:.6} s", header.duration())?;
    writeln!(out, "Variables:  {}", header.num_vars)?;
    writeln!(out)?;

    writeln!(out, "{:>4}  {:<18} {:<32} {:>10}", "#", "type", "name", "count")?;
    for var in &variables {
        writeln!(
            out,
            "{:>4}  {:<18} {:<32} {:>10}",
            var.index,
            var.var_type.as_str(),
            var.name,
            var.count
        )?;
    }

    if let Some(records) = intervals {
        for record in records {
            writeln!(out)?;
            writeln!(out, "Interval '{}' [{} intervals]", record.name, record.len())?;
            writeln!(out, "{:>14} {:>14} {:>14}", "start", "end", "duration")?;
            for interval in &record.intervals {
                writeln!(
                    out,
                    "{:>14.6} {:>14.6} {:>14.6}",
                    interval.start,
                    interval.end,
                    interval.duration()
                )?;
            }
        }
    }

    Ok(())
}
