use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cv_lens::{
    build_section_view, is_archived, resolve_socials, CvDocument, DateStyle, SectionView,
    ViewConfig,
};

#[derive(Parser)]
#[command(name = "cvlens")]
#[command(about = "Turn raw CV documents into render-ready view models")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the document's sections with entry counts
    Sections {
        /// CV document (.yaml, .yml, or .json)
        #[arg(long)]
        file: PathBuf,
    },
    /// Print one section's normalized view as JSON
    Show {
        /// Section key, e.g. experience or projects
        section: String,

        /// CV document (.yaml, .yml, or .json)
        #[arg(long)]
        file: PathBuf,

        /// View config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keep at most this many records
        #[arg(long)]
        limit: Option<usize>,

        /// Keep entries tagged "archived"
        #[arg(long)]
        include_archived: bool,

        /// Date style: year, month-year, or long
        #[arg(long, value_parser = parse_date_style)]
        dates: Option<DateStyle>,
    },
    /// Print the profile and resolved social links as JSON
    Profile {
        /// CV document (.yaml, .yml, or .json)
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sections { file } => list_sections(&file),
        Command::Show {
            section,
            file,
            config,
            limit,
            include_archived,
            dates,
        } => show_section(
            &section,
            &file,
            config.as_deref(),
            limit,
            include_archived,
            dates,
        ),
        Command::Profile { file } => show_profile(&file),
    }
}

fn list_sections(file: &Path) -> Result<()> {
    let doc = CvDocument::load(file)?;
    let rows: Vec<Value> = doc
        .section_keys()
        .iter()
        .map(|&key| {
            let entries = doc.section(key);
            let visible = entries.iter().filter(|entry| !is_archived(entry)).count();
            json!({"section": key, "entries": entries.len(), "visible": visible})
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&Value::Array(rows))?);
    Ok(())
}

fn show_section(
    section: &str,
    file: &Path,
    config: Option<&Path>,
    limit: Option<usize>,
    include_archived: bool,
    dates: Option<DateStyle>,
) -> Result<()> {
    let doc = CvDocument::load(file)?;
    let view_config = match config {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };

    // Flags win over config file values.
    let mut options = view_config.options_for(section);
    if let Some(limit) = limit {
        options.limit = Some(limit);
    }
    if include_archived {
        options.include_archived = true;
    }
    let style = dates.or(view_config.date_style).unwrap_or_default();

    let payload = match build_section_view(&doc, section, &options) {
        SectionView::Positions(records) => {
            let rows: Vec<Value> = records
                .iter()
                .map(|record| {
                    let mut row = serde_json::to_value(record).unwrap_or(Value::Null);
                    if let Value::Object(map) = &mut row {
                        map.insert("period".to_string(), Value::String(record.period(style)));
                    }
                    row
                })
                .collect();
            Value::Array(rows)
        }
        SectionView::Entries(entries) => Value::Array(entries),
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn show_profile(file: &Path) -> Result<()> {
    let doc = CvDocument::load(file)?;
    let payload = json!({
        "profile": doc.profile(),
        "social": resolve_socials(doc.socials()),
    });

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn parse_date_style(raw: &str) -> Result<DateStyle, String> {
    match raw.trim().to_lowercase().as_str() {
        "year" => Ok(DateStyle::Year),
        "month-year" => Ok(DateStyle::MonthYear),
        "long" => Ok(DateStyle::Long),
        other => Err(format!(
            "unknown date style: {} (expected year, month-year, or long)",
            other
        )),
    }
}
