//! ungdoc CLI - structural document to Markdown conversion tool
//!
//! Operates on JSON-serialized structural documents; fetching one from a
//! live store is the job of whatever transport layer produced the file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use ungdoc::{interop, RenderOptions, SplitMode, StructuralDocument};

#[derive(Parser)]
#[command(name = "ungdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert structural document exports to Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to a single Markdown stream
    #[command(alias = "md")]
    Markdown {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Embed a document-id marker at the top of the output
        #[arg(long, value_name = "ID")]
        doc_id: Option<String>,

        /// Insert blank lines before list blocks for downstream converters
        #[arg(long)]
        harden_lists: bool,
    },

    /// Split a document into per-section Markdown files
    Sections {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// One file per tab instead of per heading
        #[arg(long, conflicts_with = "by_heading")]
        by_tab: bool,

        /// One file per level-1 heading / section break (default)
        #[arg(long)]
        by_heading: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show document information
    Info {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Markdown {
            input,
            output,
            doc_id,
            harden_lists,
        } => cmd_markdown(&input, output.as_deref(), doc_id.as_deref(), harden_lists),
        Commands::Sections {
            input,
            output,
            by_tab,
            by_heading: _,
            force,
        } => cmd_sections(&input, &output, by_tab, force),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_document(input: &Path) -> Result<StructuralDocument, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    Ok(ungdoc::from_json(&data)?)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    doc_id: Option<&str>,
    harden_lists: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let mut markdown = ungdoc::to_markdown(&doc);

    if harden_lists {
        markdown = interop::harden_lists(&markdown);
    }
    if let Some(id) = doc_id {
        markdown = interop::set_doc_id(&markdown, id);
    }

    match output {
        Some(path) => {
            fs::write(path, &markdown)?;
            eprintln!("{} {}", "Exported to:".green(), path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

fn cmd_sections(
    input: &Path,
    output: &Path,
    by_tab: bool,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    let split = if by_tab {
        SplitMode::ByTab
    } else {
        SplitMode::ByHeading
    };
    let sections = ungdoc::to_sections(&doc, &RenderOptions::new().with_split(split));
    log::debug!("split produced {} section(s)", sections.len());

    fs::create_dir_all(output)?;
    eprintln!("Found {} section(s)", sections.len());

    let mut written = 0usize;
    for section in &sections {
        let filename = format!("{}.md", interop::sanitize_filename(&section.title));
        let path = output.join(filename);

        if path.exists() && !force {
            eprintln!(
                "{} {} already exists, skipping (use --force to overwrite)",
                "Warning:".yellow(),
                path.display()
            );
            continue;
        }

        fs::write(&path, &section.body)?;
        eprintln!(
            "  Exported section '{}' to: {}",
            section.title,
            path.display()
        );
        written += 1;
    }

    eprintln!(
        "{} {}/{} section(s) written",
        "Done:".green(),
        written,
        sections.len()
    );
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    let flat = doc.flatten_tabs();
    let mut paragraphs = 0usize;
    let mut tables = 0usize;
    let mut section_breaks = 0usize;
    for tab in &flat {
        for element in tab.elements {
            match element {
                ungdoc::ContentElement::Paragraph(_) => paragraphs += 1,
                ungdoc::ContentElement::Table(_) => tables += 1,
                ungdoc::ContentElement::SectionBreak(_) => section_breaks += 1,
            }
        }
    }

    let title = doc
        .metadata
        .title
        .as_deref()
        .unwrap_or(ungdoc::model::UNTITLED_DOCUMENT);
    println!("{}: {}", "Title".bold(), title);
    if let Some(id) = &doc.metadata.document_id {
        println!("{}: {}", "Document id".bold(), id);
    }
    println!("{}: {}", "Tabs".bold(), flat.len());
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Tables".bold(), tables);
    println!("{}: {}", "Section breaks".bold(), section_breaks);
    println!("{}: {}", "Lists".bold(), doc.lists.len());
    Ok(())
}
