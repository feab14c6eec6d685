use anyhow::{Context, Result};
use cardrev_editor::EngineConfig;
use cardrev_markup::{BlockExtractor, Extraction};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Card markup file
    pub file: PathBuf,

    /// Print blocks and baseline as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn blocks(args: BlocksArgs, cwd: &Path) -> Result<()> {
    let config = EngineConfig::load(cwd)?;
    let extraction = extract_file(&args.file, &config.extractor())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    if extraction.is_empty() {
        println!("{}", "⚠️  No trackable blocks found".yellow());
        return Ok(());
    }

    println!(
        "{} {} blocks in {}",
        "📦".bright_blue(),
        extraction.blocks.len(),
        args.file.display()
    );
    for line in block_lines(&extraction) {
        println!("  {}", line);
    }

    Ok(())
}

pub(crate) fn extract_file(path: &Path, extractor: &BlockExtractor) -> Result<Extraction> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(extractor.extract(&content))
}

fn block_lines(extraction: &Extraction) -> Vec<String> {
    extraction
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            format!(
                "{:>2}. {} [{}] {}",
                i,
                block.id.bold(),
                block.block_type.cyan(),
                preview(&block.content, 48)
            )
        })
        .collect()
}

/// First `max` chars of `text` on one line
pub(crate) fn preview(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}…", cut)
}
