//! Insights command handler.

use anyhow::{Result, bail};

use super::{Workspace, label, print_json};
use crate::cli::InsightsArgs;
use crate::cli::output::{InsightsListing, OutputFormat};
use crate::infra::{Analyzer, KeywordAnalyzer, plain_text};

pub fn handle_insights(args: &InsightsArgs, ws: &Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    let note = ws.note(&id)?;
    if note.is_encrypted() {
        bail!("cannot analyse {}: note is encrypted", label(note));
    }

    let insights = KeywordAnalyzer::default().analyze(&plain_text(note.content()));

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!("Words: {}", insights.word_count);
            if !insights.key_terms.is_empty() {
                let terms: Vec<String> = insights
                    .key_terms
                    .iter()
                    .map(|t| format!("{} ({})", t.term, t.count))
                    .collect();
                println!("Key terms: {}", terms.join(", "));
            }
            if !insights.summary.is_empty() {
                println!("Summary: {}", insights.summary);
            }
        }
        OutputFormat::Json => print_json(InsightsListing {
            id: id.to_string(),
            word_count: insights.word_count,
            key_terms: insights.key_terms,
            summary: insights.summary,
        })?,
    }
    Ok(())
}
