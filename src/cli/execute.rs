//! The two run modes, and the registry listing

use super::Output;
use crate::config::{RunConfig, RunMode, RunPlan};
use crate::input::{Document, document_paths};
use crate::pipeline::Classifier;
use crate::router::{DirectorySink, OutputRouter, StreamSink};
use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};

/// Load the filters and classify every document of the plan
pub fn classify(plan: RunPlan, output: &Output) -> Result<()> {
    let registry = plan
        .sources
        .load(plan.walk)
        .context("Failed to load filters")?;
    output.verbose(&format!("Loaded {} filters", registry.len()));

    let mut classifier = Classifier::new(&registry, plan.single_match);

    match plan.mode {
        RunMode::Directory { output_dir, inputs } => {
            let sink = DirectorySink::new(&output_dir);
            sink.check_names(&registry)?;

            if inputs.is_empty() {
                tracing::info!("No input paths given; nothing to classify");
            }
            let paths = document_paths(&inputs, plan.walk)?;
            tracing::info!(
                "Classifying {} documents into {}",
                paths.len(),
                output_dir.display()
            );

            let mut router = OutputRouter::new(sink);
            classifier.classify_paths(&paths, &mut router)?;
            router.finish()?;
        }
        RunMode::Pipe => {
            let document = Document::from_reader(io::stdin().lock())?;
            let stdout = io::stdout();
            let mut router = OutputRouter::new(StreamSink::new(BufWriter::new(stdout.lock())));
            classifier.classify(&document, &mut router)?;
            router.finish()?;
        }
    }

    let stats = classifier.stats();
    tracing::info!(
        "Classified {} documents ({} matched), wrote {} lines",
        stats.documents,
        stats.matched_documents,
        stats.lines_written
    );
    output.run_summary(&stats);
    Ok(())
}

/// Print `load_order TAB name TAB pattern` for every loaded filter
pub fn list_filters(config: &RunConfig) -> Result<()> {
    let registry = config
        .sources()?
        .load(config.walk_options())
        .context("Failed to load filters")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for filter in &registry {
        writeln!(
            out,
            "{}\t{}\t{}",
            filter.load_order,
            filter.name,
            filter.pattern.as_str()
        )?;
    }
    out.flush()?;
    Ok(())
}
