use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use typefix_core::{Config, ProgressSink, run_conversion};

/// Prints one line per processed file to the wrapped writer. Output
/// failures are swallowed; progress is observational only.
struct ConsoleProgress<W: Write> {
    writer: W,
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn file_processed(&mut self, percent: usize, total: usize, path: &Path) {
        let _ = writeln!(
            self.writer,
            "{} ({}% of {}): {}",
            "Processing".green(),
            percent.to_string().cyan(),
            total,
            path.display()
        );
        let _ = self.writer.flush();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut progress = ConsoleProgress { writer: BufWriter::new(std::io::stdout()) };

    let start = Instant::now();
    let summary = run_conversion(&cfg, &mut progress)?;
    let elapsed_ms = start.elapsed().as_millis();

    info!(
        "Rewrote {} files against {} type-only names",
        summary.files_processed, summary.type_names
    );

    writeln!(
        progress.writer,
        "\n{} Finished in {}ms on {} files ({} type-only names).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        summary.files_processed.to_string().cyan(),
        summary.type_names.to_string().cyan()
    )?;
    progress.writer.flush()?;

    Ok(())
}
