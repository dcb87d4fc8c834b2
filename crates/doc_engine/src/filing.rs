//! Filing document rendering

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use docx_rs::{Docx, Paragraph, Run};
use domain::GeneratedFiling;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::FilingConfig;
use crate::error::DocumentError;

/// Half-point font size for the filing heading (16pt)
const HEADING_SIZE: usize = 32;

/// Render a filing into a DOCX file under the configured output directory
///
/// Produces one heading paragraph followed by one body paragraph per filing
/// paragraph and returns the path of the written file. The caller owns the
/// file from then on and is expected to delete it after delivery.
#[instrument(skip(filing), fields(paragraphs = filing.paragraphs.len()))]
pub fn render_filing(
    filing: &GeneratedFiling,
    config: &FilingConfig,
) -> Result<PathBuf, DocumentError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let path = Path::new(&config.output_dir).join(unique_file_name(&config.file_prefix));

    let mut docx = Docx::new().add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text(filing.heading.as_str())
                .bold()
                .size(HEADING_SIZE),
        ),
    );
    for paragraph in &filing.paragraphs {
        docx = docx
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph.as_str())));
    }

    let file = File::create(&path)?;
    docx.build()
        .pack(file)
        .map_err(|e| DocumentError::Render(e.to_string()))?;

    info!(path = %path.display(), "filing rendered");
    Ok(path)
}

/// Wall-clock time plus a random token, so two filings in the same second
/// still get distinct names.
fn unique_file_name(prefix: &str) -> String {
    let stamp = Local::now().format("%H%M%S");
    let token = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{stamp}_{}.docx", &token[..8])
}
