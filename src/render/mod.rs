pub mod pdf;
pub mod text;

use crate::core::project::ProjectMetadata;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub use pdf::render_document;
pub use text::render_text;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report line {line} cannot be laid out: {reason}")]
    InvalidText { line: usize, reason: String },
    #[error("failed to encode page content: {0}")]
    Encode(String),
    #[error("failed to write document: {0}")]
    Write(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Pdf,
    Text,
}

impl ArtifactFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Text => "text/plain",
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `Report_<phase>_<project>_<YYYYMMDD>.<ext>`, with `Project` / `NoDate`
/// standing in for missing values.
pub fn report_filename(phase_id: &str, metadata: &ProjectMetadata, format: ArtifactFormat) -> String {
    let project = match metadata.name.trim() {
        "" => "Project".to_string(),
        name => filename_part(name),
    };
    let date = metadata
        .date
        .map(|date| date.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "NoDate".to_string());

    format!(
        "Report_{}_{}_{}.{}",
        filename_part(phase_id),
        project,
        date,
        format.extension()
    )
}

fn filename_part(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// A finished, downloadable report.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub format: ArtifactFormat,
    pub bytes: Vec<u8>,
    /// Set when the document could not be rendered and text was used instead.
    pub warning: Option<String>,
}

/// Renders the document, falling back to the plain text when that fails.
pub fn build_artifact(
    report_text: &str,
    phase_id: &str,
    metadata: &ProjectMetadata,
    text_only: bool,
) -> ReportArtifact {
    if !text_only {
        match render_document(report_text) {
            Ok(bytes) => {
                return ReportArtifact {
                    file_name: report_filename(phase_id, metadata, ArtifactFormat::Pdf),
                    format: ArtifactFormat::Pdf,
                    bytes,
                    warning: None,
                };
            }
            Err(err) => {
                warn!(error = %err, phase = phase_id, "document rendering failed, using plain text");
                return text_artifact(
                    report_text,
                    phase_id,
                    metadata,
                    Some(format!("could not generate PDF: {err}")),
                );
            }
        }
    }

    text_artifact(report_text, phase_id, metadata, None)
}

fn text_artifact(
    report_text: &str,
    phase_id: &str,
    metadata: &ProjectMetadata,
    warning: Option<String>,
) -> ReportArtifact {
    ReportArtifact {
        file_name: report_filename(phase_id, metadata, ArtifactFormat::Text),
        format: ArtifactFormat::Text,
        bytes: report_text.as_bytes().to_vec(),
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metadata(name: &str, date: Option<NaiveDate>) -> ProjectMetadata {
        ProjectMetadata {
            name: name.to_string(),
            date,
            ..ProjectMetadata::default()
        }
    }

    #[test]
    fn filename_uses_underscored_name_and_compact_date() {
        let meta = metadata("New Recovery Boiler", NaiveDate::from_ymd_opt(2026, 1, 5));
        assert_eq!(
            report_filename("FELKLA-1", &meta, ArtifactFormat::Pdf),
            "Report_FELKLA-1_New_Recovery_Boiler_20260105.pdf"
        );
    }

    #[test]
    fn filename_defaults_missing_fields() {
        let meta = metadata("  ", None);
        assert_eq!(
            report_filename("FELKLA-3", &meta, ArtifactFormat::Text),
            "Report_FELKLA-3_Project_NoDate.txt"
        );
    }

    #[test]
    fn filename_strips_path_separators() {
        let meta = metadata("A/B: C", None);
        assert_eq!(
            report_filename("FELKLA-2", &meta, ArtifactFormat::Pdf),
            "Report_FELKLA-2_A-B-_C_NoDate.pdf"
        );
    }

    #[test]
    fn falls_back_to_text_when_rendering_fails() {
        let meta = metadata("Mill", NaiveDate::from_ymd_opt(2026, 2, 1));
        let broken = "TITLE\nbad\u{1b}[0m\n";
        let artifact = build_artifact(broken, "FELKLA-1", &meta, false);

        assert_eq!(artifact.format, ArtifactFormat::Text);
        assert_eq!(artifact.file_name, "Report_FELKLA-1_Mill_20260201.txt");
        assert_eq!(artifact.bytes, broken.as_bytes());
        assert!(artifact.warning.unwrap().contains("line 2"));
    }

    #[test]
    fn produces_pdf_for_well_formed_text() {
        let meta = metadata("Mill", None);
        let artifact = build_artifact("FELKLA ASSESSMENT REPORT - X\n", "X", &meta, false);
        assert_eq!(artifact.format, ArtifactFormat::Pdf);
        assert!(artifact.warning.is_none());
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn text_only_skips_the_document() {
        let artifact = build_artifact("x\n", "X", &metadata("", None), true);
        assert_eq!(artifact.format, ArtifactFormat::Text);
        assert!(artifact.warning.is_none());
    }
}
