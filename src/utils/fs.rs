use crate::core::AssessmentInput;
use crate::render::ReportArtifact;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => bail!(
                "unsupported answers file {} (expected .toml or .json)",
                path.display()
            ),
        }
    }
}

pub fn relative_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

pub fn parse_input(content: &str, format: InputFormat) -> Result<AssessmentInput> {
    let input: AssessmentInput = match format {
        InputFormat::Toml => toml::from_str(content).context("invalid TOML answers")?,
        InputFormat::Json => serde_json::from_str(content).context("invalid JSON answers")?,
    };
    Ok(input)
}

pub fn read_input(path: &Path) -> Result<AssessmentInput> {
    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading answers file {}", path.display()))?;
    parse_input(&content, format).with_context(|| format!("in {}", path.display()))
}

pub fn render_input(input: &AssessmentInput, format: InputFormat) -> Result<String> {
    match format {
        InputFormat::Toml => {
            toml::to_string_pretty(input).context("failed to serialize answers template")
        }
        InputFormat::Json => {
            serde_json::to_string_pretty(input).context("failed to serialize answers template")
        }
    }
}

/// Writes a new file, refusing to replace an existing one.
pub fn write_new(path: &Path, content: &[u8]) -> Result<()> {
    if path.exists() {
        bail!("refusing to overwrite existing file: {}", path.display());
    }
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))
}

/// Saves a report into `dir`, creating it if needed. Existing reports are replaced.
pub fn write_artifact(dir: &Path, artifact: &ReportArtifact) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed creating output directory {}", dir.display()))?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("failed writing report {}", path.display()))?;
    Ok(path)
}
