use crate::core::phase::PhaseDefinition;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the five ordinal ratings a question can receive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerOption {
    Excellent,
    Good,
    Regular,
    Inadequate,
    NotStarted,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Regular,
        Self::Inadequate,
        Self::NotStarted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Regular => "regular",
            Self::Inadequate => "inadequate",
            Self::NotStarted => "not-started",
        }
    }

    /// Parses one answer slot. Blank, `-` and `unanswered` are absent answers.
    pub fn parse_slot(raw: &str) -> Result<Option<Self>> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "" | "-" | "unanswered" | "none" => Ok(None),
            "excellent" => Ok(Some(Self::Excellent)),
            "good" => Ok(Some(Self::Good)),
            "regular" => Ok(Some(Self::Regular)),
            "inadequate" => Ok(Some(Self::Inadequate)),
            "not-started" | "notstarted" => Ok(Some(Self::NotStarted)),
            _ => bail!(
                "unrecognised answer {:?} (expected excellent, good, regular, inadequate, not-started or blank)",
                raw
            ),
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Regular => write!(f, "Regular"),
            Self::Inadequate => write!(f, "Inadequate"),
            Self::NotStarted => write!(f, "Not started"),
        }
    }
}

/// Answers for one phase, keyed by dimension id, in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    groups: BTreeMap<String, Vec<Option<AnswerOption>>>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(
        mut self,
        dimension_id: impl Into<String>,
        answers: Vec<Option<AnswerOption>>,
    ) -> Self {
        self.groups.insert(dimension_id.into(), answers);
        self
    }

    /// Answers recorded for a dimension; an unknown dimension has none.
    pub fn group(&self, dimension_id: &str) -> &[Option<AnswerOption>] {
        self.groups
            .get(dimension_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rejects answers for dimensions the phase does not have, or more answers
    /// than a dimension has questions.
    pub fn check_fits(&self, phase: &PhaseDefinition) -> Result<()> {
        for (dimension_id, answers) in &self.groups {
            let Some(dimension) = phase.dimension(dimension_id) else {
                bail!("phase {} has no dimension {}", phase.id, dimension_id);
            };
            if answers.len() > dimension.question_count() {
                bail!(
                    "dimension {} has {} questions but {} answers were given",
                    dimension_id,
                    dimension.question_count(),
                    answers.len()
                );
            }
        }
        Ok(())
    }

    /// Builds a sheet from raw answer strings, as read from an answers file.
    pub fn from_raw(raw: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut sheet = Self::new();
        for (dimension_id, answers) in raw {
            let mut parsed = Vec::with_capacity(answers.len());
            for (idx, answer) in answers.iter().enumerate() {
                match AnswerOption::parse_slot(answer) {
                    Ok(slot) => parsed.push(slot),
                    Err(err) => bail!("{dimension_id} question {}: {err}", idx + 1),
                }
            }
            sheet.groups.insert(dimension_id.clone(), parsed);
        }
        Ok(sheet)
    }
}
