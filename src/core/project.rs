use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identification shared by every phase report of one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectMetadata {
    pub name: String,
    pub evaluator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ProjectMetadata {
    pub fn code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Fields that must be filled before a report can be exported.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.evaluator.trim().is_empty() {
            missing.push("evaluator");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.area.trim().is_empty() {
            missing.push("area");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `DD/MM/YYYY`, as printed in report bodies.
    pub fn display_date(&self) -> Option<String> {
        self.date.map(|date| date.format("%d/%m/%Y").to_string())
    }
}
