use crate::core::score::Classification;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// One value per classification band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByStatus<T> {
    pub approved: T,
    pub attention: T,
    pub not_approved: T,
}

impl<T> ByStatus<T> {
    pub fn get(&self, classification: Classification) -> &T {
        match classification {
            Classification::Approved => &self.approved,
            Classification::Attention => &self.attention,
            Classification::NotApproved => &self.not_approved,
        }
    }
}

impl Default for ByStatus<String> {
    fn default() -> Self {
        Self {
            approved: Classification::Approved.as_str().to_string(),
            attention: Classification::Attention.as_str().to_string(),
            not_approved: Classification::NotApproved.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Guidance {
    pub headline: String,
    pub actions: Vec<String>,
    pub next_steps: Vec<String>,
}

impl Default for ByStatus<Guidance> {
    fn default() -> Self {
        Self {
            approved: Guidance {
                headline: "Ready for the next phase".to_string(),
                actions: Vec::new(),
                next_steps: vec!["Proceed to the next phase".to_string()],
            },
            attention: Guidance {
                headline: "Viable with improvements".to_string(),
                actions: Vec::new(),
                next_steps: vec!["Improve the critical areas identified".to_string()],
            },
            not_approved: Guidance {
                headline: "Not recommended at this time".to_string(),
                actions: Vec::new(),
                next_steps: vec!["Review the project fundamentals".to_string()],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionDefinition {
    pub id: String,
    pub name: String,
    /// Fraction of the phase score, e.g. `0.20`.
    pub weight: f64,
    pub questions: Vec<String>,
}

impl DimensionDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// A readiness item that passes when its dimension reaches the approval band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub label: String,
    pub dimension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub objective: String,
    pub dimensions: Vec<DimensionDefinition>,
    #[serde(default)]
    pub labels: ByStatus<String>,
    #[serde(default)]
    pub guidance: ByStatus<Guidance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<ByStatus<String>>,
}

impl PhaseDefinition {
    pub fn dimension(&self, id: &str) -> Option<&DimensionDefinition> {
        self.dimensions.iter().find(|dimension| dimension.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.dimensions
            .iter()
            .map(DimensionDefinition::question_count)
            .sum()
    }

    pub fn weight_total(&self) -> f64 {
        self.dimensions.iter().map(|dimension| dimension.weight).sum()
    }

    /// Rejects configurations the scorer cannot interpret.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("phase id must not be empty");
        }
        if self.dimensions.is_empty() {
            bail!("phase {} has no dimensions", self.id);
        }

        let mut seen = HashSet::new();
        for dimension in &self.dimensions {
            if !seen.insert(dimension.id.as_str()) {
                bail!(
                    "phase {} declares dimension {} twice",
                    self.id,
                    dimension.id
                );
            }
            if dimension.questions.is_empty() {
                bail!(
                    "dimension {} in phase {} has no questions",
                    dimension.id,
                    self.id
                );
            }
            if !(0.0..=1.0).contains(&dimension.weight) {
                bail!(
                    "dimension {} in phase {} has weight {} outside 0..=1",
                    dimension.id,
                    self.id,
                    dimension.weight
                );
            }
        }

        let total = self.weight_total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            bail!(
                "dimension weights in phase {} sum to {} (expected 1.0)",
                self.id,
                total
            );
        }

        for item in &self.checklist {
            if self.dimension(&item.dimension).is_none() {
                bail!(
                    "checklist item {:?} in phase {} refers to unknown dimension {}",
                    item.label,
                    self.id,
                    item.dimension
                );
            }
        }

        Ok(())
    }
}
