pub mod answer;
pub mod catalog;
pub mod phase;
pub mod project;
pub mod report;
pub mod result;
pub mod score;

use crate::config::Config;
use crate::core::answer::AnswerSheet;
use crate::core::project::ProjectMetadata;
use crate::core::report::FinalReport;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Contents of an answers file: which phase, who is assessed, and the answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    pub phase: String,
    pub project: ProjectMetadata,
    pub answers: BTreeMap<String, Vec<String>>,
}

impl AssessmentInput {
    /// A blank questionnaire for `phase_id`, every slot left unanswered.
    pub fn blank(cfg: &Config, phase_id: &str) -> Result<Self> {
        let phase = cfg
            .phase(phase_id)
            .ok_or_else(|| unknown_phase(cfg, phase_id))?;
        let answers = phase
            .dimensions
            .iter()
            .map(|dimension| {
                (
                    dimension.id.clone(),
                    vec![String::new(); dimension.question_count()],
                )
            })
            .collect();

        Ok(Self {
            phase: phase.id.clone(),
            project: ProjectMetadata::default(),
            answers,
        })
    }
}

pub fn run_assessment(
    input: &AssessmentInput,
    phase_override: Option<&str>,
    cfg: &Config,
) -> Result<FinalReport> {
    let phase_id = phase_override.unwrap_or(&input.phase);
    if phase_id.trim().is_empty() {
        return Err(anyhow!(
            "no phase given; set `phase` in the answers file or pass --phase"
        ));
    }
    let phase = cfg
        .phase(phase_id)
        .ok_or_else(|| unknown_phase(cfg, phase_id))?;

    let sheet = AnswerSheet::from_raw(&input.answers)
        .with_context(|| format!("invalid answers for phase {}", phase.id))?;
    sheet
        .check_fits(phase)
        .with_context(|| format!("answers do not match phase {}", phase.id))?;

    let result = result::assess(phase, &sheet);
    info!(
        phase = %result.phase_id,
        score = result.final_score,
        classification = %result.classification,
        answered = result.answered,
        total = result.total,
        "assessment computed"
    );

    let exit = report::evaluate_exit(&result, cfg);

    Ok(FinalReport {
        result,
        metadata: input.project.clone(),
        exit,
    })
}

fn unknown_phase(cfg: &Config, phase_id: &str) -> anyhow::Error {
    let known: Vec<&str> = cfg.phases.iter().map(|phase| phase.id.as_str()).collect();
    anyhow!(
        "unknown phase {} (configured phases: {})",
        phase_id,
        known.join(", ")
    )
}
