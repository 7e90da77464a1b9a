use crate::config::{Config, FailOn};
use crate::core::phase::Guidance;
use crate::core::project::ProjectMetadata;
use crate::core::result::{DimensionResult, PhaseResult};
use crate::core::score::{Classification, DimensionGroups};
use colored::Colorize;
use serde::Serialize;

fn colored(classification: Classification, text: &str) -> String {
    match classification {
        Classification::Approved => text.green().bold().to_string(),
        Classification::Attention => text.yellow().bold().to_string(),
        Classification::NotApproved => text.red().bold().to_string(),
    }
}

fn marker(classification: Classification) -> &'static str {
    match classification {
        Classification::Approved => "[ok]",
        Classification::Attention => "[!!]",
        Classification::NotApproved => "[xx]",
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub result: PhaseResult,
    pub metadata: ProjectMetadata,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_dimension: Option<String>,
    pub answered: usize,
    pub total: usize,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub phase: String,
    /// Unrounded, so it always agrees with `classification`.
    pub score: f64,
    /// The score as printed in reports, one decimal place.
    pub score_display: String,
    pub classification: Classification,
    pub label: String,
    pub project: ProjectMetadata,
    pub dimensions: Vec<DimensionResult>,
    pub analysis: DimensionGroups,
    pub summary: SummaryJson,
    pub guidance: Guidance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<crate::core::result::ChecklistOutcome>,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        let result = &report.result;
        Self {
            phase: result.phase_id.clone(),
            score: result.final_score,
            score_display: format!("{:.1}%", result.final_score),
            classification: result.classification,
            label: result.status_label.clone(),
            project: report.metadata.clone(),
            dimensions: result.dimensions.clone(),
            analysis: result.groups.clone(),
            summary: SummaryJson {
                best_dimension: result.best_dimension().map(|d| d.name.clone()),
                weakest_dimension: result.weakest_dimension().map(|d| d.name.clone()),
                answered: result.answered,
                total: result.total,
                partial: result.is_partial(),
            },
            guidance: result.guidance.clone(),
            conclusion: result.conclusion.clone(),
            checklist: result.checklist.clone(),
        }
    }
}

pub fn evaluate_exit(result: &PhaseResult, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if cfg.general.fail_on.is_met_by(result.classification) {
        reasons.push(match cfg.general.fail_on {
            FailOn::Attention => format!(
                "result {} is below {}",
                result.classification,
                Classification::Approved
            ),
            FailOn::NotApproved => format!("result is {}", result.classification),
            FailOn::None => String::new(),
        });
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(report: &FinalReport) {
    let result = &report.result;

    println!(
        "{} {} - {}",
        "Assessment".bold(),
        result.phase_id.bold(),
        result.phase_title
    );
    if !report.metadata.name.trim().is_empty() {
        println!("project: {}", report.metadata.name);
    }
    println!(
        "answered: {}/{} ({})",
        result.answered, result.total, result.completeness
    );

    println!();
    for dimension in &result.dimensions {
        println!(
            "{} {:<32} {:>6.1}%  weight {:>3.0}%  ({}/{} answered)",
            colored(dimension.classification, marker(dimension.classification)),
            dimension.name,
            dimension.score,
            dimension.weight * 100.0,
            dimension.answered,
            dimension.total
        );
    }

    println!();
    let score_line = format!("{:.1}% {}", result.final_score, result.status_label);
    println!(
        "Final score: {}",
        colored(result.classification, &score_line)
    );
    println!("{}", result.guidance.headline);

    print_group("Strengths", &result.groups.strong, Classification::Approved);
    print_group("Needs attention", &result.groups.attention, Classification::Attention);
    print_group("Critical", &result.groups.critical, Classification::NotApproved);

    if let (Some(best), Some(weakest)) = (result.best_dimension(), result.weakest_dimension()) {
        println!();
        println!("best dimension: {} ({:.1}%)", best.name, best.score);
        println!("weakest dimension: {} ({:.1}%)", weakest.name, weakest.score);
    }

    if !result.checklist.is_empty() {
        println!();
        println!(
            "{} ({}/{})",
            "Readiness checklist".bold(),
            result.checklist_passed(),
            result.checklist.len()
        );
        for item in &result.checklist {
            let status = if item.passed {
                colored(Classification::Approved, "[ok]")
            } else {
                colored(Classification::NotApproved, "[xx]")
            };
            println!("{} {}", status, item.label);
        }
    }

    if !result.guidance.actions.is_empty() {
        println!();
        println!("{}", "Recommended actions".bold());
        for action in &result.guidance.actions {
            println!("- {action}");
        }
    }

    if !result.guidance.next_steps.is_empty() {
        println!();
        println!("{}", "Next steps".bold());
        for (idx, step) in result.guidance.next_steps.iter().enumerate() {
            println!("{}. {}", idx + 1, step);
        }
    }

    if let Some(conclusion) = &result.conclusion {
        println!();
        println!("{}", colored(result.classification, conclusion));
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

fn print_group(title: &str, names: &[String], classification: Classification) {
    println!();
    println!("{}", colored(classification, title));
    if names.is_empty() {
        println!("  none identified");
    }
    for name in names {
        println!("  {} {}", marker(classification), name);
    }
}
