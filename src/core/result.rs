use crate::core::answer::AnswerSheet;
use crate::core::phase::{Guidance, PhaseDefinition};
use crate::core::score::{
    self, APPROVED_THRESHOLD, Classification, DimensionGroups, classify, classify_dimensions,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DimensionResult {
    pub id: String,
    pub name: String,
    pub weight: f64,
    /// 0 when nothing in the dimension was answered.
    pub score: f64,
    pub classification: Classification,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Completeness {
    Complete,
    Partial,
    Empty,
}

impl Completeness {
    fn from_counts(answered: usize, total: usize) -> Self {
        if answered == 0 {
            Self::Empty
        } else if answered < total {
            Self::Partial
        } else {
            Self::Complete
        }
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete result"),
            Self::Partial => write!(f, "partial result"),
            Self::Empty => write!(f, "no answers"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChecklistOutcome {
    pub label: String,
    pub passed: bool,
}

/// Computed once per assessment; never updated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhaseResult {
    pub phase_id: String,
    pub phase_title: String,
    pub final_score: f64,
    pub classification: Classification,
    pub status_label: String,
    pub answered: usize,
    pub total: usize,
    pub completeness: Completeness,
    pub dimensions: Vec<DimensionResult>,
    pub groups: DimensionGroups,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistOutcome>,
    /// Guidance for the classification reached; screen and report both use it.
    pub guidance: Guidance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

impl PhaseResult {
    /// Highest-scoring dimension; the earliest one wins a tie.
    pub fn best_dimension(&self) -> Option<&DimensionResult> {
        self.dimensions
            .iter()
            .reduce(|best, next| if next.score > best.score { next } else { best })
    }

    /// Lowest-scoring dimension; the earliest one wins a tie.
    pub fn weakest_dimension(&self) -> Option<&DimensionResult> {
        self.dimensions
            .iter()
            .reduce(|worst, next| if next.score < worst.score { next } else { worst })
    }

    pub fn checklist_passed(&self) -> usize {
        self.checklist.iter().filter(|item| item.passed).count()
    }

    pub fn is_partial(&self) -> bool {
        self.completeness == Completeness::Partial
    }
}

/// Scores one phase. Answers beyond a dimension's question count are ignored;
/// use [`AnswerSheet::check_fits`] to reject them up front.
pub fn assess(phase: &PhaseDefinition, answers: &AnswerSheet) -> PhaseResult {
    let mut dimensions = Vec::with_capacity(phase.dimensions.len());

    for definition in &phase.dimensions {
        let total = definition.question_count();
        let group = answers.group(&definition.id);
        let group = &group[..group.len().min(total)];
        let score = score::dimension_score(group);
        let answered = group.iter().filter(|answer| answer.is_some()).count();

        debug!(
            phase = %phase.id,
            dimension = %definition.id,
            answered,
            total,
            score,
            "scored dimension"
        );

        dimensions.push(DimensionResult {
            id: definition.id.clone(),
            name: definition.name.clone(),
            weight: definition.weight,
            score,
            classification: classify(score),
            answered,
            total,
        });
    }

    let final_score = score::phase_score(dimensions.iter().map(|d| (d.score, d.weight)));
    let classification = classify(final_score);
    let groups = classify_dimensions(dimensions.iter().map(|d| (d.name.as_str(), d.score)));
    let answered = dimensions.iter().map(|d| d.answered).sum();
    let total = phase.question_count();

    let checklist = phase
        .checklist
        .iter()
        .map(|item| ChecklistOutcome {
            label: item.label.clone(),
            passed: dimensions
                .iter()
                .find(|d| d.id == item.dimension)
                .is_some_and(|d| d.score >= APPROVED_THRESHOLD),
        })
        .collect();

    debug!(phase = %phase.id, final_score, %classification, "scored phase");

    PhaseResult {
        phase_id: phase.id.clone(),
        phase_title: phase.title.clone(),
        final_score,
        classification,
        status_label: phase.labels.get(classification).clone(),
        guidance: phase.guidance.get(classification).clone(),
        conclusion: phase
            .conclusion
            .as_ref()
            .map(|conclusion| conclusion.get(classification).clone()),
        answered,
        total,
        completeness: Completeness::from_counts(answered, total),
        dimensions,
        groups,
        checklist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answer::AnswerOption::{self, *};
    use crate::core::catalog::builtin_phases;
    use crate::core::phase::{ByStatus, DimensionDefinition};

    fn two_dimension_phase() -> PhaseDefinition {
        let dimension = |id: &str| DimensionDefinition {
            id: id.to_string(),
            name: id.to_uppercase(),
            weight: 0.5,
            questions: vec!["q".to_string(); 5],
        };
        PhaseDefinition {
            id: "T".to_string(),
            title: "Test".to_string(),
            objective: String::new(),
            dimensions: vec![dimension("a"), dimension("b")],
            labels: ByStatus::default(),
            guidance: ByStatus::default(),
            checklist: Vec::new(),
            conclusion: None,
        }
    }

    fn uniform(answer: AnswerOption) -> Vec<Option<AnswerOption>> {
        vec![Some(answer); 5]
    }

    #[test]
    fn excellent_and_not_started_average_to_attention() {
        let sheet = AnswerSheet::new()
            .with_group("a", uniform(Excellent))
            .with_group("b", uniform(NotStarted));
        let result = assess(&two_dimension_phase(), &sheet);

        assert_eq!(result.dimensions[0].score, 100.0);
        assert_eq!(result.dimensions[1].score, 20.0);
        assert!((result.final_score - 60.0).abs() < 1e-9);
        assert_eq!(result.classification, Classification::Attention);
        assert_eq!(result.status_label, "ATTENTION");
        assert_eq!(result.groups.strong, vec!["A"]);
        assert_eq!(result.groups.critical, vec!["B"]);
        assert_eq!(result.completeness, Completeness::Complete);
    }

    #[test]
    fn unanswered_dimension_drags_score_down() {
        let sheet = AnswerSheet::new().with_group("a", uniform(Excellent));
        let result = assess(&two_dimension_phase(), &sheet);

        assert_eq!(result.dimensions[1].score, 0.0);
        assert_eq!(result.dimensions[1].answered, 0);
        assert!((result.final_score - 50.0).abs() < 1e-9);
        assert_eq!(result.answered, 5);
        assert_eq!(result.total, 10);
        assert!(result.is_partial());
    }

    #[test]
    fn empty_sheet_is_reported_as_empty() {
        let result = assess(&two_dimension_phase(), &AnswerSheet::new());
        assert_eq!(result.completeness, Completeness::Empty);
        assert_eq!(result.final_score, 0.0);
        assert_eq!(result.classification, Classification::NotApproved);
    }

    #[test]
    fn extra_answers_are_ignored() {
        let mut answers = uniform(Good);
        answers.push(Some(NotStarted));
        let sheet = AnswerSheet::new()
            .with_group("a", answers)
            .with_group("b", uniform(Good));
        let result = assess(&two_dimension_phase(), &sheet);
        assert_eq!(result.dimensions[0].answered, 5);
        assert_eq!(result.dimensions[0].score, 80.0);
    }

    #[test]
    fn best_and_weakest_prefer_earliest_on_ties() {
        let sheet = AnswerSheet::new()
            .with_group("a", uniform(Good))
            .with_group("b", uniform(Good));
        let result = assess(&two_dimension_phase(), &sheet);
        assert_eq!(result.best_dimension().unwrap().id, "a");
        assert_eq!(result.weakest_dimension().unwrap().id, "a");
    }

    #[test]
    fn final_phase_checklist_tracks_approved_dimensions() {
        let phase = &builtin_phases()[2];
        let sheet = AnswerSheet::new()
            .with_group("engineering", uniform(Excellent))
            .with_group("contracting", uniform(Good))
            .with_group("licensing", uniform(Regular))
            .with_group("execution", uniform(Excellent))
            .with_group("controls", uniform(Inadequate));
        let result = assess(phase, &sheet);

        let passed: Vec<bool> = result.checklist.iter().map(|item| item.passed).collect();
        assert_eq!(passed, vec![true, true, false, true, false]);
        assert_eq!(result.checklist_passed(), 3);
        // 100*.35 + 80*.25 + 60*.20 + 100*.15 + 40*.05
        assert!((result.final_score - 84.0).abs() < 1e-9);
        assert_eq!(result.status_label, "READY FOR EXECUTION");
    }

    #[test]
    fn weighted_sum_matches_builtin_weights() {
        let phase = &builtin_phases()[0];
        let sheet = AnswerSheet::new()
            .with_group("opportunity", uniform(Excellent))
            .with_group("technical", uniform(Good))
            .with_group("economic", uniform(Regular))
            .with_group("environmental", uniform(Inadequate))
            .with_group("risk", uniform(NotStarted));
        let result = assess(phase, &sheet);
        let expected = 100.0 * 0.20 + 80.0 * 0.20 + 60.0 * 0.25 + 40.0 * 0.20 + 20.0 * 0.15;
        assert!((result.final_score - expected).abs() < 1e-9);
        assert_eq!(result.groups.strong, vec!["Opportunity Definition", "Technical Feasibility"]);
        assert_eq!(result.groups.attention, vec!["Economic Feasibility"]);
        assert_eq!(
            result.groups.critical,
            vec!["Environmental Aspects", "Risks and Schedule"]
        );
    }
}
