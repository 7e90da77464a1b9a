use crate::core::answer::AnswerOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the approved band.
pub const APPROVED_THRESHOLD: f64 = 80.0;
/// Lower bound (inclusive) of the attention band.
pub const ATTENTION_THRESHOLD: f64 = 60.0;
/// Points awarded to the best answer; the denominator of every percentage.
pub const MAX_POINTS: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Approved,
    Attention,
    NotApproved,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Attention => "ATTENTION",
            Self::NotApproved => "NOT APPROVED",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn points_for(answer: Option<AnswerOption>) -> u32 {
    match answer {
        Some(AnswerOption::Excellent) => 5,
        Some(AnswerOption::Good) => 4,
        Some(AnswerOption::Regular) => 3,
        Some(AnswerOption::Inadequate) => 2,
        Some(AnswerOption::NotStarted) => 1,
        None => 0,
    }
}

/// Percentage of the maximum points over the answered questions only.
/// A group with nothing answered scores 0.
pub fn dimension_score(answers: &[Option<AnswerOption>]) -> f64 {
    let answered: Vec<AnswerOption> = answers.iter().flatten().copied().collect();
    if answered.is_empty() {
        return 0.0;
    }

    let points: u32 = answered.iter().map(|answer| points_for(Some(*answer))).sum();
    let max_points = MAX_POINTS * answered.len() as u32;
    100.0 * f64::from(points) / f64::from(max_points)
}

/// Weighted sum of `(score, weight)` pairs; weights are fractions of 1.0.
pub fn phase_score<I>(weighted_scores: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    weighted_scores
        .into_iter()
        .map(|(score, weight)| score * weight)
        .sum()
}

pub fn classify(score: f64) -> Classification {
    if score >= APPROVED_THRESHOLD {
        Classification::Approved
    } else if score >= ATTENTION_THRESHOLD {
        Classification::Attention
    } else {
        Classification::NotApproved
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DimensionGroups {
    pub strong: Vec<String>,
    pub attention: Vec<String>,
    pub critical: Vec<String>,
}

/// Splits dimension names into strong / attention / critical using the same
/// bands as [`classify`]. Input order is kept within each group.
pub fn classify_dimensions<'a, I>(scores: I) -> DimensionGroups
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut groups = DimensionGroups::default();
    for (name, score) in scores {
        let bucket = match classify(score) {
            Classification::Approved => &mut groups.strong,
            Classification::Attention => &mut groups.attention,
            Classification::NotApproved => &mut groups.critical,
        };
        bucket.push(name.to_string());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use AnswerOption::*;

    #[test]
    fn maps_points() {
        assert_eq!(points_for(Some(Excellent)), 5);
        assert_eq!(points_for(Some(Good)), 4);
        assert_eq!(points_for(Some(Regular)), 3);
        assert_eq!(points_for(Some(Inadequate)), 2);
        assert_eq!(points_for(Some(NotStarted)), 1);
        assert_eq!(points_for(None), 0);
    }

    #[test]
    fn unanswered_group_scores_zero() {
        assert_eq!(dimension_score(&[]), 0.0);
        assert_eq!(dimension_score(&[None, None, None, None, None]), 0.0);
    }

    #[test]
    fn uniform_groups_hit_exact_bounds() {
        assert_eq!(dimension_score(&[Some(Excellent); 5]), 100.0);
        assert_eq!(dimension_score(&[Some(NotStarted); 5]), 20.0);
    }

    #[test]
    fn unanswered_questions_leave_the_denominator() {
        let answers = [Some(Good), None, Some(Good), None, None];
        assert_eq!(dimension_score(&answers), 80.0);
    }

    #[test]
    fn mixed_group_is_mean_of_percentages() {
        let answers = [Some(Excellent), Some(Good), Some(Regular), Some(Inadequate), Some(NotStarted)];
        assert!((dimension_score(&answers) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn phase_score_is_weighted_sum() {
        let score = phase_score([(100.0, 0.2), (50.0, 0.2), (75.0, 0.25), (40.0, 0.2), (90.0, 0.15)]);
        let expected = 100.0 * 0.2 + 50.0 * 0.2 + 75.0 * 0.25 + 40.0 * 0.2 + 90.0 * 0.15;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn two_dimension_scenario_lands_on_attention() {
        let a = dimension_score(&[Some(Excellent); 5]);
        let b = dimension_score(&[Some(NotStarted); 5]);
        let score = phase_score([(a, 0.5), (b, 0.5)]);
        assert!((score - 60.0).abs() < 1e-9);
        assert_eq!(classify(score), Classification::Attention);
    }

    #[test]
    fn classification_bounds_are_inclusive_upward() {
        assert_eq!(classify(80.0), Classification::Approved);
        assert_eq!(classify(79.999), Classification::Attention);
        assert_eq!(classify(60.0), Classification::Attention);
        assert_eq!(classify(59.999), Classification::NotApproved);
        assert_eq!(classify(0.0), Classification::NotApproved);
        assert_eq!(classify(100.0), Classification::Approved);
    }

    #[test]
    fn dimension_groups_partition_every_name_once() {
        let scores = [
            ("a", 80.0),
            ("b", 60.0),
            ("c", 59.9),
            ("d", 100.0),
            ("e", 79.9),
            ("f", 0.0),
        ];
        let groups = classify_dimensions(scores.iter().map(|(n, s)| (*n, *s)));
        assert_eq!(groups.strong, vec!["a", "d"]);
        assert_eq!(groups.attention, vec!["b", "e"]);
        assert_eq!(groups.critical, vec!["c", "f"]);

        for step in 0..=1000 {
            let score = step as f64 / 10.0;
            let groups = classify_dimensions([("x", score)]);
            let hits = groups.strong.len() + groups.attention.len() + groups.critical.len();
            assert_eq!(hits, 1, "score {score} landed in {hits} groups");
        }
    }
}
