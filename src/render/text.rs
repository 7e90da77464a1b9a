use crate::core::project::ProjectMetadata;
use crate::core::result::PhaseResult;

/// Every report starts with this; the document renderer keys its title style on it.
pub const TITLE_MARKER: &str = "FELKLA ASSESSMENT REPORT";
pub const SEPARATOR: char = '=';
const SEPARATOR_WIDTH: usize = 37;
const NONE_IDENTIFIED: &str = "None identified";
const NOT_PROVIDED: &str = "Not provided";

/// Plain-text report for one phase result. Output depends only on the arguments.
pub fn render_text(metadata: &ProjectMetadata, result: &PhaseResult) -> String {
    let mut lines: Vec<String> = Vec::new();
    let date = metadata
        .display_date()
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    lines.push(format!("{TITLE_MARKER} - {}", inline(&result.phase_id)));
    lines.push(SEPARATOR.to_string().repeat(SEPARATOR_WIDTH));
    lines.push(String::new());

    lines.push("PROJECT IDENTIFICATION:".to_string());
    lines.push(format!("- Project Name: {}", inline(&metadata.name)));
    lines.push(format!("- Evaluator: {}", inline(&metadata.evaluator)));
    lines.push(format!("- Evaluation Date: {date}"));
    lines.push(format!("- Responsible Area: {}", inline(&metadata.area)));
    if let Some(code) = metadata.code() {
        lines.push(format!("- Project Code: {}", inline(code)));
    }
    lines.push(String::new());

    lines.push("ASSESSMENT RESULT:".to_string());
    lines.push(format!(
        "- Phase: {} - {}",
        inline(&result.phase_id),
        inline(&result.phase_title)
    ));
    lines.push(format!("- Final Score: {:.1}%", result.final_score));
    lines.push(format!("- Status: {}", inline(&result.status_label)));
    lines.push(format!(
        "- Questions Answered: {}/{}",
        result.answered, result.total
    ));
    if result.is_partial() {
        lines.push("- Result Type: Partial (unanswered questions excluded)".to_string());
    } else {
        lines.push("- Result Type: Complete".to_string());
    }
    lines.push(String::new());

    lines.push("DIMENSION BREAKDOWN:".to_string());
    for dimension in &result.dimensions {
        let mut line = format!(
            "- {} (weight {:.0}%): {:.1}%",
            inline(&dimension.name),
            dimension.weight * 100.0,
            dimension.score
        );
        if dimension.answered < dimension.total {
            line.push_str(&format!(
                " [{}/{} answered]",
                dimension.answered, dimension.total
            ));
        }
        lines.push(line);
    }
    lines.push(String::new());

    lines.push("ANALYSIS:".to_string());
    lines.push(format!("- Strengths: {}", joined(&result.groups.strong)));
    lines.push(format!(
        "- Attention Points: {}",
        joined(&result.groups.attention)
    ));
    lines.push(format!(
        "- Critical Points: {}",
        joined(&result.groups.critical)
    ));
    if let Some(best) = result.best_dimension() {
        lines.push(format!(
            "- Best Dimension: {} ({:.1}%)",
            inline(&best.name),
            best.score
        ));
    }
    if let Some(weakest) = result.weakest_dimension() {
        lines.push(format!(
            "- Weakest Dimension: {} ({:.1}%)",
            inline(&weakest.name),
            weakest.score
        ));
    }
    lines.push(String::new());

    if !result.checklist.is_empty() {
        lines.push("READINESS CHECKLIST:".to_string());
        for item in &result.checklist {
            let mark = if item.passed { "YES" } else { "NO" };
            lines.push(format!("- {}: {mark}", inline(&item.label)));
        }
        lines.push(format!(
            "- Items Approved: {}/{}",
            result.checklist_passed(),
            result.checklist.len()
        ));
        lines.push(String::new());
    }

    lines.push("NEXT STEPS:".to_string());
    for step in &result.guidance.next_steps {
        lines.push(format!("- {}", inline(step)));
    }
    lines.push(String::new());

    if let Some(conclusion) = &result.conclusion {
        lines.push("METHODOLOGY CONCLUSION:".to_string());
        lines.push(inline(conclusion));
        lines.push(String::new());
    }

    lines.push("Report generated automatically by the FELKLA methodology".to_string());
    lines.push(format!("Generation date: {date}"));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn joined(names: &[String]) -> String {
    if names.is_empty() {
        NONE_IDENTIFIED.to_string()
    } else {
        names
            .iter()
            .map(|name| inline(name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// User-supplied values must stay on their own line.
fn inline(value: &str) -> String {
    value
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answer::{AnswerOption, AnswerSheet};
    use crate::core::catalog::builtin_phases;
    use crate::core::phase::PhaseDefinition;
    use crate::core::result::assess;
    use chrono::NaiveDate;

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            name: "Digester Retrofit".to_string(),
            evaluator: "M. Souza".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16),
            area: "Pulp Mill".to_string(),
            code: None,
        }
    }

    fn uniform_sheet(phase: &PhaseDefinition, answer: AnswerOption) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for dimension in &phase.dimensions {
            sheet = sheet.with_group(dimension.id.clone(), vec![Some(answer); 5]);
        }
        sheet
    }

    #[test]
    fn renders_identification_and_results() {
        let phase = &builtin_phases()[0];
        let result = assess(phase, &uniform_sheet(phase, AnswerOption::Good));
        let text = render_text(&metadata(), &result);

        assert!(text.starts_with("FELKLA ASSESSMENT REPORT - FELKLA-1\n====="));
        assert!(text.contains("- Project Name: Digester Retrofit"));
        assert!(text.contains("- Evaluation Date: 16/10/2026"));
        assert!(!text.contains("Project Code"));
        assert!(text.contains("- Final Score: 80.0%"));
        assert!(text.contains("- Status: APPROVED"));
        assert!(text.contains("- Questions Answered: 25/25"));
        assert!(text.contains("- Result Type: Complete"));
        assert!(text.contains("- Economic Feasibility (weight 25%): 80.0%"));
        assert!(text.contains("- Attention Points: None identified"));
        assert!(text.contains("- Critical Points: None identified"));
        assert!(text.contains("- Document the FELKLA-1 assessment results"));
        assert!(!text.contains("READINESS CHECKLIST"));
        assert!(text.ends_with("Generation date: 16/10/2026\n"));
    }

    #[test]
    fn includes_code_and_partial_marker() {
        let phase = &builtin_phases()[1];
        let mut meta = metadata();
        meta.code = Some("PRJ-0042".to_string());
        let sheet = AnswerSheet::new().with_group(
            "development",
            vec![Some(AnswerOption::Good), None, Some(AnswerOption::Good)],
        );
        let result = assess(phase, &sheet);
        let text = render_text(&meta, &result);

        assert!(text.contains("- Project Code: PRJ-0042"));
        assert!(text.contains("- Result Type: Partial"));
        assert!(text.contains("- Technical Development (weight 30%): 80.0% [2/5 answered]"));
        assert!(text.contains("- Status: NOT APPROVED"));
        assert!(text.contains("- Review the proposed technical alternatives"));
    }

    #[test]
    fn final_phase_adds_checklist_and_conclusion() {
        let phase = &builtin_phases()[2];
        let result = assess(phase, &uniform_sheet(phase, AnswerOption::Regular));
        let text = render_text(&metadata(), &result);

        assert!(text.contains("READINESS CHECKLIST:"));
        assert!(text.contains("- Licences obtained: NO"));
        assert!(text.contains("- Items Approved: 0/5"));
        assert!(text.contains("METHODOLOGY CONCLUSION:"));
        assert!(text.contains("PROJECT WITH OPEN ITEMS"));
        assert!(text.contains("- Status: ATTENTION"));
    }

    #[test]
    fn output_is_stable_for_identical_inputs() {
        let phase = &builtin_phases()[0];
        let result = assess(phase, &uniform_sheet(phase, AnswerOption::Inadequate));
        assert_eq!(
            render_text(&metadata(), &result),
            render_text(&metadata(), &result)
        );
    }

    #[test]
    fn multi_line_values_are_flattened() {
        let phase = &builtin_phases()[0];
        let result = assess(phase, &AnswerSheet::new());
        let mut meta = metadata();
        meta.name = "Line A\nPROJECT IDENTIFICATION:".to_string();
        meta.date = None;
        let text = render_text(&meta, &result);
        assert!(text.contains("- Project Name: Line A PROJECT IDENTIFICATION:"));
        assert!(text.contains("- Evaluation Date: Not provided"));
        assert_eq!(text.matches("\nPROJECT IDENTIFICATION:\n").count(), 1);
    }

    #[test]
    fn next_steps_and_conclusion_come_from_the_result() {
        let phase = &builtin_phases()[2];
        let mut result = assess(phase, &uniform_sheet(phase, AnswerOption::Excellent));
        result.guidance.next_steps = vec!["Hand over to the site team".to_string()];
        result.conclusion = Some("Cleared for execution".to_string());

        let text = render_text(&metadata(), &result);
        assert!(text.contains("NEXT STEPS:\n- Hand over to the site team\n"));
        assert!(text.contains("METHODOLOGY CONCLUSION:\nCleared for execution\n"));
        assert!(!text.contains("PROJECT APPROVED"));
    }
}
