//! Built-in FELKLA questionnaire: three phases, five weighted dimensions each.

use crate::core::phase::{
    ByStatus, ChecklistItem, DimensionDefinition, Guidance, PhaseDefinition,
};
use once_cell::sync::Lazy;

static BUILTIN_PHASES: Lazy<Vec<PhaseDefinition>> =
    Lazy::new(|| vec![opportunity_phase(), selection_phase(), definition_phase()]);

pub fn builtin_phases() -> &'static [PhaseDefinition] {
    &BUILTIN_PHASES
}

fn dimension(id: &str, name: &str, weight: f64, questions: &[&str]) -> DimensionDefinition {
    DimensionDefinition {
        id: id.to_string(),
        name: name.to_string(),
        weight,
        questions: strings(questions),
    }
}

fn guidance(headline: &str, actions: &[&str], next_steps: &[&str]) -> Guidance {
    Guidance {
        headline: headline.to_string(),
        actions: strings(actions),
        next_steps: strings(next_steps),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn opportunity_phase() -> PhaseDefinition {
    PhaseDefinition {
        id: "FELKLA-1".to_string(),
        title: "Opportunity Assessment".to_string(),
        objective: "Assess the initial feasibility and opportunities of the project".to_string(),
        dimensions: vec![
            dimension(
                "opportunity",
                "Opportunity Definition",
                0.20,
                &[
                    "Is the business problem or opportunity clearly defined and documented?",
                    "Are the project objectives aligned with corporate strategy and sustainability goals?",
                    "Has the preliminary scope been established (what is included and excluded)?",
                    "Have the main stakeholders been identified and their needs mapped?",
                    "Have the business drivers (regulatory, competitive, operational) been characterised?",
                ],
            ),
            dimension(
                "technical",
                "Technical Feasibility",
                0.20,
                &[
                    "Have the available technology alternatives been identified and assessed?",
                    "Has compatibility with existing systems and processes been analysed?",
                    "Have the required technical resources (expertise, infrastructure) been assessed?",
                    "Have technical constraints and limitations been identified?",
                    "Has the technological maturity of the proposed solutions been verified?",
                ],
            ),
            dimension(
                "economic",
                "Economic Feasibility",
                0.25,
                &[
                    "Has a preliminary investment (CAPEX) estimate been prepared with a sound method?",
                    "Have operational impacts (OPEX) been estimated?",
                    "Have expected benefits been quantified (revenue, savings, avoided costs)?",
                    "Has a basic economic analysis (NPV, IRR, payback) been performed?",
                    "Have sensitivities and economic scenarios been considered?",
                ],
            ),
            dimension(
                "environmental",
                "Environmental Aspects",
                0.20,
                &[
                    "Have regulatory and licensing requirements been identified?",
                    "Have potential environmental impacts been mapped?",
                    "Have certification and authorisation needs been surveyed?",
                    "Has compliance with internal sustainability policies been verified?",
                    "Have relevant external stakeholders been identified?",
                ],
            ),
            dimension(
                "risk",
                "Risks and Schedule",
                0.15,
                &[
                    "Have the main project risks been identified and categorised?",
                    "Has a high-level schedule with key milestones been established?",
                    "Have critical dependencies been mapped?",
                    "Have the required resources (people, budget) been estimated?",
                    "Have success criteria been defined?",
                ],
            ),
        ],
        labels: ByStatus::default(),
        guidance: ByStatus {
            approved: guidance(
                "Project approved for the next phase",
                &[
                    "Proceed to FELKLA-2",
                    "Keep the quality of the studies",
                    "Record lessons learned",
                ],
                &[
                    "Document the FELKLA-1 assessment results",
                    "Prepare the documentation for FELKLA-2",
                    "Allocate resources for the next phase",
                    "Schedule the FELKLA-2 approval meeting",
                ],
            ),
            attention: guidance(
                "Project viable with improvements required",
                &[
                    "Review low-scoring areas",
                    "Deepen deficient studies",
                    "Seek specialised technical support",
                ],
                &[
                    "Prioritise improvements in the critical areas identified",
                    "Seek specialised technical support",
                    "Review the schedule to account for improvements",
                    "Reassess after the improvements are in place",
                ],
            ),
            not_approved: guidance(
                "Project not recommended at this time",
                &[
                    "Complete review of the scope",
                    "Reassess feasibility",
                    "Consider alternatives or cancellation",
                ],
                &[
                    "Review the project fundamentals",
                    "Consider alternative scope or approach",
                    "Evaluate whether to continue",
                    "Record lessons learned for future projects",
                ],
            ),
        },
        checklist: Vec::new(),
        conclusion: None,
    }
}

fn selection_phase() -> PhaseDefinition {
    PhaseDefinition {
        id: "FELKLA-2".to_string(),
        title: "Alternative Selection".to_string(),
        objective: "Select and develop the technical alternatives".to_string(),
        dimensions: vec![
            dimension(
                "development",
                "Technical Development",
                0.30,
                &[
                    "Have technical alternatives been developed to an adequate level of detail?",
                    "Have basic engineering studies been carried out as needed?",
                    "Have interfaces with existing systems been defined?",
                    "Have preliminary technical specifications been prepared?",
                    "Has a capacity and performance analysis been performed?",
                ],
            ),
            dimension(
                "selection",
                "Solution Selection",
                0.25,
                &[
                    "Have selection criteria been established and applied consistently?",
                    "Have suppliers and technologies been pre-qualified?",
                    "Has the comparative analysis of alternatives been documented?",
                    "Has the preferred solution been selected with a technical and economic rationale?",
                    "Has the implementation strategy been defined?",
                ],
            ),
            dimension(
                "layout",
                "Planning and Layout",
                0.20,
                &[
                    "Has the physical layout been developed adequately?",
                    "Have infrastructure needs been identified and sized?",
                    "Has integration with existing operations been planned?",
                    "Has logistics for materials and products been considered?",
                    "Have support facilities been sized?",
                ],
            ),
            dimension(
                "environmental-social",
                "Environmental/Social Aspects",
                0.15,
                &[
                    "Have the required environmental studies been started?",
                    "Has the licensing strategy been defined?",
                    "Have social impacts been assessed?",
                    "Has a stakeholder engagement plan been prepared?",
                    "Have mitigation measures been identified?",
                ],
            ),
            dimension(
                "estimates",
                "Estimates and Risks",
                0.10,
                &[
                    "Have cost estimates been refined to a better accuracy?",
                    "Has a detailed schedule been developed?",
                    "Has the risk analysis been deepened with mitigation plans?",
                    "Has the economic sensitivity analysis been updated?",
                    "Have project control metrics been defined?",
                ],
            ),
        ],
        labels: ByStatus::default(),
        guidance: ByStatus {
            approved: guidance(
                "Project approved for FELKLA-3",
                &[
                    "Proceed to the project definition phase",
                    "Keep the quality of the technical studies",
                    "Finalise supplier selection",
                ],
                &[
                    "Finalise the detailed technical specifications",
                    "Prepare the documentation for FELKLA-3",
                    "Confirm contracts with the selected suppliers",
                    "Start detailed engineering studies",
                ],
            ),
            attention: guidance(
                "Project viable with improvements required",
                &[
                    "Deepen technical development",
                    "Review selection criteria",
                    "Improve layout planning",
                ],
                &[
                    "Deepen development in the critical areas",
                    "Review the solution selection criteria",
                    "Improve integration with existing operations",
                    "Reassess after the improvements are in place",
                ],
            ),
            not_approved: guidance(
                "Project not recommended for the next phase",
                &[
                    "Review the technical alternatives",
                    "Reassess the feasibility of the solutions",
                    "Consider returning to FELKLA-1",
                ],
                &[
                    "Review the proposed technical alternatives",
                    "Reassess the feasibility of the selected solutions",
                    "Consider returning to FELKLA-1 for review",
                    "Seek specialised technical support",
                ],
            ),
        },
        checklist: Vec::new(),
        conclusion: None,
    }
}

fn definition_phase() -> PhaseDefinition {
    PhaseDefinition {
        id: "FELKLA-3".to_string(),
        title: "Project Definition".to_string(),
        objective: "Final definition and preparation for project execution".to_string(),
        dimensions: vec![
            dimension(
                "engineering",
                "Engineering and Specifications",
                0.35,
                &[
                    "Has detailed engineering been completed according to scope?",
                    "Have the final technical specifications been approved?",
                    "Is the technical documentation complete and validated?",
                    "Have all technical interfaces been fully defined?",
                    "Have the required tests and validations been planned?",
                ],
            ),
            dimension(
                "contracting",
                "Contracting and Procurement",
                0.25,
                &[
                    "Has the contracting strategy been defined and approved?",
                    "Have the main contracts been negotiated or reached the final stage?",
                    "Have critical suppliers been selected and qualified?",
                    "Has a procurement plan been prepared?",
                    "Have warranties and insurance been defined?",
                ],
            ),
            dimension(
                "licensing",
                "Licensing and Compliance",
                0.20,
                &[
                    "Have all required licences been obtained or reached the final stage?",
                    "Has regulatory compliance been verified and documented?",
                    "Have the required certifications been obtained or planned?",
                    "Have the required internal approvals been obtained?",
                    "Have legal conditions been met?",
                ],
            ),
            dimension(
                "execution",
                "Execution Plans",
                0.15,
                &[
                    "Has a detailed execution plan been prepared and approved?",
                    "Is the execution schedule final with resources allocated?",
                    "Have quality, safety and environment plans been developed?",
                    "Has the commissioning and start-up strategy been defined?",
                    "Has a change management plan been prepared?",
                ],
            ),
            dimension(
                "controls",
                "Controls and Risks",
                0.05,
                &[
                    "Has the project control system been established?",
                    "Have contingency plans for critical risks been finalised?",
                    "Has the project governance structure been defined?",
                    "Have acceptance criteria been established?",
                    "Has a project close-out plan been prepared?",
                ],
            ),
        ],
        labels: ByStatus {
            approved: "READY FOR EXECUTION".to_string(),
            attention: "ATTENTION".to_string(),
            not_approved: "NOT READY".to_string(),
        },
        guidance: ByStatus {
            approved: guidance(
                "Project ready for execution",
                &[
                    "Start the implementation phase",
                    "Activate the governance structure",
                    "Carry out the communication plans",
                ],
                &[
                    "Hold the official execution kick-off",
                    "Activate the governance and control structure",
                    "Mobilise the allocated teams and resources",
                    "Carry out the communication and engagement plans",
                    "Start monitoring milestones and deliverables",
                ],
            ),
            attention: guidance(
                "Project viable with adjustments required",
                &[
                    "Finalise pending documentation",
                    "Complete critical contracting",
                    "Resolve pending licensing issues",
                ],
                &[
                    "Close the open items in the critical areas",
                    "Complete the technical and contractual documentation",
                    "Resolve pending licensing issues",
                    "Reassess readiness after the corrections",
                    "Plan the schedule around the adjustments",
                ],
            ),
            not_approved: guidance(
                "Project not ready for execution",
                &[
                    "Review detailed engineering",
                    "Finalise the main contracts",
                    "Resolve regulatory issues",
                ],
                &[
                    "Fully review engineering and specifications",
                    "Renegotiate contracts or look for new suppliers",
                    "Resolve regulatory and compliance issues",
                    "Consider returning to FELKLA-2 for review",
                    "Reassess the feasibility of the proposed schedule",
                ],
            ),
        },
        checklist: vec![
            ChecklistItem {
                label: "Detailed engineering complete".to_string(),
                dimension: "engineering".to_string(),
            },
            ChecklistItem {
                label: "Main contracts signed".to_string(),
                dimension: "contracting".to_string(),
            },
            ChecklistItem {
                label: "Licences obtained".to_string(),
                dimension: "licensing".to_string(),
            },
            ChecklistItem {
                label: "Execution plans approved".to_string(),
                dimension: "execution".to_string(),
            },
            ChecklistItem {
                label: "Control system established".to_string(),
                dimension: "controls".to_string(),
            },
        ],
        conclusion: Some(ByStatus {
            approved: "PROJECT APPROVED - FELKLA methodology completed successfully".to_string(),
            attention: "PROJECT WITH OPEN ITEMS - adjustments needed before execution".to_string(),
            not_approved: "PROJECT NOT APPROVED - not recommended for execution".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_phases_validate() {
        for phase in builtin_phases() {
            phase.validate().unwrap();
        }
    }

    #[test]
    fn builtin_phases_have_twenty_five_questions_each() {
        let phases = builtin_phases();
        assert_eq!(phases.len(), 3);
        for phase in phases {
            assert_eq!(phase.dimensions.len(), 5);
            assert_eq!(phase.question_count(), 25);
        }
    }

    #[test]
    fn only_final_phase_carries_checklist_and_conclusion() {
        let phases = builtin_phases();
        assert!(phases[0].checklist.is_empty());
        assert!(phases[1].conclusion.is_none());
        assert_eq!(phases[2].checklist.len(), 5);
        assert!(phases[2].conclusion.is_some());
    }
}
