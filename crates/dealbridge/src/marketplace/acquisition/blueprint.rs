use super::domain::{Assignee, TaskPriority};
use crate::marketplace::profiles::ParticipantId;
use chrono::{DateTime, Duration, Utc};

/// Scheduling rule for a templated step or task, relative to deal kickoff.
#[derive(Debug, Clone, Copy)]
pub enum DueDateRule {
    DaysFromKickoff(i64),
    Unscheduled,
}

impl DueDateRule {
    pub(crate) fn resolve(&self, kickoff: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DueDateRule::DaysFromKickoff(offset) => Some(kickoff + Duration::days(*offset)),
            DueDateRule::Unscheduled => None,
        }
    }
}

/// Which deal party a templated task is assigned to once instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyAssignment {
    Buyer,
    Seller,
    Both,
}

impl PartyAssignment {
    pub(crate) fn resolve(&self, buyer: &ParticipantId, seller: &ParticipantId) -> Assignee {
        match self {
            PartyAssignment::Buyer => Assignee::Participant(buyer.clone()),
            PartyAssignment::Seller => Assignee::Participant(seller.clone()),
            PartyAssignment::Both => Assignee::Both,
        }
    }
}

/// Seed for a task created together with its step.
#[derive(Debug, Clone)]
pub struct TaskSeed {
    pub title: &'static str,
    pub assigned_to: PartyAssignment,
    pub priority: TaskPriority,
    pub due: DueDateRule,
}

/// Template for one stage of the standard deal pipeline.
#[derive(Debug, Clone)]
pub struct StepTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub due: DueDateRule,
    pub tasks: Vec<TaskSeed>,
}

/// The fixed chronological pipeline every acquisition process walks through.
#[derive(Debug)]
pub struct ProcessBlueprint {
    steps: Vec<StepTemplate>,
}

impl ProcessBlueprint {
    pub fn standard() -> Self {
        Self {
            steps: standard_step_templates(),
        }
    }

    pub fn step_templates(&self) -> &[StepTemplate] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn standard_step_templates() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            key: "nda",
            title: "Initial Interest & NDA",
            description: "Sign NDA and express formal interest",
            due: DueDateRule::DaysFromKickoff(0),
            tasks: vec![TaskSeed {
                title: "Review and sign NDA",
                assigned_to: PartyAssignment::Both,
                priority: TaskPriority::High,
                due: DueDateRule::DaysFromKickoff(0),
            }],
        },
        StepTemplate {
            key: "financial_review",
            title: "Financial Information Review",
            description: "Exchange and review financial statements and projections",
            due: DueDateRule::DaysFromKickoff(13),
            tasks: vec![
                TaskSeed {
                    title: "Provide 3-year financial statements",
                    assigned_to: PartyAssignment::Seller,
                    priority: TaskPriority::High,
                    due: DueDateRule::DaysFromKickoff(3),
                },
                TaskSeed {
                    title: "Review financial statements",
                    assigned_to: PartyAssignment::Buyer,
                    priority: TaskPriority::High,
                    due: DueDateRule::DaysFromKickoff(11),
                },
            ],
        },
        StepTemplate {
            key: "management_presentations",
            title: "Management Presentations",
            description: "Management team presents to buyer team",
            due: DueDateRule::DaysFromKickoff(18),
            tasks: vec![TaskSeed {
                title: "Prepare management presentation",
                assigned_to: PartyAssignment::Seller,
                priority: TaskPriority::Medium,
                due: DueDateRule::DaysFromKickoff(15),
            }],
        },
        StepTemplate {
            key: "letter_of_intent",
            title: "Letter of Intent",
            description: "Negotiate and execute letter of intent",
            due: DueDateRule::Unscheduled,
            tasks: Vec::new(),
        },
        StepTemplate {
            key: "due_diligence",
            title: "Due Diligence",
            description: "Comprehensive due diligence process",
            due: DueDateRule::Unscheduled,
            tasks: Vec::new(),
        },
        StepTemplate {
            key: "final_negotiations",
            title: "Final Negotiations",
            description: "Finalize terms and conditions",
            due: DueDateRule::Unscheduled,
            tasks: Vec::new(),
        },
        StepTemplate {
            key: "closing",
            title: "Closing",
            description: "Execute final agreements and close transaction",
            due: DueDateRule::Unscheduled,
            tasks: Vec::new(),
        },
    ]
}
