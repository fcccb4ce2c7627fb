use super::blueprint::ProcessBlueprint;
use super::domain::{
    AcquisitionStep, ProcessId, ProcessStatus, StepId, StepStatus, Task, TaskId, TaskStatus,
};
use crate::marketplace::matching::MatchId;
use crate::marketplace::profiles::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static PROCESS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_process_id() -> ProcessId {
    let id = PROCESS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProcessId(format!("process-{id:06}"))
}

/// One acquisition pipeline instance tracking a matched buyer-seller pair
/// through its fixed stages. Steps are pre-populated at creation and the
/// step order never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionProcess {
    pub id: ProcessId,
    pub match_id: MatchId,
    pub current_step: u32,
    pub total_steps: u32,
    pub steps: Vec<AcquisitionStep>,
    pub status: ProcessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AcquisitionProcess {
    /// Instantiate every pipeline stage from the blueprint. The first step
    /// opens in progress; everything else waits as pending.
    pub fn from_blueprint(
        match_id: MatchId,
        buyer: &ParticipantId,
        seller: &ParticipantId,
        blueprint: &ProcessBlueprint,
        kickoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = next_process_id();
        let steps: Vec<AcquisitionStep> = blueprint
            .step_templates()
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let step_id = StepId(format!("{}-step-{}", id.0, index + 1));
                let tasks = template
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(task_index, seed)| Task {
                        id: TaskId(format!("{}-task-{}", step_id.0, task_index + 1)),
                        title: seed.title.to_string(),
                        description: None,
                        assigned_to: seed.assigned_to.resolve(buyer, seller),
                        status: TaskStatus::Pending,
                        due_date: seed.due.resolve(kickoff),
                        completed_at: None,
                        priority: seed.priority,
                    })
                    .collect();

                AcquisitionStep {
                    id: step_id,
                    key: template.key.to_string(),
                    title: template.title.to_string(),
                    description: template.description.to_string(),
                    status: if index == 0 {
                        StepStatus::InProgress
                    } else {
                        StepStatus::Pending
                    },
                    due_date: template.due.resolve(kickoff),
                    completed_at: None,
                    documents: Vec::new(),
                    tasks,
                    notes: None,
                }
            })
            .collect();

        let total_steps = steps.len() as u32;

        Self {
            id,
            match_id,
            current_step: 1,
            total_steps,
            steps,
            status: ProcessStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn step(&self, id: &StepId) -> Option<&AcquisitionStep> {
        self.steps.iter().find(|step| &step.id == id)
    }

    pub(crate) fn step_mut(&mut self, id: &StepId) -> Option<&mut AcquisitionStep> {
        self.steps.iter_mut().find(|step| &step.id == id)
    }

    /// Share of pipeline steps already completed, as a whole percentage.
    pub fn progress_percent(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        let completed = self
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count();
        ((completed * 100) / self.steps.len()) as u8
    }

    /// Structural invariants that must hold after every tracker operation.
    pub fn invariants_hold(&self) -> bool {
        self.current_step <= self.total_steps && self.total_steps as usize == self.steps.len()
    }
}
