use super::domain::{
    AcquisitionStep, DocumentId, DocumentStatus, ProcessId, ProcessStatus, StepId, StepStatus,
    TaskId, TaskStatus,
};
use super::process::AcquisitionProcess;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Error enumeration for tracker lookups.
///
/// Unknown ids surface as explicit variants rather than silent no-ops.
/// The store guarantees state is untouched on every error path, so a
/// caller that wants no-op semantics can simply discard the error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("process {0} not found")]
    ProcessNotFound(ProcessId),
    #[error("step {step} not found in process {process}")]
    StepNotFound { process: ProcessId, step: StepId },
    #[error("document {document} not found in step {step}")]
    DocumentNotFound { step: StepId, document: DocumentId },
    #[error("task {task} not found in step {step}")]
    TaskNotFound { step: StepId, task: TaskId },
}

/// Explicit in-memory store for acquisition processes.
///
/// Alongside the authoritative list, a cached copy of the currently
/// selected process is kept for read views. Every mutation that touches a
/// process by id re-syncs that cache when the ids coincide; this
/// redundant-copy convention is part of the contract, not an optimization.
#[derive(Debug, Default, Clone)]
pub struct AcquisitionStore {
    processes: Vec<AcquisitionProcess>,
    current: Option<AcquisitionProcess>,
}

impl AcquisitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processes(&self) -> &[AcquisitionProcess] {
        &self.processes
    }

    pub fn get(&self, id: &ProcessId) -> Option<&AcquisitionProcess> {
        self.processes.iter().find(|process| &process.id == id)
    }

    pub fn current(&self) -> Option<&AcquisitionProcess> {
        self.current.as_ref()
    }

    /// Replace the authoritative list; the cached current view survives
    /// only if its process is still present.
    pub fn set_processes(&mut self, processes: Vec<AcquisitionProcess>) {
        self.processes = processes;
        if let Some(current) = &self.current {
            let id = current.id.clone();
            self.current = self.get(&id).cloned();
        }
    }

    pub fn add_process(&mut self, process: AcquisitionProcess) {
        debug!(process = %process.id, "registering acquisition process");
        self.processes.push(process);
    }

    /// Point the cached current view at a process, or clear it with `None`.
    pub fn select(&mut self, id: Option<&ProcessId>) -> Result<(), StoreError> {
        match id {
            Some(id) => {
                let process = self
                    .get(id)
                    .cloned()
                    .ok_or_else(|| StoreError::ProcessNotFound(id.clone()))?;
                self.current = Some(process);
                Ok(())
            }
            None => {
                self.current = None;
                Ok(())
            }
        }
    }

    /// Move the pipeline pointer forward by one, saturating at the last
    /// step. Never touches any step's own status.
    pub fn advance_step(
        &mut self,
        id: &ProcessId,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        if process.current_step < process.total_steps {
            process.current_step += 1;
            process.updated_at = now;
        }
        self.sync_current(index);
        Ok(&self.processes[index])
    }

    /// Mark a step completed and stamp its completion time. Whenever the
    /// pipeline pointer still has room it advances, regardless of which
    /// step was named or whether that step was already completed.
    pub fn complete_step(
        &mut self,
        id: &ProcessId,
        step_id: &StepId,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        let step = process
            .step_mut(step_id)
            .ok_or_else(|| StoreError::StepNotFound {
                process: id.clone(),
                step: step_id.clone(),
            })?;

        step.status = StepStatus::Completed;
        step.completed_at = Some(now);

        if process.current_step < process.total_steps {
            process.current_step += 1;
        }
        process.updated_at = now;

        self.sync_current(index);
        Ok(&self.processes[index])
    }

    /// Overwrite the overall status and refresh `updated_at`. Any
    /// assignment is accepted, including reopening a completed process;
    /// no transition validation happens here.
    pub fn set_process_status(
        &mut self,
        id: &ProcessId,
        status: ProcessStatus,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        process.status = status;
        process.updated_at = now;

        self.sync_current(index);
        Ok(&self.processes[index])
    }

    /// Full replacement of a step record matched by id. Fields omitted by
    /// the caller are lost; there are no partial-merge semantics.
    pub fn update_step(
        &mut self,
        id: &ProcessId,
        step: AcquisitionStep,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        let slot = process
            .steps
            .iter_mut()
            .find(|candidate| candidate.id == step.id)
            .ok_or_else(|| StoreError::StepNotFound {
                process: id.clone(),
                step: step.id.clone(),
            })?;
        *slot = step;
        process.updated_at = now;

        self.sync_current(index);
        Ok(&self.processes[index])
    }

    /// Reviewer verdict on an uploaded document.
    pub fn review_document(
        &mut self,
        id: &ProcessId,
        step_id: &StepId,
        document_id: &DocumentId,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        let step = process
            .step_mut(step_id)
            .ok_or_else(|| StoreError::StepNotFound {
                process: id.clone(),
                step: step_id.clone(),
            })?;
        let document = step
            .document_mut(document_id)
            .ok_or_else(|| StoreError::DocumentNotFound {
                step: step_id.clone(),
                document: document_id.clone(),
            })?;
        document.status = status;
        process.updated_at = now;

        self.sync_current(index);
        Ok(&self.processes[index])
    }

    /// Progress a task; completion stamps `completed_at`, any other status
    /// clears it.
    pub fn set_task_status(
        &mut self,
        id: &ProcessId,
        step_id: &StepId,
        task_id: &TaskId,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<&AcquisitionProcess, StoreError> {
        let index = self.position(id)?;
        let process = &mut self.processes[index];
        let step = process
            .step_mut(step_id)
            .ok_or_else(|| StoreError::StepNotFound {
                process: id.clone(),
                step: step_id.clone(),
            })?;
        let task = step
            .task_mut(task_id)
            .ok_or_else(|| StoreError::TaskNotFound {
                step: step_id.clone(),
                task: task_id.clone(),
            })?;
        task.status = status;
        task.completed_at = match status {
            TaskStatus::Completed => Some(now),
            _ => None,
        };
        process.updated_at = now;

        self.sync_current(index);
        Ok(&self.processes[index])
    }

    fn position(&self, id: &ProcessId) -> Result<usize, StoreError> {
        self.processes
            .iter()
            .position(|process| &process.id == id)
            .ok_or_else(|| StoreError::ProcessNotFound(id.clone()))
    }

    fn sync_current(&mut self, index: usize) {
        if let Some(current) = &self.current {
            if current.id == self.processes[index].id {
                self.current = Some(self.processes[index].clone());
            }
        }
    }
}
