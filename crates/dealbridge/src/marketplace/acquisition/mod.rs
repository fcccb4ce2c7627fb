mod blueprint;
pub mod domain;
mod process;
pub mod router;
mod store;

pub use blueprint::{DueDateRule, PartyAssignment, ProcessBlueprint, StepTemplate, TaskSeed};
pub use process::AcquisitionProcess;
pub use router::{acquisition_router, CreateProcessRequest, SetStatusRequest, SharedStore};
pub use store::{AcquisitionStore, StoreError};
