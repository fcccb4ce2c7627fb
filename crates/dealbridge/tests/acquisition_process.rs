use chrono::{DateTime, Duration, TimeZone, Utc};
use dealbridge::marketplace::acquisition::domain::{
    Assignee, Document, DocumentId, DocumentStatus, ProcessStatus, StepId, StepStatus, TaskStatus,
};
use dealbridge::marketplace::acquisition::{
    AcquisitionProcess, AcquisitionStore, ProcessBlueprint, StoreError,
};
use dealbridge::marketplace::matching::MatchId;
use dealbridge::marketplace::profiles::ParticipantId;

fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 7, 9, 0, 0).single().expect("valid kickoff")
}

fn sample_process() -> AcquisitionProcess {
    AcquisitionProcess::from_blueprint(
        MatchId("match-2".to_string()),
        &ParticipantId("buyer-2".to_string()),
        &ParticipantId("seller-2".to_string()),
        &ProcessBlueprint::standard(),
        kickoff(),
        kickoff(),
    )
}

fn store_with_process() -> (AcquisitionStore, AcquisitionProcess) {
    let process = sample_process();
    let mut store = AcquisitionStore::new();
    store.add_process(process.clone());
    (store, process)
}

#[test]
fn blueprint_builds_the_fixed_seven_stage_pipeline() {
    let process = sample_process();

    assert_eq!(process.total_steps, 7);
    assert_eq!(process.current_step, 1);
    assert_eq!(process.steps.len(), 7);
    assert!(process.invariants_hold());

    let keys: Vec<&str> = process.steps.iter().map(|step| step.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "nda",
            "financial_review",
            "management_presentations",
            "letter_of_intent",
            "due_diligence",
            "final_negotiations",
            "closing",
        ]
    );

    assert_eq!(process.steps[0].status, StepStatus::InProgress);
    assert!(process.steps[1..]
        .iter()
        .all(|step| step.status == StepStatus::Pending));

    // Seeded tasks carry resolved assignees and kickoff-relative due dates.
    let nda_task = &process.steps[0].tasks[0];
    assert_eq!(nda_task.assigned_to, Assignee::Both);
    assert_eq!(nda_task.due_date, Some(kickoff()));

    let review_task = &process.steps[1].tasks[1];
    assert_eq!(
        review_task.assigned_to,
        Assignee::Participant(ParticipantId("buyer-2".to_string()))
    );
    assert_eq!(review_task.due_date, Some(kickoff() + Duration::days(11)));

    assert!(process.steps[4].due_date.is_none());
}

#[test]
fn complete_step_marks_the_step_and_advances_the_pointer() {
    let (mut store, process) = store_with_process();
    let first_step = process.steps[0].id.clone();
    let later = kickoff() + Duration::days(1);

    store
        .complete_step(&process.id, &first_step, later)
        .expect("step completes");

    // Pointer is now 2; move the second step into progress the way the UI
    // would, then complete it.
    let mut second = store.get(&process.id).expect("process present").steps[1].clone();
    second.status = StepStatus::InProgress;
    store
        .update_step(&process.id, second, later)
        .expect("step replaced");

    let second_id = process.steps[1].id.clone();
    let updated = store
        .complete_step(&process.id, &second_id, later + Duration::days(2))
        .expect("step completes");

    assert_eq!(updated.current_step, 3);
    assert_eq!(updated.steps[1].status, StepStatus::Completed);
    assert_eq!(updated.steps[1].completed_at, Some(later + Duration::days(2)));
    assert_eq!(updated.updated_at, later + Duration::days(2));
    assert!(updated.invariants_hold());
}

#[test]
fn complete_step_never_touches_other_steps() {
    let (mut store, process) = store_with_process();
    let first_step = process.steps[0].id.clone();

    let updated = store
        .complete_step(&process.id, &first_step, kickoff())
        .expect("step completes");

    assert!(updated.steps[1..]
        .iter()
        .all(|step| step.status == StepStatus::Pending));
}

#[test]
fn completing_an_already_completed_step_still_moves_the_pointer() {
    let (mut store, process) = store_with_process();
    let first_step = process.steps[0].id.clone();

    store
        .complete_step(&process.id, &first_step, kickoff())
        .expect("first completion");
    let updated = store
        .complete_step(&process.id, &first_step, kickoff() + Duration::days(1))
        .expect("second completion");

    // Status stays completed, but the pointer stepped again: the increment
    // is independent of which step was named.
    assert_eq!(updated.steps[0].status, StepStatus::Completed);
    assert_eq!(updated.current_step, 3);
    assert!(updated.invariants_hold());
}

#[test]
fn advance_step_saturates_at_the_last_stage() {
    let (mut store, process) = store_with_process();
    let later = kickoff() + Duration::days(3);

    for _ in 0..6 {
        store
            .advance_step(&process.id, later)
            .expect("pointer advances");
    }
    let at_cap = store.get(&process.id).expect("process present").clone();
    assert_eq!(at_cap.current_step, 7);

    let after = store
        .advance_step(&process.id, later + Duration::days(1))
        .expect("saturated advance still succeeds");

    assert_eq!(after.current_step, 7);
    // The saturated call is a pointer no-op, so the timestamp is untouched.
    assert_eq!(after.updated_at, at_cap.updated_at);
    assert!(after.invariants_hold());
}

#[test]
fn advance_step_leaves_step_statuses_alone() {
    let (mut store, process) = store_with_process();

    let updated = store
        .advance_step(&process.id, kickoff())
        .expect("pointer advances");

    assert_eq!(updated.current_step, 2);
    assert_eq!(updated.steps[0].status, StepStatus::InProgress);
    assert_eq!(updated.steps[1].status, StepStatus::Pending);
}

#[test]
fn unknown_step_reports_not_found_and_leaves_state_untouched() {
    let (mut store, process) = store_with_process();
    let before = store.get(&process.id).expect("process present").clone();

    let missing = StepId("no-such-step".to_string());
    let result = store.complete_step(&process.id, &missing, kickoff());

    assert!(matches!(result, Err(StoreError::StepNotFound { .. })));
    assert_eq!(store.get(&process.id), Some(&before));
}

#[test]
fn unknown_process_reports_not_found() {
    let mut store = AcquisitionStore::new();
    let missing = dealbridge::marketplace::acquisition::domain::ProcessId("ghost".to_string());

    assert!(matches!(
        store.advance_step(&missing, kickoff()),
        Err(StoreError::ProcessNotFound(_))
    ));
}

#[test]
fn process_status_overwrites_without_transition_checks() {
    let (mut store, process) = store_with_process();
    let later = kickoff() + Duration::days(5);

    store
        .set_process_status(&process.id, ProcessStatus::Completed, later)
        .expect("status set");
    let reopened = store
        .set_process_status(
            &process.id,
            ProcessStatus::InProgress,
            later + Duration::days(1),
        )
        .expect("completed processes may be reopened");

    assert_eq!(reopened.status, ProcessStatus::InProgress);
    assert_eq!(reopened.updated_at, later + Duration::days(1));
}

#[test]
fn update_step_is_a_full_replacement() {
    let (mut store, process) = store_with_process();

    // Replacement omits the seeded tasks; they are lost, not merged.
    let mut replacement = process.steps[1].clone();
    replacement.tasks = Vec::new();
    replacement.notes = Some("awaiting audited statements".to_string());

    let updated = store
        .update_step(&process.id, replacement, kickoff())
        .expect("step replaced");

    assert!(updated.steps[1].tasks.is_empty());
    assert_eq!(
        updated.steps[1].notes.as_deref(),
        Some("awaiting audited statements")
    );
}

#[test]
fn cached_current_view_tracks_every_mutation() {
    let (mut store, process) = store_with_process();
    store.select(Some(&process.id)).expect("process selectable");

    let first_step = process.steps[0].id.clone();
    store
        .complete_step(&process.id, &first_step, kickoff())
        .expect("step completes");
    assert_eq!(store.current(), store.get(&process.id));

    store
        .set_process_status(&process.id, ProcessStatus::OnHold, kickoff())
        .expect("status set");
    assert_eq!(store.current(), store.get(&process.id));
    assert_eq!(
        store.current().expect("current set").status,
        ProcessStatus::OnHold
    );

    // Mutating a different process must not disturb the selection.
    let other = sample_process();
    let other_id = other.id.clone();
    store.add_process(other);
    store
        .advance_step(&other_id, kickoff())
        .expect("other process advances");
    assert_eq!(
        store.current().expect("current still set").id,
        process.id
    );
}

#[test]
fn selection_survives_list_replacement_only_if_still_present() {
    let (mut store, process) = store_with_process();
    store.select(Some(&process.id)).expect("process selectable");

    store.set_processes(vec![sample_process()]);
    assert!(store.current().is_none());

    store.select(None).expect("clearing always succeeds");
    assert!(store.current().is_none());
}

#[test]
fn document_review_updates_only_the_status() {
    let (mut store, process) = store_with_process();
    let uploaded_at = kickoff() + Duration::hours(1);

    let mut step = process.steps[0].clone();
    step.documents.push(Document {
        id: DocumentId("doc-1".to_string()),
        name: "Non-Disclosure Agreement".to_string(),
        content_type: "PDF".to_string(),
        url: "/documents/nda-signed.pdf".to_string(),
        uploaded_by: ParticipantId("buyer-2".to_string()),
        uploaded_at,
        size_bytes: 245_760,
        status: DocumentStatus::PendingReview,
    });
    store
        .update_step(&process.id, step, uploaded_at)
        .expect("step replaced");

    let reviewed = store
        .review_document(
            &process.id,
            &process.steps[0].id,
            &DocumentId("doc-1".to_string()),
            DocumentStatus::Approved,
            uploaded_at + Duration::hours(2),
        )
        .expect("document reviewed");

    let document = &reviewed.steps[0].documents[0];
    assert_eq!(document.status, DocumentStatus::Approved);
    assert_eq!(document.uploaded_at, uploaded_at);
    assert_eq!(document.size_bytes, 245_760);
}

#[test]
fn task_completion_stamps_and_clears_timestamps() {
    let (mut store, process) = store_with_process();
    let step_id = process.steps[0].id.clone();
    let task_id = process.steps[0].tasks[0].id.clone();
    let later = kickoff() + Duration::hours(3);

    let updated = store
        .set_task_status(&process.id, &step_id, &task_id, TaskStatus::Completed, later)
        .expect("task completes");
    assert_eq!(updated.steps[0].tasks[0].completed_at, Some(later));

    let reverted = store
        .set_task_status(
            &process.id,
            &step_id,
            &task_id,
            TaskStatus::InProgress,
            later + Duration::hours(1),
        )
        .expect("task reverts");
    assert_eq!(reverted.steps[0].tasks[0].completed_at, None);
}

#[test]
fn progress_percent_reflects_completed_steps() {
    let (mut store, process) = store_with_process();
    assert_eq!(store.get(&process.id).expect("present").progress_percent(), 0);

    let first_step = process.steps[0].id.clone();
    store
        .complete_step(&process.id, &first_step, kickoff())
        .expect("step completes");

    // 1 of 7 steps completed.
    assert_eq!(
        store.get(&process.id).expect("present").progress_percent(),
        14
    );
}
