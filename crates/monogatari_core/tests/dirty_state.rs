use chrono::{TimeZone, Utc};
use monogatari_core::{
    Decision, DecisionHost, DirtyState, DirtyStateEngine, GateError, GateOutcome, OpenDocument,
    PendingAction,
};

#[derive(Default)]
struct ScriptedHost {
    decision: Option<Decision>,
    fail_save: bool,
    asked: Vec<PendingAction>,
    saves: usize,
}

impl ScriptedHost {
    fn answering(decision: Decision) -> Self {
        Self {
            decision: Some(decision),
            ..Self::default()
        }
    }
}

impl DecisionHost<OpenDocument> for ScriptedHost {
    type Error = std::io::Error;

    fn decide(&mut self, action: PendingAction) -> Decision {
        self.asked.push(action);
        self.decision.unwrap_or(Decision::Cancel)
    }

    fn save(&mut self, document: &mut OpenDocument) -> Result<(), Self::Error> {
        if self.fail_save {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        }
        document.save_text(Utc.with_ymd_and_hms(2025, 5, 5, 5, 5, 5).unwrap());
        self.saves += 1;
        Ok(())
    }
}

fn clean_starter() -> (OpenDocument, DirtyStateEngine) {
    let mut document = OpenDocument::starter();
    let mut engine = DirtyStateEngine::new();
    engine.reset_baseline(&mut document);
    (document, engine)
}

#[test]
fn state_follows_edits_and_reverts() {
    let (mut document, mut engine) = clean_starter();
    assert_eq!(DirtyStateEngine::new().state(&mut document), DirtyState::NoBaseline);
    assert_eq!(engine.state(&mut document), DirtyState::Clean);

    document.view.buffer.push_str("Once");
    assert_eq!(engine.state(&mut document), DirtyState::Dirty);

    document.view.buffer.clear();
    assert_eq!(engine.state(&mut document), DirtyState::Clean);

    document.project.book.title = "Tides".to_string();
    assert!(engine.has_unsaved_changes(&mut document));
    engine.reset_baseline(&mut document);
    assert!(!engine.has_unsaved_changes(&mut document));
}

#[test]
fn save_timestamp_alone_does_not_dirty() {
    let (mut document, engine) = clean_starter();
    document.save_text(Utc::now());
    assert!(document.project.book.last_saved.is_some());
    assert_eq!(engine.state(&mut document), DirtyState::Clean);
}

#[test]
fn clean_document_proceeds_without_asking() {
    let (mut document, mut engine) = clean_starter();
    let mut host = ScriptedHost::answering(Decision::Save);
    let mut ran = false;
    let outcome = engine
        .confirm_proceed_if_dirty(&mut document, &mut host, PendingAction::Quit, |_| ran = true)
        .unwrap();
    assert_eq!(outcome, GateOutcome::Proceeded);
    assert!(ran);
    assert!(host.asked.is_empty());
}

#[test]
fn cancel_keeps_everything() {
    let (mut document, mut engine) = clean_starter();
    document.view.buffer = "draft".to_string();
    let mut host = ScriptedHost::answering(Decision::Cancel);
    let mut ran = false;
    let outcome = engine
        .confirm_proceed_if_dirty(
            &mut document,
            &mut host,
            PendingAction::NewDocument,
            |_| ran = true,
        )
        .unwrap();
    assert_eq!(outcome, GateOutcome::Cancelled);
    assert!(!ran);
    assert_eq!(host.asked, vec![PendingAction::NewDocument]);
    assert_eq!(engine.state(&mut document), DirtyState::Dirty);
}

#[test]
fn discard_proceeds_without_saving() {
    let (mut document, mut engine) = clean_starter();
    document.view.buffer = "draft".to_string();
    let mut host = ScriptedHost::answering(Decision::Discard);
    let outcome = engine
        .confirm_proceed_if_dirty(
            &mut document,
            &mut host,
            PendingAction::OpenDocument,
            |doc| *doc = OpenDocument::default(),
        )
        .unwrap();
    assert_eq!(outcome, GateOutcome::DiscardedAndProceeded);
    assert_eq!(host.saves, 0);
    assert_eq!(document, OpenDocument::default());
}

#[test]
fn save_resets_baseline_before_proceeding() {
    let (mut document, mut engine) = clean_starter();
    document.view.buffer = "draft".to_string();
    let mut host = ScriptedHost::answering(Decision::Save);
    let mut body_when_proceeding = None;
    let baseline_before = engine.baseline().map(str::to_string);
    let outcome = engine
        .confirm_proceed_if_dirty(&mut document, &mut host, PendingAction::Quit, |doc| {
            body_when_proceeding = Some(doc.project.chapters.first_chapter().unwrap().body.clone());
        })
        .unwrap();
    assert_eq!(outcome, GateOutcome::SavedAndProceeded);
    assert_eq!(host.saves, 1);
    assert_eq!(body_when_proceeding.as_deref(), Some("draft"));
    assert_ne!(engine.baseline().map(str::to_string), baseline_before);
    assert_eq!(engine.state(&mut document), DirtyState::Clean);
}

#[test]
fn failed_save_stays_dirty_and_does_not_proceed() {
    let (mut document, mut engine) = clean_starter();
    document.view.buffer = "draft".to_string();
    let mut host = ScriptedHost {
        decision: Some(Decision::Save),
        fail_save: true,
        ..ScriptedHost::default()
    };
    let mut ran = false;
    let result =
        engine.confirm_proceed_if_dirty(&mut document, &mut host, PendingAction::Quit, |_| {
            ran = true
        });
    match result {
        Err(GateError::Save(err)) => assert_eq!(err.to_string(), "disk full"),
        other => panic!("expected save failure, got {other:?}"),
    }
    assert!(!ran);
    assert_eq!(engine.state(&mut document), DirtyState::Dirty);
}
