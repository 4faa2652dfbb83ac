use std::sync::Arc;
use std::time::Duration;

use kindling::{
    AppSession, ConversationId, ExploreView, FixedScores, KindlingConfig, MessagingView,
    MockService, Page, PersonalInfo, Sender, StorageError, SubmitResult, SwipeAction, Tier, User,
    VerificationForm, VerificationOutcome, VerificationStep,
};

fn instant_service() -> Arc<MockService> {
    Arc::new(MockService::seeded(KindlingConfig::instant()))
}

fn complete_info() -> PersonalInfo {
    PersonalInfo {
        name: "Jordan".to_string(),
        birthdate: "1994-09-30".to_string(),
        gender: "female".to_string(),
        interests: "Surfing, Baking".to_string(),
        bio: "Looking for someone to share waves with.".to_string(),
    }
}

fn run_form(scores: &mut FixedScores) -> VerificationOutcome {
    let mut form = VerificationForm::default();
    form.add_photos(["front.jpg"]);
    assert_eq!(
        form.submit(scores).unwrap(),
        SubmitResult::Advanced(VerificationStep::PersonalInfo)
    );
    form.set_personal_info(complete_info());
    assert_eq!(
        form.submit(scores).unwrap(),
        SubmitResult::Advanced(VerificationStep::Review)
    );
    match form.submit(scores).unwrap() {
        SubmitResult::Completed(outcome) => outcome,
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn verification_unlocks_session_and_sets_score() {
    let mut session = AppSession::new(User::new("Jordan"));
    session.navigate(Page::Messages);
    assert_eq!(session.visible_page(), Page::Verification);
    assert!(!session.shows_navigation());

    // ai 9, community average 8 -> 8.5 rounds to 9
    let outcome = run_form(&mut FixedScores::new(9, vec![8]));
    assert_eq!(outcome.score(), 9);

    let applied = session.apply_verification(outcome.score());
    assert!(applied.is_verified());
    assert!(session.is_verified());
    assert_eq!(session.user().hotness_score, 9);
    assert_eq!(session.visible_page(), Page::Messages);
    assert!(session.shows_navigation());
}

#[test]
fn verification_below_threshold_stays_locked() {
    let mut session = AppSession::new(User::new("Jordan"));

    let outcome = run_form(&mut FixedScores::new(7, vec![7]));
    assert_eq!(outcome.score(), 7);

    let applied = session.apply_verification(outcome.score());
    assert!(!applied.is_verified());
    assert!(matches!(applied, VerificationOutcome::Rejected { score: 7, .. }));
    assert!(!session.is_verified());
    assert_eq!(session.user().hotness_score, 0);
    assert_eq!(session.visible_page(), Page::Verification);
}

#[test]
fn incomplete_step_does_not_advance() {
    let mut form = VerificationForm::default();
    let mut scores = FixedScores::new(9, vec![9]);
    assert!(form.submit(&mut scores).is_err());
    assert_eq!(form.step(), VerificationStep::Photos);

    form.add_photos(["front.jpg"]);
    form.submit(&mut scores).unwrap();
    form.set_personal_info(PersonalInfo {
        bio: "   ".to_string(),
        ..complete_info()
    });
    assert!(form.submit(&mut scores).is_err());
    assert_eq!(form.step(), VerificationStep::PersonalInfo);
}

#[tokio::test]
async fn explore_swipes_are_logged_in_order() {
    let service = instant_service();
    let mut explore = ExploreView::new(Arc::clone(&service));

    assert!(explore.like().await.unwrap_err().is_validation());

    let first = explore.load().unwrap().id;
    explore.like().await.unwrap();
    let second = explore.current().unwrap().id;
    explore.reject().await.unwrap();

    let log = service.action_log().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].profile_id, first);
    assert_eq!(log[0].action, SwipeAction::Like);
    assert_eq!(log[1].profile_id, second);
    assert_eq!(log[1].action, SwipeAction::Reject);
    assert_eq!(explore.history().len(), 2);
}

#[tokio::test]
async fn messaging_flow_updates_thread_and_list() {
    let service = instant_service();
    let mut view = MessagingView::new(Arc::clone(&service));

    let rows = view.load().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Sarah");
    assert_eq!(rows[0].unread_count, 2);

    let thread = view.select(ConversationId(1)).unwrap();
    assert_eq!(thread.len(), 3);
    assert!(thread.iter().any(|m| m.sender == Sender::peer("Sarah")));
    assert_eq!(view.peer().unwrap().first_name(), "Sarah");
    assert_eq!(view.conversations()[0].unread_count, 0);

    let suggestions = view.suggestions().await.unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);

    view.apply_suggestion(&suggestions[0]);
    view.push_emoji("!");
    let expected = format!("{}!", suggestions[0]);
    let sent = view.send_draft().await.unwrap();
    assert_eq!(sent.content, expected);
    assert!(sent.sender.is_you());
    assert!(view.draft().is_empty());

    assert_eq!(view.messages().len(), 4);
    assert_eq!(view.conversations()[0].last_message, expected);

    let stored = service.conversations().unwrap();
    assert_eq!(stored[0].last_message, expected);
    assert_eq!(stored[0].unread_count, 0);
    assert_eq!(service.messages(ConversationId(1)).unwrap().len(), 4);
}

#[tokio::test]
async fn blank_message_is_rejected_without_side_effects() {
    let service = instant_service();
    let mut view = MessagingView::new(Arc::clone(&service));
    view.load().unwrap();
    view.select(ConversationId(2)).unwrap();

    view.set_draft("   ");
    let err = view.send_draft().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(view.draft(), "   ");
    assert_eq!(view.messages().len(), 3);
    assert_eq!(service.messages(ConversationId(2)).unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_conversation_is_a_storage_error() {
    let mut view = MessagingView::new(instant_service());
    view.load().unwrap();
    let err = view.select(ConversationId(42)).unwrap_err();
    assert!(err.is_storage());
    assert!(matches!(
        err,
        kindling::KindlingError::Storage(StorageError::ConversationNotFound(ConversationId(42)))
    ));
    assert_eq!(view.selected(), None);
}

#[tokio::test(start_paused = true)]
async fn send_resolves_after_action_latency() {
    let service = Arc::new(MockService::seeded(KindlingConfig::default()));
    let start = tokio::time::Instant::now();
    service.send_message(ConversationId(3), "See you soon").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[test]
fn upgrade_keeps_verification_and_changes_hub_page() {
    let mut session = AppSession::new(User::new("Jordan"));
    session.apply_verification(8);
    session.navigate(Page::Hub);
    assert_eq!(session.visible_page(), Page::Hub);

    session.upgrade(Tier::Elite);
    assert!(session.is_verified());
    assert_eq!(session.visible_page(), Page::EliteHub);
    assert_eq!(session.user().invites, 25);
    assert!(session.user().premium);

    session.upgrade_from_str("platinum");
    assert_eq!(session.tier(), Tier::Free);
    assert_eq!(session.visible_page(), Page::Hub);
    assert!(!session.user().premium);
}
