//! End-to-end session behaviour, including the timed error recovery.
//!
//! Time is paused so the recovery delay elapses deterministically.

use reckon::config::{CalculatorConfig, ConfigBuilder};
use reckon::core::{KeyEvent, KeyKind, Keypad, Mode};
use reckon::effects::FixedEnv;
use reckon::session::{Session, SessionError};
use std::time::Duration;
use tokio::time::sleep;

const JUST_AFTER: Duration = Duration::from_millis(1501);

fn session() -> Session<FixedEnv> {
    Session::new(CalculatorConfig::default(), FixedEnv::new(1_700_000_000_000, 1_000))
}

async fn type_keys(session: &Session<FixedEnv>, input: &str) {
    session
        .press_all(Keypad::standard().events_for(input))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn two_plus_two_records_history() {
    let session = session();
    type_keys(&session, "2+2").await;
    let entry = session.press(KeyEvent::equals()).await.unwrap().unwrap();

    assert_eq!(entry.expression, "2+2");
    assert_eq!(entry.result, "4");
    assert_eq!(entry.id, "entry-1");
    assert_eq!(entry.timestamp, 1_700_000_001_000);

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.display, "4");
    assert_eq!(snapshot.history, vec![entry]);
}

#[tokio::test(start_paused = true)]
async fn division_by_zero_recovers_after_delay() {
    let session = session();
    type_keys(&session, "10÷0=").await;

    let state = session.state().await;
    assert_eq!(state.display, "Error");
    assert_eq!(state.expression, "10/0");
    assert!(session.history().await.is_empty());

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(session.state().await.display, "Error");

    sleep(Duration::from_millis(501)).await;
    let state = session.state().await;
    assert_eq!(state.display, "10/0");
    assert_eq!(state.mode, Mode::Editing);
    assert!(!session.has_pending_recovery().await);
}

#[tokio::test(start_paused = true)]
async fn new_input_supersedes_pending_recovery() {
    let session = session();
    type_keys(&session, "7×=").await;
    assert_eq!(session.state().await.display, "Error");

    sleep(Duration::from_millis(1000)).await;
    type_keys(&session, "3").await;
    assert!(!session.has_pending_recovery().await);

    sleep(Duration::from_secs(2)).await;
    let state = session.state().await;
    assert_eq!(state.display, "3");
    assert_eq!(state.expression, "3");
}

#[tokio::test(start_paused = true)]
async fn clear_supersedes_pending_recovery() {
    let session = session();
    type_keys(&session, "(1+=").await;
    session.press(KeyEvent::clear()).await.unwrap();

    sleep(JUST_AFTER).await;
    let state = session.state().await;
    assert_eq!(state.display, "0");
    assert!(state.expression.is_empty());
    assert_eq!(state.mode, Mode::Fresh);
}

#[tokio::test(start_paused = true)]
async fn ignored_keys_keep_recovery_scheduled() {
    let session = session();
    type_keys(&session, "5-=").await;
    session
        .press(KeyEvent::new("memory", KeyKind::Function))
        .await
        .unwrap();
    assert!(session.has_pending_recovery().await);

    sleep(JUST_AFTER).await;
    assert_eq!(session.state().await.display, "5-");
}

#[tokio::test(start_paused = true)]
async fn repeated_failure_restarts_the_delay() {
    let session = session();
    type_keys(&session, "9/0=").await;

    sleep(Duration::from_millis(1000)).await;
    session.press(KeyEvent::equals()).await.unwrap();

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(session.state().await.display, "Error");

    sleep(Duration::from_millis(501)).await;
    assert_eq!(session.state().await.display, "9/0");
}

#[tokio::test(start_paused = true)]
async fn equals_on_empty_expression_does_nothing() {
    let session = session();
    let before = session.state().await;

    let entry = session.press(KeyEvent::equals()).await.unwrap();
    assert!(entry.is_none());
    assert!(session.state().await.same_view(&before));
    assert!(session.history().await.is_empty());
    assert!(!session.has_pending_recovery().await);
}

#[tokio::test(start_paused = true)]
async fn post_result_operator_chains_and_number_restarts() {
    let session = session();
    type_keys(&session, "2+2=").await;

    type_keys(&session, "+").await;
    let state = session.state().await;
    assert_eq!(state.display, "4+");
    assert_eq!(state.expression, "4+");
    assert!(state.last_result.is_none());

    let other = self::session();
    type_keys(&other, "2+2=5").await;
    let state = other.state().await;
    assert_eq!(state.display, "5");
    assert_eq!(state.expression, "5");
}

#[tokio::test(start_paused = true)]
async fn chained_evaluation_multiplies_previous_result() {
    let session = session();
    type_keys(&session, "2+2=×3=").await;

    let history = session.history().await;
    assert_eq!(session.state().await.display, "12");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].expression, "4*3");
    assert_eq!(history[1].result, "12");
}

#[tokio::test(start_paused = true)]
async fn selecting_history_reloads_result() {
    let session = session();
    type_keys(&session, "6×7=C1÷4=").await;

    let history = session.history().await;
    assert_eq!(history.len(), 2);

    let state = session.select_entry(&history[0].id).await.unwrap();
    assert_eq!(state.display, "42");
    assert_eq!(state.expression, "42");
    assert_eq!(state.last_result.as_deref(), Some("42"));

    type_keys(&session, "+0.25=").await;
    assert_eq!(session.state().await.display, "42.25");
}

#[tokio::test(start_paused = true)]
async fn selecting_history_cancels_pending_recovery() {
    let session = session();
    type_keys(&session, "1+1=").await;
    let id = session.history().await[0].id.clone();

    type_keys(&session, "÷0=").await;
    assert_eq!(session.state().await.display, "Error");

    session.select_entry(&id).await.unwrap();
    sleep(JUST_AFTER).await;
    assert_eq!(session.state().await.display, "2");
}

#[tokio::test(start_paused = true)]
async fn unknown_selection_keeps_recovery_scheduled() {
    let session = session();
    type_keys(&session, "10÷0=").await;

    assert!(session.select_entry("missing").await.is_err());
    assert!(session.has_pending_recovery().await);

    sleep(JUST_AFTER).await;
    assert_eq!(session.state().await.display, "10/0");
}

#[tokio::test(start_paused = true)]
async fn history_duration_spans_entries() {
    let session = session();
    assert!(session.history_duration().await.is_none());

    type_keys(&session, "1+1=2+2=3+3=").await;
    assert_eq!(
        session.history_duration().await,
        Some(Duration::from_millis(2_000))
    );
}

#[tokio::test(start_paused = true)]
async fn selecting_unknown_entry_is_an_error() {
    let session = session();
    let result = session.select_entry("nope").await;
    assert_eq!(
        result,
        Err(SessionError::UnknownEntry {
            id: "nope".to_string()
        })
    );
}

#[tokio::test(start_paused = true)]
async fn clearing_history_leaves_empty_view() {
    let session = session();
    type_keys(&session, "1+1=2+2=3+3=").await;
    assert_eq!(session.history().await.len(), 3);

    session.clear_history().await;
    let snapshot = session.snapshot().await;
    assert!(snapshot.history.is_empty());
    assert_eq!(snapshot.display, "6");
}

#[tokio::test(start_paused = true)]
async fn custom_delay_is_honoured() {
    let config = ConfigBuilder::new()
        .recovery_delay(Duration::from_millis(200))
        .build()
        .unwrap();
    let session = Session::new(config, FixedEnv::default());
    type_keys(&session, "8*=").await;

    sleep(Duration::from_millis(201)).await;
    assert_eq!(session.state().await.display, "8*");
}

#[tokio::test(start_paused = true)]
async fn custom_precision_is_honoured() {
    let config = ConfigBuilder::new().decimal_places(3).build().unwrap();
    let session = Session::new(config, FixedEnv::default());
    type_keys(&session, "2÷3=").await;

    assert_eq!(session.state().await.display, "0.667");
}

#[tokio::test(start_paused = true)]
async fn open_paren_starts_a_fresh_expression() {
    let session = session();
    type_keys(&session, "(1+2)÷4=").await;
    assert_eq!(session.state().await.display, "0.75");

    type_keys(&session, "(2)=").await;
    let history = session.history().await;
    assert_eq!(history[1].expression, "(2)");
    assert_eq!(history[1].result, "2");
}

#[tokio::test(start_paused = true)]
async fn leading_operator_gets_implicit_zero() {
    let session = session();
    type_keys(&session, "-5=").await;

    let history = session.history().await;
    assert_eq!(history[0].expression, "0-5");
    assert_eq!(history[0].result, "-5");

    type_keys(&session, "-5=").await;
    assert_eq!(session.state().await.display, "-10");
}
