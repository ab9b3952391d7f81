//! Keypad Session
//!
//! This demo drives a calculator session with keypad labels and prints the
//! render snapshot after each evaluation.
//!
//! Key concepts:
//! - Translating keypad glyphs (`÷`, `×`, `=`) into key events
//! - Chaining from a previous result
//! - Error display and its timed recovery
//! - Re-selecting a history entry
//!
//! Run with: cargo run --example keypad_session
//! Set RUST_LOG=reckon=debug to see mode changes.

use reckon::core::{KeyEvent, Keypad};
use reckon::session::{Session, SessionError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

async fn type_keys(session: &Session, keypad: &Keypad, input: &str) -> Result<(), SessionError> {
    for entry in session.press_all(keypad.events_for(input)).await? {
        println!(
            "  [{}] {} = {}",
            entry.time_label(),
            entry.expression,
            entry.result
        );
    }
    let snapshot = session.snapshot().await;
    match &snapshot.expression_line {
        Some(line) => println!("  display: {:<12} ({line})", snapshot.display),
        None => println!("  display: {}", snapshot.display),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SessionError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let keypad = Keypad::standard();
    let session = Session::system();

    println!("=== Keypad Session ===\n");

    println!("Simple evaluation: 12 × 3.5 =");
    type_keys(&session, &keypad, "12×3.5=").await?;

    println!("\nChain from the result: − 2 =");
    type_keys(&session, &keypad, "-2=").await?;

    println!("\nStart over with a digit: (1 + 2) ÷ 4 =");
    type_keys(&session, &keypad, "C(1+2)÷4=").await?;

    println!("\nDivide by zero: 8 ÷ 0 =");
    type_keys(&session, &keypad, "8÷0=").await?;

    let delay = session.config().recovery_delay();
    tokio::time::sleep(delay + Duration::from_millis(50)).await;
    println!("  after {delay:?}: {}", session.snapshot().await.display);

    println!("\nRe-select the first history entry and add 1:");
    if let Some(first) = session.history().await.first() {
        session.select_entry(&first.id).await?;
    }
    session.press(KeyEvent::operator("+")).await?;
    type_keys(&session, &keypad, "1=").await?;

    let span = session.history_duration().await.unwrap_or_default();
    println!(
        "\nHistory ({} entries over {span:?}):",
        session.history().await.len()
    );
    for entry in session.history().await {
        println!("  {} = {}", entry.expression, entry.result);
    }

    session.clear_history().await;
    println!("\nAfter clearing: {} entries", session.history().await.len());

    Ok(())
}
