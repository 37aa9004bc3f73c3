//! Real OS signals drive a graceful shutdown.
//!
//! Signals are process-wide, so this file holds a single test and runs as
//! its own binary.

#![cfg(unix)]

use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal::unix::{signal, SignalKind};

use test_backend::agent::AgentClient;
use test_backend::lifecycle::{spawn_signal_listener, wait_for_signal, ShutdownSignal};
use test_backend::Shutdown;

mod common;

fn send_signal(name: &str) {
    let status = Command::new("kill")
        .args([format!("-{name}"), std::process::id().to_string()])
        .status()
        .expect("kill should run");
    assert!(status.success());
}

/// Signal this process until `shutdown` fires. The listener installs its
/// handlers asynchronously, so a single early signal could go unseen.
async fn signal_until_triggered(name: &str, shutdown: &Shutdown) {
    for _ in 0..50 {
        send_signal(name);
        if tokio::time::timeout(Duration::from_millis(100), shutdown.wait())
            .await
            .is_ok()
        {
            return;
        }
    }
    panic!("{name} never triggered shutdown");
}

#[tokio::test]
async fn test_termination_signals_shut_down_gracefully() {
    // Keep the default disposition (terminate the process) out of the way
    // for the whole test.
    let _sigterm_guard = signal(SignalKind::terminate()).unwrap();
    let _sigint_guard = signal(SignalKind::interrupt()).unwrap();

    let agent = Arc::new(common::RecordingAgent::default());
    let app = common::spawn_app(
        common::test_config(),
        Some(agent.clone() as Arc<dyn AgentClient>),
    )
    .await;
    let listener = spawn_signal_listener(app.shutdown.clone());

    let res = reqwest::get(format!("{}/healthz", app.url())).await.unwrap();
    assert_eq!(res.status(), 200);

    signal_until_triggered("TERM", &app.shutdown).await;
    assert!(app.shutdown.is_triggered());

    tokio::time::timeout(Duration::from_secs(5), app.handle)
        .await
        .expect("service should stop after SIGTERM")
        .unwrap()
        .unwrap();
    tokio::time::timeout(Duration::from_secs(1), listener)
        .await
        .expect("signal listener should exit")
        .unwrap();
    assert_eq!(agent.events().last(), Some(&"deregister"));

    let waiter = tokio::spawn(wait_for_signal());
    let mut received = None;
    for _ in 0..50 {
        send_signal("INT");
        tokio::time::sleep(Duration::from_millis(100)).await;
        if waiter.is_finished() {
            received = Some(waiter.await.unwrap().unwrap());
            break;
        }
    }
    assert_eq!(received, Some(ShutdownSignal::Interrupt));
}
