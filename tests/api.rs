//! End-to-end tests of the user API over real HTTP.

use std::collections::HashSet;

use reqwest::StatusCode;
use sdk_rust::BackendClient;

mod common;

#[tokio::test]
async fn test_seeded_scenario() {
    let mut config = common::test_config();
    config.agent.enabled = false;
    let app = common::spawn_app(config, None).await;
    let client = BackendClient::new(&app.url());

    let list = client.list_users().await.unwrap();
    assert_eq!(list.count, 3);
    let names: Vec<_> = list.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);

    let dana = client.create_user("Dana", "Tester").await.unwrap();
    assert_eq!(dana.id, 4);

    let fetched = client.get_user(4).await.unwrap();
    assert_eq!(fetched, dana);
    assert_eq!(fetched.role, "Tester");

    let missing = client.get_user(99).await.unwrap_err();
    assert_eq!(missing.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        missing.to_string(),
        "service returned 404 Not Found: User not found"
    );

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "test-api");

    let info = client.info().await.unwrap();
    assert_eq!(info.service, "test-api");
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));

    assert_eq!(client.list_users().await.unwrap().count, 4);

    app.shutdown.trigger();
    app.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_bad_create_does_not_mutate_store() {
    let mut config = common::test_config();
    config.agent.enabled = false;
    let app = common::spawn_app(config, None).await;
    let http = reqwest::Client::new();

    for body in [r#"{"name":"NoRole"}"#, r#"{"role":"NoName"}"#, "{", "[]"] {
        let res = http
            .post(format!("{}/users", app.url()))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json: serde_json::Value = res.json().await.unwrap();
        assert!(json["error"].is_string());
    }

    assert_eq!(app.store.len(), 3);
    app.shutdown.trigger();
    app.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let mut config = common::test_config();
    config.agent.enabled = false;
    let app = common::spawn_app(config, None).await;

    let res = reqwest::get(format!("{}/users/alice", app.url())).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    app.shutdown.trigger();
    app.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_serial_creates_increase() {
    let mut config = common::test_config();
    config.agent.enabled = false;
    let app = common::spawn_app(config, None).await;
    let client = BackendClient::new(&app.url());

    let mut last = 3;
    for i in 0..20 {
        let user = client.create_user(&format!("user-{i}"), "Serial").await.unwrap();
        assert!(user.id > last);
        last = user.id;
    }

    let list = client.list_users().await.unwrap();
    assert_eq!(list.count, 23);
    let created: Vec<_> = list.users[3..].iter().map(|u| u.name.clone()).collect();
    let expected: Vec<_> = (0..20).map(|i| format!("user-{i}")).collect();
    assert_eq!(created, expected);

    app.shutdown.trigger();
    app.handle.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_assign_unique_ids() {
    let mut config = common::test_config();
    config.agent.enabled = false;
    let app = common::spawn_app(config, None).await;
    let url = app.url();

    let callers = 64;
    let tasks: Vec<_> = (0..callers)
        .map(|i| {
            let url = url.clone();
            tokio::spawn(async move {
                BackendClient::new(&url)
                    .create_user(&format!("parallel-{i}"), "Load")
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let id = task.await.unwrap();
        assert!(ids.insert(id), "duplicate id {id}");
    }

    let list = BackendClient::new(&url).list_users().await.unwrap();
    assert_eq!(list.count, 3 + callers);
    let listed: HashSet<_> = list.users.iter().map(|u| u.id).collect();
    assert_eq!(listed.len(), list.count);

    app.shutdown.trigger();
    app.handle.await.unwrap().unwrap();
}
