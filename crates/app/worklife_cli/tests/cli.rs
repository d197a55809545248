use std::io::Write;

use assert_cmd::Command;
use axum::routing::post;
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::json;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("worklife_cli").expect("binary built");
    cmd.env_remove("LLM_PROVIDER").env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_name_and_version() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "worklife_cli ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn analyze_help_describes_strict_flag() {
    cli()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Substitute the fallback record when the parsed object has the wrong shape",
        ));
}

#[test]
fn normalize_prose_from_stdin_prints_fallback() {
    cli()
        .arg("normalize")
        .write_stdin("not json at all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Malformed JSON from model"))
        .stdout(predicate::str::contains("\"risk_level\": \"medium\""));
}

#[test]
fn normalize_extracts_fenced_object_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "Sure! ```json\n{{\"balanced\": false, \"risk_level\": \"high\", \"summary\": \"overworked\", \"signals\": [\"long hours\"], \"recommendations\": []}}\n```"
    )
    .expect("write temp file");

    cli()
        .args(["normalize", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"summary\": \"overworked\""))
        .stdout(predicate::str::contains("```").not());
}

#[test]
fn normalize_strict_replaces_incomplete_object() {
    cli()
        .args(["normalize", "--strict"])
        .write_stdin(r#"{"balanced": true}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("We could not parse your routine cleanly."));
}

#[test]
fn normalize_missing_file_fails() {
    cli()
        .args(["normalize", "--file", "/nonexistent/worklife/reply.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file"));
}

#[test]
fn analyze_with_unknown_provider_fails() {
    cli()
        .env("LLM_PROVIDER", "azure")
        .args(["analyze", "I work 12 hours a day"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider: azure"));
}

#[test]
fn probe_unreachable_server_fails() {
    cli()
        .args(["probe", "--url", "http://127.0.0.1:9/analyze", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Http"));
}

/// Start a chat-completions server that always replies with `content`.
async fn spawn_completion_server(content: &'static str) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind completion server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("completion server");
    });

    format!("http://{addr}/v1")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn analyze_logs_fallback_for_unparseable_reply() {
    let base_url = spawn_completion_server("not json at all").await;

    tokio::task::spawn_blocking(move || {
        cli()
            .env("LLM_PROVIDER", "ollama")
            .env("LLM_BASE_URL", &base_url)
            .env("RUST_LOG", "warn")
            .args(["analyze", "I work 12 hours a day"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Malformed JSON from model"))
            .stderr(predicate::str::contains(
                "model reply was not parseable, using fallback record",
            ))
            .stderr(predicate::str::contains("not json at all").not());
    })
    .await
    .expect("cli task");
}
