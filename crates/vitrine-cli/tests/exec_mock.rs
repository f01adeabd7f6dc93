//! End-to-end exec-mode flows against a mock store.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRUSTED_ORIGIN: &str = "https://app.example.com";

fn products_body() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Chair", "created_at": "2024-01-02T00:00:00Z"},
        {"id": 2, "name": "Desk", "created_at": "2024-01-01T00:00:00Z"}
    ])
}

fn vitrine(server: &MockServer, home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vitrine");
    cmd.env("VITRINE_HOME", home.path())
        .env("VITRINE_STORE_URL", server.uri())
        .env("VITRINE_ANON_KEY", "anon-test")
        .env("VITRINE_PARENT_ORIGIN", TRUSTED_ORIGIN)
        .env_remove("VITRINE_AUTH_TOKEN");
    cmd
}

#[tokio::test]
async fn exec_lists_products_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-test"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let output = vitrine(&server, &home)
        .args(["exec", "--token", "tok123"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("APP_LOADED"), "missing APP_LOADED:\n{stdout}");
    let chair = stdout.find("Chair").expect("Chair listed");
    let desk = stdout.find("Desk").expect("Desk listed");
    assert!(chair < desk, "newest product should come first:\n{stdout}");
    assert!(stdout.contains("02/01/2024"));
}

#[tokio::test]
async fn exec_add_trims_name_notifies_and_reloads() {
    let server = MockServer::start().await;

    // Initial load, then the post-add reload sees the new product.
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!({"name": "Lamp"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Lamp", "created_at": "2024-01-03T00:00:00Z"},
            {"id": 1, "name": "Chair", "created_at": "2024-01-02T00:00:00Z"},
            {"id": 2, "name": "Desk", "created_at": "2024-01-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    vitrine(&server, &home)
        .args(["exec", "--token", "tok123", "--add", "  Lamp  "])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("SHOW_NOTIFICATION [success] Produto adicionado!")
                .and(predicate::str::contains("- Lamp (03/01/2024)")),
        );
}

#[tokio::test]
async fn exec_load_failure_surfaces_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "permission denied"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    vitrine(&server, &home)
        .args(["exec", "--token", "tok123"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Falha ao carregar produtos: permission denied")
                .and(predicate::str::contains(
                    "SHOW_NOTIFICATION [error] Erro: permission denied",
                )),
        );
}

#[tokio::test]
async fn exec_ignores_untrusted_origin() {
    let server = MockServer::start().await;
    // No request may reach the store; verified on server drop.
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    vitrine(&server, &home)
        .args([
            "exec",
            "--token",
            "tok123",
            "--origin",
            "https://evil.example.com",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Aguardando Autenticação")
                .and(predicate::str::contains("Chair").not()),
        );
}

#[tokio::test]
async fn exec_empty_token_reports_credential_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    vitrine(&server, &home)
        .args(["exec", "--empty-token"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Token de autenticação não recebido.")
                .and(predicate::str::contains("Aguardando Autenticação")),
        );
}
