use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

mod common;

#[test]
fn e2e_memory_crud_scenario() {
    let data_dir = TempDir::new().expect("temp dir");
    let server = common::spawn_server(&data_dir, &["--storage", "memory"]);
    let http = common::client();

    // Empty collection is an empty array, not an error
    let resp = http.get(server.url("/capybaras")).send().expect("list");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().unwrap(), json!([]));

    let resp = http
        .post(server.url("/capybaras"))
        .json(&json!({ "name": "Fluffy" }))
        .send()
        .expect("create");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.json::<Value>().unwrap(), json!({ "id": 1, "name": "Fluffy" }));

    let resp = http.get(server.url("/capybaras/1")).send().expect("get");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().unwrap(), json!({ "id": 1, "name": "Fluffy" }));

    let resp = http
        .put(server.url("/capybaras/1"))
        .json(&json!({ "name": "Chonky" }))
        .send()
        .expect("update");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().unwrap(), json!({ "id": 1, "name": "Chonky" }));

    let resp = http.delete(server.url("/capybaras/1")).send().expect("delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().unwrap().is_empty());

    let resp = http.get(server.url("/capybaras/1")).send().expect("get deleted");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().unwrap(),
        json!({ "message": "Capybara not found" })
    );

    // Ids are not reused after deletion
    let resp = http
        .post(server.url("/capybaras"))
        .json(&json!({ "name": "Nibbles" }))
        .send()
        .expect("create after delete");
    assert_eq!(resp.json::<Value>().unwrap()["id"], 2);
}

#[test]
fn e2e_memory_rejects_nameless_creates() {
    let data_dir = TempDir::new().expect("temp dir");
    let server = common::spawn_server(&data_dir, &["--storage", "memory"]);
    let http = common::client();

    for body in [json!({}), json!({ "name": "" })] {
        let resp = http
            .post(server.url("/capybaras"))
            .json(&body)
            .send()
            .expect("create");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.json::<Value>().unwrap(),
            json!({ "message": "Name is required" })
        );
    }

    let list = http
        .get(server.url("/capybaras"))
        .send()
        .expect("list")
        .json::<Vec<Value>>()
        .unwrap();
    assert!(list.is_empty());

    let resp = http
        .put(server.url("/capybaras/5"))
        .json(&json!({}))
        .send()
        .expect("update missing");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn e2e_docs_are_reachable() {
    let data_dir = TempDir::new().expect("temp dir");
    let server = common::spawn_server(&data_dir, &["--storage", "memory"]);
    let http = common::client();

    let page = http.get(server.url("/api-docs")).send().expect("docs page");
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.text().unwrap().contains("swagger-ui"));

    let doc = http
        .get(server.url("/api-docs/openapi.json"))
        .send()
        .expect("openapi")
        .json::<Value>()
        .unwrap();
    assert!(doc["paths"]["/capybaras/{id}"]["put"].is_object());
}
