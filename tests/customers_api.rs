use std::sync::Arc;

use bytes::Bytes;
use customers_api::{Response, Router, app, customers::{Customer, Customers}};
use serde_json::{Value, json};

fn request(method: &str, path: &str, body: Option<Value>) -> http::Request<Bytes> {
    let builder = http::Request::builder().method(method).uri(path);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Bytes::from(body.to_string())),
        None => builder.body(Bytes::new()),
    };
    req.unwrap()
}

async fn send(router: &Router, method: &str, path: &str, body: Option<Value>) -> Response {
    router.handle(request(method, path, body)).await
}

fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

fn text_body(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

#[tokio::test]
async fn walkthrough_scenario() {
    let store = Customers::new();
    let router = app(&store);

    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "Al" }))).await;
    assert_eq!(res.status_code(), 400);
    assert!(store.is_empty());

    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "Alice" }))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!({ "id": 1, "name": "Alice" }));
    assert_eq!(store.len(), 1);

    let res = send(&router, "GET", "/api/customers/1", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!({ "id": 1, "name": "Alice" }));

    let res = send(&router, "GET", "/api/customers/99", None).await;
    assert_eq!(res.status_code(), 404);
    assert!(!res.body().is_empty());
}

#[tokio::test]
async fn create_assigns_next_id_and_grows_by_one() {
    let store = Customers::new();
    let router = app(&store);

    for name in ["customer1", "customer2", "customer3"] {
        let before = store.len();
        let res = send(&router, "POST", "/api/customers", Some(json!({ "name": name }))).await;
        assert_eq!(res.status_code(), 200);

        let created: Customer = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(created.id, before as u64 + 1);
        assert_eq!(created.name, name);
        assert_eq!(store.len(), before + 1);
    }
}

#[tokio::test]
async fn invalid_payloads_are_rejected_without_side_effects() {
    let store = Customers::new();
    store.create("Alice".into());
    let router = app(&store);

    let cases = [
        Some(json!({})),
        Some(json!({ "name": "" })),
        Some(json!({ "name": "Al" })),
        Some(json!({ "name": 42 })),
        Some(json!({ "name": "Alice", "age": 30 })),
        Some(json!(["Alice"])),
        None,
    ];

    for body in cases {
        let res = send(&router, "POST", "/api/customers", body.clone()).await;
        assert_eq!(res.status_code(), 400, "payload {body:?}");
        assert_eq!(res.header("content-type"), Some("application/json"));
        let error = json_body(&res);
        assert!(error["error"].as_str().is_some_and(|s| !s.is_empty()), "payload {body:?}");
    }

    assert_eq!(store.list(), vec![Customer { id: 1, name: "Alice".into() }]);
}

#[tokio::test]
async fn rule_violations_are_reported_per_field() {
    let router = app(&Customers::new());

    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "Al" }))).await;
    let error = json_body(&res);
    assert!(error["details"]["name"].is_array());

    let res = send(&router, "POST", "/api/customers", Some(json!({}))).await;
    let error = json_body(&res);
    assert!(error["details"]["name"].is_array());
}

#[tokio::test]
async fn name_length_counts_characters() {
    let store = Customers::new();
    let router = app(&store);

    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "Zoë" }))).await;
    assert_eq!(res.status_code(), 200);
    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "ëë" }))).await;
    assert_eq!(res.status_code(), 400);
    // Two code points, even though each takes two UTF-16 units.
    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "😀😀" }))).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn malformed_json_is_rejected_before_the_handler() {
    let store = Customers::new();
    let router = app(&store);

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/customers")
        .header("content-type", "application/json")
        .body(Bytes::from_static(b"{\"name\": \"Ali"))
        .unwrap();
    let res = router.handle(req).await;

    assert_eq!(res.status_code(), 400);
    assert_eq!(json_body(&res)["error"], "malformed JSON body");
    assert!(store.is_empty());
}

#[tokio::test]
async fn non_json_body_is_not_parsed() {
    let store = Customers::new();
    let router = app(&store);

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/customers")
        .header("content-type", "text/plain")
        .body(Bytes::from_static(b"{\"name\":\"Alice\"}"))
        .unwrap();
    let res = router.handle(req).await;

    assert_eq!(res.status_code(), 400);
    assert!(store.is_empty());
}

#[tokio::test]
async fn listing_is_ordered_and_idempotent() {
    let store = Customers::new();
    for name in ["customer1", "customer2", "customer3"] {
        store.create(name.into());
    }
    let router = app(&store);

    let first = send(&router, "GET", "/api/customers", None).await;
    let second = send(&router, "GET", "/api/customers", None).await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(first.body(), second.body());
    assert_eq!(
        json_body(&first),
        json!([
            { "id": 1, "name": "customer1" },
            { "id": 2, "name": "customer2" },
            { "id": 3, "name": "customer3" },
        ])
    );
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let router = app(&Customers::new());
    let res = send(&router, "GET", "/api/customers", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!([]));
}

#[tokio::test]
async fn ids_are_read_from_their_leading_digits() {
    let store = Customers::new();
    store.create("Alice".into());
    let router = app(&store);

    for path in ["/api/customers/1abc", "/api/customers/1.0", "/api/customers/+1"] {
        let res = send(&router, "GET", path, None).await;
        assert_eq!(res.status_code(), 200, "{path}");
        assert_eq!(json_body(&res), json!({ "id": 1, "name": "Alice" }), "{path}");
    }

    for path in ["/api/customers/abc", "/api/customers/-1", "/api/customers/x1"] {
        let res = send(&router, "GET", path, None).await;
        assert_eq!(res.status_code(), 404, "{path}");
        assert_eq!(text_body(&res), "The customer with the given ID was not found");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_sequential_ids() {
    const N: usize = 64;

    let store = Customers::new();
    let router = Arc::new(app(&store));

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..N {
        let router = Arc::clone(&router);
        tasks.spawn(async move {
            let body = json!({ "name": format!("customer{n}") });
            let res = send(&router, "POST", "/api/customers", Some(body)).await;
            assert_eq!(res.status_code(), 200);
            serde_json::from_slice::<Customer>(res.body()).unwrap().id
        });
    }

    let mut ids = Vec::with_capacity(N);
    while let Some(id) = tasks.join_next().await {
        ids.push(id.unwrap());
    }
    ids.sort_unstable();

    assert_eq!(store.len(), N);
    assert_eq!(ids, (1..=N as u64).collect::<Vec<_>>());
}

#[tokio::test]
async fn update_replaces_the_name() {
    let store = Customers::new();
    store.create("Alice".into());
    store.create("Bob".into());
    let router = app(&store);

    let res = send(&router, "PUT", "/api/customers/2", Some(json!({ "name": "Robert" }))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!({ "id": 2, "name": "Robert" }));
    assert_eq!(store.get(2).map(|c| c.name), Some("Robert".to_owned()));
}

#[tokio::test]
async fn update_checks_existence_before_the_payload() {
    let store = Customers::new();
    store.create("Alice".into());
    let router = app(&store);

    let res = send(&router, "PUT", "/api/customers/9", Some(json!({ "name": "x" }))).await;
    assert_eq!(res.status_code(), 404);

    let res = send(&router, "PUT", "/api/customers/1", Some(json!({ "name": "x" }))).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(store.get(1).map(|c| c.name), Some("Alice".to_owned()));
}

#[tokio::test]
async fn delete_returns_the_removed_record_and_ids_move_on() {
    let store = Customers::new();
    store.create("Alice".into());
    store.create("Bob".into());
    let router = app(&store);

    let res = send(&router, "DELETE", "/api/customers/2", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(&res), json!({ "id": 2, "name": "Bob" }));

    let res = send(&router, "DELETE", "/api/customers/2", None).await;
    assert_eq!(res.status_code(), 404);

    let res = send(&router, "POST", "/api/customers", Some(json!({ "name": "Carol" }))).await;
    assert_eq!(json_body(&res), json!({ "id": 3, "name": "Carol" }));
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let router = app(&Customers::new());

    let res = send(&router, "GET", "/api/orders", None).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(text_body(&res), "Cannot GET /api/orders");

    let res = send(&router, "POST", "/api/customers/1", None).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("GET, PUT, DELETE"));

    let res = send(&router, "PATCH", "/api/customers", None).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("GET, POST"));
}

#[tokio::test]
async fn root_and_health_routes() {
    let store = Customers::new();
    store.create("Alice".into());
    let router = app(&store);

    let res = send(&router, "GET", "/", None).await;
    assert_eq!(text_body(&res), "Hello There");

    let res = send(&router, "GET", "/healthz", None).await;
    assert_eq!(text_body(&res), "ok");

    let res = send(&router, "GET", "/readyz", None).await;
    assert_eq!(json_body(&res), json!({ "status": "ready", "customers": 1 }));
}

#[tokio::test]
async fn json_bodies_stay_unparsed_unless_enabled() {
    async fn echo(req: customers_api::Request) -> String {
        format!("{:?}", req.json())
    }

    let router = Router::new().post("/echo", echo);
    let res = send(&router, "POST", "/echo", Some(json!({ "name": "Alice" }))).await;
    assert_eq!(text_body(&res), "None");

    let router = Router::new().json_bodies().post("/echo", echo);
    let res = send(&router, "POST", "/echo", Some(json!({ "name": "Alice" }))).await;
    assert_ne!(text_body(&res), "None");
}

#[tokio::test]
async fn params_are_bound_by_name() {
    async fn show(req: customers_api::Request) -> String {
        format!("{}/{}", req.param("id").unwrap_or("-"), req.param("name").unwrap_or("-"))
    }

    let router = Router::new().get("/api/customers/:id/:name", show);
    let res = send(&router, "GET", "/api/customers/7/alice", None).await;
    assert_eq!(text_body(&res), "7/alice");
}
