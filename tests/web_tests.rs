//! HTTP surface tests: the router is driven in-process with `tower::ServiceExt`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use legalchat::connector::api::Container;
use legalchat::connector::web::{create_router, AppState};
use legalchat::{InMemorySessionRepository, MockChatClient, SessionId};

fn app_with(client: MockChatClient) -> (Arc<Container>, Router) {
    let container = Arc::new(Container::with_parts(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(client),
    ));
    let router = create_router(AppState {
        container: container.clone(),
    });
    (container, router)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("Body is not JSON")
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn start_session(container: &Container) -> SessionId {
    container
        .session_use_case()
        .start()
        .await
        .expect("Failed to start session")
}

#[tokio::test]
async fn test_root_redirects_to_new_session() {
    let (container, app) = app_with(MockChatClient::new());

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/session/"));
    assert_eq!(
        container.session_use_case().active_count().await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_form_submit_appends_both_turns_and_redirects() {
    let (container, app) = app_with(MockChatClient::with_reply("It covers cheating."));
    let id = start_session(&container).await;

    let response = app
        .clone()
        .oneshot(form_post(
            &format!("/session/{}/ask", id),
            "question=What+is+Section+420+IPC%3F&domain=ipc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        format!("/session/{}?domain=ipc", id)
    );

    let response = app
        .oneshot(get(&format!("/api/sessions/{}/messages", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let messages = body_json(response).await;
    assert_eq!(messages.as_array().unwrap().len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "What is Section 420 IPC?");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "It covers cheating.");
}

#[tokio::test]
async fn test_page_renders_history_and_selected_domain() {
    let (container, app) = app_with(MockChatClient::with_reply("Yes, under the IT Act."));
    let id = start_session(&container).await;
    container
        .submit_use_case()
        .execute(id, "Is phishing <illegal>?", legalchat::LegalDomain::Cyber)
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/session/{}?domain=cyber", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Indian Legal Law Chatbot"));
    assert!(html.contains("Is phishing &lt;illegal&gt;?"));
    assert!(html.contains("Yes, under the IT Act."));
    assert!(html.contains("<option value=\"cyber\" selected>"));
}

#[tokio::test]
async fn test_failed_fetch_returns_bad_gateway_page_with_orphan() {
    let (container, app) = app_with(MockChatClient::failing("RESOURCE_EXHAUSTED"));
    let id = start_session(&container).await;

    let response = app
        .oneshot(form_post(
            &format!("/session/{}/ask", id),
            "question=Can+I+get+bail%3F&domain=crpc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_string(response).await;
    assert!(html.contains("RESOURCE_EXHAUSTED"));
    assert!(html.contains("value=\"Can I get bail?\""));

    let session = container.session_use_case().snapshot(id).await.unwrap();
    assert_eq!(session.len(), 1);
    assert!(session.has_unanswered_question());
}

#[tokio::test]
async fn test_blank_form_submit_changes_nothing() {
    let (container, app) = app_with(MockChatClient::new());
    let id = start_session(&container).await;

    let response = app
        .oneshot(form_post(&format!("/session/{}/ask", id), "question=+++"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(container
        .session_use_case()
        .transcript(id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_json_api_submit() {
    let (container, app) = app_with(MockChatClient::with_reply("Consult the Rent Control Act."));
    let id = start_session(&container).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/sessions/{}/messages", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"question":"Can my landlord evict me?","domain":"Property Law"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "answered");
    assert_eq!(json["reply"], "Consult the Rent Control Act.");
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_json_submit_without_question_is_bad_request() {
    let (container, app) = app_with(MockChatClient::new());
    let id = start_session(&container).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/sessions/{}/messages", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("question"));
}

#[tokio::test]
async fn test_idle_sessions_from_root_visits_expire() {
    let (container, app) = app_with(MockChatClient::new());

    for _ in 0..5 {
        let response = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    let response = app.clone().oneshot(get("/")).await.unwrap();
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        container.session_use_case().active_count().await.unwrap(),
        6
    );

    let expired = container
        .session_use_case()
        .expire_idle(Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(expired, 6);

    let response = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (_, app) = app_with(MockChatClient::new());

    let response = app
        .oneshot(get(&format!("/session/{}", SessionId::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_domain_is_bad_request() {
    let (container, app) = app_with(MockChatClient::new());
    let id = start_session(&container).await;

    let response = app
        .oneshot(form_post(
            &format!("/session/{}/ask", id),
            "question=hello&domain=maritime",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_session_redirects_home() {
    let (container, app) = app_with(MockChatClient::new());
    let id = start_session(&container).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/session/{}/end", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert_eq!(
        container.session_use_case().active_count().await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_domains_endpoint_lists_all() {
    let (_, app) = app_with(MockChatClient::new());

    let response = app.oneshot(get("/api/domains")).await.unwrap();
    let json = body_json(response).await;
    let domains = json.as_array().unwrap();

    assert_eq!(domains.len(), 10);
    assert_eq!(domains[0]["label"], "All Laws");
    assert_eq!(domains[1]["slug"], "ipc");
}
