use super::*;
use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

impl MockResponse {
    fn json(status: StatusCode, value: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    fn bytes(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: body.to_vec(),
        }
    }

    fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.as_bytes().to_vec(),
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockState {
    async fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().await.clone()
    }
}

async fn handle_scripted(
    State(state): State<MockState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().await.push((path.clone(), body));
    match state.responses.lock().await.get(&path).cloned() {
        Some(scripted) => (
            scripted.status,
            [(header::CONTENT_TYPE, scripted.content_type)],
            scripted.body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_summarizer_server(
    responses: Vec<(&str, MockResponse)>,
) -> Result<(String, MockState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = MockState::default();
    {
        let mut scripted = state.responses.lock().await;
        for (path, response) in responses {
            scripted.insert(path.to_string(), response);
        }
    }
    let app = Router::new()
        .route(SUMMARIZE_PATH, post(handle_scripted))
        .route(EXTRACT_DIAGRAMS_PATH, post(handle_scripted))
        .route(DOWNLOAD_PATH, post(handle_scripted))
        .route(CONVERT_DIAGRAM_PATH, post(handle_scripted))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn summarize_posts_news_text_and_decodes_summary() {
    let (server_url, state) = spawn_summarizer_server(vec![(
        SUMMARIZE_PATH,
        MockResponse::json(StatusCode::OK, json!({ "summary": "## Summary\n..." })),
    )])
    .await
    .expect("spawn server");
    let service = HttpSummaryService::new(format!("{server_url}/"));

    let summary = service
        .summarize("Company X announced...")
        .await
        .expect("summarize");

    assert_eq!(summary, "## Summary\n...");
    assert_eq!(
        state.requests().await,
        vec![(
            SUMMARIZE_PATH.to_string(),
            json!({ "news_text": "Company X announced..." })
        )]
    );
}

#[tokio::test]
async fn rejected_request_carries_server_message() {
    let (server_url, _state) = spawn_summarizer_server(vec![(
        SUMMARIZE_PATH,
        MockResponse::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "server busy" }),
        ),
    )])
    .await
    .expect("spawn server");
    let service = HttpSummaryService::new(server_url);

    let err = service.summarize("text").await.expect_err("should fail");
    assert_eq!(
        err,
        ServiceError::Rejected {
            status: 500,
            message: Some("server busy".to_string())
        }
    );
}

#[tokio::test]
async fn rejected_request_without_json_body_has_no_message() {
    let (server_url, _state) = spawn_summarizer_server(vec![(
        DOWNLOAD_PATH,
        MockResponse::text(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
    )])
    .await
    .expect("spawn server");
    let service = HttpSummaryService::new(server_url);

    let err = service
        .download_summary("# summary")
        .await
        .expect_err("should fail");
    assert_eq!(err, ServiceError::rejected(502, None));
}

#[tokio::test]
async fn unexpected_success_body_is_a_decode_error() {
    let (server_url, _state) = spawn_summarizer_server(vec![(
        EXTRACT_DIAGRAMS_PATH,
        MockResponse::json(StatusCode::OK, json!({ "diagrams": [] })),
    )])
    .await
    .expect("spawn server");
    let service = HttpSummaryService::new(server_url);

    let err = service
        .extract_diagrams("# summary")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ServiceError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let service = HttpSummaryService::new(format!("http://{addr}"));

    let err = service.summarize("text").await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn extract_and_convert_use_expected_payloads() {
    let (server_url, state) = spawn_summarizer_server(vec![
        (
            EXTRACT_DIAGRAMS_PATH,
            MockResponse::json(
                StatusCode::OK,
                json!({ "mermaid_diagrams": ["graph TD; A-->B"] }),
            ),
        ),
        (
            CONVERT_DIAGRAM_PATH,
            MockResponse::bytes("image/png", b"\x89PNG\r\n"),
        ),
        (
            DOWNLOAD_PATH,
            MockResponse::bytes("text/markdown", "# 要約\n".as_bytes()),
        ),
    ])
    .await
    .expect("spawn server");
    let service = HttpSummaryService::new(server_url);

    let diagrams = service.extract_diagrams("# s").await.expect("extract");
    assert_eq!(diagrams, vec!["graph TD; A-->B".to_string()]);

    let png = service
        .convert_diagram("graph TD; A-->B", 0)
        .await
        .expect("convert");
    assert_eq!(png, b"\x89PNG\r\n".to_vec());

    let markdown = service.download_summary("# 要約\n").await.expect("download");
    assert_eq!(markdown, "# 要約\n".as_bytes().to_vec());

    let requests = state.requests().await;
    assert_eq!(
        requests,
        vec![
            (EXTRACT_DIAGRAMS_PATH.to_string(), json!({ "summary": "# s" })),
            (
                CONVERT_DIAGRAM_PATH.to_string(),
                json!({ "mermaid_code": "graph TD; A-->B", "diagram_index": 0 })
            ),
            (DOWNLOAD_PATH.to_string(), json!({ "summary": "# 要約\n" })),
        ]
    );
}

#[derive(Default)]
struct PageView {
    output: String,
    enabled: HashMap<Control, bool>,
    labels: HashMap<Control, String>,
    saved: Vec<String>,
}

impl SummaryView for PageView {
    fn show_loading(&mut self, text: &str) {
        self.output = text.to_string();
    }

    fn render_summary(&mut self, _markdown: &str, blocks: &[SummaryBlock]) {
        self.output = blocks
            .iter()
            .map(SummaryBlock::plain_text)
            .collect::<Vec<_>>()
            .join("\n");
    }

    fn show_error(&mut self, message: &str) {
        self.output = message.to_string();
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        self.enabled.insert(control, enabled);
    }

    fn set_label(&mut self, control: Control, label: &str) {
        self.labels.insert(control, label.to_string());
    }

    fn notify(&mut self, _message: &str) {}

    fn show_diagram_menu(&mut self, _entries: &[DiagramMenuEntry]) {}

    fn hide_diagram_menu(&mut self) {}

    fn update_diagram_entry(&mut self, _index: usize, _label: &str, _enabled: bool) {}

    fn save_file(&mut self, filename: &str, _bytes: &[u8]) -> io::Result<PathBuf> {
        self.saved.push(filename.to_string());
        Ok(PathBuf::from(filename))
    }
}

#[tokio::test]
async fn end_to_end_summary_with_one_diagram() {
    let (server_url, _state) = spawn_summarizer_server(vec![
        (
            SUMMARIZE_PATH,
            MockResponse::json(StatusCode::OK, json!({ "summary": "## Summary\n..." })),
        ),
        (
            EXTRACT_DIAGRAMS_PATH,
            MockResponse::json(
                StatusCode::OK,
                json!({ "mermaid_diagrams": ["graph TD; A-->B"] }),
            ),
        ),
        (CONVERT_DIAGRAM_PATH, MockResponse::bytes("image/png", b"png")),
    ])
    .await
    .expect("spawn server");
    let mut controller = connect(
        &server_url,
        Messages::new(Locale::Ja),
        PageView::default(),
    )
    .expect("connect");

    let outcome = controller.submit_summary("Company X announced...").await;
    assert_eq!(outcome, SubmitOutcome::Rendered { diagram_count: 1 });
    assert!(controller.view().output.starts_with("## Summary"));
    assert_eq!(controller.view().enabled.get(&Control::DiagramMenu), Some(&true));
    assert_eq!(
        controller.view().labels.get(&Control::DiagramMenu).map(String::as_str),
        Some("図をPNGで保存（1個）")
    );

    controller.export_diagram(0).await;
    assert_eq!(controller.view().saved, vec!["diagram_1.png".to_string()]);
}

#[tokio::test]
async fn end_to_end_server_busy_keeps_download_disabled() {
    let (server_url, state) = spawn_summarizer_server(vec![(
        SUMMARIZE_PATH,
        MockResponse::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "server busy" }),
        ),
    )])
    .await
    .expect("spawn server");
    let mut controller = connect(
        &server_url,
        Messages::new(Locale::Ja),
        PageView::default(),
    )
    .expect("connect");

    let outcome = controller.submit_summary("Company X announced...").await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(controller.view().output, "server busy");
    assert_eq!(
        controller.view().enabled.get(&Control::DownloadSummary),
        Some(&false)
    );
    assert_eq!(state.requests().await.len(), 1);
}

#[test]
fn connect_rejects_invalid_server_url() {
    let result = connect(
        "ftp://example.com",
        Messages::default(),
        PageView::default(),
    );
    assert!(result.is_err());
}
