//! End-to-end update handling tests
//!
//! Wires the real pipeline (Telegram client, completion engine, document
//! adapters, intake service) against a single wiremock server that plays
//! both the Bot API and the OpenAI-compatible provider, and drives it
//! through `handle_update` the way the polling task does.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ai_core::OpenAiCompletionEngine;
use application::IntakeService;
use application::ports::{CompletionPort, DocumentPort};
use infrastructure::{AppConfig, CompletionAdapter, DocumentAdapter};
use integration_telegram::{TelegramClient, TelegramClientConfig, Update};
use presentation_bot::handlers::{
    BEGIN_REPLY, DOCUMENT_PROGRESS_REPLY, EXTRACTION_FAILED_REPLY, FILING_FAILED_REPLY,
    GREETING_REPLY, PHOTO_PROGRESS_REPLY, UNSUPPORTED_FORMAT_REPLY, handle_update,
};
use presentation_bot::spawn_update_polling_task;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:TEST";

/// Minimal valid 1x1 grayscale PNG, used as the photo payload.
const ONE_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x3A,
    0x7E, 0x9B, 0x55, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x68,
    0x00, 0x00, 0x00, 0x82, 0x00, 0x81, 0x77, 0xCD, 0x72, 0xB6, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

// ============================================================================
// Test Stack
// ============================================================================

fn telegram_client(server: &MockServer) -> TelegramClient {
    let config = TelegramClientConfig::new(TOKEN)
        .with_api_base(server.uri())
        .with_timeout_ms(5_000);
    TelegramClient::new(config).expect("client config should be valid")
}

fn intake_service(server: &MockServer, output_dir: &Path) -> IntakeService {
    let config: AppConfig = serde_json::from_value(json!({
        "completion": {
            "base_url": format!("{}/v1", server.uri()),
            "default_model": "gpt-test",
            "timeout_ms": 5_000,
        },
        "filing": {
            "output_dir": output_dir.to_string_lossy(),
            "file_prefix": "Заявление",
        },
    }))
    .expect("test config should deserialize");

    let engine =
        OpenAiCompletionEngine::new(config.completion.clone()).expect("engine should build");
    let completion: Arc<dyn CompletionPort> = Arc::new(CompletionAdapter::new(Arc::new(engine)));
    let document: Arc<dyn DocumentPort> = Arc::new(DocumentAdapter::new(config.filing.clone()));
    IntakeService::new(completion, document)
}

// ============================================================================
// Fixtures
// ============================================================================

fn text_update(text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 700,
        "message": {
            "message_id": 10,
            "chat": {"id": 42},
            "text": text,
        }
    }))
    .expect("update fixture should deserialize")
}

fn document_update(file_name: Option<&str>) -> Update {
    let mut document = json!({"file_id": "doc-1"});
    if let Some(name) = file_name {
        document["file_name"] = json!(name);
    }
    serde_json::from_value(json!({
        "update_id": 701,
        "message": {
            "message_id": 11,
            "chat": {"id": 42},
            "document": document,
        }
    }))
    .expect("update fixture should deserialize")
}

fn photo_update() -> Update {
    serde_json::from_value(json!({
        "update_id": 702,
        "message": {
            "message_id": 12,
            "chat": {"id": 42},
            "photo": [
                {"file_id": "photo-small", "width": 90, "height": 60},
                {"file_id": "photo-big", "width": 1280, "height": 853},
            ],
        }
    }))
    .expect("update fixture should deserialize")
}

fn sent_message_response() -> serde_json::Value {
    json!({"ok": true, "result": {"message_id": 99, "chat": {"id": 42}}})
}

fn completion_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "model": "gpt-test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200},
    }))
}

async fn mount_send_message(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_document_download(server: &MockServer, file_path: &str, bytes: &[u8]) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getFile")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"file_id": "irrelevant", "file_path": file_path},
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/{file_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

/// Bodies of all `sendMessage` calls the server saw, in arrival order.
async fn sent_message_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().ends_with("/sendMessage"))
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

/// Body of the nth `/v1/chat/completions` call the server saw.
async fn completion_request_body(server: &MockServer, nth: usize) -> String {
    let requests = server.received_requests().await.unwrap_or_default();
    let body = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/chat/completions"))
        .nth(nth)
        .map(|r| String::from_utf8_lossy(&r.body).into_owned());
    body.expect("completion call should have been recorded")
}

fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| entries.count() == 0)
        .unwrap_or(false)
}

// ============================================================================
// Commands
// ============================================================================

mod command_tests {
    use super::*;

    #[tokio::test]
    async fn start_command_gets_the_greeting() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(json!({"chat_id": 42, "text": GREETING_REPLY})))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, text_update("/start")).await;
    }

    #[tokio::test]
    async fn begin_command_gets_the_instructions() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(json!({"chat_id": 42, "text": BEGIN_REPLY})))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, text_update("/begin")).await;
    }

    #[tokio::test]
    async fn unknown_commands_and_plain_text_are_ignored() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 0).await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, text_update("/help")).await;
        handle_update(&client, &intake, text_update("здравствуйте")).await;
    }
}

// ============================================================================
// Document Flow
// ============================================================================

mod document_tests {
    use super::*;

    #[tokio::test]
    async fn txt_upload_runs_both_stages_and_delivers_the_filing() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 1).await;
        mount_document_download(
            &server,
            "documents/doc-1.txt",
            "ФИО: Иванов Иван Иванович\nСумма долга: 1 500 000 рублей".as_bytes(),
        )
        .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Извлеки анкетные данные"))
            .respond_with(completion_response(
                "ФИО: Иванов Иван Иванович. ИНН 770708389333. Долг: 1 500 000 руб.",
            ))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Составь официальное заявление"))
            .respond_with(completion_response(
                "В Арбитражный суд города Москвы\n\nЗаявитель: Иванов Иван Иванович\n\nПрошу признать меня несостоятельным (банкротом).",
            ))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendDocument")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, document_update(Some("справка.txt"))).await;

        // Stage 1 embedded the uploaded text, stage 2 embedded stage 1's answer.
        let extraction_body = completion_request_body(&server, 0).await;
        assert!(extraction_body.contains("Иванов Иван Иванович"));
        let filing_body = completion_request_body(&server, 1).await;
        assert!(filing_body.contains("ИНН 770708389333"));

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains(DOCUMENT_PROGRESS_REPLY));

        // The delivered document is a DOCX named after the filing prefix.
        let requests = server.received_requests().await.unwrap_or_default();
        let send_document = requests
            .iter()
            .find(|r| r.url.path().ends_with("/sendDocument"))
            .expect("sendDocument should have been called");
        let body = String::from_utf8_lossy(&send_document.body);
        assert!(body.contains("Заявление_"));
        assert!(body.contains("PK"));

        // The transient local copy is gone after delivery.
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn csv_upload_is_rejected_without_any_processing() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(
                json!({"chat_id": 42, "text": UNSUPPORTED_FORMAT_REPLY}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, document_update(Some("долги.csv"))).await;
    }

    #[tokio::test]
    async fn document_without_a_file_name_is_rejected() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(
                json!({"chat_id": 42, "text": UNSUPPORTED_FORMAT_REPLY}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, document_update(None)).await;
    }

    #[tokio::test]
    async fn extraction_provider_fault_sends_one_failure_reply() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 2).await;
        mount_document_download(&server, "documents/doc-1.txt", "немного текста".as_bytes())
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendDocument")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, document_update(Some("справка.txt"))).await;

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains(DOCUMENT_PROGRESS_REPLY));
        assert!(messages[1].contains(EXTRACTION_FAILED_REPLY));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn filing_provider_fault_sends_the_filing_failure_reply() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 2).await;
        mount_document_download(&server, "documents/doc-1.txt", "немного текста".as_bytes())
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Извлеки анкетные данные"))
            .respond_with(completion_response("ФИО: Иванов"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Составь официальное заявление"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendDocument")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, document_update(Some("справка.txt"))).await;

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains(FILING_FAILED_REPLY));
        assert!(dir_is_empty(dir.path()));
    }
}

// ============================================================================
// Photo Flow
// ============================================================================

mod photo_tests {
    use super::*;

    #[tokio::test]
    async fn photo_upload_uses_the_largest_size_and_a_multimodal_prompt() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 1).await;

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .and(body_partial_json(json!({"file_id": "photo-big"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"file_id": "photo-big", "file_path": "photos/big.png"},
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/file/bot{TOKEN}/photos/big.png")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(ONE_PIXEL_PNG.to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Распознай текст"))
            .respond_with(completion_response("ФИО: Петрова Анна Сергеевна"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Составь официальное заявление"))
            .respond_with(completion_response("Прошу признать меня банкротом."))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendDocument")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, photo_update()).await;

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains(PHOTO_PROGRESS_REPLY));

        // The recognition call carried the photo as an image content block.
        let recognition_body = completion_request_body(&server, 0).await;
        assert!(recognition_body.contains("image_url"));
        assert!(recognition_body.contains("data:image/png;base64,"));

        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn undecodable_photo_bytes_send_the_extraction_failure_reply() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        mount_send_message(&server, 2).await;

        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"file_id": "photo-big", "file_path": "photos/big.png"},
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/file/bot{TOKEN}/photos/big.png")))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"definitely not an image".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = telegram_client(&server);
        let intake = intake_service(&server, dir.path());

        handle_update(&client, &intake, photo_update()).await;

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains(PHOTO_PROGRESS_REPLY));
        assert!(messages[1].contains(EXTRACTION_FAILED_REPLY));
    }
}

// ============================================================================
// Polling Task
// ============================================================================

mod polling_tests {
    use super::*;

    #[tokio::test]
    async fn polling_handles_a_batch_and_acknowledges_it() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        // First poll (no offset yet) returns one update, then the mock is
        // exhausted and later polls fall through to the acknowledged mock.
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [{
                    "update_id": 800,
                    "message": {"message_id": 1, "chat": {"id": 42}, "text": "/start"},
                }],
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(body_partial_json(json!({"offset": 801})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [],
            })))
            .expect(1..)
            .mount(&server)
            .await;
        mount_send_message(&server, 1).await;

        let client = Arc::new(telegram_client(&server));
        let intake = Arc::new(intake_service(&server, dir.path()));

        let handle = spawn_update_polling_task(client, intake, 0, Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.abort();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let messages = sent_message_bodies(&server).await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains(GREETING_REPLY));
    }
}
