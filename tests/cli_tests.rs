//! CLI command tests
//!
//! The CLI builds a runtime per invocation and drops it when the command
//! returns, so anything the command spawns must be finished by then.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use tempfile::TempDir;

use utmkit::config::{AppConfig, DatabaseConfig, SeedConfig, WebhookConfig};
use utmkit::interfaces::cli::commands::generate_url;
use utmkit::runtime::lifetime::startup::StartupContext;
use utmkit::services::GenerateRequest;
use utmkit::storage::SeaOrmStorage;

/// Accept one request, reply 204 and hand back the raw body
fn webhook_endpoint() -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(split) = text.find("\r\n\r\n") else {
                continue;
            };
            let length = text[..split]
                .lines()
                .find_map(|l| {
                    l.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if buf.len() >= split + 4 + length {
                tx.send(text[split + 4..split + 4 + length].to_string())
                    .unwrap();
                break;
            }
        }
        stream
            .write_all(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .unwrap();
    });

    (url, rx)
}

async fn create_context(temp_dir: &TempDir, webhook_url: String) -> StartupContext {
    let config = AppConfig {
        database: DatabaseConfig {
            database_url: format!(
                "sqlite://{}?mode=rwc",
                temp_dir.path().join("cli_test.db").display()
            ),
            ..DatabaseConfig::default()
        },
        seed: SeedConfig {
            sources: vec!["google".into()],
            mediums: vec!["cpc".into()],
            default_campaign: "live_by_design".into(),
        },
        webhook: WebhookConfig {
            url: Some(webhook_url),
            timeout_secs: 2,
        },
        ..AppConfig::default()
    };

    let storage = Arc::new(
        SeaOrmStorage::new(&config.database)
            .await
            .expect("Failed to create storage"),
    );
    storage.seed(&config.seed).await.expect("Failed to seed");

    StartupContext::from_storage(storage, &config)
        .await
        .expect("Failed to build context")
}

#[test]
fn test_generate_delivers_webhook_before_runtime_exits() {
    let (url, rx) = webhook_endpoint();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    // actix_web::main 同样是单线程 runtime，命令返回后即销毁
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let context = create_context(&temp_dir, url).await;
        generate_url(
            &context,
            GenerateRequest {
                url: "example.com".to_string(),
                source: "google".to_string(),
                medium: Some("cpc".to_string()),
                campaign: None,
                title: Some("Big Sale".to_string()),
            },
        )
        .await
        .expect("generate should succeed");
    });
    drop(runtime);

    let body = rx
        .recv_timeout(Duration::from_secs(3))
        .expect("webhook endpoint never received the POST");
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["originalUrl"], "example.com");
    assert_eq!(body["source"], "google");
    assert_eq!(body["campaign"], "live_by_design");
    assert_eq!(
        body["generatedUrl"],
        "https://example.com/?utm_source=google&utm_medium=cpc&utm_campaign=live_by_design&utm_content=big_sale"
    );
}
