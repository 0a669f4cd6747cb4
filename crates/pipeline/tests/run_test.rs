use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use corpfinder_core::config::{BrowserConfig, GeneralConfig};
use corpfinder_fetch::Fetcher;

fn spawn_http_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("{addr}")
}

fn general_config(timeout_secs: u64) -> GeneralConfig {
    GeneralConfig {
        request_timeout_seconds: timeout_secs,
        max_body_size_mb: 10,
        wall_clock_limit_seconds: 60,
    }
}

#[tokio::test]
async fn worker_pool_fetches_all_urls_with_bounded_concurrency() {
    let body = "y".repeat(800);
    let body: &'static str = Box::leak(body.into_boxed_str());
    let urls: Vec<String> = (0..4).map(|_| spawn_http_server(body)).collect();

    let fetcher = Arc::new(Fetcher::new(general_config(5), BrowserConfig::default(), 0));
    let rows = corpfinder_pipeline::run(urls.clone(), fetcher, 2, Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(rows.len(), urls.len());
    assert!(rows.iter().all(|r| r.status == corpfinder_core::ScrapeStatus::Success));
}

fn spawn_stalling_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            // Accept the connection and never write a response, so the
            // client hangs until its own request timeout fires, which is
            // comfortably past the pipeline's 1ms wall-clock ceiling below.
            std::thread::sleep(Duration::from_secs(3));
            drop(stream);
        }
    });

    format!("{addr}")
}

#[tokio::test]
async fn wall_clock_ceiling_aborts_a_slow_run() {
    let addr = spawn_stalling_server();
    let fetcher = Arc::new(Fetcher::new(general_config(5), BrowserConfig::default(), 0));
    let urls = vec![format!("http://{addr}")];

    let result = corpfinder_pipeline::run(urls, fetcher, 1, Duration::from_millis(1)).await;
    assert!(matches!(result, Err(corpfinder_pipeline::PipelineError::WallClockExceeded(_))));
}
