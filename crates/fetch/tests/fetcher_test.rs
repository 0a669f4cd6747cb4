use std::io::{Read, Write};
use std::net::TcpListener;

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

    format!("http://{addr}")
}

fn general_config() -> GeneralConfig {
    GeneralConfig {
        request_timeout_seconds: 5,
        max_body_size_mb: 10,
        wall_clock_limit_seconds: 60,
    }
}

#[tokio::test]
async fn fetch_succeeds_against_a_real_server_above_the_tier1_threshold() {
    let body = "x".repeat(800);
    let body: &'static str = Box::leak(body.into_boxed_str());
    let url = spawn_http_server(body);

    let fetcher = Fetcher::new(general_config(), BrowserConfig::default(), 0);
    let result = fetcher.fetch(&url).await;

    assert_eq!(result.unwrap(), body);
}

#[tokio::test]
async fn fetch_exhausts_retries_against_an_unreachable_host() {
    let fetcher = Fetcher::new(general_config(), BrowserConfig::default(), 1);
    let result = fetcher.fetch("http://127.0.0.1:1").await;

    let (_, retries) = result.unwrap_err();
    assert_eq!(retries, 1);
}
