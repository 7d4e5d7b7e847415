//! SoapClient against a one-shot HTTP listener on localhost

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use zipweather::api::{LookupError, SoapClient, WeatherService};
use zipweather::soap::{CONTENT_TYPE, SOAP_ACTION, ZipEncoding, build_envelope};

/// Local requests must not be routed through a proxy from the environment.
fn client_for(url: String) -> SoapClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    SoapClient::with_client(http, url)
}

/// A request as the listener saw it: lowercased head, raw body.
struct Captured {
    head: String,
    body: String,
}

/// Accept one connection, capture the request, answer with `status` and `body`.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/globalweather.asmx", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < head_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[head_end..]).into_owned();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.ok();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: request_body,
        }
    });

    (url, handle)
}

#[tokio::test]
async fn test_posts_envelope_with_soap_headers() {
    let (url, server) = serve_once("200 OK", "<ok/>").await;
    let client = client_for(url);
    let envelope = build_envelope("90210", ZipEncoding::Verbatim);

    let result = client.post_envelope(envelope.clone()).await;
    let captured = server.await.unwrap();

    assert_eq!(result, Ok("<ok/>".to_string()));
    assert!(captured.head.starts_with("post /globalweather.asmx http/1.1"));
    assert!(
        captured
            .head
            .contains(&format!("content-type: {}", CONTENT_TYPE.to_lowercase()))
    );
    assert!(
        captured
            .head
            .contains(&format!("soapaction: {}", SOAP_ACTION.to_lowercase()))
    );
    assert_eq!(captured.body, envelope);
}

#[tokio::test]
async fn test_non_success_status_discards_body() {
    let (url, server) = serve_once("500 Internal Server Error", "<soap:Fault/>").await;
    let client = client_for(url);

    let result = client
        .post_envelope(build_envelope("90210", ZipEncoding::Verbatim))
        .await;
    server.await.unwrap();

    assert_eq!(result, Err(LookupError::Status(500)));
    assert_eq!(
        result.unwrap_err().user_message(),
        "Failed to fetch weather data"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}/globalweather.asmx"));
    let result = client
        .post_envelope(build_envelope("90210", ZipEncoding::Verbatim))
        .await;

    match result {
        Err(err @ LookupError::Transport(_)) => assert!(!err.user_message().is_empty()),
        other => panic!("expected a transport error, got {other:?}"),
    }
}
