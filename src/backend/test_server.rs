use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

use super::BackendConfig;

/// Canned HTTP/1.1 response, body sent with chunked transfer encoding
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub chunks: Vec<Vec<u8>>,
    /// Whether the closing zero-length chunk is sent
    pub complete: bool,
}

impl CannedResponse {
    pub fn stream(chunks: &[&[u8]]) -> Self {
        Self {
            status: 200,
            content_type: "text/plain",
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            complete: true,
        }
    }

    /// A 200 stream whose connection drops before the body is terminated
    pub fn truncated(chunks: &[&[u8]]) -> Self {
        Self {
            complete: false,
            ..Self::stream(chunks)
        }
    }

    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            chunks: vec![body.to_string().into_bytes()],
            complete: true,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            chunks: vec![b"failure".to_vec()],
            complete: true,
        }
    }
}

/// Serves a single connection on an ephemeral port. The handle yields the raw request.
pub async fn serve_once(response: CannedResponse) -> (BackendConfig, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        write_response(&mut socket, response).await;
        request
    });

    let config = BackendConfig::builder().port(port).build().unwrap();
    (config, handle)
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        request.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&request, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok());
    let chunked = headers.contains("transfer-encoding: chunked");

    loop {
        let body = &request[header_end..];
        let complete = match content_length {
            Some(len) => body.len() >= len,
            None if chunked => body.ends_with(b"0\r\n\r\n"),
            None => true,
        };
        if complete {
            break;
        }

        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    request
}

async fn write_response(socket: &mut TcpStream, response: CannedResponse) {
    let head = format!(
        "HTTP/1.1 {} Canned\r\ncontent-type: {}\r\ntransfer-encoding: chunked\r\nconnection: close\r\n\r\n",
        response.status, response.content_type
    );
    socket.write_all(head.as_bytes()).await.unwrap();

    for chunk in response.chunks.iter().filter(|c| !c.is_empty()) {
        socket
            .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
            .await
            .unwrap();
        socket.write_all(chunk).await.unwrap();
        socket.write_all(b"\r\n").await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    if response.complete {
        socket.write_all(b"0\r\n\r\n").await.unwrap();
    }
    let _ = socket.shutdown().await;
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
