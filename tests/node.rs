#![cfg(feature = "node")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use kcdsa25519::node::{NodeClient, NodeError};

/// One-shot stub node: answers the first connection with a fixed
/// response and hands the captured request back over a channel.
fn spawn_node(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        tx.send(String::from_utf8_lossy(&request).into_owned())
            .unwrap();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (format!("http://{}/nxt", address), rx)
}

#[test]
fn node_request_returns_parsed_json() {
    let (endpoint, rx) = spawn_node("200 OK", r#"{"balanceNQT":"42","requestProcessingTime":1}"#);
    let client = NodeClient::new(endpoint);

    let value = client
        .request("getBalance", &[("account", "NXT-TEST")])
        .unwrap();
    assert_eq!(value["balanceNQT"].as_str(), Some("42"));

    let request = rx.recv().unwrap();
    assert!(request.starts_with("GET /nxt?"));
    assert!(request.contains("requestType=getBalance"));
    assert!(request.contains("account=NXT-TEST"));
}

#[test]
fn node_request_surfaces_ledger_error() {
    let (endpoint, _rx) = spawn_node(
        "200 OK",
        r#"{"errorCode":5,"errorDescription":"Unknown account"}"#,
    );
    let client = NodeClient::new(endpoint);

    let err = client.request("getAccount", &[]).unwrap_err();
    assert_eq!(
        err,
        NodeError::Ledger {
            code: 5,
            description: "Unknown account".to_string()
        }
    );
}

#[test]
fn node_request_surfaces_http_status() {
    let (endpoint, _rx) = spawn_node("404 Not Found", "{}");
    let client = NodeClient::new(endpoint);

    let err = client.request("getBlock", &[]).unwrap_err();
    assert!(matches!(err, NodeError::Status(404, _)));
}

#[test]
fn node_request_rejects_malformed_body() {
    let (endpoint, _rx) = spawn_node("200 OK", "this is not json");
    let client = NodeClient::new(endpoint);

    let err = client.request("getPeers", &[]).unwrap_err();
    assert!(matches!(err, NodeError::Malformed(_)));
}

#[test]
fn node_broadcast_transaction_sends_hex_bytes() {
    let (endpoint, rx) = spawn_node(
        "200 OK",
        r#"{"transaction":"1234567890","fullHash":"00ff"}"#,
    );
    let client = NodeClient::new(endpoint);

    let receipt = client.broadcast_transaction(&[0x01, 0x02, 0xFF]).unwrap();
    assert_eq!(receipt.transaction, "1234567890");
    assert_eq!(receipt.full_hash, "00ff");

    let request = rx.recv().unwrap();
    assert!(request.contains("requestType=broadcastTransaction"));
    assert!(request.contains("transactionBytes=0102ff"));
}
