use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures of a node round trip, from the socket up to the ledger.
#[derive(Debug, Error, PartialEq)]
pub enum NodeError {
    /// The node answered with a non-success HTTP status.
    #[error("http {0}: {1}")]
    Status(u16, String),
    /// The request never completed (DNS, connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),
    /// The body was not the JSON shape the endpoint documents.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The node processed the request and rejected it.
    #[error("ledger error {code}: {description}")]
    Ledger { code: u64, description: String },
}

impl From<ureq::Error> for NodeError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, response) => {
                NodeError::Status(code, response.status_text().to_string())
            }
            ureq::Error::Transport(transport) => NodeError::Transport(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for NodeError {
    fn from(error: std::io::Error) -> Self {
        NodeError::Malformed(format!("{}", error))
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(error: serde_json::Error) -> Self {
        NodeError::Malformed(format!("{}", error))
    }
}

/// Receipt for an accepted transaction broadcast.
#[derive(Debug, Deserialize)]
pub struct Broadcast {
    pub transaction: String,
    #[serde(rename = "fullHash")]
    pub full_hash: String,
}

/// A blocking client for one ledger node's HTTP API.
///
/// Every call is a GET against the node endpoint with a `requestType`
/// query parameter naming the operation, plus operation-specific
/// parameters. Responses are JSON; a body carrying `errorCode` /
/// `errorDescription` means the node understood the request and turned
/// it down, which surfaces as [`NodeError::Ledger`].
pub struct NodeClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl NodeClient {
    /// Builds a client for `endpoint`, e.g. `http://localhost:7876/nxt`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        NodeClient {
            agent,
            endpoint: endpoint.into(),
        }
    }

    /// Issues `request_type` with the given query parameters and returns
    /// the parsed JSON body.
    pub fn request(
        &self,
        request_type: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, NodeError> {
        let mut request = self
            .agent
            .get(&self.endpoint)
            .query("requestType", request_type);
        for (name, value) in params {
            request = request.query(name, value);
        }

        let body: serde_json::Value = request.call()?.into_json()?;

        if let Some(description) = body.get("errorDescription").and_then(|d| d.as_str()) {
            let code = body.get("errorCode").and_then(|c| c.as_u64()).unwrap_or(0);
            return Err(NodeError::Ledger {
                code,
                description: description.to_string(),
            });
        }
        Ok(body)
    }

    /// Submits signed transaction bytes to the network.
    pub fn broadcast_transaction(&self, transaction_bytes: &[u8]) -> Result<Broadcast, NodeError> {
        let bytes = hex::encode(transaction_bytes);
        let body = self.request("broadcastTransaction", &[("transactionBytes", &bytes)])?;
        Ok(serde_json::from_value(body)?)
    }
}
