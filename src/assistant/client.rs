use crate::assistant::{parse_reply, ChatRequest, PendingTurn};
use crate::error::BridgeError;
use crate::event::{AppEvent, EventSender};
use serde_json::Value;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct AssistantBridge {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    events: EventSender,
    runtime_handle: Handle,
}

impl AssistantBridge {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
        events: EventSender,
        runtime_handle: Handle,
    ) -> Self {
        Self {
            http: http_client(timeout_secs),
            endpoint: endpoint.into(),
            model: model.into(),
            events,
            runtime_handle,
        }
    }

    pub fn send(&self, turn: PendingTurn) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let request = turn.request(&self.model);
        let events = self.events.clone();

        self.runtime_handle.spawn(async move {
            debug!(
                turn = turn.id,
                messages = request.messages.len(),
                "posting assistant turn"
            );
            let result = post_turn(&http, &endpoint, &request).await;
            if let Err(err) = &result {
                warn!(turn = turn.id, "assistant request failed: {err}");
            }
            events.send(AppEvent::AssistantReplied { turn, result });
        });
    }
}

// Zero disables the request timeout.
fn http_client(timeout_secs: u64) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().unwrap_or_else(|err| {
        warn!("falling back to default http client: {err}");
        reqwest::Client::new()
    })
}

async fn post_turn(
    http: &reqwest::Client,
    endpoint: &str,
    request: &ChatRequest,
) -> Result<String, BridgeError> {
    let response = http
        .post(endpoint)
        .json(request)
        .send()
        .await?
        .error_for_status()?;
    let body: Value = response.json().await?;
    parse_reply(&body)
}
