use crate::catalog::Product;
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod client;

pub use client::AssistantBridge;

const SYSTEM_PROMPT: &str = "You are a helpful beauty routine assistant. Only answer questions about \
the generated routine, skincare, haircare, makeup, fragrance, or related beauty topics. Use \
real-time web search to provide current information about L'Oréal products and routines. Include \
links or citations if available.";

pub const ROUTINE_MAX_TOKENS: u32 = 700;
pub const FOLLOW_UP_MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;

pub const EMPTY_SELECTION_NOTICE: &str = "Please select products before generating a routine.";
pub const GENERATING_NOTICE: &str = "Generating your personalized routine...";
pub const THINKING_NOTICE: &str = "Thinking...";
pub const SHAPE_FALLBACK: &str = "Sorry, something went wrong. Please try again.";
pub const TRANSPORT_FALLBACK: &str =
    "Error: Could not connect to the routine service. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub web_search: bool,
}

pub fn parse_reply(body: &Value) -> Result<String, BridgeError> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(BridgeError::UnexpectedShape)
}

pub fn fallback_message(err: &BridgeError) -> &'static str {
    match err {
        BridgeError::Transport(_) => TRANSPORT_FALLBACK,
        BridgeError::Status(_) | BridgeError::UnexpectedShape => SHAPE_FALLBACK,
    }
}

pub fn routine_prompt(products: &[Product]) -> String {
    let lines = products
        .iter()
        .map(|product| {
            format!(
                "- {} ({}) [{}]: {}",
                product.name,
                product.brand,
                product.category,
                product.description.as_deref().unwrap_or("No description")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a beauty routine expert. Using the following selected products, create a \
step-by-step personalized routine.\nExplain the order and purpose of each product. Be friendly \
and clear for beginners.\nIf possible, use real-time web search to provide current information \
about these L'Oréal products and routines, and include links or citations.\n\nProducts:\n{lines}\n"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Routine,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub id: u64,
    pub kind: TurnKind,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl PendingTurn {
    pub fn request(&self, model: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: self.messages.clone(),
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
            web_search: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    Notice(String),
    Pending { turn: u64, text: String },
    User(String),
    Assistant(String),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    transcript: Vec<ChatMessage>,
    display: Vec<ChatEntry>,
    next_turn: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::new(Role::System, SYSTEM_PROMPT)],
            display: Vec::new(),
            next_turn: 1,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn display(&self) -> &[ChatEntry] {
        &self.display
    }

    pub fn is_waiting(&self) -> bool {
        self.display
            .iter()
            .any(|entry| matches!(entry, ChatEntry::Pending { .. }))
    }

    fn allocate_turn(&mut self) -> u64 {
        let id = self.next_turn;
        self.next_turn += 1;
        id
    }

    pub fn begin_routine(&mut self, products: &[Product]) -> Option<PendingTurn> {
        if products.is_empty() {
            self.display = vec![ChatEntry::Notice(EMPTY_SELECTION_NOTICE.to_string())];
            return None;
        }

        let id = self.allocate_turn();
        self.display = vec![ChatEntry::Pending {
            turn: id,
            text: GENERATING_NOTICE.to_string(),
        }];

        Some(PendingTurn {
            id,
            kind: TurnKind::Routine,
            messages: vec![
                self.transcript[0].clone(),
                ChatMessage::new(Role::User, routine_prompt(products)),
            ],
            max_tokens: ROUTINE_MAX_TOKENS,
        })
    }

    pub fn begin_follow_up(&mut self, input: &str) -> Option<PendingTurn> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let id = self.allocate_turn();
        self.display.push(ChatEntry::User(input.to_string()));
        self.display.push(ChatEntry::Pending {
            turn: id,
            text: THINKING_NOTICE.to_string(),
        });

        let mut messages = self.transcript.clone();
        messages.push(ChatMessage::new(Role::User, input));
        Some(PendingTurn {
            id,
            kind: TurnKind::FollowUp,
            messages,
            max_tokens: FOLLOW_UP_MAX_TOKENS,
        })
    }

    // A reply that lands after a newer turn still wins.
    pub fn complete(&mut self, turn: PendingTurn, result: Result<String, BridgeError>) {
        self.display
            .retain(|entry| !matches!(entry, ChatEntry::Pending { turn: id, .. } if *id == turn.id));

        match result {
            Ok(content) => {
                let mut transcript = turn.messages;
                transcript.push(ChatMessage::new(Role::Assistant, content.clone()));
                self.transcript = transcript;
                self.display.push(ChatEntry::Assistant(content));
            }
            Err(err) => {
                self.display
                    .push(ChatEntry::Notice(fallback_message(&err).to_string()));
            }
        }
    }

    pub fn show_quiz_result(&mut self, text: String) {
        self.display = vec![ChatEntry::Assistant(text)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample;
    use serde_json::json;

    #[test]
    fn parse_reply_reads_first_choice_content() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Cleanse, then moisturize." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(
            parse_reply(&body).expect("reply should parse"),
            "Cleanse, then moisturize."
        );
    }

    #[test]
    fn parse_reply_rejects_unexpected_shapes() {
        for body in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": { "content": 42 } }] }),
            json!({ "error": { "message": "rate limited" } }),
            json!("plain text"),
        ] {
            assert!(
                matches!(parse_reply(&body), Err(BridgeError::UnexpectedShape)),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let mut conversation = Conversation::new();
        let turn = conversation
            .begin_follow_up("Is retinol safe?")
            .expect("non-empty input should start a turn");
        let body = serde_json::to_value(turn.request("gpt-4o")).expect("request should serialize");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["web_search"], true);
        assert!((body["temperature"].as_f64().unwrap_or_default() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Is retinol safe?");
    }

    #[test]
    fn routine_with_empty_selection_only_shows_notice() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_routine(&[]).is_none());
        assert_eq!(
            conversation.display(),
            &[ChatEntry::Notice(EMPTY_SELECTION_NOTICE.to_string())]
        );
        assert_eq!(conversation.transcript().len(), 1);
    }

    #[test]
    fn routine_prompt_lists_selected_products() {
        let products = sample();
        let prompt = routine_prompt(&products[1..3]);
        assert!(prompt.contains("- Revitalift Serum (L'Oreal Paris) [skincare]: Pure hyaluronic"));
        assert!(prompt.contains("- Effaclar Duo (La Roche-Posay) [skincare]: No description"));
    }

    #[test]
    fn successful_routine_resets_transcript_to_system_user_assistant() {
        let products = sample();
        let mut conversation = Conversation::new();
        let first = conversation
            .begin_follow_up("hello")
            .expect("turn should start");
        conversation.complete(first, Ok("hi".to_string()));
        assert_eq!(conversation.transcript().len(), 3);

        let turn = conversation
            .begin_routine(&products[..2])
            .expect("selection should start a routine turn");
        assert_eq!(turn.max_tokens, ROUTINE_MAX_TOKENS);
        assert!(conversation.is_waiting());

        conversation.complete(turn, Ok("Step 1: cleanse".to_string()));
        let roles: Vec<Role> = conversation
            .transcript()
            .iter()
            .map(|message| message.role)
            .collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(
            conversation.display(),
            &[ChatEntry::Assistant("Step 1: cleanse".to_string())]
        );
        assert!(!conversation.is_waiting());
    }

    #[test]
    fn follow_up_success_appends_both_turns() {
        let mut conversation = Conversation::new();
        let turn = conversation
            .begin_follow_up("  What about SPF?  ")
            .expect("turn should start");
        conversation.complete(turn, Ok("Use SPF 30 daily.".to_string()));

        assert_eq!(
            conversation.transcript()[1..],
            [
                ChatMessage::new(Role::User, "What about SPF?"),
                ChatMessage::new(Role::Assistant, "Use SPF 30 daily."),
            ]
        );
        assert_eq!(
            conversation.display(),
            &[
                ChatEntry::User("What about SPF?".to_string()),
                ChatEntry::Assistant("Use SPF 30 daily.".to_string()),
            ]
        );
    }

    #[test]
    fn blank_follow_up_is_ignored() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_follow_up("   ").is_none());
        assert!(conversation.display().is_empty());
    }

    #[test]
    fn transport_failure_keeps_transcript_and_shows_one_fallback() {
        let mut conversation = Conversation::new();
        let turn = conversation.begin_follow_up("first").expect("turn should start");
        conversation.complete(turn, Ok("answer".to_string()));
        let transcript_before = conversation.transcript().to_vec();
        let display_before = conversation.display().len();

        let turn = conversation.begin_follow_up("second").expect("turn should start");
        conversation.complete(turn, Err(BridgeError::Transport("connection refused".to_string())));

        assert_eq!(conversation.transcript(), transcript_before.as_slice());
        let added = &conversation.display()[display_before..];
        assert_eq!(
            added,
            &[
                ChatEntry::User("second".to_string()),
                ChatEntry::Notice(TRANSPORT_FALLBACK.to_string()),
            ]
        );
        let fallbacks = conversation
            .display()
            .iter()
            .filter(|entry| matches!(entry, ChatEntry::Notice(_)))
            .count();
        assert_eq!(fallbacks, 1);
    }

    #[test]
    fn unexpected_shape_uses_apology_fallback() {
        let products = sample();
        let mut conversation = Conversation::new();
        let turn = conversation
            .begin_routine(&products[..1])
            .expect("turn should start");
        conversation.complete(turn, Err(BridgeError::UnexpectedShape));

        assert_eq!(conversation.transcript().len(), 1);
        assert_eq!(
            conversation.display(),
            &[ChatEntry::Notice(SHAPE_FALLBACK.to_string())]
        );
    }

    #[test]
    fn completion_only_clears_its_own_placeholder() {
        let mut conversation = Conversation::new();
        let first = conversation.begin_follow_up("one").expect("turn should start");
        let second = conversation.begin_follow_up("two").expect("turn should start");

        conversation.complete(second, Ok("reply two".to_string()));
        assert!(conversation.is_waiting());

        conversation.complete(first, Ok("reply one".to_string()));
        assert!(!conversation.is_waiting());
        assert_eq!(
            conversation.transcript().last(),
            Some(&ChatMessage::new(Role::Assistant, "reply one"))
        );
    }

    #[test]
    fn quiz_result_does_not_touch_transcript() {
        let mut conversation = Conversation::new();
        conversation.show_quiz_result("Gentle cleanser".to_string());
        assert_eq!(conversation.transcript().len(), 1);
        assert_eq!(
            conversation.display(),
            &[ChatEntry::Assistant("Gentle cleanser".to_string())]
        );
    }
}
