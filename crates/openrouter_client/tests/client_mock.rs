//! Client behaviour against an in-process transport

use async_trait::async_trait;
use openrouter_client::{
    ChatCompletion, ChatOptions, ClientConfig, ErrorKind, Message, ModelDescriptor,
    OpenRouterClient, Transport, TransportError,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

enum Reply {
    Completion(ChatCompletion),
    Models(Vec<ModelDescriptor>),
    Fail(TransportError),
}

/// Records every request body and answers from a script
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    bodies: Mutex<Vec<Value>>,
    model_calls: Mutex<usize>,
}

impl ScriptedTransport {
    fn replying(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    fn next(&self) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }

    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn create_chat_completion(&self, body: Value) -> Result<ChatCompletion, TransportError> {
        self.bodies.lock().unwrap().push(body);
        match self.next() {
            Reply::Completion(completion) => Ok(completion),
            Reply::Fail(err) => Err(err),
            Reply::Models(_) => panic!("models reply scripted for a chat call"),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, TransportError> {
        *self.model_calls.lock().unwrap() += 1;
        match self.next() {
            Reply::Models(models) => Ok(models),
            Reply::Fail(err) => Err(err),
            Reply::Completion(_) => panic!("chat reply scripted for a models call"),
        }
    }
}

fn client(replies: Vec<Reply>) -> OpenRouterClient<ScriptedTransport> {
    OpenRouterClient::with_transport(
        ClientConfig::new().with_api_key("test-key"),
        ScriptedTransport::replying(replies),
    )
    .unwrap()
}

fn status(status: u16, body: &str) -> Reply {
    Reply::Fail(TransportError::Status {
        status,
        body: body.to_string(),
    })
}

fn descriptor(value: Value) -> ModelDescriptor {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

#[tokio::test]
async fn test_simple_chat_returns_first_choice() {
    let client = client(vec![Reply::Completion(ChatCompletion::from_content(
        "Test response",
    ))]);

    let response = client
        .simple_chat("Hello", ChatOptions::default())
        .await
        .unwrap();

    assert_eq!(response, "Test response");
    assert_eq!(client.transport().bodies().len(), 1);
}

#[tokio::test]
async fn test_chat_with_history() {
    let client = client(vec![Reply::Completion(ChatCompletion::from_content(
        "Test response",
    ))]);
    let conversation = vec![
        Message::user("Hello, how are you?"),
        Message::assistant("I'm doing well, thank you!"),
        Message::user("Explain quantum computing"),
    ];

    let response = client
        .chat(&conversation, ChatOptions::new().with_max_tokens(150))
        .await
        .unwrap();

    assert_eq!(response, "Test response");
    let body = &client.transport().bodies()[0];
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    assert_eq!(body["messages"][1]["role"], "assistant");
    assert_eq!(body["max_tokens"], 150);
}

#[tokio::test]
async fn test_simple_chat_matches_chat() {
    let client = client(vec![
        Reply::Completion(ChatCompletion::from_content("same")),
        Reply::Completion(ChatCompletion::from_content("same")),
        status(429, "slow down"),
        status(429, "slow down"),
    ]);

    let a = client
        .simple_chat("Hello", ChatOptions::default())
        .await
        .unwrap();
    let b = client
        .chat(&[Message::user("Hello")], ChatOptions::default())
        .await
        .unwrap();
    assert_eq!(a, b);

    let bodies = client.transport().bodies();
    assert_eq!(bodies[0], bodies[1]);

    let a = client
        .simple_chat("Hello", ChatOptions::default())
        .await
        .unwrap_err();
    let b = client
        .chat(&[Message::user("Hello")], ChatOptions::default())
        .await
        .unwrap_err();
    assert_eq!(a.kind(), ErrorKind::RateLimit);
    assert_eq!(a.kind(), b.kind());
    assert_eq!(a.to_string(), b.to_string());
}

#[tokio::test]
async fn test_model_override_and_default() {
    let client = client(vec![
        Reply::Completion(ChatCompletion::from_content("a")),
        Reply::Completion(ChatCompletion::from_content("b")),
    ]);

    client
        .simple_chat("Hi", ChatOptions::new().with_model("openai/gpt-3.5-turbo"))
        .await
        .unwrap();
    client
        .simple_chat("Hi", ChatOptions::default())
        .await
        .unwrap();

    let bodies = client.transport().bodies();
    assert_eq!(bodies[0]["model"], "openai/gpt-3.5-turbo");
    assert_eq!(bodies[1]["model"], "openrouter/cypher-alpha:free");
}

#[tokio::test]
async fn test_error_mapping() {
    let client = client(vec![
        status(401, r#"{"error":{"message":"No auth credentials found"}}"#),
        status(429, "Too Many Requests"),
        status(404, "no such model"),
        status(500, "Internal Server Error"),
        Reply::Fail(TransportError::Remote {
            code: None,
            message: "Authentication required".to_string(),
            body: Value::Null,
        }),
    ]);

    let mut kinds = Vec::new();
    for _ in 0..5 {
        let err = client
            .simple_chat("Hello", ChatOptions::default())
            .await
            .unwrap_err();
        kinds.push((err.kind(), err.is_model_not_found()));
    }

    assert_eq!(
        kinds,
        vec![
            (ErrorKind::Authentication, false),
            (ErrorKind::RateLimit, false),
            (ErrorKind::Api, true),
            (ErrorKind::Api, false),
            (ErrorKind::Authentication, false),
        ]
    );
}

#[tokio::test]
async fn test_generic_error_keeps_status() {
    let client = client(vec![status(503, r#"{"error":"busy"}"#)]);

    let err = client
        .simple_chat("Hello", ChatOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.response_data(), Some(&json!({"error": "busy"})));
    assert!(err.to_string().starts_with("API error: HTTP 503"));
}

#[tokio::test]
async fn test_empty_choices_is_api_error() {
    let client = client(vec![Reply::Completion(ChatCompletion::default())]);

    let err = client
        .simple_chat("Hello", ChatOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_get_models_preserves_descriptors() {
    let models = vec![
        descriptor(json!({
            "id": "openrouter/cypher-alpha:free",
            "name": "Cypher Alpha",
            "context_length": 1000000,
            "pricing": {"prompt": "0", "completion": "0"}
        })),
        descriptor(json!({"id": "anthropic/claude-3-haiku", "name": "Claude 3 Haiku"})),
        descriptor(json!({"id": "openai/gpt-3.5-turbo"})),
    ];
    let client = client(vec![Reply::Models(models.clone())]);

    let listed = client.get_models().await.unwrap();

    assert_eq!(listed.len(), 3);
    assert_eq!(listed, models);
    assert_eq!(listed[0]["pricing"]["prompt"], "0");
    assert_eq!(*client.transport().model_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_get_models_error_mapping() {
    let client = client(vec![status(401, "Unauthorized")]);

    let err = client.get_models().await.unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(err.kind(), ErrorKind::Authentication);
}
