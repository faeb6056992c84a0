//! Basic usage of the OpenRouter client
//!
//! Usage:
//!     OPENROUTER_API_KEY=sk-or-... cargo run --example basic_usage
//!
//! Set `RUST_LOG=openrouter_client=debug` to see request logging.

use anyhow::Result;
use openrouter_client::{
    ask_ai, quick_chat, ChatOptions, ClientConfig, Message, OpenRouterClient, OpenRouterError,
    API_KEY_ENV_VAR, DEFAULT_MODEL,
};
use tracing_subscriber::EnvFilter;

async fn basic_client_example() -> Result<()> {
    println!("=== Basic Client Example ===");

    let client = OpenRouterClient::new(ClientConfig::new())?;

    let response = client
        .simple_chat("What is the meaning of life?", ChatOptions::default())
        .await?;
    println!("AI: {}", response);

    let messages = vec![
        Message::user("Hello, how are you?"),
        Message::assistant("I'm doing well, thank you! How can I help you today?"),
        Message::user("Can you explain quantum computing in simple terms?"),
    ];
    let response = client.chat(&messages, ChatOptions::default()).await?;
    println!("AI: {}", response);

    Ok(())
}

async fn different_models_example() -> Result<()> {
    println!("\n=== Different Models Example ===");

    let client = OpenRouterClient::new(ClientConfig::new())?;
    let question = "What is artificial intelligence?";

    for model in [DEFAULT_MODEL, "anthropic/claude-3-haiku", "openai/gpt-3.5-turbo"] {
        match client
            .simple_chat(question, ChatOptions::new().with_model(model))
            .await
        {
            Ok(response) => {
                println!("\n{}:", model);
                if response.chars().count() > 200 {
                    let preview: String = response.chars().take(200).collect();
                    println!("{}...", preview);
                } else {
                    println!("{}", response);
                }
            }
            Err(e) => println!("Error with {}: {}", model, e),
        }
    }

    Ok(())
}

async fn quick_functions_example() -> Result<()> {
    println!("\n=== Quick Functions Example ===");

    let response = quick_chat("Tell me a joke", None, None).await?;
    println!("Joke: {}", response);

    let response = ask_ai("What's the weather like today?", None, None).await?;
    println!("Weather: {}", response);

    Ok(())
}

async fn advanced_config_example() -> Result<()> {
    println!("\n=== Advanced Configuration Example ===");

    let client = OpenRouterClient::new(
        ClientConfig::new()
            .with_site_url("https://myapp.com")
            .with_site_name("My AI App")
            .with_default_model(DEFAULT_MODEL),
    )?;

    let options = ChatOptions::new()
        .with_temperature(0.8)
        .with_max_tokens(150)
        .with_top_p(0.9);
    let response = client
        .chat(&[Message::user("Write a short poem about coding")], options)
        .await?;
    println!("Poem: {}", response);

    Ok(())
}

async fn error_handling_example() {
    println!("\n=== Error Handling Example ===");

    let result = match OpenRouterClient::with_api_key("invalid-key") {
        Ok(client) => client.simple_chat("Hello", ChatOptions::default()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => println!("AI: {}", response),
        Err(e @ OpenRouterError::Authentication(_)) => println!("{} (check your API key)", e),
        Err(e @ OpenRouterError::RateLimit(_)) => println!("{} (try again later)", e),
        Err(e) => println!("{}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if std::env::var(API_KEY_ENV_VAR).map_or(true, |key| key.is_empty()) {
        eprintln!("Please set the {} environment variable", API_KEY_ENV_VAR);
        eprintln!("Example: export {}='your-api-key-here'", API_KEY_ENV_VAR);
        std::process::exit(1);
    }

    basic_client_example().await?;
    different_models_example().await?;
    quick_functions_example().await?;
    advanced_config_example().await?;
    error_handling_example().await;

    Ok(())
}
