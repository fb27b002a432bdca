use dotenv::dotenv;
use futures::StreamExt;
use litellm_adapter::{
    ApiHandler, CompletionEvent, LiteLlmConfig, LiteLlmHandler, Message, SingleCompletionHandler,
    fetch_model_ids,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = LiteLlmConfig::from_env();

    let models = fetch_model_ids(Some(config.effective_base_url()), config.api_key.as_deref()).await;
    println!("Models served by {}:", config.effective_base_url());
    for id in &models {
        println!("  {id}");
    }

    let handler = LiteLlmHandler::new(config)?;
    println!("Using model: {}", handler.model().id);

    let mut events = handler.create_message(
        "You are a concise assistant.",
        &[Message::user("Explain what a LiteLLM proxy does in one sentence.")],
    );
    while let Some(event) = events.next().await {
        match event {
            CompletionEvent::Text { text } => println!("{text}"),
            CompletionEvent::Usage {
                input_tokens,
                output_tokens,
            } => println!("[usage] {input_tokens} input / {output_tokens} output tokens"),
        }
    }

    let title = handler
        .complete_prompt("Give a three word title for a note about proxies.")
        .await?;
    println!("Title: {title}");

    Ok(())
}
