//! `wrapfast chat`

use super::Context;
use crate::output::print_json;
use anyhow::Result;
use wrapfast_api_client::api::ChatRequest;

/// Send a prompt and print the reply
pub async fn run(ctx: &Context, prompt: &str, anthropic: bool) -> Result<()> {
    ctx.ensure_authenticated().await?;

    let mut chat = ctx.client.chat();
    if anthropic {
        chat = chat.using_anthropic();
    }

    let reply = chat
        .send_prompt(&ChatRequest {
            prompt: prompt.to_string(),
        })
        .await?;

    if ctx.json() {
        return print_json(&reply);
    }

    println!("{}", reply.message);
    Ok(())
}
