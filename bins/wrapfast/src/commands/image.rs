//! `wrapfast image`

use super::Context;
use crate::output::print_json;
use anyhow::Result;
use owo_colors::OwoColorize;
use wrapfast_api_client::api::ImageRequest;

/// Generate an image and print its URL
pub async fn run(ctx: &Context, prompt: &str) -> Result<()> {
    ctx.ensure_authenticated().await?;

    let image = ctx
        .client
        .images()
        .generate(&ImageRequest {
            prompt: prompt.to_string(),
        })
        .await?;

    if ctx.json() {
        return print_json(&image);
    }

    println!("{} {}", "Image:".green().bold(), image.image_url);
    Ok(())
}
