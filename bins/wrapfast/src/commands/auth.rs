//! `wrapfast auth`

use super::Context;
use crate::output::{mask, print_json};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

/// Authenticate against the backend and show the issued token
pub async fn run(ctx: &Context) -> Result<()> {
    let token = ctx.client.auth().authenticate().await?;

    if ctx.json() {
        return print_json(&json!({ "token": token }));
    }

    println!("{} Authenticated", "✓".green());
    println!("  Token: {}", mask(&token).dimmed());
    println!(
        "  {}",
        "Export it as WRAPFAST_TOKEN to skip authentication on later runs".dimmed()
    );
    Ok(())
}
