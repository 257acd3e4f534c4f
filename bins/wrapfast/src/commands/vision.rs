//! `wrapfast vision`

use super::Context;
use crate::output::print_json;
use anyhow::{Context as _, Result};
use base64::Engine;
use owo_colors::OwoColorize;
use std::path::Path;
use wrapfast_api_client::api::{GptLanguage, MealVisionRequest};
use wrapfast_telemetry::Timer;

/// Analyse a meal photo and print the nutrition estimate
pub async fn run(ctx: &Context, image: &Path, language: GptLanguage, anthropic: bool) -> Result<()> {
    let bytes = std::fs::read(image)
        .with_context(|| format!("Failed to read image {}", image.display()))?;
    let request = MealVisionRequest {
        image: base64::engine::general_purpose::STANDARD.encode(bytes),
        language,
    };

    ctx.ensure_authenticated().await?;

    let mut vision = ctx.client.vision();
    if anthropic {
        vision = vision.using_anthropic();
    }

    let timer = Timer::start("vision");
    let meal = vision.analyze_meal(&request).await?;
    let elapsed = timer.stop();

    if ctx.json() {
        return print_json(&meal);
    }

    println!("{}", meal.name.bold());
    println!("  Total calories:  {} kcal", meal.total_calories_estimation);
    println!("  Per 100 g:       {} kcal", meal.calories_100_grams);
    println!("  Carbs:           {} g", meal.carbs);
    println!("  Proteins:        {} g", meal.proteins);
    println!("  Fats:            {} g", meal.fats);
    println!("  {}", format!("({}ms)", elapsed.as_millis()).dimmed());
    Ok(())
}
