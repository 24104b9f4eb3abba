use anyhow::Result;
use console::Term;
use std::time::Duration;

use super::{App, ui};
use crate::core::classify::ClassificationSession;
use crate::providers::GeminiClassifier;

pub async fn run(app: &mut App, query: &str, yes: bool) -> Result<()> {
    let cfg = &app.config.classifier;
    let api_key = cfg.resolve_api_key()?;
    let classifier = GeminiClassifier::new(
        &cfg.base_url,
        &cfg.model,
        &api_key,
        Duration::from_secs(cfg.timeout_secs),
    );

    let mut session = ClassificationSession::new();

    let spinner = ui::new_spinner("Analyzing your query...");
    let result = session.submit(&classifier, query).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        if let Some(message) = session.messages().last() {
            println!("{}", ui::style_text(&message.content, ui::StyleType::Error));
        }
        return Err(e.into());
    }

    // The assistant's summary of the staged candidate.
    if let Some(message) = session.messages().last() {
        println!("{}\n", message.content);
    }

    if yes || confirm_prompt()? {
        let id = session.confirm(&mut app.catalog)?;
        app.save()?;
        let confirmation = session
            .messages()
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        println!(
            "{} (product id {id})",
            ui::style_text(&confirmation, ui::StyleType::Value)
        );
    } else {
        session.discard();
        println!("Discarded. Nothing was added to the catalog.");
    }

    Ok(())
}

fn confirm_prompt() -> Result<bool> {
    let term = Term::stdout();
    term.write_str("Add to product catalog? [y/N] ")?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
