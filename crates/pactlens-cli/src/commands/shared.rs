//! Shared-contract commands - anonymous viewing and feedback
//!
//! These run without a session; the share token is the only credential.

use anyhow::{bail, Result};
use clap::Subcommand;
use std::str::FromStr;

use pactlens_core::config::Config;
use pactlens_core::domain::{Rating, ShareToken};
use pactlens_core::usecases::{SharedViewResolver, SharedViewState};

use crate::output::{get_formatter, render_notifications, OutputFormat, OutputFormatter};
use crate::wiring;

#[derive(Debug, Subcommand)]
pub enum SharedCommand {
    /// View a contract through its share token
    View { token: String },
    /// Leave feedback on a shared contract
    Feedback {
        token: String,
        /// Your display name
        #[arg(long)]
        name: String,
        /// Optional contact email
        #[arg(long)]
        email: Option<String>,
        /// The feedback text
        #[arg(long)]
        text: String,
        /// Star rating 1-5
        #[arg(long, default_value_t = 5)]
        rating: u8,
    },
}

impl SharedCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        let app = wiring::bootstrap(config);
        let resolver = SharedViewResolver::new(app.sharing.clone());

        match self {
            SharedCommand::View { token } => {
                let token = ShareToken::from_str(token)?;
                resolver.resolve(&token).await;
                render_view(&resolver.state(), &*fmt, format)
            }
            SharedCommand::Feedback {
                token,
                name,
                email,
                text,
                rating,
            } => {
                let token = ShareToken::from_str(token)?;
                resolver.resolve(&token).await;
                if let SharedViewState::Expired { message } = resolver.state() {
                    bail!("{message}");
                }

                let rating = Rating::new(*rating)?;
                resolver.update_draft(|draft| {
                    draft.commenter_name = name.clone();
                    draft.commenter_email = email.clone();
                    draft.comment_text = text.clone();
                    draft.rating = rating;
                });

                match resolver.submit_feedback(&token).await {
                    Ok(()) => {
                        app.notifications.success("Feedback submitted, thank you");
                        render_notifications(&*fmt, &app.notifications);
                        Ok(())
                    }
                    Err(e) => {
                        app.notifications.error(e.to_string());
                        render_notifications(&*fmt, &app.notifications);
                        bail!("{e}")
                    }
                }
            }
        }
    }
}

fn render_view(
    state: &SharedViewState,
    fmt: &dyn OutputFormatter,
    format: OutputFormat,
) -> Result<()> {
    match state {
        SharedViewState::Ready {
            contract,
            analysis,
            comments,
        } => {
            if format == OutputFormat::Json {
                fmt.print_json(&serde_json::json!({
                    "contract": contract,
                    "analysis": analysis,
                    "comments": comments,
                }));
                return Ok(());
            }

            fmt.info(&format!("Title:  {}", contract.title));
            fmt.info(&format!("Status: {}", contract.status));
            fmt.info(&format!("Risk:   {}", contract.risk_level()));
            for (index, factor) in contract
                .risk_factors
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
            {
                fmt.info(&format!(
                    "  {}: {}",
                    factor.label(index),
                    factor.description_text()
                ));
            }
            if let Some(analysis) = analysis {
                if let Some(model) = &analysis.ai_model_used {
                    fmt.info(&format!("Analyzed by {model}"));
                }
            }
            if comments.is_empty() {
                fmt.info("No feedback yet");
            }
            for comment in comments {
                let stars = comment
                    .rating
                    .map(|r| format!(" [{r}/5]"))
                    .unwrap_or_default();
                fmt.info(&format!(
                    "{}{}: {}",
                    comment.commenter_name, stars, comment.comment_text
                ));
            }
            Ok(())
        }
        SharedViewState::Expired { message } => bail!("{message}"),
        SharedViewState::Loading => bail!("Share link resolution did not complete"),
    }
}
