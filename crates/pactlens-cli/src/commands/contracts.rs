//! Contract commands - list, inspect, upload, share and delete contracts
//!
//! Every command initializes the session first and refuses to run without
//! an authenticated identity, mirroring the gating every protected view
//! applies.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use pactlens_api::share_token_from_url;
use pactlens_core::config::Config;
use pactlens_core::domain::ContractId;
use pactlens_core::ports::ContractUpload;
use pactlens_core::usecases::ViewGate;

use crate::output::{get_formatter, render_notifications, OutputFormat, OutputFormatter};
use crate::wiring::{self, App};

#[derive(Debug, Subcommand)]
pub enum ContractsCommand {
    /// List all uploaded contracts
    List,
    /// Show one contract with its risk assessment
    Show { id: String },
    /// Upload a contract document for analysis
    Upload {
        /// Path to the document
        file: PathBuf,
        /// Title; defaults to the file name
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Contract category, e.g. nda, service, employment
        #[arg(long)]
        contract_type: Option<String>,
    },
    /// Delete a contract
    Delete { id: String },
    /// Show analysis metadata for a contract
    Analysis { id: String },
    /// Mint a share link for a contract
    Share { id: String },
    /// List feedback comments on a contract
    Comments { id: String },
    /// Show the unread feedback count across all contracts
    Unread,
}

impl ContractsCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        let app = wiring::bootstrap(config);

        app.session.initialize().await;
        if app.session.gate() != ViewGate::Render {
            bail!("Not signed in; run `pactlens auth login` first");
        }

        match self {
            ContractsCommand::List => self.execute_list(&app, &*fmt, format).await,
            ContractsCommand::Show { id } => self.execute_show(&app, id, &*fmt, format).await,
            ContractsCommand::Upload {
                file,
                title,
                description,
                contract_type,
            } => {
                self.execute_upload(
                    &app,
                    file,
                    title.clone(),
                    description.clone(),
                    contract_type.clone(),
                    &*fmt,
                )
                .await
            }
            ContractsCommand::Delete { id } => self.execute_delete(&app, id, &*fmt).await,
            ContractsCommand::Analysis { id } => {
                self.execute_analysis(&app, id, &*fmt, format).await
            }
            ContractsCommand::Share { id } => self.execute_share(&app, id, &*fmt, format).await,
            ContractsCommand::Comments { id } => {
                self.execute_comments(&app, id, &*fmt, format).await
            }
            ContractsCommand::Unread => self.execute_unread(&app, &*fmt, format).await,
        }
    }

    async fn execute_list(
        &self,
        app: &App,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let contracts = app.contracts.list().await?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::to_value(&contracts)?);
            return Ok(());
        }
        if contracts.is_empty() {
            fmt.info("No contracts uploaded yet");
            return Ok(());
        }
        for contract in contracts {
            fmt.info(&format!(
                "{}  {}  [{}]  {}",
                contract.id,
                contract.title,
                contract.status,
                contract.risk_level(),
            ));
        }
        Ok(())
    }

    async fn execute_show(
        &self,
        app: &App,
        id: &str,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let id = ContractId::from_str(id)?;
        let contract = app.contracts.get(&id).await?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::to_value(&contract)?);
            return Ok(());
        }

        fmt.info(&format!("Title:  {}", contract.title));
        fmt.info(&format!("Status: {}", contract.status));
        fmt.info(&format!(
            "Risk:   {} (score {})",
            contract.risk_level(),
            contract
                .risk_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "n/a".to_string())
        ));
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
        if let Some(recommendations) = &contract.recommendations {
            fmt.info(&format!("Recommendations: {recommendations}"));
        }
        Ok(())
    }

    async fn execute_upload(
        &self,
        app: &App,
        file: &Path,
        title: Option<String>,
        description: Option<String>,
        contract_type: Option<String>,
        fmt: &dyn OutputFormatter,
    ) -> Result<()> {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("Path has no file name")?;
        let title = title.unwrap_or_else(|| default_title(&file_name));

        let contract = app
            .contracts
            .upload(ContractUpload {
                file_name,
                bytes,
                title,
                description,
                contract_type,
            })
            .await?;

        app.notifications.success(format!(
            "Uploaded '{}' for analysis ({})",
            contract.title, contract.id
        ));
        render_notifications(fmt, &app.notifications);
        Ok(())
    }

    async fn execute_delete(&self, app: &App, id: &str, fmt: &dyn OutputFormatter) -> Result<()> {
        let id = ContractId::from_str(id)?;
        app.contracts.delete(&id).await?;
        app.notifications.success("Contract deleted");
        render_notifications(fmt, &app.notifications);
        Ok(())
    }

    async fn execute_analysis(
        &self,
        app: &App,
        id: &str,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let id = ContractId::from_str(id)?;
        let analysis = app.contracts.analysis(&id).await?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::to_value(&analysis)?);
            return Ok(());
        }
        fmt.info(&format!(
            "Model: {}",
            analysis.ai_model_used.as_deref().unwrap_or("n/a")
        ));
        if let Some(seconds) = analysis.processing_time_seconds {
            fmt.info(&format!("Processing time: {seconds:.1}s"));
        }
        if let Some(status) = &analysis.status {
            fmt.info(&format!("Status: {status}"));
        }
        Ok(())
    }

    async fn execute_share(
        &self,
        app: &App,
        id: &str,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let id = ContractId::from_str(id)?;
        let link = app.contracts.share(&id).await?;
        let token = share_token_from_url(&link.share_url)?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::json!({
                "share_url": link.share_url,
                "share_token": token.as_str(),
                "expires_at": link.expires_at,
            }));
            return Ok(());
        }
        fmt.success(&format!("Share link: {}", link.share_url));
        fmt.info(&format!("Token: {token}"));
        if let Some(expires_at) = link.expires_at {
            fmt.info(&format!("Expires: {expires_at}"));
        }
        Ok(())
    }

    async fn execute_comments(
        &self,
        app: &App,
        id: &str,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let id = ContractId::from_str(id)?;
        let comments = app.contracts.comments(&id).await?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::to_value(&comments)?);
            return Ok(());
        }
        if comments.is_empty() {
            fmt.info("No feedback yet");
            return Ok(());
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

    async fn execute_unread(
        &self,
        app: &App,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let count = app.contracts.unread_count().await?;
        if format == OutputFormat::Json {
            fmt.print_json(&serde_json::json!({ "total_comments": count.total_comments }));
            return Ok(());
        }
        fmt.info(&format!("Unread feedback: {}", count.total_comments));
        Ok(())
    }
}

/// Derives a human title from a file name by dropping the extension
fn default_title(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
