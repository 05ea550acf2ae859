//! Auth commands - sign in, sign out, registration and password change
//!
//! All of these go through the `SessionStore` use case so the CLI gets
//! the same token persistence and fallback-identity behavior as any other
//! frontend of the library.

use anyhow::{bail, Result};
use clap::Subcommand;

use pactlens_core::config::Config;
use pactlens_core::domain::Email;
use pactlens_core::ports::{Credentials, Registration};
use pactlens_core::usecases::{AuthOutcome, PasswordChange, ViewGate};

use crate::output::{get_formatter, render_notifications, OutputFormat};
use crate::wiring;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        /// Optional display name
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Clear the persisted session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Change the account password
    ChangePassword,
}

impl AuthCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        match self {
            AuthCommand::Login { email, password } => {
                self.execute_login(config, email, password.as_deref(), &*fmt)
                    .await
            }
            AuthCommand::Register {
                email,
                password,
                full_name,
            } => {
                self.execute_register(config, email, password.as_deref(), full_name.clone(), &*fmt)
                    .await
            }
            AuthCommand::Logout => self.execute_logout(config, &*fmt),
            AuthCommand::Whoami => self.execute_whoami(config, &*fmt, format).await,
            AuthCommand::ChangePassword => self.execute_change_password(config, &*fmt).await,
        }
    }

    async fn execute_login(
        &self,
        config: &Config,
        email: &str,
        password: Option<&str>,
        fmt: &dyn crate::output::OutputFormatter,
    ) -> Result<()> {
        let app = wiring::bootstrap(config);
        let credentials = Credentials {
            email: Email::new(email)?,
            password: read_secret(password, "Password")?,
        };

        match app.session.login(&credentials).await {
            AuthOutcome::Success => {
                let session = app.session.session();
                let user = session.user().cloned();
                app.notifications.success(format!(
                    "Signed in as {}",
                    user.map(|u| u.email).unwrap_or_else(|| email.to_string())
                ));
                render_notifications(fmt, &app.notifications);
                Ok(())
            }
            AuthOutcome::Failed { error } => {
                app.notifications.error(error.clone());
                render_notifications(fmt, &app.notifications);
                bail!("{error}")
            }
        }
    }

    async fn execute_register(
        &self,
        config: &Config,
        email: &str,
        password: Option<&str>,
        full_name: Option<String>,
        fmt: &dyn crate::output::OutputFormatter,
    ) -> Result<()> {
        let app = wiring::bootstrap(config);
        let registration = Registration {
            email: Email::new(email)?,
            password: read_secret(password, "Password")?,
            full_name,
        };

        match app.session.register(&registration).await {
            AuthOutcome::Success => {
                app.notifications
                    .success(format!("Account created for {email}"));
                render_notifications(fmt, &app.notifications);
                Ok(())
            }
            AuthOutcome::Failed { error } => {
                app.notifications.error(error.clone());
                render_notifications(fmt, &app.notifications);
                bail!("{error}")
            }
        }
    }

    fn execute_logout(
        &self,
        config: &Config,
        fmt: &dyn crate::output::OutputFormatter,
    ) -> Result<()> {
        let app = wiring::bootstrap(config);
        app.session.logout();
        fmt.success("Signed out");
        Ok(())
    }

    async fn execute_whoami(
        &self,
        config: &Config,
        fmt: &dyn crate::output::OutputFormatter,
        format: OutputFormat,
    ) -> Result<()> {
        let app = wiring::bootstrap(config);
        app.session.initialize().await;

        match app.session.gate() {
            ViewGate::Render => {
                let session = app.session.session();
                let Some(user) = session.user().cloned() else {
                    bail!("Not signed in");
                };
                if format == OutputFormat::Json {
                    fmt.print_json(&serde_json::json!({
                        "email": user.email,
                        "full_name": user.full_name,
                        "id": user.id,
                    }));
                } else {
                    fmt.success(&format!(
                        "Signed in as {} {}",
                        user.email,
                        user.full_name
                            .map(|n| format!("({n})"))
                            .unwrap_or_default()
                    ));
                }
                Ok(())
            }
            _ => bail!("Not signed in"),
        }
    }

    async fn execute_change_password(
        &self,
        config: &Config,
        fmt: &dyn crate::output::OutputFormatter,
    ) -> Result<()> {
        let app = wiring::bootstrap(config);
        app.session.initialize().await;
        if app.session.gate() != ViewGate::Render {
            bail!("Not signed in");
        }

        let change = PasswordChange {
            current: read_secret(None, "Current password")?,
            new: read_secret(None, "New password")?,
            confirm: read_secret(None, "Confirm new password")?,
        };

        match app.change_password.change(&change).await {
            Ok(()) => {
                app.notifications.success("Password updated successfully");
                render_notifications(fmt, &app.notifications);
                Ok(())
            }
            Err(e) => {
                app.notifications.error(e.to_string());
                render_notifications(fmt, &app.notifications);
                bail!("{e}")
            }
        }
    }
}

/// Returns the given value or prompts on the terminal
fn read_secret(preset: Option<&str>, label: &str) -> Result<String> {
    use std::io::{self, Write};

    if let Some(value) = preset {
        return Ok(value.to_string());
    }
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
