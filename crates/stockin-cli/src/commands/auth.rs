//! Login, signup, logout, and whoami commands.

use anyhow::{Result, bail};
use colored::Colorize;

use stockin_client::{ApiClient, SignupOutcome};
use stockin_core::{Credentials, SignupForm, StockinError};

use super::prompt;

pub async fn login(client: &ApiClient, email: Option<String>) -> Result<()> {
    // Never silently replace an existing session
    if let Ok(Some(session)) = client.store().load()
        && session.is_authenticated()
    {
        println!(
            "Already logged in{}. Run `stockin logout` first to switch accounts.",
            session
                .user_email
                .as_deref()
                .map(|e| format!(" as {e}"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;

    let credentials = Credentials { email, password };

    match client.login(&credentials).await {
        Ok(session) => {
            let who = session.user_email.as_deref().unwrap_or(&credentials.email);
            println!("{} Logged in as {}", "✓".green(), who);
            Ok(())
        }
        Err(StockinError::Unauthorized) => bail!("Login failed. Check your credentials."),
        Err(StockinError::Network(_)) => bail!("Network error. Please try again."),
        Err(StockinError::Api { message, .. }) => bail!("{message}"),
        Err(StockinError::Validation(message)) => bail!("{message}"),
        Err(e) => Err(e.into()),
    }
}

pub async fn signup(client: &ApiClient, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;
    let confirm_password = prompt("Confirm password: ")?;

    let form = SignupForm {
        email,
        password,
        confirm_password,
    };

    match client.signup(&form).await {
        Ok(SignupOutcome::VerificationRequired) => {
            println!(
                "{} Account created! Please check your email to verify, then run `stockin login`.",
                "✓".green()
            );
            Ok(())
        }
        Ok(SignupOutcome::SessionCreated(session)) => {
            let who = session.user_email.as_deref().unwrap_or(&form.email);
            println!("{} Account created! Logged in as {}", "✓".green(), who);
            Ok(())
        }
        Err(StockinError::Network(_)) => bail!("Network error. Please try again."),
        Err(StockinError::Api { message, .. }) => bail!("{message}"),
        Err(StockinError::Validation(message)) => bail!("{message}"),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    client.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> Result<()> {
    match client.store().load()? {
        Some(session) if session.is_authenticated() => {
            println!(
                "Logged in as {}",
                session.user_email.as_deref().unwrap_or("(email unknown)")
            );
            if let Some(id) = &session.user_id {
                println!("User id: {id}");
            }
            println!("Session created: {}", session.created_at);
        }
        _ => println!("Not logged in. Run `stockin login`."),
    }
    Ok(())
}
