//! One-shot research, recents, and favourites commands.

use anyhow::{Result, bail};
use colored::Colorize;

use stockin_client::{ApiClient, AuthOutcome};
use stockin_core::{ResearchQuery, StockinError};

const SESSION_EXPIRED: &str = "Session expired. Please run `stockin login` again.";

pub async fn ask(
    client: &ApiClient,
    company: String,
    tab: String,
    question: Vec<String>,
) -> Result<()> {
    let question = question.join(" ");
    let query = ResearchQuery::new(company, Some(tab), question);

    match client.research(&query).await {
        Ok(AuthOutcome::Authorized(answer)) => {
            println!("{answer}");
            Ok(())
        }
        Ok(AuthOutcome::Unauthorized) => bail!(SESSION_EXPIRED),
        Err(StockinError::Network(_)) => bail!("Network error. Please try again."),
        Err(StockinError::Api { message, .. }) => bail!("{message}"),
        Err(StockinError::Validation(message)) => bail!("{message}"),
        Err(e) => Err(e.into()),
    }
}

pub async fn recents(client: &ApiClient) -> Result<()> {
    let entries = match client.recents().await? {
        AuthOutcome::Authorized(entries) => entries,
        AuthOutcome::Unauthorized => bail!(SESSION_EXPIRED),
    };

    if entries.is_empty() {
        println!("No recent queries.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{} {}",
            format!("[{}]", entry.created_at).bright_black(),
            format!("({} - {})", entry.company, entry.tab).green()
        );
        println!("  Q: {}", entry.prompt);
        println!("  A: {}", entry.response);
        println!();
    }
    Ok(())
}

pub async fn favourites_list(client: &ApiClient) -> Result<()> {
    let favourites = match client.favourites().await? {
        AuthOutcome::Authorized(favourites) => favourites,
        AuthOutcome::Unauthorized => bail!(SESSION_EXPIRED),
    };

    if favourites.is_empty() {
        println!("No favourites yet. Add one with `stockin favourites add <name>`.");
        return Ok(());
    }

    for favourite in favourites {
        match favourite.company_id {
            Some(id) => println!("{:>4}  {}", id, favourite.company_name),
            None => println!("   -  {}", favourite.company_name),
        }
    }
    Ok(())
}

pub async fn favourites_add(client: &ApiClient, id: Option<i64>, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Company name is required.");
    }

    match client.add_favourite(id, name).await? {
        AuthOutcome::Authorized(()) => {
            println!("{} Added {} to favourites", "✓".green(), name);
            Ok(())
        }
        AuthOutcome::Unauthorized => bail!(SESSION_EXPIRED),
    }
}

pub async fn favourites_remove(client: &ApiClient, id: i64, name: Option<String>) -> Result<()> {
    // The server needs the company name even for removal; look it up
    // from the favourites list when the user didn't supply one.
    let name = match name {
        Some(name) => name,
        None => {
            let favourites = match client.favourites().await? {
                AuthOutcome::Authorized(favourites) => favourites,
                AuthOutcome::Unauthorized => bail!(SESSION_EXPIRED),
            };
            match favourites
                .into_iter()
                .find(|favourite| favourite.company_id == Some(id))
            {
                Some(favourite) => favourite.company_name,
                None => bail!("No favourite with id {id}."),
            }
        }
    };

    match client.remove_favourite(id, &name).await? {
        AuthOutcome::Authorized(()) => {
            println!("{} Removed {} from favourites", "✓".green(), name);
            Ok(())
        }
        AuthOutcome::Unauthorized => bail!(SESSION_EXPIRED),
    }
}
