use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "stockin")]
#[command(about = "StockIn - company research from your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to StockIn and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create a StockIn account
    Signup {
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the identity cached with the current session
    Whoami,
    /// Ask a single research question
    Ask {
        /// Company to research
        #[arg(long)]
        company: String,
        /// Research tab (overview, financials, news, ...)
        #[arg(long, default_value = stockin_core::query::DEFAULT_TAB)]
        tab: String,
        /// The question to ask
        question: Vec<String>,
    },
    /// Interactive research chat
    Chat {
        /// Company to research
        #[arg(long)]
        company: String,
        /// Research tab (overview, financials, news, ...)
        #[arg(long, default_value = stockin_core::query::DEFAULT_TAB)]
        tab: String,
    },
    /// List recent research queries
    Recents,
    /// Manage favourite companies
    Favourites {
        #[command(subcommand)]
        action: FavouritesAction,
    },
}

#[derive(Subcommand)]
enum FavouritesAction {
    /// List favourite companies
    List,
    /// Mark a company as favourite
    Add {
        /// Company name
        name: String,
        /// Numeric company id, when known
        #[arg(long)]
        id: Option<i64>,
    },
    /// Remove a company from the favourites
    Remove {
        /// Numeric company id
        id: i64,
        /// Company name; looked up from the favourites list when omitted
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let client = commands::build_client()?;

    match cli.command {
        Commands::Login { email } => commands::auth::login(&client, email).await?,
        Commands::Signup { email } => commands::auth::signup(&client, email).await?,
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Whoami => commands::auth::whoami(&client)?,
        Commands::Ask {
            company,
            tab,
            question,
        } => commands::research::ask(&client, company, tab, question).await?,
        Commands::Chat { company, tab } => commands::chat::run(&client, company, tab).await?,
        Commands::Recents => commands::research::recents(&client).await?,
        Commands::Favourites { action } => match action {
            FavouritesAction::List => commands::research::favourites_list(&client).await?,
            FavouritesAction::Add { name, id } => {
                commands::research::favourites_add(&client, id, &name).await?
            }
            FavouritesAction::Remove { id, name } => {
                commands::research::favourites_remove(&client, id, name).await?
            }
        },
    }

    Ok(())
}
