use brewline_app::database::{self, Db};
use clap::{Parser, Subcommand};

mod db;
mod menu;
mod promo;
mod user;

#[derive(Debug, Parser)]
#[command(name = "brewline-app", about = "Brewline CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Menu(menu::MenuCommand),
    Promo(promo::PromoCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Menu(command) => menu::run(command).await,
            Commands::Promo(command) => promo::run(command).await,
        }
    }
}

/// Open the database for a one-off command.
async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}
