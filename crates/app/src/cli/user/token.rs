use brewline_app::domain::users::{SqliteUsersService, UsersService, models::UserUuid};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// User that should own the token
    #[arg(long)]
    user_uuid: UserUuid,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let token = SqliteUsersService::new(db)
        .issue_token(args.user_uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("api_token: {token}");

    Ok(())
}
