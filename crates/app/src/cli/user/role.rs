use brewline::roles::Role;
use brewline_app::domain::users::{SqliteUsersService, UsersService, models::UserUuid};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SetRoleArgs {
    /// User whose role changes
    #[arg(long)]
    user_uuid: UserUuid,

    /// New role: customer, barista, manager or admin
    #[arg(long)]
    role: Role,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetRoleArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = SqliteUsersService::new(db)
        .set_role(args.user_uuid, args.role)
        .await
        .map_err(|error| format!("failed to change role: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_role: {}", user.role);

    Ok(())
}
