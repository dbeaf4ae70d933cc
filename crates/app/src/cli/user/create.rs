use brewline::roles::Role;
use brewline_app::domain::users::{
    SqliteUsersService, UsersService,
    models::{NewUser, UserUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Role: customer, barista, manager or admin
    #[arg(long, default_value = "customer")]
    role: Role,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<UserUuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = SqliteUsersService::new(db);

    let user = service
        .create_user(NewUser {
            uuid: args.user_uuid.unwrap_or_default(),
            name: args.name,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let token = service
        .issue_token(user.uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_role: {}", user.role);
    println!("api_token: {token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
