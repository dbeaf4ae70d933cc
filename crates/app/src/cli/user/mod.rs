use clap::{Args, Subcommand};

mod create;
mod role;
mod token;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(create::CreateUserArgs),
    Token(token::IssueTokenArgs),
    Role(role::SetRoleArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Token(args) => token::run(args).await,
        UserSubcommand::Role(args) => role::run(args).await,
    }
}
