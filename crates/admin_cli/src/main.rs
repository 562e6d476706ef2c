use std::error::Error;

use clap::{Args, Parser, Subcommand};
use dialoguer::Password;
use engine::{Currency, Engine};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "gruzzolo_admin")]
#[command(about = "Admin utilities for Gruzzolo (bootstrap users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./gruzzolo.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user with Basic-auth credentials.
    Create(UserCreateArgs),
    /// Set the currency a user's amounts are formatted in.
    SetCurrency(SetCurrencyArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

#[derive(Args, Debug)]
struct SetCurrencyArgs {
    #[arg(long)]
    username: String,
    #[arg(long, value_parser = parse_currency)]
    currency: Currency,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Command::User(user) => match user.command {
            UserCommand::Create(args) => {
                let password = Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?;

                let db = connect_db(&cli.database_url).await?;
                let user = users::ActiveModel {
                    username: Set(args.username.clone()),
                    password: Set(password),
                };
                users::Entity::insert(user).exec(&db).await?;
                println!("Created user '{}'", args.username);
            }
            UserCommand::SetCurrency(args) => {
                let db = connect_db(&cli.database_url).await?;
                let engine = Engine::builder().database(db).build();
                let settings = engine
                    .update_user_currency(&args.username, args.currency)
                    .await?;
                println!(
                    "Set currency for '{}' to {}",
                    settings.user_id, settings.currency
                );
            }
        },
    }

    Ok(())
}
