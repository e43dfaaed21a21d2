//! Out-of-band admin account administration.
//!
//! This tool is the only writer of the `role` column: no HTTP flow can
//! grant or remove admin. It talks straight to the database configured in
//! config.toml / NOTES_* env vars.

use notes_core::{Role, User, is_valid_email, normalize_email};
use notes_db::UserRepository;

use std::error::Error;

use clap::{Parser, Subcommand};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[derive(Parser)]
#[command(name = "notes-admin", about = "Manage admin accounts out-of-band")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a pre-verified admin account (OTP login, no password)
    Seed {
        #[arg(long)]
        email: String,

        #[arg(long, default_value = "Super Admin")]
        name: String,
    },

    /// Mark an existing admin verified and drop any legacy password
    Verify {
        #[arg(long)]
        email: String,
    },

    /// List admin accounts
    List,

    /// Delete an admin account
    Delete {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = notes_config::Config::load()?;
    let database_path = config.database_path()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&database_path)
                .create_if_missing(true),
        )
        .await?;

    sqlx::migrate!("../crates/notes-db/migrations")
        .run(&pool)
        .await?;

    let users = UserRepository::new(pool);

    match cli.command {
        Commands::Seed { email, name } => seed(&users, &email, &name).await,
        Commands::Verify { email } => verify(&users, &email).await,
        Commands::List => list(&users).await,
        Commands::Delete { email } => delete(&users, &email).await,
    }
}

async fn seed(users: &UserRepository, email: &str, name: &str) -> Result<(), Box<dyn Error>> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(format!("'{}' is not a valid email address", email).into());
    }

    if let Some(existing) = users.find_by_email(&email).await? {
        println!(
            "Account already exists for {} (role: {})",
            email, existing.role
        );
        return Ok(());
    }

    let mut admin = User::new(name.to_string(), email);
    admin.role = Role::Admin;
    admin.is_verified = true;
    users.create(&admin).await?;

    println!("Admin user created: {} <{}>", admin.name, admin.email);
    println!("Login method: OTP sent to email (no password)");

    Ok(())
}

async fn verify(users: &UserRepository, email: &str) -> Result<(), Box<dyn Error>> {
    let email = normalize_email(email);

    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| format!("No account found for {}", email))?;

    if user.role != Role::Admin {
        return Err(format!("{} is not an admin account", email).into());
    }

    users.force_verify(user.id).await?;

    println!("Admin verified: {} <{}>", user.name, email);
    println!("Any legacy password has been removed; login is OTP-based");

    Ok(())
}

async fn list(users: &UserRepository) -> Result<(), Box<dyn Error>> {
    let admins = users.find_by_role(Role::Admin).await?;

    if admins.is_empty() {
        println!("No admin users found");
        return Ok(());
    }

    println!("Admin users:");
    for (index, admin) in admins.iter().enumerate() {
        println!(
            "{}. {} <{}>{}",
            index + 1,
            admin.name,
            admin.email,
            if admin.is_verified {
                ""
            } else {
                " (not verified)"
            }
        );
    }

    Ok(())
}

async fn delete(users: &UserRepository, email: &str) -> Result<(), Box<dyn Error>> {
    let email = normalize_email(email);

    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| format!("No account found for {}", email))?;

    if user.role != Role::Admin {
        return Err(format!("{} is not an admin account", email).into());
    }

    users.delete_by_id(user.id).await?;
    println!("Admin deleted: {}", email);

    let remaining = users.count_by_role(Role::Admin).await?;
    println!("Remaining admins: {}", remaining);
    if remaining == 0 {
        println!("WARNING: no admin users left; run 'notes-admin seed' to create one");
    }

    Ok(())
}
