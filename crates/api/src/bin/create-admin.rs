//! Bootstrap an admin account from the command line.
//!
//! ```text
//! create-admin <NAME> <EMAIL> <PASSWORD> [ROLE]
//! ```
//!
//! Reads `DATABASE_URL` (and `.env`), applies pending migrations, then
//! inserts the account. Exits non-zero on invalid input or a duplicate email.

use std::process::ExitCode;

use welfare_api::auth::password::hash_password;
use welfare_core::validation::{normalize_email, validate_email, validate_password};
use welfare_db::models::admin::CreateAdmin;
use welfare_db::repositories::AdminRepo;

const USAGE: &str = "Usage: create-admin <NAME> <EMAIL> <PASSWORD> [ROLE]";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (name, email, password, role) = match args.as_slice() {
        [name, email, password] => (name, email, password, None),
        [name, email, password, role] => (name, email, password, Some(role.clone())),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let name = name.trim().to_string();
    let email = normalize_email(email);
    if name.is_empty() {
        eprintln!("Name must not be empty");
        return ExitCode::FAILURE;
    }
    if let Err(e) = validate_email(&email).and_then(|()| validate_password(password)) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = welfare_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    welfare_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = CreateAdmin {
        name,
        email,
        password_hash,
        role,
    };
    match AdminRepo::create(&pool, &input).await {
        Ok(admin) => {
            println!("Created admin #{} <{}> with role '{}'", admin.id, admin.email, admin.role);
            ExitCode::SUCCESS
        }
        Err(e) if welfare_db::is_unique_violation(&e) => {
            eprintln!("An admin with email {} already exists", input.email);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Failed to create admin: {e}");
            ExitCode::FAILURE
        }
    }
}
