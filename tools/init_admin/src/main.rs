use std::env;

use dotenvy::dotenv;
use edunova::auth::password::hash_password;
use edunova::db::{self, admins};
use edunova::models::RegisterAdminRequest;

fn is_dry_run() -> bool {
    !env::args().any(|a| a == "--apply")
}

/// Reads `--name value` or `--name=value` from the command line.
fn arg(name: &str) -> Option<String> {
    let flag = format!("--{name}");
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        if a == flag {
            return args.next();
        }
        if let Some(v) = a.strip_prefix(&format!("{flag}=")) {
            return Some(v.to_string());
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://edunova.db".to_string());
    let req = RegisterAdminRequest {
        username: arg("username").unwrap_or_else(|| "admin".to_string()),
        email: arg("email").unwrap_or_else(|| "admin@edunova.local".to_string()),
        password: arg("password")
            .or_else(|| env::var("DEFAULT_ADMIN_PASSWORD").ok())
            .unwrap_or_else(|| "admin123".to_string()),
        full_name: arg("full-name").unwrap_or_else(|| "System Administrator".to_string()),
        security_key: None,
        role: Some(arg("role").unwrap_or_else(|| "super_admin".to_string())),
    }
    .normalized()?;

    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool).await?;

    if let Some(existing) = admins::find_by_login(&pool, &req.username).await? {
        println!(
            "Admin '{}' already exists (id {}), nothing to do",
            existing.username, existing.id
        );
        return Ok(());
    }

    let role = req.role.as_deref().unwrap_or("admin");
    if is_dry_run() {
        println!(
            "[DRY RUN] Would create {} '{}' <{}> in {}",
            role, req.username, req.email, database_url
        );
        println!("Re-run with --apply to write it");
        return Ok(());
    }

    let hash = hash_password(&req.password).map_err(|e| e.to_string())?;
    let admin = admins::insert(&pool, &req.username, &req.email, &hash, &req.full_name, role).await?;
    println!("Created {} '{}' with id {}", admin.role, admin.username, admin.id);

    Ok(())
}
