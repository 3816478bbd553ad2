use kingraph::db::{migrate, Db};
use kingraph::http::HttpServer;
use kingraph::Config;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("serve");

    match command {
        "verify" => {
            // Verify database schema and exit
            run_schema_verification().await?;
        }
        "serve" | _ => {
            run_http_server().await?;
        }
    }

    Ok(())
}

/// Run the HTTP query server
async fn run_http_server() -> Result<()> {
    log::info!("Starting Kingraph HTTP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Database path: {}", config.db_path().display());

    let db = Db::new(config.db_path());
    db.with_connection(migrate::run_migrations).await?;
    log::info!("Database initialized successfully");

    let server = HttpServer::new(db, &config);
    server.run(config.http_server.port).await?;

    Ok(())
}

/// Run database schema verification
async fn run_schema_verification() -> Result<()> {
    use kingraph::error::KingraphError;

    log::info!("Starting Kingraph v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Database path: {}", config.db_path().display());

    let db = Db::new(config.db_path());
    db.with_connection(migrate::run_migrations).await?;

    db.with_connection(|conn| {
        // Check tables
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
        let tables: Vec<String> = stmt.query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        let expected_tables = ["marriages", "persons", "schema_migrations"];
        for table in &expected_tables {
            if !tables.iter().any(|t| t == table) {
                return Err(KingraphError::Config(format!("Missing table: {}", table)));
            }
            log::debug!("✓ Table exists: {}", table);
        }

        // Check relation-scan indexes
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%' ORDER BY name")?;
        let indexes: Vec<String> = stmt.query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        let expected_indexes = [
            "idx_marriages_husband",
            "idx_marriages_wife",
            "idx_persons_father",
            "idx_persons_mother",
        ];
        for index_name in &expected_indexes {
            if indexes.iter().any(|i| i == index_name) {
                log::debug!("✓ Index exists: {}", index_name);
            } else {
                log::warn!("Index not found: {} (migration 002 may not be applied)", index_name);
            }
        }

        // Check migrations
        let applied = migrate::get_applied_migrations(conn)?;
        if applied.len() < 2 {
            return Err(KingraphError::Config(format!("Expected at least 2 migrations, found {}", applied.len())));
        }
        log::debug!("✓ {} migrations applied", applied.len());

        // Check pragmas
        let journal_mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
        if journal_mode.to_uppercase() != "WAL" {
            return Err(KingraphError::Config(format!("Journal mode is not WAL: {}", journal_mode)));
        }
        log::debug!("✓ Journal mode: WAL");

        let foreign_keys: i32 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        if foreign_keys != 1 {
            return Err(KingraphError::Config("Foreign keys not enabled".to_string()));
        }
        log::debug!("✓ Foreign keys enabled");

        // Integrity check
        let integrity: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if integrity != "ok" {
            return Err(KingraphError::Config(format!("Database integrity check failed: {}", integrity)));
        }
        log::info!("✓ Database integrity: OK");

        Ok(())
    }).await?;

    log::info!("✓ Database schema verification complete");

    Ok(())
}
