use mongodb::{options::ClientOptions, Client, Database};
use std::time::Duration;

/// Connect to the document store and return a handle to the configured database.
pub async fn connect(url: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;

    options.app_name = Some("todo-backend".to_string());
    options.max_pool_size = Some(10);
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(options)?;

    // Lightweight ping so a bad connection string fails at startup, not on
    // the first request.
    client.list_database_names().await?;

    Ok(client.database(db_name))
}
