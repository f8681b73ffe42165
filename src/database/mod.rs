use mongodb::{Client, Collection, Database};
use std::error::Error;

pub mod store;

pub use store::{EmergencyStore, UserStore};

/// Nomes herdados do banco de produção (singular em `emergency` mesmo)
pub const USERS_COLLECTION: &str = "users";
pub const EMERGENCY_COLLECTION: &str = "emergency";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool enxuto: os handlers fazem uma operação por request
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("emergency_service");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates necessary indexes for optimal query performance
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // users(uid) - busca de perfil é sempre por igualdade no campo uid
        let users = self
            .database()
            .collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let users_uid_index = IndexModel::builder().keys(doc! { "uid": 1 }).build();

        match users.create_index(users_uid_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(uid)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // users(status) - o fan-out de notificações busca todos os ativos
        let users_status_index = IndexModel::builder().keys(doc! { "status": 1 }).build();

        match users.create_index(users_status_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(status)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let emergency = self
            .database()
            .collection::<mongodb::bson::Document>(EMERGENCY_COLLECTION);

        // emergency(uid) - mesma busca por igualdade do lado de emergências
        let emergency_uid_index = IndexModel::builder().keys(doc! { "uid": 1 }).build();

        match emergency.create_index(emergency_uid_index).await {
            Ok(_) => log::info!("   ✅ Index created: emergency(uid)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // emergency(status) - contagem de emergências "new" a cada criação
        let emergency_status_index = IndexModel::builder().keys(doc! { "status": 1 }).build();

        match emergency.create_index(emergency_status_index).await {
            Ok(_) => log::info!("   ✅ Index created: emergency(status)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/emergency_service".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
