use async_trait::async_trait;
use deadpool_postgres::{Config, Object, Pool, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Row;
use tracing::{error, info, warn};

use super::Store;
use crate::config::DatabaseConfig;
use crate::error::ApiError;
use crate::models::{NewCharacter, NewUser, User};

/// PostgreSQL-backed store holding a deadpool connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Builds the pool and checks that a connection can actually be made.
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!("Creating PostgreSQL connection pool for host: {}:{}", config.host, config.port);

        let pool = Self::create_pool(config)?;

        let store = PgStore { pool };
        store.health_check().await?;

        Ok(store)
    }

    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.connect_timeout = Some(config.connection_timeout);

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => deadpool_postgres::SslMode::Disable,
            "prefer" => deadpool_postgres::SslMode::Prefer,
            "require" => deadpool_postgres::SslMode::Require,
            other => {
                warn!("Unknown SSL mode '{}', defaulting to 'prefer'", other);
                deadpool_postgres::SslMode::Prefer
            }
        });

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        pg_config.pool = Some(deadpool_postgres::PoolConfig::new(config.max_connections as usize));

        let tls_connector = TlsConnector::builder()
            .build()
            .map_err(|e| {
                error!("Failed to create TLS connector: {}", e);
                ApiError::Database(format!("TLS connector creation failed: {}", e))
            })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config.create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }
}

fn public_user(row: &Row) -> User {
    User {
        id: row.get(0),
        username: row.get(1),
        password: String::new(),
        full_name: row.get(2),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_schema(&self) -> Result<(), ApiError> {
        info!("Ensuring database schema");

        let client = self.get_connection().await?;

        let users_table = r#"
            CREATE TABLE IF NOT EXISTS Users (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(255) UNIQUE NOT NULL,
                password VARCHAR(255) NOT NULL,
                fullname VARCHAR(255) NOT NULL
            )
        "#;

        client.execute(users_table, &[])
            .await
            .map_err(|e| {
                error!("Failed to create Users table: {}", e);
                ApiError::Database(format!("Users table creation failed: {}", e))
            })?;

        let characters_table = r#"
            CREATE TABLE IF NOT EXISTS Characters (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                attack BIGINT NOT NULL,
                defense BIGINT NOT NULL,
                health BIGINT NOT NULL,
                user_id BIGINT NOT NULL REFERENCES Users(id) ON DELETE CASCADE
            )
        "#;

        client.execute(characters_table, &[])
            .await
            .map_err(|e| {
                error!("Failed to create Characters table: {}", e);
                ApiError::Database(format!("Characters table creation failed: {}", e))
            })?;

        let characters_user_index = "CREATE INDEX IF NOT EXISTS idx_characters_user_id ON Characters(user_id)";
        client.execute(characters_user_index, &[])
            .await
            .map_err(|e| {
                error!("Failed to create Characters user_id index: {}", e);
                ApiError::Database(format!("Characters user_id index creation failed: {}", e))
            })?;

        info!("Database schema ready");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[])
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                ApiError::Database(format!("Health check failed: {}", e))
            })?;

        Ok(())
    }

    async fn insert_character(&self, character: &NewCharacter) -> Result<i64, ApiError> {
        let client = self.get_connection().await?;

        let query = r#"
            INSERT INTO Characters (name, attack, defense, health, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#;

        let row = client.query_one(
            query,
            &[&character.name, &character.attack, &character.defense, &character.health, &character.user_id]
        )
        .await
        .map_err(ApiError::from)?;

        Ok(row.get(0))
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<i64>, ApiError> {
        let client = self.get_connection().await?;
        let query = "SELECT id FROM Users WHERE username = $1";

        let row = client.query_opt(query, &[&username])
            .await
            .map_err(ApiError::from)?;

        Ok(row.map(|row| row.get(0)))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, ApiError> {
        let client = self.get_connection().await?;

        let query = r#"
            INSERT INTO Users (username, password, fullname)
            VALUES ($1, $2, $3)
            RETURNING id
        "#;

        let row = client.query_one(query, &[&user.username, &user.password_hash, &user.full_name])
            .await
            .map_err(ApiError::from)?;

        Ok(row.get(0))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let client = self.get_connection().await?;
        let query = "SELECT id, username, fullname FROM Users WHERE username = $1";

        let row = client.query_opt(query, &[&username])
            .await
            .map_err(ApiError::from)?;

        Ok(row.as_ref().map(public_user))
    }

    async fn find_password_hash(&self, username: &str) -> Result<Option<(User, String)>, ApiError> {
        let client = self.get_connection().await?;
        let query = "SELECT id, username, fullname, password FROM Users WHERE username = $1";

        let row = client.query_opt(query, &[&username])
            .await
            .map_err(ApiError::from)?;

        Ok(row.map(|row| (public_user(&row), row.get(3))))
    }
}
