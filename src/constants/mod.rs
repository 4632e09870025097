pub struct Env {
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub redis_url: String,
    pub account_cache_ttl: u64,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set in .env file or environment variable");

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .expect("DB_MAX_CONNECTIONS must be a valid u32 integer");

        let redis_url = std::env::var("REDIS_URL")
            .expect("REDIS_URL must be set in .env file or environment variable");
        let account_cache_ttl = std::env::var("ACCOUNT_CACHE_TTL")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .expect("ACCOUNT_CACHE_TTL must be a valid u64 integer");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            jwt_secret,
            database_url,
            db_max_connections,
            redis_url,
            account_cache_ttl,
            frontend_url,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// Accounts scanned when building suggestions, before filtering.
pub const SUGGESTION_POOL_SIZE: i64 = 50;
pub const SUGGESTION_LIMIT: usize = 10;

pub const SEARCH_DEFAULT_LIMIT: i64 = 20;

/// Username shown for a requester the account directory no longer knows.
pub const UNKNOWN_USERNAME: &str = "Unknown";
