use std::env;

/// Process-wide configuration, loaded once at startup and injected into
/// handlers and middleware via `web::Data`. The signing secret is only ever
/// passed around explicitly from here.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub auth_secret: String,
    /// Lifetime of issued access tokens, in days.
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            auth_secret: env::var("AUTH_SECRET").expect("AUTH_SECRET must be set"),
            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("TOKEN_TTL_DAYS must be a number"),
        }
    }

    pub fn server_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("AUTH_SECRET", "test-secret");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.auth_secret, "test-secret");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.token_ttl_days, 7);

        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("TOKEN_TTL_DAYS", "1");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.token_ttl_days, 1);
        assert_eq!(config.server_addr(), ("0.0.0.0".to_string(), 3000));

        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
        env::remove_var("TOKEN_TTL_DAYS");
    }
}
