use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Database
    pub database_url: String,

    // i18n
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale =
            std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string());
        if default_locale.trim().is_empty() {
            anyhow::bail!("DEFAULT_LOCALE must not be blank");
        }

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string()),

            default_locale,
        })
    }
}
