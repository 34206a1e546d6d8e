use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub collections: CollectionsConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub booking: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Without a URL the server runs on the in-memory store.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }

/// Table names for each record kind, handed to the repositories at
/// construction.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CollectionsConfig {
    pub rooms: String,
    pub bookings: String,
    pub room_blocks: String,
    pub table_bookings: String,
    pub banquet_enquiries: String,
    pub contact_messages: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            rooms: "rooms".into(),
            bookings: "bookings".into(),
            room_blocks: "room_blocks".into(),
            table_bookings: "table_bookings".into(),
            banquet_enquiries: "banquet_enquiries".into(),
            contact_messages: "contact_messages".into(),
        }
    }
}

impl CollectionsConfig {
    /// Names are spliced into SQL, so only plain identifiers are accepted.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let names = [
            ("rooms", &self.rooms),
            ("bookings", &self.bookings),
            ("room_blocks", &self.room_blocks),
            ("table_bookings", &self.table_bookings),
            ("banquet_enquiries", &self.banquet_enquiries),
            ("contact_messages", &self.contact_messages),
        ];

        for (key, name) in names {
            let valid = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
                && !name.starts_with(|c: char| c.is_ascii_digit());
            if !valid {
                return Err(config::ConfigError::Message(format!(
                    "collections.{key}: '{name}' is not a valid table name"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_secret: String,
    pub session_expiration_seconds: u64,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_tax_percent")]
    pub default_tax_percent: i64,
}

fn default_tax_percent() -> i64 { innkeep_core::DEFAULT_TAX_PERCENT }

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            default_tax_percent: default_tax_percent(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `INNKEEP__DATABASE__URL=postgres://...`
            .add_source(config::Environment::with_prefix("INNKEEP").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.collections.validate()?;
        Ok(config)
    }
}
