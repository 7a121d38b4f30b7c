use crate::auth::google::DEFAULT_USERINFO_URL;
use anyhow::Result;
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Détecte l'environnement via `APP_ENV`
    pub fn detect() -> Self {
        Self::from_app_env(env::var("APP_ENV").ok().as_deref())
    }

    fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Paramètres SMTP des emails de vérification
#[derive(Debug, Clone, PartialEq)]
pub struct MailSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub use_tls: bool,
    pub sender: String,
}

impl MailSettings {
    /// Lit les variables `MAIL_*`; `None` si serveur, port ou identifiants manquent
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = value("MAIL_SERVER")?.trim().to_string();
        let port = match value("MAIL_PORT")?.trim().parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => {
                tracing::warn!("   MAIL_PORT has an invalid value, mail delivery disabled");
                return None;
            }
        };
        let username = value("MAIL_USERNAME")?;
        let password = value("MAIL_PASSWORD")?;
        // TLS par défaut, comme la plupart des relais sur le port 587
        let use_tls = value("MAIL_USE_TLS").is_none_or(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        });
        let sender = value("MAIL_DEFAULT_SENDER").unwrap_or_else(|| username.clone());

        Some(Self {
            server,
            port,
            username,
            password,
            use_tls,
            sender,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub db_pool_size: u32,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Base of the links put in verification emails.
    pub public_base_url: String,
    pub google_userinfo_url: String,
    /// `None` keeps verification links in the logs.
    pub mail: Option<MailSettings>,
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    /// avec détection automatique de l'environnement
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        Self::load_env_file(&environment);

        let database_url = Self::get_database_url(&environment)?;
        let jwt_secret = Self::get_jwt_secret(&environment)?;
        let db_pool_size = parse_or("DB_POOL_SIZE", 5);
        let jwt_expiration_hours = parse_or("JWT_EXPIRATION_HOURS", 24);
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parse_or("SERVER_PORT", 3000);
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{server_port}"));
        let google_userinfo_url =
            env::var("GOOGLE_USERINFO_URL").unwrap_or_else(|_| DEFAULT_USERINFO_URL.to_string());
        let mail = MailSettings::from_env();

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Database: {}", Self::mask_credentials(&database_url));
        tracing::debug!("   Pool size: {}", db_pool_size);
        tracing::debug!("   Public URL: {}", public_base_url);
        tracing::debug!("   Server: {}:{}", server_host, server_port);
        match &mail {
            Some(mail) => tracing::debug!("   Mail: {}:{} as {}", mail.server, mail.port, mail.sender),
            None => tracing::debug!("   Mail: not configured"),
        }

        Ok(Self {
            environment,
            database_url,
            db_pool_size,
            jwt_secret,
            jwt_expiration_hours,
            server_host,
            server_port,
            public_base_url,
            google_userinfo_url,
            mail,
        })
    }

    /// Charge `.env` en développement; en production les variables sont injectées
    fn load_env_file(environment: &Environment) {
        if environment.is_production() {
            tracing::info!("📦 Production mode: using injected environment variables");
            return;
        }

        tracing::info!("📦 Development mode: loading .env file");
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("   Loaded: {}", path.display()),
            Err(e) if e.not_found() => {
                tracing::warn!("   .env file not found, using environment variables");
            }
            Err(e) => tracing::warn!("   Failed to load .env: {}", e),
        }
    }

    /// Récupère DATABASE_URL, ou la construit depuis les composants en dev
    fn get_database_url(environment: &Environment) -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        if environment.is_production() {
            anyhow::bail!("DATABASE_URL must be set in production");
        }

        let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
        let password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".to_string());
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "qna_board".to_string());

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, database
        ))
    }

    /// Récupère JWT_SECRET avec validation
    fn get_jwt_secret(environment: &Environment) -> Result<String> {
        let secret = match env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) if environment.is_production() => {
                tracing::error!("❌ JWT_SECRET not set in production!");
                anyhow::bail!("JWT_SECRET is required in production");
            }
            Err(_) => {
                tracing::warn!("⚠️  JWT_SECRET not set, using default (DEVELOPMENT ONLY!)");
                "dev_secret_key_change_in_production".to_string()
            }
        };

        if environment.is_production() && secret.len() < 32 {
            anyhow::bail!(
                "JWT_SECRET must be at least 32 characters in production (current: {})",
                secret.len()
            );
        }

        Ok(secret)
    }

    /// Masque les credentials dans les logs
    fn mask_credentials(url: &str) -> String {
        if let Some(at_pos) = url.rfind('@')
            && let Some(scheme_end) = url.find("://")
            && scheme_end < at_pos
        {
            let scheme = &url[..scheme_end + 3];
            let after_at = &url[at_pos..];
            return format!("{}***:***{}", scheme, after_at);
        }
        url.to_string()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parses an environment variable, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("   {} has an invalid value, using default", key);
            default
        }),
        Err(_) => default,
    }
}
