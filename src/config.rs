use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub tokens: TokenSecrets,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

/// One secret + expiry window per token purpose. Purposes are never
/// interchangeable: a token signed for one purpose cannot verify under
/// another purpose's secret.
#[derive(Debug, Clone)]
pub struct TokenSecrets {
    pub access: TokenConfig,
    pub refresh: TokenConfig,
    pub reset: TokenConfig,
    pub email_verify: TokenConfig,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let tokens = TokenSecrets {
            access: TokenConfig {
                secret: env_required("ACCESS_TOKEN_SECRET")?,
                ttl_secs: env_ttl("ACCESS_TOKEN_TTL_SECS", 900)?,
            },
            refresh: TokenConfig {
                secret: env_required("REFRESH_TOKEN_SECRET")?,
                ttl_secs: env_ttl("REFRESH_TOKEN_TTL_SECS", 604_800)?,
            },
            reset: TokenConfig {
                secret: env_required("RESET_TOKEN_SECRET")?,
                ttl_secs: env_ttl("RESET_TOKEN_TTL_SECS", 3_600)?,
            },
            email_verify: TokenConfig {
                secret: env_required("EMAIL_TOKEN_SECRET")?,
                ttl_secs: env_ttl("EMAIL_TOKEN_TTL_SECS", 86_400)?,
            },
        };

        let host: IpAddr = env_or("EVENDA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid EVENDA_HOST: {e}"))?;

        let port: u16 = env_or("EVENDA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid EVENDA_PORT: {e}"))?;

        let base_url = env_or("EVENDA_BASE_URL", &format!("http://{host}:{port}"));

        let max_body_size: usize = env_or("EVENDA_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid EVENDA_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("EVENDA_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("EVENDA_SMTP_HOST").ok(),
            std::env::var("EVENDA_SMTP_PORT").ok(),
            std::env::var("EVENDA_SMTP_USER").ok(),
            std::env::var("EVENDA_SMTP_PASS").ok(),
            std::env::var("EVENDA_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid EVENDA_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            tokens,
            host,
            port,
            base_url,
            max_body_size,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_ttl(key: &str, default: i64) -> Result<i64, String> {
    match std::env::var(key) {
        Ok(v) => v.parse().map_err(|e| format!("Invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}
