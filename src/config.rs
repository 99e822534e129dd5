use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Mail relay settings; absent when outbound email is not configured.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub relay_url: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(10),
        };
        let mail = match (std::env::var("MAIL_RELAY_URL"), std::env::var("MAIL_FROM")) {
            (Ok(relay_url), Ok(from)) => Some(MailConfig { relay_url, from }),
            _ => None,
        };
        Ok(Self {
            database_url,
            jwt,
            mail,
        })
    }
}
