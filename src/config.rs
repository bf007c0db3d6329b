use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Hosted backend
    pub supabase_url: String,
    pub supabase_anon_key: String,

    // HTTP server
    pub port: u16,
    pub max_upload_bytes: usize,

    // Cookies
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supabase_url =
            std::env::var("SUPABASE_URL").context("SUPABASE_URL not set")?;
        let supabase_anon_key =
            std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY not set")?;

        if supabase_url.trim().is_empty() {
            anyhow::bail!("SUPABASE_URL is empty");
        }
        if supabase_anon_key.trim().is_empty() {
            anyhow::bail!("SUPABASE_ANON_KEY is empty");
        }

        let max_upload_mb: usize = std::env::var("MAX_UPLOAD_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        Ok(Self {
            supabase_url: supabase_url.trim().trim_end_matches('/').to_string(),
            supabase_anon_key: supabase_anon_key.trim().to_string(),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            max_upload_bytes: max_upload_mb * 1024 * 1024,

            secure_cookies: std::env::var("SESSION_COOKIE_SECURE")
                .ok()
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "PORT",
        "MAX_UPLOAD_MB",
        "SESSION_COOKIE_SECURE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn set_required() {
        std::env::set_var("SUPABASE_URL", "https://project.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "anon-key");
    }

    // ==================== Required Variables ====================

    #[test]
    #[serial]
    fn test_missing_url_is_fatal() {
        clear_env();
        std::env::set_var("SUPABASE_ANON_KEY", "anon-key");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    #[serial]
    fn test_missing_key_is_fatal() {
        clear_env();
        std::env::set_var("SUPABASE_URL", "https://project.supabase.co");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    #[serial]
    fn test_blank_url_is_fatal() {
        clear_env();
        std::env::set_var("SUPABASE_URL", "   ");
        std::env::set_var("SUPABASE_ANON_KEY", "anon-key");

        assert!(Config::from_env().is_err());
    }

    // ==================== Defaults ====================

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().unwrap();
        assert_eq!(config.supabase_url, "https://project.supabase.co");
        assert_eq!(config.supabase_anon_key, "anon-key");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert!(!config.secure_cookies);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "3000");
        std::env::set_var("MAX_UPLOAD_MB", "5");
        std::env::set_var("SESSION_COOKIE_SECURE", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.secure_cookies);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "not-a-port");

        assert_eq!(Config::from_env().unwrap().port, 8080);

        clear_env();
    }
}
