use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::render::{FontFamily, RendererConfig};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparseable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub pdf_font: FontFamily,
    pub pdf_producer: String,
    /// Upper bound on one layout + render job.
    pub render_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            pdf_font: FontFamily::Helvetica,
            pdf_producer: "Resume Forge".to_string(),
            render_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let defaults = Config::default();

        let pdf_font = match optional_env("PDF_FONT") {
            Some(name) => FontFamily::parse(&name)
                .ok_or_else(|| anyhow!("PDF_FONT must be one of helvetica, times, courier (got '{name}')"))?,
            None => defaults.pdf_font,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            pdf_font,
            pdf_producer: optional_env("PDF_PRODUCER").unwrap_or(defaults.pdf_producer),
            render_timeout: match optional_env("RENDER_TIMEOUT_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.parse::<u64>()
                        .context("RENDER_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.render_timeout,
            },
        })
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            font: self.pdf_font,
            producer: self.pdf_producer.clone(),
            ..RendererConfig::default()
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.render_timeout, Duration::from_secs(10));
        assert_eq!(config.pdf_font, FontFamily::Helvetica);
    }

    #[test]
    fn test_renderer_config_carries_font_and_producer() {
        let config = Config {
            pdf_font: FontFamily::Courier,
            pdf_producer: "Acme".to_string(),
            ..Config::default()
        };
        let renderer = config.renderer_config();
        assert_eq!(renderer.font, FontFamily::Courier);
        assert_eq!(renderer.producer, "Acme");
        assert_eq!(renderer.line_height, RendererConfig::default().line_height);
    }
}
