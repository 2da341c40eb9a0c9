use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_FEEDBACK_LANGUAGE: &str = "Portuguese";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub lessons: LessonSettings,
}

/// Knobs for content generation that are not tied to the LLM transport.
#[derive(Debug, Clone)]
pub struct LessonSettings {
    pub default_language: String,
    pub generate_details: bool,
    pub feedback_language: String,
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            generate_details: true,
            feedback_language: DEFAULT_FEEDBACK_LANGUAGE.to_string(),
        }
    }
}

impl LessonSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_language: env_string("DEFAULT_LANGUAGE").unwrap_or(defaults.default_language),
            generate_details: env_bool("GENERATE_WORD_DETAILS").unwrap_or(defaults.generate_details),
            feedback_language: env_string("FEEDBACK_LANGUAGE").unwrap_or(defaults.feedback_language),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        Self {
            host,
            port,
            lessons: LessonSettings::from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    parse_bool(&std::env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
