//! Client configuration, read from the environment.

use std::{env, str::FromStr, time::Duration};

use japan_info_shared::{
    pagination::DEFAULT_WINDOW_WIDTH, query::DEFAULT_PAGE_SIZE, related::DEFAULT_RELATED_CAP,
    Locale,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend API root, without trailing slash.
    pub api_base: String,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub window_width: usize,
    pub related_cap: usize,
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            window_width: DEFAULT_WINDOW_WIDTH,
            related_cap: DEFAULT_RELATED_CAP,
            locale: Locale::Ja,
        }
    }
}

impl ClientConfig {
    /// Reads `JAPAN_INFO_API_BASE`, `JAPAN_INFO_PAGE_SIZE`,
    /// `JAPAN_INFO_TIMEOUT_MS` and `JAPAN_INFO_LOCALE`. Unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("JAPAN_INFO_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(size) =
            parse_positive::<usize>(lookup("JAPAN_INFO_PAGE_SIZE"), "JAPAN_INFO_PAGE_SIZE")
        {
            config.page_size = size;
        }
        if let Some(ms) =
            parse_positive::<u64>(lookup("JAPAN_INFO_TIMEOUT_MS"), "JAPAN_INFO_TIMEOUT_MS")
        {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("JAPAN_INFO_LOCALE") {
            match Locale::parse(&raw) {
                Some(locale) => config.locale = locale,
                None => tracing::warn!("Ignoring unknown JAPAN_INFO_LOCALE `{}`", raw),
            }
        }

        config
    }
}

fn parse_positive<T>(raw: Option<String>, key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            tracing::warn!("Ignoring invalid {} `{}`", key, raw);
            None
        },
    }
}
