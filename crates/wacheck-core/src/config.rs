use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Typed configuration for the bot, loaded from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // Gateway
    pub gateway_url: String,
    pub gateway_api_key: String,
    pub instance: String,

    // Dispatch
    pub trigger: String,
    /// Append `@s.whatsapp.net` to identifiers before directory queries.
    /// Some bridges want bare numbers, some want full JIDs.
    pub directory_jid_suffix: bool,

    // Persistence
    pub settings_file: PathBuf,

    // Batch verification
    pub max_concurrent_checks: usize,
    pub lookup_timeout: Duration,

    // Session runner
    pub poll_timeout: Duration,
    pub keepalive_interval: Duration,
    pub reconnect_base_delay: Duration,
    pub reconnect_max_delay: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        // Required env vars
        let gateway_url = env_str("WACHECK_GATEWAY_URL").unwrap_or_default();
        if gateway_url.trim().is_empty() {
            return Err(Error::Config(
                "WACHECK_GATEWAY_URL environment variable is required".to_string(),
            ));
        }
        let gateway_api_key = env_str("WACHECK_GATEWAY_API_KEY").unwrap_or_default();
        if gateway_api_key.trim().is_empty() {
            return Err(Error::Config(
                "WACHECK_GATEWAY_API_KEY environment variable is required".to_string(),
            ));
        }

        let instance = env_str("WACHECK_INSTANCE")
            .and_then(non_empty)
            .unwrap_or_else(|| "wacheck".to_string());

        let trigger = env_str("WACHECK_TRIGGER")
            .and_then(non_empty)
            .unwrap_or_else(|| ".check".to_string());
        let directory_jid_suffix = env_bool("WACHECK_DIRECTORY_JID_SUFFIX").unwrap_or(false);

        let settings_file = PathBuf::from(
            env_str("WACHECK_SETTINGS_FILE").unwrap_or_else(|| "settings.json".to_string()),
        );

        let max_concurrent_checks = env_usize("WACHECK_MAX_CONCURRENT_CHECKS")
            .unwrap_or(4)
            .max(1);
        let lookup_timeout =
            Duration::from_millis(env_u64("WACHECK_LOOKUP_TIMEOUT_MS").unwrap_or(10_000));

        let poll_timeout = Duration::from_secs(env_u64("WACHECK_POLL_TIMEOUT_SECS").unwrap_or(25));
        let keepalive_interval =
            Duration::from_secs(env_u64("WACHECK_KEEPALIVE_SECS").unwrap_or(60));
        let reconnect_base_delay =
            Duration::from_secs(env_u64("WACHECK_RECONNECT_BASE_SECS").unwrap_or(5).max(1));
        let reconnect_max_delay =
            Duration::from_secs(env_u64("WACHECK_RECONNECT_MAX_SECS").unwrap_or(60));

        Ok(Self {
            gateway_url,
            gateway_api_key,
            instance,
            trigger,
            directory_jid_suffix,
            settings_file,
            max_concurrent_checks,
            lookup_timeout,
            poll_timeout,
            keepalive_interval,
            reconnect_base_delay,
            reconnect_max_delay,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
