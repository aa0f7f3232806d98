//! Properties file loading

use crate::error::{PatchError, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_PROPERTIES_FILE: &str = "svn.properties";

const KEY_PREFIX: &str = "svn.";
const ENV_PREFIX: &str = "SVN_PATCH_";

/// Server location, credentials and client binary for a session.
#[derive(Clone, Serialize, Deserialize)]
pub struct SvnSettings {
    /// Default branch URL for batch exports.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_binary() -> String {
    "svn".to_string()
}

impl Default for SvnSettings {
    fn default() -> Self {
        Self { url: None, username: None, password: None, binary: default_binary() }
    }
}

impl fmt::Debug for SvnSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvnSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("binary", &self.binary)
            .finish()
    }
}

impl SvnSettings {
    /// The configured default branch URL, required when none is given explicitly.
    pub fn default_url(&self) -> Result<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty()).ok_or_else(|| {
            PatchError::Configuration(
                "no branch URL given and svn.url is not set in the properties file".to_string(),
            )
        })
    }
}

/// Load settings from `path`, layered under `SVN_PATCH_*` environment variables.
pub fn load_settings(path: &Path) -> Result<SvnSettings> {
    let content = fs::read_to_string(path).map_err(|e| {
        PatchError::Configuration(format!("cannot read properties file {}: {}", path.display(), e))
    })?;

    let properties: BTreeMap<String, String> = parse_properties(&content)
        .into_iter()
        .filter_map(|(key, value)| key.strip_prefix(KEY_PREFIX).map(|k| (k.to_string(), value)))
        .collect();

    let settings: SvnSettings = Figment::from(Serialized::defaults(SvnSettings::default()))
        .merge(Serialized::defaults(properties))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(|e| {
            PatchError::Configuration(format!("invalid settings in {}: {}", path.display(), e))
        })?;

    tracing::debug!("Loaded {:?} from {}", settings, path.display());
    Ok(settings)
}

/// Parse `key=value` / `key: value` lines, ignoring blanks and `#`/`!` comments.
///
/// Later keys override earlier ones.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let split_at = line.find(['=', ':']);
        let (key, value) = match split_at {
            Some(idx) => (&line[..idx], &line[idx + 1..]),
            None => (line, ""),
        };
        map.insert(key.trim().to_string(), value.trim().to_string());
    }
    map
}
