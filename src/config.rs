//! Configuration constants and profile loading for mymdb
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = https://mymdb-c295923140ec.herokuapp.com/
//! insecure = false
//! ```

use anyhow::Result;
use ini::Ini;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Backend the client talks to when no profile overrides it
pub const DEFAULT_SERVER: &str = "https://mymdb-c295923140ec.herokuapp.com/";

/// Default profile file path for mymdb
pub const DEFAULT_PROFILE_PATH: &str = "~/.mymdb/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MYMDB_PROFILE_PATH";

/// Default session file path
pub const DEFAULT_SESSION_PATH: &str = "~/.mymdb/session";

/// Environment variable name for overriding the session path
pub const SESSION_PATH_ENV_VAR: &str = "MYMDB_SESSION_PATH";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    path_from_env(PROFILE_PATH_ENV_VAR, DEFAULT_PROFILE_PATH)
}

/// Get the session file path, checking environment variable first, then falling back to default
pub fn get_session_path() -> String {
    path_from_env(SESSION_PATH_ENV_VAR, DEFAULT_SESSION_PATH)
}

fn path_from_env(var: &str, default: &str) -> String {
    std::env::var_os(var)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| default.to_string())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{path}': {e}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Connection settings for one backend
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfile {
    server: Url,
    insecure: bool,
}

impl ClientProfile {
    pub fn new(server: &str, insecure: bool) -> Result<Self> {
        let server = Url::parse(server)
            .map_err(|e| anyhow::anyhow!("Invalid server URL '{server}': {e}"))?;
        if server.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Server URL '{server}' cannot be used as a base"));
        }
        Ok(Self { server, insecure })
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Accept invalid TLS certificates
    pub fn insecure(&self) -> bool {
        self.insecure
    }
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            server: Url::parse(DEFAULT_SERVER).expect("default server URL is valid"),
            insecure: false,
        }
    }
}

/// Reads named profiles from an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Look up a profile. `Ok(None)` if the file or the section does not exist.
    pub fn get_profile(&self, name: &str) -> Result<Option<ClientProfile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path).map_err(|e| {
            anyhow::anyhow!("Failed to read profile file '{}': {e}", self.path.display())
        })?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let server = section.get("server").unwrap_or(DEFAULT_SERVER);
        let insecure = match section.get("insecure") {
            Some(value) => parse_bool(value)
                .ok_or_else(|| anyhow::anyhow!("Invalid 'insecure' value '{value}' in profile '{name}'"))?,
            None => false,
        };

        ClientProfile::new(server, insecure).map(Some)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Load a profile by name, falling back to the default backend when it is not configured
pub fn load_profile(profile_name: &str, profile_path: &str) -> Result<ClientProfile> {
    tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

    let store = IniProfileStore::new(expand_path(profile_path)?);
    match store.get_profile(profile_name)? {
        Some(profile) => {
            tracing::debug!("Profile loaded successfully, server: {}", profile.server());
            Ok(profile)
        }
        None => {
            tracing::debug!("Profile '{}' not found, using default server", profile_name);
            Ok(ClientProfile::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.mymdb/profile");
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "MYMDB_PROFILE_PATH");
        assert_eq!(SESSION_PATH_ENV_VAR, "MYMDB_SESSION_PATH");
    }

    #[test]
    fn test_path_from_env_override() {
        let var = "MYMDB_TEST_PATH_OVERRIDE";
        std::env::remove_var(var);
        assert_eq!(path_from_env(var, "/fallback"), "/fallback");

        std::env::set_var(var, "/custom/path");
        assert_eq!(path_from_env(var, "/fallback"), "/custom/path");
        std::env::remove_var(var);
    }

    #[test]
    fn test_default_profile_uses_default_server() {
        let profile = ClientProfile::default();
        assert_eq!(profile.server().as_str(), DEFAULT_SERVER);
        assert!(!profile.insecure());
    }

    #[test]
    fn test_profile_rejects_invalid_url() {
        assert!(ClientProfile::new("not a url", false).is_err());
        assert!(ClientProfile::new("mailto:someone@example.com", false).is_err());
    }

    #[test]
    fn test_get_profile_reads_section() {
        let file = profile_file("[staging]\nserver = http://localhost:8080/\ninsecure = true\n");
        let store = IniProfileStore::new(file.path());

        let profile = store.get_profile("staging").unwrap().unwrap();
        assert_eq!(profile.server().as_str(), "http://localhost:8080/");
        assert!(profile.insecure());
    }

    #[test]
    fn test_get_profile_missing_section() {
        let file = profile_file("[staging]\nserver = http://localhost:8080/\n");
        let store = IniProfileStore::new(file.path());
        assert_eq!(store.get_profile("default").unwrap(), None);
    }

    #[test]
    fn test_get_profile_missing_file() {
        let store = IniProfileStore::new("/nonexistent/mymdb/profile");
        assert_eq!(store.get_profile("default").unwrap(), None);
    }

    #[test]
    fn test_get_profile_rejects_bad_insecure_flag() {
        let file = profile_file("[default]\ninsecure = maybe\n");
        let store = IniProfileStore::new(file.path());
        assert!(store.get_profile("default").is_err());
    }

    #[test]
    fn test_load_profile_falls_back_to_default() {
        let file = profile_file("[other]\nserver = http://localhost:9000/\n");
        let path = file.path().to_string_lossy().to_string();

        let profile = load_profile("default", &path).unwrap();
        assert_eq!(profile, ClientProfile::default());
    }
}
