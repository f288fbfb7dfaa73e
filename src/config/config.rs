use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Largest page size the GitHub API will honor.
pub const MAX_PAGE_SIZE: u32 = 100;

const fn default_max_pages() -> u32 {
    5
}

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// One fetch target: which repository to poll and how many runs to pull.
///
/// A profile is selected by name at invocation time and threaded into the
/// fetch loop as a plain value; nothing configuration-related outlives the
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Repository to fetch workflow runs from, in "owner/name" form.
    pub repo: String,

    /// Number of pages to fetch per invocation.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Runs per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Base URL for the GitHub REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default configuration is valid")
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the first of
    /// `runs.[toml|yml|yaml|json]` found under `base`. When no file exists,
    /// the embedded defaults are used.
    ///
    /// Returns the configuration along with any validation warnings.
    pub fn load(base: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading gha-report configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base.join("runs.toml"),
                base.join("runs.yml"),
                base.join("runs.yaml"),
                base.join("runs.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading gha-report configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles.get(name).ok_or_else(|| {
            let mut available: Vec<_> = self.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            app_err!("no profile named '{name}' in configuration (available: {})", available.join(", "))
        })
    }

    /// Check the configuration for suspect values, appending a warning for each.
    ///
    /// Warnings are advisory; none of them prevent a fetch from running.
    pub fn validate(&self, warnings: &mut Vec<String>) {
        for (name, profile) in &self.profiles {
            if profile.repo.is_empty() {
                warnings.push(format!("profile '{name}': repo is empty"));
            }

            if profile.max_pages == 0 {
                warnings.push(format!("profile '{name}': max_pages is 0, nothing will be fetched"));
            }

            if profile.page_size == 0 {
                warnings.push(format!("profile '{name}': page_size is 0, every page will be empty"));
            } else if profile.page_size > MAX_PAGE_SIZE {
                warnings.push(format!(
                    "profile '{name}': page_size {} exceeds the API maximum of {MAX_PAGE_SIZE}",
                    profile.page_size
                ));
            }

            if Url::parse(&profile.api_url).is_err() {
                warnings.push(format!("profile '{name}': api_url '{}' is not a valid URL", profile.api_url));
            }
        }
    }

    /// Save configuration to a file, with the format chosen by extension.
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => {
                toml::to_string_pretty(self).into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?
            }
            "yml" | "yaml" => {
                serde_yaml::to_string(self).into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?
            }
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = Config::default();
        let profile = config.profile("default").unwrap();
        assert_eq!(profile.page_size, MAX_PAGE_SIZE);
        assert!(profile.max_pages >= 1);
        assert_eq!(profile.api_url, "https://api.github.com");
    }

    #[test]
    fn test_default_config_has_no_warnings() {
        let mut warnings = Vec::new();
        Config::default().validate(&mut warnings);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_missing_profile_lists_available() {
        let config = Config::default();
        let err = config.profile("nightly").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("nightly"));
        assert!(message.contains("default"));
    }

    #[test]
    fn test_load_explicit_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("custom.toml")).unwrap();
        fs::write(
            &path,
            "[profiles.ci]\nrepo = \"octo/widgets\"\nmax_pages = 2\npage_size = 50\n",
        )
        .unwrap();

        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let (config, warnings) = Config::load(&base, Some(&path)).unwrap();
        assert!(warnings.is_empty());

        let profile = config.profile("ci").unwrap();
        assert_eq!(profile.repo, "octo/widgets");
        assert_eq!(profile.max_pages, 2);
        assert_eq!(profile.page_size, 50);
        assert_eq!(profile.api_url, "https://api.github.com");
    }

    #[test]
    fn test_load_discovers_json_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        fs::write(
            base.join("runs.json"),
            r#"{"profiles": {"default": {"repo": "octo/widgets"}}}"#,
        )
        .unwrap();

        let (config, _) = Config::load(&base, None).unwrap();
        assert_eq!(config.profile("default").unwrap().repo, "octo/widgets");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let (config, warnings) = Config::load(&base, None).unwrap();
        assert!(warnings.is_empty());
        assert!(config.profile("default").is_ok());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("bad.toml")).unwrap();
        fs::write(&path, "[profiles.default]\nrepo = \"octo/widgets\"\npages = 3\n").unwrap();

        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let result = Config::load(&base, Some(&path));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_warnings() {
        let config = Config {
            profiles: HashMap::from([(
                "default".to_string(),
                Profile {
                    repo: String::new(),
                    max_pages: 0,
                    page_size: 250,
                    api_url: "not a url".to_string(),
                },
            )]),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("out.yml")).unwrap();

        let config = Config::default();
        config.save(&path).unwrap();

        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let (reloaded, _) = Config::load(&base, Some(&path)).unwrap();
        assert_eq!(reloaded.profile("default").unwrap(), config.profile("default").unwrap());
    }
}
