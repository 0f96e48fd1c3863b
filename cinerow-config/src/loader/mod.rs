use anyhow::{Context, anyhow};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::{DEFAULT_CONFIG_FILES, ENV_CONFIG_JSON, ENV_CONFIG_PATH};
use crate::models::CinerowConfig;

/// Source that produced the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
    /// Path given explicitly by the caller (e.g. a `--config` flag).
    Explicit(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "${ENV_CONFIG_PATH} ({})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "${ENV_CONFIG_JSON}"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Explicit(path) => {
                write!(f, "{} (explicit)", path.display())
            }
        }
    }
}

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CinerowConfig,
    pub source: ConfigSource,
}

impl ConfigLoad {
    /// Load configuration using the process environment.
    /// Evaluation order:
    /// 1) `$CINEROW_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$CINEROW_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found under the working directory,
    /// 4) defaults if none of the above is present.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Load from an explicit path, bypassing the environment.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let config = load_from_file(path)?;
        Self::validated(config, ConfigSource::Explicit(path.to_path_buf()))
    }

    /// Same as [`ConfigLoad::from_env`] with an injectable variable lookup and
    /// base directory for default files.
    pub fn load_with<F>(lookup: F, base_dir: &Path) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(ENV_CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = load_from_file(&path)?;
            return Self::validated(config, ConfigSource::EnvPath(path));
        }

        if let Some(raw) = lookup(ENV_CONFIG_JSON)
            && !raw.trim().is_empty()
        {
            let parsed = parse_json(&raw)
                .with_context(|| format!("failed to parse {ENV_CONFIG_JSON}"))?;
            return Self::validated(parsed, ConfigSource::EnvInline);
        }

        if let Some(path) = find_default_file(base_dir) {
            let config = load_from_file(&path)?;
            return Self::validated(config, ConfigSource::File(path));
        }

        Self::validated(CinerowConfig::default(), ConfigSource::Default)
    }

    fn validated(
        config: CinerowConfig,
        source: ConfigSource,
    ) -> anyhow::Result<Self> {
        config
            .validate()
            .with_context(|| format!("invalid configuration from {source}"))?;
        tracing::debug!(%source, "configuration loaded");
        Ok(Self { config, source })
    }
}

pub fn load_from_file(path: &Path) -> anyhow::Result<CinerowConfig> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("failed to read cinerow config from {}", path.display())
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents).with_context(|| {
            format!("invalid cinerow config {}", path.display())
        }),
        Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
            anyhow!("invalid cinerow config {}: {}", path.display(), err)
        }),
        _ => parse_from_str(&contents, &path.display().to_string()),
    }
}

pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> anyhow::Result<CinerowConfig> {
    // Try TOML first, then JSON for convenience.
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow!(
                "failed to parse cinerow config {}: toml error: {}; json error: {}",
                origin,
                toml_err,
                json_err
            )
        })
    })
}

pub fn parse_json(raw: &str) -> anyhow::Result<CinerowConfig> {
    serde_json::from_str(raw)
        .map_err(|err| anyhow!("invalid cinerow config json: {err}"))
}

fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(
        vars: &'a HashMap<&'static str, String>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::new();
        let load = ConfigLoad::load_with(lookup(&vars), dir.path()).unwrap();
        assert_eq!(load.source, ConfigSource::Default);
        assert_eq!(load.config, CinerowConfig::default());
    }

    #[test]
    fn env_path_wins_over_inline_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[preview]\nfirst_open_delay_ms = 600\nrepeat_open_delay_ms = 250\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert(ENV_CONFIG_PATH, path.display().to_string());
        vars.insert(ENV_CONFIG_JSON, r#"{"slider":{"loop_enabled":false}}"#.into());

        let load = ConfigLoad::load_with(lookup(&vars), dir.path()).unwrap();
        assert_eq!(load.source, ConfigSource::EnvPath(path));
        assert_eq!(load.config.preview.first_open_delay_ms, 600);
        assert!(load.config.slider.loop_enabled);
    }

    #[test]
    fn inline_json_overrides_single_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut vars = HashMap::new();
        vars.insert(ENV_CONFIG_JSON, r#"{"slider":{"loop_enabled":false}}"#.into());

        let load = ConfigLoad::load_with(lookup(&vars), dir.path()).unwrap();
        assert_eq!(load.source, ConfigSource::EnvInline);
        assert!(!load.config.slider.loop_enabled);
        assert_eq!(load.config.slider.transition_duration_ms, 750);
    }

    #[test]
    fn default_file_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        let path = dir.path().join("config/cinerow.json");
        fs::write(&path, r#"{"slider":{"refocus_delay_ms":80}}"#).unwrap();

        let vars = HashMap::new();
        let load = ConfigLoad::load_with(lookup(&vars), dir.path()).unwrap();
        assert_eq!(load.source, ConfigSource::File(path));
        assert_eq!(load.config.slider.refocus_delay_ms, 80);
    }

    #[test]
    fn guard_rail_violations_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut vars = HashMap::new();
        vars.insert(
            ENV_CONFIG_JSON,
            r#"{"slider":{"transition_timeout_ms":100}}"#.into(),
        );

        let err = ConfigLoad::load_with(lookup(&vars), dir.path())
            .expect_err("timeout shorter than transition");
        let chain = format!("{err:#}");
        assert!(chain.contains("transition_timeout_ms"), "{chain}");
    }

    #[test]
    fn extensionless_files_try_toml_then_json() {
        let parsed =
            parse_from_str(r#"{"preview":{"first_open_delay_ms":500}}"#, "inline")
                .unwrap();
        assert_eq!(parsed.preview.first_open_delay_ms, 500);
        assert!(parse_from_str("not = [valid", "inline").is_err());
    }
}
