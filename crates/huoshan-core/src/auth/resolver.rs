//! Credential resolution from the environment and config files.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::config_file::{CONFIG_FILE_NAME, parse_config};
use super::credential::Credential;
use super::env::{
    API_KEY_VARS, EnvProvider, ORGANIZATION_ID_VARS, PROJECT_ID_VARS, SystemEnv, first_non_blank,
};

/// Resolves credentials from environment variables and config files.
///
/// Every lookup returns `None` when its source has nothing usable, so the
/// lookups compose into a fallback chain with `Option::or_else`.
///
/// The working and home directories default to the process values and can
/// be pinned for tests or embedding.
pub struct CredentialResolver {
    env: Box<dyn EnvProvider>,
    working_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialResolver {
    /// Create a resolver backed by the real process environment.
    pub fn new() -> Self {
        Self {
            env: Box::new(SystemEnv),
            working_dir: None,
            home_dir: None,
        }
    }

    /// Use a custom environment provider.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvProvider + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Use `dir` instead of the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Use `dir` instead of the user's home directory.
    #[must_use]
    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Load a credential from environment variables.
    ///
    /// The API key comes from the first non-blank of [`API_KEY_VARS`].
    /// A non-blank `organization_id` argument wins over
    /// [`ORGANIZATION_ID_VARS`]. The project id comes from
    /// [`PROJECT_ID_VARS`].
    ///
    /// Returns `None` when no API key variable is set.
    pub fn from_environment(&self, organization_id: Option<&str>) -> Option<Credential> {
        let env = self.env.as_ref();
        let api_key = first_non_blank(env, API_KEY_VARS)?;

        let organization_id = organization_id
            .filter(|org| !org.trim().is_empty())
            .map(str::to_string)
            .or_else(|| first_non_blank(env, ORGANIZATION_ID_VARS));
        let project_id = first_non_blank(env, PROJECT_ID_VARS);

        tracing::debug!("Loaded API credential from environment");
        Credential::from_parts(Some(api_key), organization_id, project_id)
    }

    /// Load a credential from the default config file, starting in the
    /// working directory and searching upward.
    pub fn from_default_directory(&self) -> Option<Credential> {
        self.from_directory(None, CONFIG_FILE_NAME, true)
    }

    /// Load a credential from `filename` in `directory`.
    ///
    /// `None` (or an empty path) means the working directory. With
    /// `search_upward`, each parent directory is tried in turn up to and
    /// including the filesystem root.
    ///
    /// The first existing file ends the search. Returns `None` if no file
    /// is found, the file cannot be read, or it holds no usable API key.
    pub fn from_directory(
        &self,
        directory: Option<&Path>,
        filename: &str,
        search_upward: bool,
    ) -> Option<Credential> {
        let start = self.absolute_start(directory);

        for dir in start.ancestors() {
            let candidate = dir.join(filename);
            tracing::trace!(path = %candidate.display(), "Probing for credential file");

            if candidate.is_file() {
                return load_file(&candidate);
            }

            if !search_upward {
                break;
            }
        }

        None
    }

    /// Load a credential from the config file at `path`, without searching
    /// parent directories.
    pub fn from_path(&self, path: &Path) -> Option<Credential> {
        let filename = path.file_name()?.to_str()?;
        self.from_directory(path.parent(), filename, false)
    }

    /// Run the full default chain:
    /// 1. Config file in the working directory or any ancestor
    /// 2. Config file in the home directory (no upward search)
    /// 3. Environment variables
    pub fn resolve_default(&self) -> Option<Credential> {
        self.from_default_directory()
            .or_else(|| {
                let home = self.home_dir()?;
                self.from_directory(Some(home.as_path()), CONFIG_FILE_NAME, false)
            })
            .or_else(|| self.from_environment(None))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone().or_else(dirs::home_dir)
    }

    fn working_dir(&self) -> Option<PathBuf> {
        self.working_dir
            .clone()
            .or_else(|| env::current_dir().ok())
    }

    /// Make the search start absolute and free of `.`/`..` so `ancestors()`
    /// visits only real parents and reaches the root.
    fn absolute_start(&self, directory: Option<&Path>) -> PathBuf {
        let cwd = self.working_dir();
        let start = match directory.filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => cwd.map_or_else(|| dir.to_path_buf(), |cwd| cwd.join(dir)),
            None => cwd.unwrap_or_default(),
        };
        normalize(&start)
    }
}

/// Fold `.` and `..` components lexically. The directory need not exist.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn load_file(path: &Path) -> Option<Credential> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read credential file");
            return None;
        }
    };

    let credential = parse_config(&content).into_credential();
    if credential.is_some() {
        tracing::debug!(path = %path.display(), "Loaded API credential from config file");
    } else {
        tracing::debug!(path = %path.display(), "Credential file has no usable API key");
    }
    credential
}
