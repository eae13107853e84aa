//! Dictionary location - a gazetteer's private resource directory

use std::path::{Path, PathBuf};
use url::Url;

/// File name of the graph-format configuration resource
pub const CONFIG_FILE_NAME: &str = "config.ttl";

/// File name of the plain-text query template
pub const QUERY_FILE_NAME: &str = "query.txt";

/// Directory holding one gazetteer's `config.ttl` and `query.txt`
///
/// Both files are optional, but a local repository feed needs both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryLocation {
    root: PathBuf,
}

impl DictionaryLocation {
    /// Create a location for the given directory
    ///
    /// Relative paths are resolved against the current directory so that
    /// diagnostics and `file:` URLs always carry absolute paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use lkb_domain::DictionaryLocation;
    ///
    /// let location = DictionaryLocation::new("/srv/dictionaries/cities");
    /// assert!(location.config_path().ends_with("config.ttl"));
    /// ```
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(root))
                .unwrap_or_else(|_| root.to_path_buf())
        };
        Self { root }
    }

    /// The directory itself
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expected path of the configuration resource
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Expected path of the query resource
    pub fn query_path(&self) -> PathBuf {
        self.root.join(QUERY_FILE_NAME)
    }

    /// `file:` URL of the configuration resource
    ///
    /// Returns `None` only when the path cannot be expressed as a URL.
    pub fn config_url(&self) -> Option<Url> {
        Url::from_file_path(self.config_path()).ok()
    }
}
