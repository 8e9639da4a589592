//! Generator settings and plugin parameter parsing.
//!
//! Settings come from two places. The binary builds a [`GeneratorConfig`] from
//! its CLI/environment, then the request's parameter string
//! (`--go-inject_opt=paths=source_relative,def_import=...`) is layered on top
//! with [`GeneratorConfig::apply_parameter`].

use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Import path of the package providing `def.Server`.
pub const DEFAULT_DEF_IMPORT: &str = "github.com/go-inject/runtime/def";

/// Import path of the package providing `RegisterGRPCClientFactoryType`.
pub const DEFAULT_CLIENT_IMPORT: &str = "github.com/go-inject/runtime/client";

/// Where output files are placed, mirroring protoc-gen-go's `paths` flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathsMode {
    /// Next to the `.proto` file, relative to the include root.
    #[default]
    SourceRelative,
    /// Under the directory named by the file's `go_package` import path.
    Import,
}

impl FromStr for PathsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source_relative" => Ok(Self::SourceRelative),
            "import" => Ok(Self::Import),
            other => Err(Error::invalid_parameter(
                "paths",
                format!("expected `source_relative` or `import`, got `{other}`"),
            )),
        }
    }
}

impl fmt::Display for PathsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceRelative => write!(f, "source_relative"),
            Self::Import => write!(f, "import"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub paths: PathsMode,
    pub def_import: String,
    pub client_import: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            paths: PathsMode::default(),
            def_import: DEFAULT_DEF_IMPORT.to_string(),
            client_import: DEFAULT_CLIENT_IMPORT.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Overrides settings from a comma separated `key=value` parameter string.
    ///
    /// protoc-gen-go style `M<file>=<import path>` mappings are accepted and
    /// ignored, since the generated bindings never import other schema
    /// packages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for unknown keys, empty import
    /// paths, or an unknown `paths` mode.
    pub fn apply_parameter(mut self, parameter: Option<&str>) -> Result<Self> {
        let Some(parameter) = parameter else {
            return Ok(self);
        };

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            match key {
                "paths" => self.paths = value.parse()?,
                "def_import" => self.def_import = import_path(key, value)?,
                "client_import" => self.client_import = import_path(key, value)?,
                _ if key.starts_with('M') => {
                    tracing::debug!(mapping = %part, "Ignoring import mapping");
                }
                _ => return Err(Error::invalid_parameter(key, "unknown parameter")),
            }
        }

        Ok(self)
    }
}

fn import_path(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::invalid_parameter(key, "import path must not be empty"));
    }
    Ok(value.to_string())
}
