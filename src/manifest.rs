use crate::context::Context;
use crate::error::Error;
use crate::platform::BuildConfig;
use crate::result::Result;
use crate::tpl::Tpl;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const MANIFEST_FILE: &str = "reload.toml";

pub const DEFAULT_PROJECT_NAME: &str = "reload";
pub const DEFAULT_VERSION_FILE: &str = "src/version.h";
pub const DEFAULT_TOOL_PATH: &str = "tools/bin/$PLATFORM/$ARCH";
pub const DEFAULT_MODULES: &[&str] = &["basic"];
pub const DEFAULT_TOOLS_MANIFEST: &str = "tools/Cargo.toml";

/// On-disk layout of `reload.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReloadToml {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "version-file", default)]
    pub version_file: Option<String>,

    #[serde(rename = "tool-path", default)]
    pub tool_path: Option<String>,

    #[serde(default)]
    pub modules: Option<Vec<String>>,

    /// Cargo manifest of the `version` stamping tool
    #[serde(rename = "tools-manifest", default)]
    pub tools_manifest: Option<String>,
}

/// Resolved project settings, paths relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub version_file: PathBuf,
    pub tool_path: PathBuf,
    pub modules: Vec<String>,
    pub tools_manifest: PathBuf,
}

impl Manifest {
    /// Load `reload.toml` from the project root, falling back to defaults
    pub fn load(ctx: &Context, config: &BuildConfig) -> Result<Self> {
        let raw: ReloadToml = if ctx.manifest_path.exists() {
            let content = fs::read_to_string(&ctx.manifest_path)?;
            toml::from_str(&content)?
        } else {
            tracing::debug!(path = %ctx.manifest_path.display(), "no manifest, using defaults");
            ReloadToml::default()
        };

        Self::resolve(raw, config)
    }

    pub fn resolve(raw: ReloadToml, config: &BuildConfig) -> Result<Self> {
        let name = raw
            .name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        if name.trim().is_empty() {
            return Err(Error::InvalidManifest("`name` must not be empty".to_string()));
        }

        // Setup template processor
        let mut tpl = Tpl::new();
        tpl.register("NAME", &name);
        tpl.register("PLATFORM", config.platform.tool_folder());
        tpl.register("ARCH", config.arch.as_str());

        let version_file = raw
            .version_file
            .map(|f| tpl.parse(&f))
            .unwrap_or_else(|| DEFAULT_VERSION_FILE.to_string());

        let tool_path = tpl.parse(raw.tool_path.as_deref().unwrap_or(DEFAULT_TOOL_PATH));

        let modules = match raw.modules {
            Some(modules) => tpl.parse_vec(&modules),
            None => DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
        };
        if let Some(module) = modules.iter().find(|m| m.trim().is_empty()) {
            return Err(Error::InvalidManifest(format!(
                "invalid module name {:?}",
                module
            )));
        }

        let tools_manifest = tpl.parse(
            raw.tools_manifest
                .as_deref()
                .unwrap_or(DEFAULT_TOOLS_MANIFEST),
        );

        Ok(Manifest {
            name,
            version_file: PathBuf::from(version_file),
            tool_path: PathBuf::from(tool_path),
            modules,
            tools_manifest: PathBuf::from(tools_manifest),
        })
    }
}
