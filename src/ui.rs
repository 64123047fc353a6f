//! Terminal status output

use crate::git::Provenance;
use crate::manifest::Manifest;
use crate::platform::BuildConfig;
use crate::result::Result;

/// Print the resolved build configuration panel
pub fn details(config: &BuildConfig, manifest: &Manifest, provenance: &Provenance) -> Result<()> {
    let lines = [
        format!("Project: {}", manifest.name),
        format!("OS: {}", config.platform),
        format!("ARCH: {}", config.arch),
        format!("Build Tool: {} ({})", config.build_tool, config.build_platform),
        format!("Commit: {}", provenance.commit),
        format!("Branch: {}", provenance.branch),
        format!("Build Time: {}", provenance.build_time),
    ];

    cliclack::note("Building with config", lines.join("\n"))?;
    Ok(())
}

pub fn section<S: std::fmt::Display>(title: S) -> Result<()> {
    cliclack::log::step(title)?;
    Ok(())
}

pub fn info<S: std::fmt::Display>(message: S) -> Result<()> {
    cliclack::log::info(message)?;
    Ok(())
}

pub fn warning<S: std::fmt::Display>(message: S) -> Result<()> {
    cliclack::log::warning(message)?;
    Ok(())
}
