//! Build targets
//!
//! Every target is a short sequence of external tool invocations issued
//! through a [`Runner`], selected by the host [`BuildConfig`].

use crate::cmd::{Invocation, Runner};
use crate::context::Context;
use crate::error::Error;
use crate::git::Provenance;
use crate::manifest::Manifest;
use crate::platform::{BuildConfig, Platform};
use crate::result::Result;
use crate::{ui, utils};
use std::path::PathBuf;

/// Native build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Debug,
    Release,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Debug => "Debug",
            Profile::Release => "Release",
        }
    }

    /// premake gmake config name, e.g. `debug_linux64`
    pub fn linux_config(&self) -> String {
        format!("{}_linux64", self.as_str().to_lowercase())
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const TEST_TARGET: &str = "test";
pub const VERSION_TOOL: &str = "version";

pub struct Tasks<'a> {
    ctx: &'a Context,
    config: &'a BuildConfig,
    manifest: &'a Manifest,
    runner: &'a dyn Runner,
}

impl<'a> Tasks<'a> {
    pub fn new(
        ctx: &'a Context,
        config: &'a BuildConfig,
        manifest: &'a Manifest,
        runner: &'a dyn Runner,
    ) -> Self {
        Self {
            ctx,
            config,
            manifest,
            runner,
        }
    }

    /// Resolve provenance and print the build configuration
    pub fn info(&self) -> Result<Provenance> {
        let provenance = Provenance::resolve(self.runner)?;
        ui::details(self.config, self.manifest, &provenance)?;
        Ok(provenance)
    }

    /// Stamp the version header and generate native projects
    pub fn codegen(&self) -> Result<Provenance> {
        let provenance = self.info()?;

        ui::section("Running Code Generation")?;
        ui::info(format!(
            "Setting Versions: Commit: {} Branch: {}",
            provenance.commit, provenance.branch
        ))?;

        let version_file = self.manifest.version_file.display().to_string();

        // restore the placeholders before stamping again
        self.step(
            Invocation::new("git").args(["checkout", version_file.as_str()]),
            &format!("Failed to git checkout for {}", version_file),
        )?;

        self.step(
            Invocation::new(self.tool(VERSION_TOOL)).args([
                format!("--commit={}", provenance.commit),
                format!("--branch={}", provenance.branch),
                "--display".to_string(),
                format!("--version_file={}", version_file),
            ]),
            "Failed to run version tool",
        )?;

        self.step(
            Invocation::new(self.tool("premake5")).args([
                self.config.build_tool.to_string(),
                format!("platform={}", self.config.build_platform),
            ]),
            "Failed to generate projects",
        )?;

        ui::section("Code Gen Finished")?;
        Ok(provenance)
    }

    pub fn project(&self, profile: Profile) -> Result<()> {
        self.codegen()?;
        self.native_build(&self.manifest.name, profile)
    }

    pub fn module(&self, name: &str) -> Result<()> {
        if !self.manifest.modules.iter().any(|m| m == name) {
            return Err(Error::Custom(format!(
                "Unknown module '{}', configured modules: {}",
                name,
                self.manifest.modules.join(", ")
            )));
        }
        self.codegen()?;
        self.native_build(name, Profile::Debug)
    }

    pub fn test(&self) -> Result<()> {
        self.codegen()?;
        self.native_build(TEST_TARGET, Profile::Debug)
    }

    /// Debug build of the project and every module, generating once
    pub fn all(&self) -> Result<()> {
        self.codegen()?;
        self.native_build(&self.manifest.name, Profile::Debug)?;
        for module in &self.manifest.modules {
            self.native_build(module, Profile::Debug)?;
        }
        Ok(())
    }

    /// Build the version stamping tool and install it into the tool path
    pub fn tool_version(&self) -> Result<PathBuf> {
        ui::section(format!(
            "Building Tool: {} - version.h generator tool",
            VERSION_TOOL
        ))?;

        let target_dir = self.ctx.base_dir.join("build").join("tools");
        self.step(
            Invocation::new("cargo").args([
                "build".to_string(),
                "--release".to_string(),
                "--bin".to_string(),
                VERSION_TOOL.to_string(),
                "--manifest-path".to_string(),
                self.ctx
                    .base_dir
                    .join(&self.manifest.tools_manifest)
                    .display()
                    .to_string(),
                "--target-dir".to_string(),
                target_dir.display().to_string(),
            ]),
            &format!("Failed to build tool: {}", VERSION_TOOL),
        )?;

        let built = target_dir
            .join("release")
            .join(self.config.exe(VERSION_TOOL));
        let installed = PathBuf::from(self.tool(VERSION_TOOL));
        utils::copy_file(&built, &installed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&installed)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&installed, perms)?;
        }

        ui::section(format!(
            "Successfully Built Tool @ Path: {}",
            installed.display()
        ))?;
        Ok(installed)
    }

    /// Remove the build and generated project folders
    pub fn clean(&self) -> Result<()> {
        for folder in ["build", "projects"] {
            let path = self.ctx.base_dir.join(folder);
            if utils::remove_path(&path)? {
                tracing::debug!(path = %path.display(), "removed");
            }
        }
        Ok(())
    }

    /// Remove the project executable and its object folders
    pub fn clean_project(&self) -> Result<()> {
        let name = &self.manifest.name;
        let obj = self
            .ctx
            .base_dir
            .join("projects")
            .join("obj")
            .join(self.config.platform.obj_folder());

        let paths = [
            self.ctx.base_dir.join("build").join(self.config.exe(name)),
            obj.join(Profile::Debug.as_str()).join(name),
            obj.join(Profile::Release.as_str()).join(name),
        ];

        for path in &paths {
            if utils::remove_path(path)? {
                tracing::debug!(path = %path.display(), "removed");
            }
        }
        Ok(())
    }

    /// Run the built project executable
    pub fn run(&self) -> Result<()> {
        let binary = self
            .ctx
            .base_dir
            .join("build")
            .join(self.config.exe(&self.manifest.name));

        self.step(
            Invocation::new(binary.display().to_string()),
            &format!("Failed to run {}", self.manifest.name),
        )
    }

    /// Open the generated IDE project
    pub fn open_ide(&self) -> Result<()> {
        self.info()?;

        let name = &self.manifest.name;
        match self.config.platform {
            Platform::Windows => self.step(
                Invocation::new("cmd").args([
                    "/c".to_string(),
                    "start".to_string(),
                    String::new(),
                    format!(".\\projects\\{}.sln", name),
                ]),
                &format!("Failed to open the Visual Studio {} project", name),
            ),
            Platform::MacOS => self.step(
                Invocation::new("open").arg(format!("./projects/{}.xcworkspace", name)),
                &format!("Failed to open the Xcode {} project", name),
            ),
            Platform::Linux => ui::warning("No IDE project is generated on linux"),
        }
    }

    /// Open the project folder in VS Code
    pub fn open_code(&self) -> Result<()> {
        self.step(
            Invocation::new("code").arg("."),
            "Failed to open project in VSCode",
        )
    }

    fn native_build(&self, target: &str, profile: Profile) -> Result<()> {
        ui::section(format!("Building Target: {}", target))?;

        let (invocation, platform) = match self.config.platform {
            Platform::Windows => (
                Invocation::new("msbuild.exe").args([
                    format!("./projects/{}.sln", self.manifest.name),
                    format!("-p:Configuration={}", profile),
                    format!("-target:{}", target),
                ]),
                "Windows",
            ),
            Platform::MacOS => (
                Invocation::new("xcodebuild").args([
                    "-project".to_string(),
                    format!("./projects/{}.xcodeproj", target),
                    "-configuration".to_string(),
                    profile.to_string(),
                    format!("ARCHS={}", self.config.build_arch),
                    "-target".to_string(),
                    target.to_string(),
                    "-destination".to_string(),
                    "platform=macOS".to_string(),
                ]),
                "macOS",
            ),
            Platform::Linux => (
                Invocation::new("make").args([
                    "-C".to_string(),
                    "projects".to_string(),
                    target.to_string(),
                    format!("config={}", profile.linux_config()),
                ]),
                "linux",
            ),
        };

        self.step(
            invocation,
            &format!("Failed to build {} target: {}", platform, target),
        )?;

        ui::section(format!("Build Finished: {}", target))?;
        Ok(())
    }

    /// Absolute path of a bundled tool binary
    fn tool(&self, name: &str) -> String {
        self.ctx
            .base_dir
            .join(&self.manifest.tool_path)
            .join(self.config.exe(name))
            .display()
            .to_string()
    }

    fn step(&self, invocation: Invocation, failure: &str) -> Result<()> {
        self.runner
            .run(&invocation)
            .map_err(|err| Error::CommandFailed(format!("{}. Error: {}", failure, err)))
    }
}
