use crate::error::Error;
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOS,
}

impl Platform {
    /// Get the current platform
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` style) to a platform
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" => Ok(Platform::MacOS),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Get platform identifier as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOS => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }

    /// Folder name used under `tools/bin`
    pub fn tool_folder(&self) -> &'static str {
        match self {
            Platform::MacOS => "darwin",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }

    /// Executable file extension, including the dot
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            _ => "",
        }
    }

    /// Folder premake places intermediate objects in
    pub fn obj_folder(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "linux64",
            Platform::MacOS => "macosx",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    pub fn current() -> Result<Self> {
        Self::from_arch(std::env::consts::ARCH)
    }

    /// Map an architecture identifier (`std::env::consts::ARCH` style)
    pub fn from_arch(arch: &str) -> Result<Self> {
        match arch {
            "x86_64" | "amd64" => Ok(Arch::X64),
            "aarch64" | "arm64" => Ok(Arch::Arm64),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Native build settings resolved once from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub platform: Platform,
    pub arch: Arch,
    /// premake action (`vs2022`, `gmake`, `xcode4`)
    pub build_tool: &'static str,
    /// premake `platform=` value
    pub build_platform: &'static str,
    /// Xcode `ARCHS=` value
    pub build_arch: &'static str,
}

impl BuildConfig {
    pub fn detect() -> Result<Self> {
        Ok(Self::new(Platform::current()?, Arch::current()?))
    }

    pub fn new(platform: Platform, arch: Arch) -> Self {
        let (build_tool, build_platform, build_arch) = match (platform, arch) {
            (Platform::Windows, _) => ("vs2022", "windows", "x86_64"),
            (Platform::Linux, _) => ("gmake", "linux", "x86_64"),
            (Platform::MacOS, Arch::X64) => ("xcode4", "macosx", "x86_64"),
            (Platform::MacOS, Arch::Arm64) => ("xcode4", "macosxARM", "arm64"),
        };

        Self {
            platform,
            arch,
            build_tool,
            build_platform,
            build_arch,
        }
    }

    /// Default tool folder, `tools/bin/<os>/<arch>`
    pub fn default_tool_path(&self) -> String {
        format!("tools/bin/{}/{}", self.platform.tool_folder(), self.arch)
    }

    /// File name of an executable on this platform
    pub fn exe(&self, name: &str) -> String {
        format!("{}{}", name, self.platform.exe_suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_mapping() {
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        assert_eq!(Platform::from_os("linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::MacOS);
        assert_eq!(Platform::from_os("darwin").unwrap(), Platform::MacOS);
        assert!(matches!(
            Platform::from_os("freebsd"),
            Err(Error::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn test_arch_mapping() {
        assert_eq!(Arch::from_arch("x86_64").unwrap(), Arch::X64);
        assert_eq!(Arch::from_arch("aarch64").unwrap(), Arch::Arm64);
        assert!(Arch::from_arch("riscv64").is_err());
    }

    #[test]
    fn test_windows_config() {
        let config = BuildConfig::new(Platform::Windows, Arch::X64);
        assert_eq!(config.build_tool, "vs2022");
        assert_eq!(config.build_platform, "windows");
        assert_eq!(config.default_tool_path(), "tools/bin/windows/amd64");
        assert_eq!(config.exe("premake5"), "premake5.exe");
    }

    #[test]
    fn test_linux_arm_config() {
        let config = BuildConfig::new(Platform::Linux, Arch::Arm64);
        assert_eq!(config.build_tool, "gmake");
        assert_eq!(config.build_platform, "linux");
        assert_eq!(config.default_tool_path(), "tools/bin/linux/arm64");
        assert_eq!(config.exe("premake5"), "premake5");
    }

    #[test]
    fn test_macos_configs() {
        let intel = BuildConfig::new(Platform::MacOS, Arch::X64);
        assert_eq!(intel.build_tool, "xcode4");
        assert_eq!(intel.build_platform, "macosx");
        assert_eq!(intel.build_arch, "x86_64");
        assert_eq!(intel.default_tool_path(), "tools/bin/darwin/amd64");

        let arm = BuildConfig::new(Platform::MacOS, Arch::Arm64);
        assert_eq!(arm.build_platform, "macosxARM");
        assert_eq!(arm.build_arch, "arm64");
        assert_eq!(arm.default_tool_path(), "tools/bin/darwin/arm64");
    }
}
