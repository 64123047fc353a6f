use crate::stamp::{self, Values};
use crate::tasks::Profile;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Build target selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    All,
    Info,
    Gen,
    Project(Profile),
    Module(String),
    Test,
    ToolVersion,
    Clean,
    CleanProject,
    Run,
    OpenIde,
    OpenCode,
}

/// Command-line arguments for the reload-build tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Project root or a directory inside it
    pub path: Option<PathBuf>,

    pub task: Task,
}

impl Args {
    pub fn command() -> Command {
        Command::new("reload-build")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Build orchestration for the reload native application")
            .arg(
                Arg::new("path")
                    .short('p')
                    .long("path")
                    .value_name("PATH")
                    .global(true)
                    .help("Project root or a directory inside it")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Enable verbose output")
            )
            .subcommand(Command::new("all").about("Debug build of the project and all modules (default)"))
            .subcommand(Command::new("info").about("Show the detected build configuration"))
            .subcommand(Command::new("gen").about("Stamp version.h and generate native projects"))
            .subcommand(
                Command::new("project")
                    .about("Build the project")
                    .arg(
                        Arg::new("profile")
                            .value_parser(["debug", "release"])
                            .default_value("debug")
                            .help("Build configuration")
                    )
            )
            .subcommand(
                Command::new("module")
                    .about("Debug build of a module")
                    .arg(Arg::new("name").required(true).help("Module target name"))
            )
            .subcommand(Command::new("test").about("Debug build of the test target"))
            .subcommand(
                Command::new("tool")
                    .about("Build a bundled tool into the tool path")
                    .arg(
                        Arg::new("name")
                            .value_parser(["version"])
                            .default_value("version")
                    )
            )
            .subcommand(Command::new("clean").about("Remove build and projects folders"))
            .subcommand(Command::new("clean-project").about("Remove the project binary and objects"))
            .subcommand(Command::new("run").about("Run the built project"))
            .subcommand(
                Command::new("open")
                    .about("Open the project in an editor")
                    .arg(
                        Arg::new("target")
                            .value_parser(["ide", "code"])
                            .required(true)
                    )
            )
    }

    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let task = match matches.subcommand() {
            Some(("info", _)) => Task::Info,
            Some(("gen", _)) => Task::Gen,
            Some(("project", sub)) => match sub.get_one::<String>("profile").map(String::as_str) {
                Some("release") => Task::Project(Profile::Release),
                _ => Task::Project(Profile::Debug),
            },
            Some(("module", sub)) => Task::Module(
                sub.get_one::<String>("name").cloned().unwrap_or_default(),
            ),
            Some(("test", _)) => Task::Test,
            Some(("tool", _)) => Task::ToolVersion,
            Some(("clean", _)) => Task::Clean,
            Some(("clean-project", _)) => Task::CleanProject,
            Some(("run", _)) => Task::Run,
            Some(("open", sub)) => match sub.get_one::<String>("target").map(String::as_str) {
                Some("ide") => Task::OpenIde,
                _ => Task::OpenCode,
            },
            _ => Task::All,
        };

        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            task,
        }
    }
}

/// Command-line arguments for the version stamping tool
#[derive(Debug)]
pub struct StampArgs {
    pub version_file: PathBuf,
    pub values: Values,
    /// Display the resolved values and the stamped contents
    pub display: bool,
}

impl StampArgs {
    pub fn command() -> Command {
        // `--version` carries the stamped version, not clap's version flag
        Command::new("version")
            .about("Stamp build provenance into a version header")
            .disable_version_flag(true)
            .arg(
                Arg::new("version_file")
                    .long("version_file")
                    .value_name("PATH")
                    .default_value("version.h")
                    .help("path to version.h")
            )
            .arg(
                Arg::new("version")
                    .long("version")
                    .default_value(stamp::DEFAULT_VERSION)
                    .help("build version of the binary")
            )
            .arg(
                Arg::new("commit")
                    .long("commit")
                    .default_value(stamp::COMMIT_TOKEN)
                    .help("build commit id")
            )
            .arg(
                Arg::new("branch")
                    .long("branch")
                    .default_value(stamp::BRANCH_TOKEN)
                    .help("build branch of the binary")
            )
            .arg(
                Arg::new("display")
                    .long("display")
                    .action(ArgAction::SetTrue)
                    .help("display result to console")
            )
    }

    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let value = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Self {
            version_file: PathBuf::from(value("version_file")),
            values: Values {
                version: value("version"),
                commit: value("commit"),
                branch: value("branch"),
            },
            display: matches.get_flag("display"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_task_is_all() {
        let args = Args::try_parse_from(["reload-build"]).unwrap();
        assert_eq!(args.task, Task::All);
        assert!(!args.verbose);
        assert!(args.path.is_none());
    }

    #[test]
    fn test_subcommands() {
        let parse = |argv: &[&str]| Args::try_parse_from(argv).unwrap().task;

        assert_eq!(parse(&["rb", "project"]), Task::Project(Profile::Debug));
        assert_eq!(parse(&["rb", "project", "release"]), Task::Project(Profile::Release));
        assert_eq!(parse(&["rb", "module", "basic"]), Task::Module("basic".to_string()));
        assert_eq!(parse(&["rb", "tool"]), Task::ToolVersion);
        assert_eq!(parse(&["rb", "open", "ide"]), Task::OpenIde);
        assert_eq!(parse(&["rb", "clean-project"]), Task::CleanProject);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["rb", "gen", "-v", "--path", "/work/reload"]).unwrap();
        assert_eq!(args.task, Task::Gen);
        assert!(args.verbose);
        assert_eq!(args.path, Some(PathBuf::from("/work/reload")));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        assert!(Args::try_parse_from(["rb", "project", "fast"]).is_err());
        assert!(Args::try_parse_from(["rb", "module"]).is_err());
    }

    #[test]
    fn test_stamp_defaults() {
        let args = StampArgs::try_parse_from(["version"]).unwrap();
        assert_eq!(args.version_file, PathBuf::from("version.h"));
        assert_eq!(args.values, Values::default());
        assert!(!args.display);
    }

    #[test]
    fn test_stamp_flags() {
        let args = StampArgs::try_parse_from([
            "version",
            "--version",
            "1.4.0",
            "--commit=abc123",
            "--branch=release/1.4",
            "--display",
            "--version_file=src/version.h",
        ])
        .unwrap();

        assert_eq!(args.version_file, PathBuf::from("src/version.h"));
        assert_eq!(args.values.version, "1.4.0");
        assert_eq!(args.values.commit, "abc123");
        assert_eq!(args.values.branch, "release/1.4");
        assert!(args.display);
    }

    #[test]
    fn test_no_build_time_flag() {
        assert!(StampArgs::try_parse_from(["version", "--build_time", "now"]).is_err());
    }
}
