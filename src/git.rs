//! Build provenance from the git checkout

use crate::cmd::{Invocation, Runner};
use crate::error::Error;
use crate::result::Result;
use crate::stamp;

/// Commit, branch and build time of the current checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Short commit hash
    pub commit: String,
    pub branch: String,
    pub build_time: String,
}

impl Provenance {
    pub fn resolve(runner: &dyn Runner) -> Result<Self> {
        let commit = rev_parse(runner, "--short", "Failed to determine Git Commit")?;
        let branch = rev_parse(runner, "--abbrev-ref", "Failed to determine Git Branch")?;

        Ok(Self {
            commit,
            branch,
            build_time: stamp::build_time_now(),
        })
    }
}

fn rev_parse(runner: &dyn Runner, flag: &str, failure: &str) -> Result<String> {
    let invocation = Invocation::new("git").args(["rev-parse", flag, "HEAD"]);

    let value = runner
        .output(&invocation)
        .map_err(|err| Error::CommandFailed(format!("{}: {}", failure, err)))?
        .trim()
        .to_string();

    if value.is_empty() {
        return Err(Error::CommandFailed(format!("{}: empty output", failure)));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::RecordingRunner;

    #[test]
    fn test_resolve_trims_output() {
        let runner = RecordingRunner::new()
            .with_output("git rev-parse --short HEAD", "a1b2c3d\n")
            .with_output("git rev-parse --abbrev-ref HEAD", "main\n");

        let provenance = Provenance::resolve(&runner).unwrap();

        assert_eq!(provenance.commit, "a1b2c3d");
        assert_eq!(provenance.branch, "main");
        assert!(time::PrimitiveDateTime::parse(&provenance.build_time, stamp::BUILD_TIME_FORMAT).is_ok());
        assert_eq!(
            runner.calls(),
            vec!["git rev-parse --short HEAD", "git rev-parse --abbrev-ref HEAD"]
        );
    }

    #[test]
    fn test_git_failure() {
        let runner = RecordingRunner::new().failing("git rev-parse --short");

        let err = Provenance::resolve(&runner).unwrap_err();

        assert!(err.to_string().contains("Failed to determine Git Commit"));
    }

    #[test]
    fn test_empty_branch_is_error() {
        let runner = RecordingRunner::new().with_output("git rev-parse --short HEAD", "abc\n");

        let err = Provenance::resolve(&runner).unwrap_err();

        assert!(err.to_string().contains("Failed to determine Git Branch"));
    }
}
