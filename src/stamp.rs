//! Version header stamping
//!
//! Replaces the `<version>`, `<commit>`, `<branch>` and `<build_time>`
//! placeholders of a text file with build provenance and writes the file
//! back in place. Only the first occurrence of each placeholder is replaced.

use crate::error::Error;
use crate::result::Result;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const VERSION_TOKEN: &str = "<version>";
pub const COMMIT_TOKEN: &str = "<commit>";
pub const BRANCH_TOKEN: &str = "<branch>";
pub const BUILD_TIME_TOKEN: &str = "<build_time>";

pub const DEFAULT_VERSION: &str = "0.0.1";

/// Unix `date` layout, e.g. `Mon Jan  2 15:04:05 UTC 2006`
pub const BUILD_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] UTC [year]"
);

/// Caller-supplied values. The build time is never part of this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    pub version: String,
    pub commit: String,
    pub branch: String,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            commit: COMMIT_TOKEN.to_string(),
            branch: BRANCH_TOKEN.to_string(),
        }
    }
}

/// Outcome of a successful stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped {
    /// Final file contents as written
    pub contents: String,
    /// Build time substituted for `<build_time>`
    pub build_time: String,
}

/// Format a timestamp as UTC in the Unix `date` layout
pub fn format_build_time(now: OffsetDateTime) -> String {
    now.to_offset(UtcOffset::UTC)
        .format(BUILD_TIME_FORMAT)
        // every component of the layout is representable for a valid OffsetDateTime
        .unwrap_or_default()
}

pub fn build_time_now() -> String {
    format_build_time(OffsetDateTime::now_utc())
}

/// Substitute the first occurrence of each placeholder.
///
/// Positions are taken from the original template, so inserted values are
/// never scanned again. Order is fixed: version, commit, branch, build_time.
pub fn substitute(template: &str, values: &Values, build_time: &str) -> String {
    let mut spans: Vec<(usize, &str, &str)> = [
        (VERSION_TOKEN, values.version.as_str()),
        (COMMIT_TOKEN, values.commit.as_str()),
        (BRANCH_TOKEN, values.branch.as_str()),
        (BUILD_TIME_TOKEN, build_time),
    ]
    .into_iter()
    .filter_map(|(token, value)| template.find(token).map(|at| (at, token, value)))
    .collect();

    // tokens cannot overlap; stable sort keeps the fixed order on equal positions
    spans.sort_by_key(|(at, _, _)| *at);

    let mut result = String::with_capacity(template.len());
    let mut cursor = 0;
    for (at, token, value) in spans {
        result.push_str(&template[cursor..at]);
        result.push_str(value);
        cursor = at + token.len();
    }
    result.push_str(&template[cursor..]);
    result
}

/// Stamp `path` in place using the current time
pub fn stamp(path: &Path, values: &Values) -> Result<Stamped> {
    stamp_at(path, values, OffsetDateTime::now_utc())
}

/// Stamp `path` in place using `now` as the build time
pub fn stamp_at(path: &Path, values: &Values, now: OffsetDateTime) -> Result<Stamped> {
    let template = read_template(path)?;
    let build_time = format_build_time(now);
    let contents = substitute(&template, values, &build_time);

    write_stamped(path, &contents)?;

    Ok(Stamped {
        contents,
        build_time,
    })
}

fn read_template(path: &Path) -> Result<String> {
    let not_found_or_read = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    fs::metadata(path).map_err(not_found_or_read)?;
    fs::read_to_string(path).map_err(not_found_or_read)
}

fn write_stamped(path: &Path, contents: &str) -> Result<()> {
    write_contents(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

// Truncates in place; the mode only applies if the file has to be created.
fn write_contents(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
