//! Stamps `<version>`, `<commit>`, `<branch>` and `<build_time>` into a
//! version header.

use reload_build::args::StampArgs;
use reload_build::logging;
use reload_build::result::Result;
use reload_build::stamp::{self, Stamped};
use time::OffsetDateTime;

fn main() {
    logging::init(false);

    if let Err(e) = run() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let StampArgs {
        version_file,
        values,
        display,
    } = StampArgs::parse();

    let now = OffsetDateTime::now_utc();

    if display {
        tracing::info!("Version Values:");
        tracing::info!("version_file: {}", version_file.display());
        tracing::info!("version: {}", values.version);
        tracing::info!("commit: {}", values.commit);
        tracing::info!("branch: {}", values.branch);
        tracing::info!("build time: {}", stamp::format_build_time(now));
    }

    let Stamped { contents, .. } = stamp::stamp_at(&version_file, &values, now)?;

    if display {
        tracing::info!("Version Contents:\n{}", contents);
    }

    tracing::info!("Versions Updated");
    Ok(())
}
