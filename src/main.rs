use reload_build::args::{Args, Task};
use reload_build::cmd::SystemRunner;
use reload_build::context::Context;
use reload_build::manifest::Manifest;
use reload_build::platform::BuildConfig;
use reload_build::result::Result;
use reload_build::tasks::Tasks;
use reload_build::{logging, utils};

fn main() {
    if let Err(e) = run() {
        let _ = cliclack::outro_cancel("Build failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let Args {
        verbose,
        path,
        task,
    } = Args::parse();

    logging::init(verbose);

    let root = utils::find_project_root(path.as_deref())?;
    let ctx = Context::new(root, verbose);

    cliclack::intro("reload-build")?;

    let config = BuildConfig::detect()?;
    let manifest = Manifest::load(&ctx, &config)?;
    tracing::debug!(?config, ?manifest, "resolved build configuration");

    let runner = SystemRunner::new(&ctx);
    let tasks = Tasks::new(&ctx, &config, &manifest, &runner);

    match task {
        Task::All => tasks.all()?,
        Task::Info => {
            tasks.info()?;
        }
        Task::Gen => {
            tasks.codegen()?;
        }
        Task::Project(profile) => tasks.project(profile)?,
        Task::Module(name) => tasks.module(&name)?,
        Task::Test => tasks.test()?,
        Task::ToolVersion => {
            tasks.tool_version()?;
        }
        Task::Clean => tasks.clean()?,
        Task::CleanProject => tasks.clean_project()?,
        Task::Run => tasks.run()?,
        Task::OpenIde => tasks.open_ide()?,
        Task::OpenCode => tasks.open_code()?,
    }

    cliclack::outro("Done")?;
    Ok(())
}
