use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P: Into<String>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<A: Into<String>>(mut self, arg: A) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes external programs on behalf of the build tasks
pub trait Runner {
    /// Run to completion, failing on a non-zero exit
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run to completion and capture stdout
    fn output(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs commands in the project root
pub struct SystemRunner {
    verbose: bool,
    cwd: PathBuf,
}

impl SystemRunner {
    pub fn new(ctx: &Context) -> Self {
        Self {
            verbose: ctx.verbose,
            cwd: ctx.base_dir.clone(),
        }
    }
}

impl Runner for SystemRunner {
    /// Execute a command, forwarding stderr and streaming stdout in verbose mode
    fn run(&self, invocation: &Invocation) -> Result<()> {
        tracing::debug!(command = %invocation, cwd = %self.cwd.display(), "executing");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                Error::CommandFailed(format!("{}: unable to start: {}", invocation.program, err))
            })?;

        // Both pipes are drained concurrently so a chatty stderr cannot block the child
        let stderr = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let reader = BufReader::new(stderr);
                for line in reader.lines().map_while(|l| l.ok()) {
                    eprintln!("{}", line);
                }
            })
        });

        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            for line in reader.lines().map_while(|l| l.ok()) {
                if self.verbose {
                    println!("{}", line);
                }
            }
        }

        if let Some(handle) = stderr
            && handle.join().is_err()
        {
            tracing::warn!(command = %invocation, "stderr forwarding thread panicked");
        }

        let status = child.wait()?;

        if !status.success() {
            return Err(Error::CommandFailed(format!(
                "{} failed with exit code: {}",
                invocation,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }

    /// Execute a command and capture its output
    fn output(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!(command = %invocation, cwd = %self.cwd.display(), "capturing");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|err| {
                Error::CommandFailed(format!("{}: unable to start: {}", invocation.program, err))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "{} failed: {}",
                invocation,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Records invocations instead of running them
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<String>>,
        outputs: HashMap<String, String>,
        failing: Vec<String>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Canned stdout for a full command line
        pub fn with_output(mut self, command: &str, stdout: &str) -> Self {
            self.outputs.insert(command.to_string(), stdout.to_string());
            self
        }

        /// Make any command line starting with `prefix` fail
        pub fn failing(mut self, prefix: &str) -> Self {
            self.failing.push(prefix.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, invocation: &Invocation) -> Result<String> {
            let line = invocation.to_string();
            self.calls.borrow_mut().push(line.clone());
            if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
                return Err(Error::CommandFailed(format!("{} failed with exit code: 1", line)));
            }
            Ok(self.outputs.get(&line).cloned().unwrap_or_default())
        }
    }

    impl Runner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> Result<()> {
            self.record(invocation).map(|_| ())
        }

        fn output(&self, invocation: &Invocation) -> Result<String> {
            self.record(invocation)
        }
    }
}
