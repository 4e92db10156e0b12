//! External command descriptions and execution

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::process::Command;
use tracing::{debug, info};

/// One opaque external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra variables layered over the inherited environment
    pub env: BTreeMap<String, String>,
    /// Original line when the command runs through `sh -c`
    shell_line: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            shell_line: None,
        }
    }

    /// A command line interpreted by `sh`, for pipelines like `curl ... | sh`
    pub fn shell(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), line.clone()],
            env: BTreeMap::new(),
            shell_line: Some(line),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Layer a set of variables, later keys winning
    pub fn envs(mut self, vars: &BTreeMap<String, String>) -> Self {
        self.env
            .extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn is_shell(&self) -> bool {
        self.shell_line.is_some()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = &self.shell_line {
            return f.write_str(line);
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes command specs
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands on the host with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        let line = spec.to_string();

        let program = which::which(&spec.program).map_err(|e| {
            Error::command_spawn(&line, io::Error::new(io::ErrorKind::NotFound, e))
        })?;

        info!("Running: {}", line);
        if !spec.env.is_empty() {
            debug!("With environment: {:?}", spec.env);
        }

        let status = Command::new(program)
            .args(&spec.args)
            .envs(&spec.env)
            .status()
            .map_err(|e| Error::command_spawn(&line, e))?;

        if !status.success() {
            return Err(Error::command_failed(line, status.to_string()));
        }
        Ok(())
    }
}

/// Run specs in order, stopping at the first failure
pub fn run_all<R: CommandRunner + ?Sized>(runner: &R, specs: &[CommandSpec]) -> Result<()> {
    for spec in specs {
        runner.run(spec)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl CommandRunner for Recorder {
        fn run(&self, spec: &CommandSpec) -> Result<()> {
            let line = spec.to_string();
            self.seen.borrow_mut().push(line.clone());
            if self.fail_on == Some(spec.program.as_str()) {
                return Err(Error::command_failed(line, "exit status: 1"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let spec = CommandSpec::new("uv").args(["tool", "list"]).env("UV_PYTHON", "3.12");
        assert_eq!(spec.to_string(), "uv tool list");
        assert!(!spec.is_shell());
    }

    #[test]
    fn test_shell_spec_displays_original_line() {
        let spec = CommandSpec::shell("curl -fsSL https://example.com | sh");
        assert_eq!(spec.program, "sh");
        assert_eq!(spec.args[0], "-c");
        assert_eq!(spec.to_string(), "curl -fsSL https://example.com | sh");
        assert!(spec.is_shell());
    }

    #[test]
    fn test_envs_layer_over_existing() {
        let mut vars = BTreeMap::new();
        vars.insert("A".to_string(), "2".to_string());
        vars.insert("B".to_string(), "3".to_string());

        let spec = CommandSpec::new("x").env("A", "1").envs(&vars);
        assert_eq!(spec.env.get("A").map(String::as_str), Some("2"));
        assert_eq!(spec.env.len(), 2);
    }

    #[test]
    fn test_run_all_stops_at_first_failure() {
        let runner = Recorder {
            fail_on: Some("npm"),
            ..Default::default()
        };
        let specs = vec![
            CommandSpec::new("uv").arg("--version"),
            CommandSpec::new("npm").arg("-v"),
            CommandSpec::new("pnpm").arg("-v"),
        ];

        let err = run_all(&runner, &specs).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
        assert_eq!(*runner.seen.borrow(), vec!["uv --version", "npm -v"]);
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let spec = CommandSpec::new("stencil-definitely-not-installed");
        let err = SystemRunner.run(&spec).unwrap_err();
        assert!(matches!(err, Error::CommandSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_status() {
        let err = SystemRunner.run(&CommandSpec::shell("exit 3")).unwrap_err();
        match err {
            Error::CommandFailed { command, status } => {
                assert_eq!(command, "exit 3");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        SystemRunner.run(&CommandSpec::shell("true")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_passes_environment() {
        let spec = CommandSpec::shell(r#"test "$STENCIL_SYNC_MARKER" = ready"#)
            .env("STENCIL_SYNC_MARKER", "ready");
        SystemRunner.run(&spec).unwrap();

        let err = SystemRunner
            .run(&spec.clone().env("STENCIL_SYNC_MARKER", "stale"))
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
