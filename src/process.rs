use std::io;
use std::process::{Command, Stdio};

use crate::contract::{BenchError, CommandOutput, CommandRunner, Result};

/// Spawns real child processes with piped stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        tracing::debug!("{} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Checks that `<program> -version` can be spawned and exits cleanly.
pub fn probe_encoder<R: CommandRunner>(runner: &R, program: &str) -> Result<()> {
    let output = runner
        .run(program, &["-version".to_string()])
        .map_err(|err| BenchError::EncoderUnavailable {
            program: program.to_string(),
            reason: err.to_string(),
        })?;

    if !output.success {
        return Err(BenchError::EncoderUnavailable {
            program: program.to_string(),
            reason: format!("version probe exited with status {:?}", output.code),
        });
    }

    if let Some(first_line) = output.stdout.lines().next() {
        tracing::info!("encoder: {first_line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(io::Result<CommandOutput>);

    impl CommandRunner for Canned {
        fn run(&self, _program: &str, args: &[String]) -> io::Result<CommandOutput> {
            assert_eq!(args, ["-version"]);
            match &self.0 {
                Ok(output) => Ok(output.clone()),
                Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
            }
        }
    }

    fn exited(success: bool, code: i32) -> CommandOutput {
        CommandOutput {
            success,
            code: Some(code),
            stdout: "ffmpeg version 7.1\nbuilt with gcc".to_string(),
            stderr: String::new(),
        }
    }

    #[test]
    fn probe_accepts_zero_exit() {
        assert!(probe_encoder(&Canned(Ok(exited(true, 0))), "ffmpeg").is_ok());
    }

    #[test]
    fn probe_rejects_nonzero_exit() {
        let err = probe_encoder(&Canned(Ok(exited(false, 1))), "ffmpeg").unwrap_err();
        assert!(matches!(err, BenchError::EncoderUnavailable { .. }));
    }

    #[test]
    fn probe_rejects_missing_binary() {
        let missing = Canned(Err(io::Error::new(io::ErrorKind::NotFound, "no such file")));
        let err = probe_encoder(&missing, "ffmpeg").unwrap_err();
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn system_runner_reports_spawn_failure() {
        let result = SystemCommandRunner.run("codec-bench-definitely-missing-binary", &[]);
        assert!(result.is_err());
    }
}
