use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::{SystemError, SystemResult};

/// Runs external programs and returns their standard output.
///
/// The seam between the adapters and the operating system; tests substitute
/// a scripted runner.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, feeding `stdin` if given. A non-zero exit
    /// status is an error carrying the captured stderr.
    fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> SystemResult<Vec<u8>>;
}

/// Render a command line for logs and error messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push_str(&format!("{arg:?}"));
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// [`CommandRunner`] over [`std::process::Command`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> SystemResult<Vec<u8>> {
        let command = command_line(program, args);
        debug!(%command, "running command");

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SystemError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Stdin is written on its own thread while stdout is drained here.
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => {
                let input = input.to_vec();
                Some(thread::spawn(move || pipe.write_all(&input)))
            }
            _ => None,
        };

        let output = child.wait_with_output().map_err(|source| SystemError::Io {
            command: command.clone(),
            source,
        })?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(source)) => {
                    return Err(SystemError::Io {
                        command,
                        source,
                    })
                }
                Err(_) => {
                    return Err(SystemError::Io {
                        command,
                        source: std::io::Error::other("stdin writer panicked"),
                    })
                }
            }
        }

        if !output.status.success() {
            return Err(SystemError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Scripted runner: answers by command line, echoes stdin for `plutil`
    /// (fixtures are already JSON), and records every call.
    #[derive(Default)]
    pub struct FakeRunner {
        responses: HashMap<String, Result<Vec<u8>, String>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, command: &str, stdout: &str) -> Self {
            self.responses
                .insert(command.to_string(), Ok(stdout.as_bytes().to_vec()));
            self
        }

        pub fn fail(mut self, command: &str, stderr: &str) -> Self {
            self.responses
                .insert(command.to_string(), Err(stderr.to_string()));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> SystemResult<Vec<u8>> {
            let command = command_line(program, args);
            self.calls.lock().unwrap().push(command.clone());
            if program == "plutil" {
                return Ok(stdin.unwrap_or_default().to_vec());
            }
            match self.responses.get(&command) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(stderr)) => Err(SystemError::Failed {
                    command,
                    status: "exit status: 1".into(),
                    stderr: stderr.clone(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }
}
