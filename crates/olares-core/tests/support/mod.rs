#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use olares_core::config::ToolPaths;
use olares_core::error::{DeployerError, DeployerResult};
use olares_core::process::{CommandOutput, CommandRunner};

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub streamed: bool,
}

/// Scripted response for the next call to a program.
#[derive(Debug)]
pub enum Reply {
    Output(CommandOutput),
    SpawnFails,
}

/// Runner that replays scripted replies per program and records every call.
///
/// Programs without a scripted reply exit 0 with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    replies: RefCell<Vec<(PathBuf, VecDeque<Reply>)>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, program: &Path, reply: Reply) -> Self {
        {
            let mut replies = self.replies.borrow_mut();
            match replies.iter_mut().find(|(p, _)| p == program) {
                Some((_, queue)) => queue.push_back(reply),
                None => replies.push((program.to_path_buf(), VecDeque::from([reply]))),
            }
        }
        self
    }

    pub fn succeeds(self, program: &Path, stdout: &str) -> Self {
        self.reply(program, Reply::Output(output(0, stdout, "")))
    }

    pub fn fails(self, program: &Path, code: i32, stderr: &str) -> Self {
        self.reply(program, Reply::Output(output(code, "", stderr)))
    }

    pub fn spawn_fails(self, program: &Path) -> Self {
        self.reply(program, Reply::SpawnFails)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, program: &Path) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }

    fn next_reply(&self, program: &Path) -> DeployerResult<CommandOutput> {
        let reply = self
            .replies
            .borrow_mut()
            .iter_mut()
            .find(|(p, _)| p == program)
            .and_then(|(_, queue)| queue.pop_front());

        match reply {
            Some(Reply::Output(out)) => Ok(out),
            Some(Reply::SpawnFails) => Err(DeployerError::Spawn {
                program: program.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            }),
            None => Ok(output(0, "", "")),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[String]) -> DeployerResult<CommandOutput> {
        self.calls.borrow_mut().push(Call {
            program: program.to_path_buf(),
            args: args.to_vec(),
            streamed: false,
        });
        self.next_reply(program)
    }

    fn stream(&self, program: &Path, args: &[String]) -> DeployerResult<Option<i32>> {
        self.calls.borrow_mut().push(Call {
            program: program.to_path_buf(),
            args: args.to_vec(),
            streamed: true,
        });
        self.next_reply(program).map(|out| out.code)
    }
}

pub fn output(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

/// Tool paths that never exist on disk, so the init tool is skipped.
pub fn fake_tools() -> ToolPaths {
    ToolPaths {
        kubectl: PathBuf::from("/fake/kubectl"),
        deploy: PathBuf::from("/fake/olares-deploy"),
        manage: PathBuf::from("/fake/olares-manage"),
        urls: PathBuf::from("/fake/olares-urls"),
        init: PathBuf::from("/fake/olares-init"),
    }
}
