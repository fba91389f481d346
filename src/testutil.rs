use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::time::SystemTime;

use chrono::DateTime;

use crate::git::GitRunner;
use crate::system::Clock;

pub(crate) struct FixedClock(pub(crate) SystemTime);

impl FixedClock {
    pub(crate) fn at(rfc3339: &str) -> Self {
        let dt = DateTime::parse_from_rfc3339(rfc3339).expect("clock date");
        Self(dt.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub(crate) args: Vec<String>,
    pub(crate) envs: Vec<(String, String)>,
}

impl Call {
    pub(crate) fn command(&self) -> String {
        self.args.join(" ")
    }

    pub(crate) fn env(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Observer = Box<dyn FnMut(&Call)>;

/// Records every git invocation and answers from a script.
#[derive(Default)]
pub(crate) struct FakeGit {
    calls: RefCell<Vec<Call>>,
    fail_on: Option<String>,
    stdout: Vec<(String, String)>,
    observer: RefCell<Option<Observer>>,
}

impl FakeGit {
    pub(crate) fn failing_on(subcommand: &str) -> Self {
        Self {
            fail_on: Some(subcommand.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn with_stdout(mut self, subcommand: &str, stdout: &str) -> Self {
        self.stdout.push((subcommand.to_string(), stdout.to_string()));
        self
    }

    pub(crate) fn with_observer(self, observer: impl FnMut(&Call) + 'static) -> Self {
        *self.observer.borrow_mut() = Some(Box::new(observer));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::command).collect()
    }
}

impl GitRunner for FakeGit {
    fn run_git_with_env(
        &self,
        _repo: &Path,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> std::io::Result<Output> {
        let call = Call {
            args: args.iter().map(ToString::to_string).collect(),
            envs: envs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        if let Some(observer) = self.observer.borrow_mut().as_mut() {
            observer(&call);
        }
        self.calls.borrow_mut().push(call);

        let subcommand = args.first().copied().unwrap_or_default();
        let failed = self.fail_on.as_deref() == Some(subcommand);
        let stdout = self
            .stdout
            .iter()
            .find(|(cmd, _)| cmd == subcommand)
            .map(|(_, out)| out.clone().into_bytes())
            .unwrap_or_default();
        Ok(Output {
            status: ExitStatus::from_raw(if failed { 1 << 8 } else { 0 }),
            stdout,
            stderr: if failed {
                format!("fatal: scripted {subcommand} failure").into_bytes()
            } else {
                Vec::new()
            },
        })
    }
}
