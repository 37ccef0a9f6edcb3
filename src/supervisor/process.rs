use std::fmt;
use std::process::ExitStatus;

/// Which supervised process an event or handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessRole {
    Preprocessor,
    Watcher,
    Generator,
}

impl ProcessRole {
    pub const ALL: [ProcessRole; 3] = [
        ProcessRole::Preprocessor,
        ProcessRole::Watcher,
        ProcessRole::Generator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProcessRole::Preprocessor => "preprocessor",
            ProcessRole::Watcher => "watcher",
            ProcessRole::Generator => "generator",
        }
    }
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a process ended: an exit code, a terminating signal, or neither when
/// the status could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitInfo {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl ExitInfo {
    pub fn code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn signal(signal: i32) -> Self {
        Self {
            code: None,
            signal: Some(signal),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0) && self.signal.is_none()
    }

    /// The status as a single exit code.
    ///
    /// The code when there is one, `128 + signal` for signal deaths, and 1
    /// when nothing is known.
    pub fn status_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}

impl From<ExitStatus> for ExitInfo {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exited with code {}", code),
            (None, Some(signal)) => write!(f, "exited due to signal {}", signal),
            (None, None) => f.write_str("exited with unknown status"),
        }
    }
}

/// Completion notification sent by a background process's waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessEvent {
    Exited { role: ProcessRole, exit: ExitInfo },
}
