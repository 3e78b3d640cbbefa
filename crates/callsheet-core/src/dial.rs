use crate::domain::normalize_phone_for_dial;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DialError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dialer failed: {0}")]
    Command(String),
    #[error("not a dialable number: {0:?}")]
    NotCallable(String),
}

/// Hands a dial string to whatever places the call. Nothing is returned to
/// the roster; failures are only reported to the operator.
pub trait Dialer {
    fn dial(&mut self, dial_string: &str) -> Result<(), DialError>;
}

pub fn tel_uri(dial_string: &str) -> Result<String, DialError> {
    let normalized = normalize_phone_for_dial(dial_string)
        .ok_or_else(|| DialError::NotCallable(dial_string.to_string()))?;
    Ok(format!("tel:{}", normalized))
}

/// Opens `tel:` URIs with an external program such as `xdg-open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDialer {
    program: String,
    args: Vec<String>,
}

impl CommandDialer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn platform_default() -> Self {
        let (program, args) = platform_opener();
        Self::new(program, args.iter().map(|arg| arg.to_string()).collect())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Dialer for CommandDialer {
    fn dial(&mut self, dial_string: &str) -> Result<(), DialError> {
        let uri = tel_uri(dial_string)?;
        debug!(program = %self.program, uri = %uri, "opening dialer");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            warn!(program = %self.program, uri = %uri, %status, "dialer exited unsuccessfully");
            return Err(DialError::Command(format!(
                "{} exited with status {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Records would-be calls without touching the platform. Used when dialing
/// is disabled in the config.
#[derive(Debug, Clone, Default)]
pub struct LogDialer {
    dialed: Vec<String>,
}

impl LogDialer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialed(&self) -> &[String] {
        &self.dialed
    }
}

impl Dialer for LogDialer {
    fn dial(&mut self, dial_string: &str) -> Result<(), DialError> {
        let uri = tel_uri(dial_string)?;
        info!(uri = %uri, "dialing disabled, call not placed");
        self.dialed.push(uri);
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_opener() -> (&'static str, &'static [&'static str]) {
    ("open", &[])
}

#[cfg(windows)]
fn platform_opener() -> (&'static str, &'static [&'static str]) {
    ("cmd", &["/C", "start", ""])
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener() -> (&'static str, &'static [&'static str]) {
    ("xdg-open", &[])
}

#[cfg(test)]
mod tests {
    use super::{tel_uri, DialError, Dialer, LogDialer};

    #[test]
    fn tel_uri_strips_formatting() {
        assert_eq!(tel_uri("+234 703-040-040").unwrap(), "tel:+234703040040");
    }

    #[test]
    fn tel_uri_rejects_missing_digits() {
        let err = tel_uri("+ ( )").unwrap_err();
        assert!(matches!(err, DialError::NotCallable(_)));
    }

    #[test]
    fn log_dialer_records_uris() {
        let mut dialer = LogDialer::new();
        dialer.dial("+234703040040").unwrap();
        assert_eq!(dialer.dialed(), ["tel:+234703040040".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn command_dialer_reports_exit_status() {
        use super::CommandDialer;

        let mut ok = CommandDialer::new("true", Vec::new());
        assert!(ok.dial("+234703040040").is_ok());

        let mut failing = CommandDialer::new("false", Vec::new());
        let err = failing.dial("+234703040040").unwrap_err();
        assert!(matches!(err, DialError::Command(_)));
    }

    #[cfg(unix)]
    #[test]
    fn command_dialer_reports_missing_program() {
        use super::CommandDialer;

        let mut missing = CommandDialer::new("callsheet-no-such-opener", Vec::new());
        let err = missing.dial("+234703040040").unwrap_err();
        assert!(matches!(err, DialError::Io(_)));
    }
}
