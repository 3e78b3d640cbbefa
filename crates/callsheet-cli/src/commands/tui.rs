use anyhow::{anyhow, Result};
use clap::Args;
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Write dashboard logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn launch(
    config_path: Option<PathBuf>,
    seed_path: Option<PathBuf>,
    args: TuiArgs,
    verbose: bool,
) -> Result<()> {
    let mut command = build_command(config_path, seed_path, args.log_file);
    if verbose {
        eprintln!("launching {:?}", command.get_program());
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        use anyhow::Context as _;
        let status = command.status().with_context(|| "launch callsheet-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(
    config_path: Option<PathBuf>,
    seed_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> Command {
    let mut command = Command::new(find_tui_binary());
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(path) = seed_path {
        command.arg("--seed").arg(path);
    }
    if let Some(path) = log_file {
        command.arg("--log-file").arg(path);
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("callsheet-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "callsheet-tui binary not found; build it with `cargo build -p callsheet-tui` or install the package"
        );
    }
    anyhow!("launch callsheet-tui failed: {}", err)
}

#[cfg(test)]
mod tests {
    use super::build_command;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    #[test]
    fn build_command_forwards_paths() {
        let command = build_command(
            Some(PathBuf::from("/tmp/config.toml")),
            Some(PathBuf::from("/tmp/roster.toml")),
            None,
        );
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("--config"),
                OsStr::new("/tmp/config.toml"),
                OsStr::new("--seed"),
                OsStr::new("/tmp/roster.toml"),
            ]
        );
    }
}
