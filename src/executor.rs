use crate::config::LaunchConfig;
use crate::model::Entry;
use log::{debug, info, warn};
use nix::unistd::setsid;
use regex::{Captures, Regex};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;

static FIELD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[fFuUdDnNickvm%]").expect("field code pattern"));

/// Drops desktop-entry field codes (`%f`, `%U`, ...) and unescapes `%%`.
pub fn strip_field_codes(command: &str) -> String {
    FIELD_CODE
        .replace_all(command, |caps: &Captures| {
            if &caps[0] == "%%" { "%" } else { "" }
        })
        .trim()
        .to_string()
}

fn command_line(entry: &Entry, config: &LaunchConfig) -> String {
    let command = strip_field_codes(&entry.command);
    match (&config.terminal, entry.terminal) {
        (Some(term), true) => format!("{} {}", term.trim(), command),
        _ => command,
    }
}

/// Starts `entry` in its own session and returns without waiting.
/// `false` means the process could not be spawned.
pub fn launch(entry: &Entry, config: &LaunchConfig) -> bool {
    let line = command_line(entry, config);
    if line.is_empty() {
        warn!("Nothing to run for {:?}", entry.name);
        return false;
    }

    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(&line)
        .envs(&config.env)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // SAFETY: setsid is async-signal-safe and touches no parent state.
    unsafe {
        command.pre_exec(|| setsid().map(|_| ()).map_err(io::Error::from));
    }

    match command.spawn() {
        Ok(mut child) => {
            let pid = child.id();
            info!("Launched {:?} (pid {}): {}", entry.name, pid, line);
            // Reaped off-thread; launch never blocks
            thread::spawn(move || match child.wait() {
                Ok(status) => debug!("pid {} exited: {}", pid, status),
                Err(e) => debug!("pid {} wait failed: {}", pid, e),
            });
            true
        }
        Err(e) => {
            warn!("Failed to launch {:?}: {}", entry.name, e);
            false
        }
    }
}
