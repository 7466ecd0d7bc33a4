use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::PersistenceError;

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Lock file guarding one ledger/artifact pair: `<ledger>.lock`.
#[must_use]
pub fn lock_path_for(ledger: &Path) -> PathBuf {
    let mut name = ledger.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

/// Held for the duration of a run; the lock file is removed on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

impl RunLock {
    /// Take the lock, waiting up to `timeout` for another live run to
    /// release it. Lock files left by dead processes are reclaimed.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, PersistenceError> {
        let started = Instant::now();

        loop {
            match try_acquire(path) {
                Ok(guard) => {
                    tracing::debug!(path = %path.display(), "acquired run lock");
                    return Ok(guard);
                }
                Err(LockState::Stale(pid)) => {
                    tracing::warn!(path = %path.display(), pid, "removing stale run lock");
                    reclaim_stale(path)?;
                }
                Err(LockState::Io(source)) => return Err(PersistenceError::io(path, source)),
                Err(LockState::HeldBy(pid)) => {
                    if started.elapsed() >= timeout {
                        return Err(PersistenceError::Locked {
                            path: path.to_path_buf(),
                            pid,
                        });
                    }
                    std::thread::sleep(LOCK_RETRY_DELAY);
                }
            }
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug)]
enum LockState {
    /// Held by a live (or unidentifiable) process.
    HeldBy(Option<u32>),
    Stale(u32),
    Io(std::io::Error),
}

fn try_acquire(lock_path: &Path) -> Result<RunLock, LockState> {
    if let Some(parent) = lock_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(LockState::Io)?;
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(RunLock {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                // Released between our open and read: try again.
                return Err(LockState::HeldBy(None));
            }

            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(Some(pid))),
                Some(pid) => Err(LockState::Stale(pid)),
                // Holder may still be writing its pid.
                None => Err(LockState::HeldBy(None)),
            }
        }
        Err(err) => Err(LockState::Io(err)),
    }
}

/// Delete a lock left by a dead process. Losing the race to another run that
/// reclaimed it first is fine; any other failure is reported, not retried.
fn reclaim_stale(path: &Path) -> Result<(), PersistenceError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PersistenceError::io(path, source)),
    }
}

fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }
    match std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .env("LC_ALL", "C")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .output()
    {
        Ok(output) => {
            holder_alive(output.status.success(), &String::from_utf8_lossy(&output.stderr))
        }
        // kill unavailable: never reclaim on a guess.
        Err(_) => true,
    }
}

/// Only an explicit "no such process" marks the holder dead. `EPERM` means a
/// live process owned by another user.
fn holder_alive(signal_delivered: bool, stderr: &str) -> bool {
    signal_delivered || !stderr.contains("No such process")
}
