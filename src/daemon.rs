use crate::calendar::SystemClock;
use crate::config::{locale_override, AppPaths, Config, Settings};
use crate::error::{IndicatorError, Result};
use crate::indicator::Indicator;
use crate::tray::SystemTray;
use log::{error, info, warn};
use std::fs;

pub struct Daemon {
    config: Config,
}

impl Daemon {
    pub fn new(config: Config) -> Self {
        Daemon { config }
    }

    pub async fn run(&self) -> Result<()> {
        info!("Starting Persian date indicator");

        let settings = self
            .config
            .settings()?
            .with_locale_override(locale_override());
        settings.validate()?;
        info!("Using locale {}", settings.locale);

        let paths = self.config.paths();
        if is_already_running(paths) {
            info!("Persian date indicator is already running");
            println!("Persian date indicator is already running");
            return Ok(());
        }

        write_pid_file(paths)?;
        let result = run_tray(&settings).await;
        remove_pid_file(paths);

        if let Err(e) = &result {
            error!("Indicator stopped with error: {}", e);
        }
        result
    }
}

async fn run_tray(settings: &Settings) -> Result<()> {
    let indicator = Indicator::new(settings, SystemClock);

    info!("Initializing system tray...");
    let tray = match SystemTray::new(indicator, settings.schedule()) {
        Ok(tray) => {
            info!("System tray created successfully");
            tray
        }
        Err(e) => {
            error!("Failed to create system tray: {}", e);
            log_tray_hints();
            return Err(e);
        }
    };

    #[cfg(target_os = "linux")]
    let indicator = tray.run(shutdown_signal()).await?;
    #[cfg(not(target_os = "linux"))]
    let indicator = tray.run(shutdown_signal())?;

    // Removes the generated icons
    indicator.close()?;
    info!("Persian date indicator stopped");
    Ok(())
}

fn log_tray_hints() {
    #[cfg(target_os = "linux")]
    {
        error!("Linux: System tray icon failed to initialize.");
        error!("This may be due to:");
        error!("  1. No StatusNotifierItem host on the session bus");
        error!("  2. GNOME desktop environment without AppIndicator extension");
        error!("     Install: sudo apt-get install gnome-shell-extension-appindicator");
        error!("     Enable: gnome-extensions enable ubuntu-appindicators@ubuntu.com");
        error!(
            "  3. Desktop environment: {}",
            std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_else(|_| "Unknown".to_string())
        );
        error!(
            "  4. Session type: {}",
            std::env::var("XDG_SESSION_TYPE").unwrap_or_else(|_| "Unknown".to_string())
        );
    }

    #[cfg(windows)]
    error!("Windows: Ensure no other instance is running. Check Task Manager for persian-date-indicator processes.");
}

/// Resolves on SIGINT or SIGTERM (Ctrl-C only on non-Unix).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received SIGINT, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            // Without a handler only Quit can stop us
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

pub fn write_pid_file(paths: &AppPaths) -> Result<()> {
    let pid = std::process::id();
    fs::write(&paths.pid_file, pid.to_string())?;
    info!("PID {} written to {}", pid, paths.pid_file.display());
    Ok(())
}

pub fn remove_pid_file(paths: &AppPaths) {
    if paths.pid_file.exists() {
        if let Err(e) = fs::remove_file(&paths.pid_file) {
            warn!("Failed to remove PID file: {}", e);
        }
    }
}

fn read_pid(paths: &AppPaths) -> Option<u32> {
    let pid_str = fs::read_to_string(&paths.pid_file).ok()?;
    match pid_str.trim().parse::<u32>() {
        Ok(pid) => Some(pid),
        Err(_) => {
            warn!(
                "Invalid PID file content: '{}', cleaning up",
                pid_str.trim()
            );
            let _ = fs::remove_file(&paths.pid_file);
            None
        }
    }
}

/// Best-effort single-instance check. Stale PID files, and ones naming a
/// different program, are removed.
pub fn is_already_running(paths: &AppPaths) -> bool {
    let Some(pid) = read_pid(paths) else {
        return false;
    };

    if !process_alive(pid) {
        warn!("Found stale PID file for process {}, cleaning up", pid);
        let _ = fs::remove_file(&paths.pid_file);
        return false;
    }

    if !process_is_indicator(pid) {
        warn!(
            "PID {} from {} belongs to another program, cleaning up",
            pid,
            paths.pid_file.display()
        );
        let _ = fs::remove_file(&paths.pid_file);
        return false;
    }

    info!(
        "Instance with PID {} found via {}",
        pid,
        paths.pid_file.display()
    );
    true
}

// Kernel truncates comm to 15 bytes
#[cfg(target_os = "linux")]
const COMM_LEN: usize = 15;

/// Whether `pid` runs the same executable as this process. Unknown names
/// count as a match so a live instance is never started twice.
#[cfg(target_os = "linux")]
fn process_is_indicator(pid: u32) -> bool {
    let Ok(comm) = fs::read_to_string(format!("/proc/{pid}/comm")) else {
        return true;
    };
    let Some(own) = own_process_name() else {
        return true;
    };
    comm_matches(comm.trim_end(), &own)
}

#[cfg(not(target_os = "linux"))]
fn process_is_indicator(_pid: u32) -> bool {
    true
}

#[cfg(target_os = "linux")]
fn own_process_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.file_name()?.to_string_lossy().into_owned())
}

#[cfg(target_os = "linux")]
fn comm_matches(comm: &str, exe_name: &str) -> bool {
    let name = exe_name.as_bytes();
    comm.as_bytes() == name.get(..COMM_LEN).unwrap_or(name)
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    false
}

/// Ask the running instance to exit. Returns false if none was running.
pub fn stop_running_instance(paths: &AppPaths) -> Result<bool> {
    if !is_already_running(paths) {
        return Ok(false);
    }
    let pid = read_pid(paths)
        .ok_or_else(|| IndicatorError::Other("Invalid PID file".to_string()))?;

    terminate(pid)?;
    info!("Sent termination request to process {}", pid);

    // A terminated process cannot clean up after itself
    #[cfg(windows)]
    remove_pid_file(paths);

    Ok(true)
}

#[cfg(unix)]
fn terminate(pid: u32) -> Result<()> {
    let pid = i32::try_from(pid)
        .map_err(|_| IndicatorError::Platform(format!("PID {pid} out of range")))?;

    // The instance removes its own PID file and icons on SIGTERM
    if unsafe { libc::kill(pid, libc::SIGTERM) } == 0 {
        Ok(())
    } else {
        Err(IndicatorError::Platform(format!(
            "Failed to signal process {pid}: {}",
            std::io::Error::last_os_error()
        )))
    }
}

#[cfg(windows)]
fn terminate(pid: u32) -> Result<()> {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    let terminated = unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            false
        } else {
            let ok = TerminateProcess(handle, 0) != 0;
            CloseHandle(handle);
            ok
        }
    };

    if terminated {
        Ok(())
    } else {
        Err(IndicatorError::Platform(format!(
            "Failed to terminate process {pid}"
        )))
    }
}

#[cfg(not(any(unix, windows)))]
fn terminate(_pid: u32) -> Result<()> {
    Err(IndicatorError::Platform(
        "Stopping a running instance is not supported on this platform".to_string(),
    ))
}
