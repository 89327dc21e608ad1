use std::process::Command;

/// True when running under a Wayland session.
pub fn is_wayland_session() -> bool {
    std::env::var("XDG_SESSION_TYPE")
        .map(|s| s == "wayland")
        .unwrap_or(false)
}

/// Ask the window manager to keep the window above others, or release
/// it. Shells out to wmctrl, which only works on X11; Wayland
/// compositors expose no generic interface for this.
pub fn set_keep_above(window_title: &str, on: bool) -> Result<(), Box<dyn std::error::Error>> {
    if cfg!(not(target_os = "linux")) || is_wayland_session() {
        return Err("keep-on-top is only supported on X11 sessions".into());
    }

    let action = if on { "add,above" } else { "remove,above" };
    let status = Command::new("wmctrl")
        .args(["-F", "-r", window_title, "-b", action])
        .status()
        .map_err(|e| format!("Failed to spawn wmctrl: {e}"))?;

    if !status.success() {
        return Err(format!("wmctrl exited with status {status}").into());
    }

    Ok(())
}
