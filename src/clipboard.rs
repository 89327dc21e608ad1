use std::io::Write;
use std::process::{Command, Stdio};

/// Copy the checked text to the system clipboard by piping it through
/// the platform helper: pbcopy on macOS, wl-copy on Wayland, xclip
/// elsewhere on Linux.
pub fn copy_to_clipboard(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (cmd, args) = helper_command();

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("Failed to spawn {cmd}: {e}"))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(format!("{cmd} exited with status {status}").into());
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn helper_command() -> (&'static str, Vec<&'static str>) {
    ("pbcopy", vec![])
}

#[cfg(not(target_os = "macos"))]
fn helper_command() -> (&'static str, Vec<&'static str>) {
    if crate::wm::is_wayland_session() {
        ("wl-copy", vec![])
    } else {
        ("xclip", vec!["-selection", "clipboard"])
    }
}
