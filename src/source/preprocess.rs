//! Pre-processing of executable slide files.
//!
//! A block of the form
//!
//! ```text
//! ~~~command --with args
//! input fed to stdin
//! ~~~
//! ```
//!
//! is replaced by the trimmed stdout of `command --with args`. This only runs
//! for files marked executable, after the shebang line is gone.

use regex::{Captures, Regex};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use tracing::{debug, warn};

// Pattern is a literal; `block_pattern_compiles` forces it.
static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)~~~(.+?)\n(.*?)\n~~~").expect("valid block pattern"));

/// Replace every command block with its output.
///
/// A block whose command cannot be spawned is left untouched.
pub fn run(content: &str) -> String {
    BLOCK
        .replace_all(content, |caps: &Captures| {
            let command = caps[1].trim();
            let input = &caps[2];
            match execute(command, input) {
                Some(output) => output,
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn execute(command_line: &str, input: &str) -> Option<String> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next()?;

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| warn!(command = command_line, error = %e, "Pre-process command failed to spawn"))
        .ok()?;

    // Feed stdin from its own thread while stdout is drained here, so a
    // filter with more output than the pipe buffer cannot block.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_owned();
        std::thread::spawn(move || stdin.write_all(input.as_bytes()))
    });

    let output = child
        .wait_with_output()
        .map_err(|e| warn!(command = command_line, error = %e, "Pre-process command failed"))
        .ok()?;

    // A command that ignores stdin may close it early; its output still counts.
    if let Some(Ok(Err(e))) = writer.map(std::thread::JoinHandle::join) {
        debug!(command = command_line, error = %e, "Pre-process stdin write failed");
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
