//! Code block extraction and execution.
//!
//! Fenced blocks tagged with a language are pulled out of the current slide
//! in document order, written to a temporary file and handed to the
//! language's runner. The presenter only ever sees the joined output text.

use crate::model::CodeError;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::LazyLock;
use tracing::{debug, warn};

// Pattern is a literal; `fence_pattern_compiles` forces it.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?:```|~~~)(\w+)[ \t]*\n(.*?)\n[ \t]*(?:```|~~~)").expect("valid fence pattern")
});

static NEXT_FILE_ID: AtomicUsize = AtomicUsize::new(0);

/// Placeholder for the temporary source file in a runner command.
const FILE_PLACEHOLDER: &str = "<file>";
/// Placeholder for a compiled binary path in a runner command.
const BIN_PLACEHOLDER: &str = "<bin>";

/// A fenced code block with a language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag from the opening fence.
    pub language: String,
    /// Block body without the fences.
    pub code: String,
}

/// How to run one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Extension of the temporary source file.
    pub extension: &'static str,
    /// Commands run in order; the last one's output is the result.
    pub commands: &'static [&'static [&'static str]],
}

/// Runner lookup by language tag.
pub fn language(tag: &str) -> Option<Language> {
    let (extension, commands): (&str, &[&[&str]]) = match tag {
        "bash" => ("sh", &[&["bash", FILE_PLACEHOLDER]]),
        "sh" => ("sh", &[&["sh", FILE_PLACEHOLDER]]),
        "zsh" => ("zsh", &[&["zsh", FILE_PLACEHOLDER]]),
        "fish" => ("fish", &[&["fish", FILE_PLACEHOLDER]]),
        "python" => ("py", &[&["python3", FILE_PLACEHOLDER]]),
        "ruby" => ("rb", &[&["ruby", FILE_PLACEHOLDER]]),
        "perl" => ("pl", &[&["perl", FILE_PLACEHOLDER]]),
        "javascript" | "js" => ("js", &[&["node", FILE_PLACEHOLDER]]),
        "lua" => ("lua", &[&["lua", FILE_PLACEHOLDER]]),
        "go" => ("go", &[&["go", "run", FILE_PLACEHOLDER]]),
        "elixir" => ("exs", &[&["elixir", FILE_PLACEHOLDER]]),
        "rust" => (
            "rs",
            &[
                &["rustc", FILE_PLACEHOLDER, "-o", BIN_PLACEHOLDER],
                &[BIN_PLACEHOLDER],
            ],
        ),
        _ => return None,
    };
    Some(Language {
        extension,
        commands,
    })
}

/// Extract all tagged code blocks from a slide.
///
/// # Errors
///
/// [`CodeError::NoCodeBlocks`] when the slide has none.
pub fn parse(markdown: &str) -> Result<Vec<CodeBlock>, CodeError> {
    let blocks: Vec<CodeBlock> = FENCE
        .captures_iter(markdown)
        .map(|caps| CodeBlock {
            language: caps[1].to_string(),
            code: caps[2].to_string(),
        })
        .collect();

    if blocks.is_empty() {
        Err(CodeError::NoCodeBlocks)
    } else {
        Ok(blocks)
    }
}

/// Something that can run a code block and capture its output.
pub trait CodeExecutor {
    /// Run `block`, returning its captured output.
    fn execute(&self, block: &CodeBlock) -> Result<String, CodeError>;
}

/// Runs blocks as child processes using the built-in language table.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl CodeExecutor for ProcessExecutor {
    fn execute(&self, block: &CodeBlock) -> Result<String, CodeError> {
        let lang = language(&block.language)
            .ok_or_else(|| CodeError::UnsupportedLanguage(block.language.clone()))?;

        let scratch = ScratchFiles::new(lang.extension);
        std::fs::write(&scratch.source, &block.code).map_err(|e| spawn_error(block, &e))?;

        let mut output = String::new();
        for command in lang.commands {
            let args: Vec<String> = command
                .iter()
                .map(|arg| scratch.substitute(arg))
                .collect();
            let Some((program, rest)) = args.split_first() else {
                continue;
            };

            debug!(language = %block.language, program = %program, "Running code block");
            let result = Command::new(program)
                .args(rest)
                .output()
                .map_err(|e| spawn_error(block, &e))?;

            output = String::from_utf8_lossy(&result.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&result.stderr));
            if !result.status.success() {
                break;
            }
        }

        Ok(output.trim_end().to_string())
    }
}

fn spawn_error(block: &CodeBlock, e: &std::io::Error) -> CodeError {
    warn!(language = %block.language, error = %e, "Code block failed to run");
    CodeError::Spawn {
        language: block.language.clone(),
        reason: e.to_string(),
    }
}

/// Temporary source and binary paths, removed on drop.
struct ScratchFiles {
    source: PathBuf,
    binary: PathBuf,
}

impl ScratchFiles {
    fn new(extension: &str) -> Self {
        let id = NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed);
        let stem = format!("slides-code-{}-{}", std::process::id(), id);
        let dir = std::env::temp_dir();
        Self {
            source: dir.join(format!("{stem}.{extension}")),
            binary: dir.join(format!("{stem}.bin")),
        }
    }

    fn substitute(&self, arg: &str) -> String {
        match arg {
            FILE_PLACEHOLDER => path_arg(&self.source),
            BIN_PLACEHOLDER => path_arg(&self.binary),
            other => other.to_string(),
        }
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.source);
        let _ = std::fs::remove_file(&self.binary);
    }
}

/// Run every code block on `slide` and build the overlay text.
///
/// Outputs are joined with newlines; a block that fails contributes its error
/// message instead. A slide without blocks yields `No code blocks found`.
pub fn run_slide(slide: &str, executor: &dyn CodeExecutor) -> String {
    match parse(slide) {
        Ok(blocks) => blocks
            .iter()
            .map(|block| executor.execute(block).unwrap_or_else(|e| e.to_string()))
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => e.to_string(),
    }
}
