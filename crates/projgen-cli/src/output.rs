//! Output formatting for CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Types that can be printed as text or JSON.
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize + Sized,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout. Quiet mode prints nothing.
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    if ctx.quiet {
        return Ok(());
    }
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Write formatted output to a writer.
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };

    writeln!(writer, "{output}")?;
    Ok(())
}

/// Result of a `synth` run.
#[derive(Debug, Serialize)]
pub struct SynthOutput {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl SynthOutput {
    pub fn new(directory: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            files,
        }
    }
}

impl FormattedOutput for SynthOutput {
    fn format_text(&self) -> String {
        let mut out = format!(
            "✓ Wrote {} file(s) to {}",
            self.files.len(),
            self.directory.display()
        );
        for file in &self.files {
            out.push_str(&format!("\n  {}", display_relative(file, &self.directory)));
        }
        out
    }
}

/// One rendered file, printed without writing it.
#[derive(Debug, Serialize)]
pub struct ShownFile {
    pub path: PathBuf,
    pub executable: bool,
    /// `None` for binary contents.
    pub contents: Option<String>,
}

/// Result of a `show` run.
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub directory: PathBuf,
    pub files: Vec<ShownFile>,
}

impl FormattedOutput for ShowOutput {
    fn format_text(&self) -> String {
        self.files
            .iter()
            .map(|file| {
                let path = display_relative(&file.path, &self.directory);
                match &file.contents {
                    Some(contents) => format!("==> {path} <==\n{}", contents.trim_end_matches('\n')),
                    None => format!("==> {path} <==\n(binary contents)"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Plain message output.
#[derive(Debug, Serialize)]
pub struct SimpleOutput {
    pub message: String,
}

impl SimpleOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl FormattedOutput for SimpleOutput {
    fn format_text(&self) -> String {
        self.message.clone()
    }
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synth_output_text() {
        let output = SynthOutput::new(
            "/out",
            vec![PathBuf::from("/out/a.txt"), PathBuf::from("/out/pkg/b.txt")],
        );
        assert_eq!(
            output.format_text(),
            "✓ Wrote 2 file(s) to /out\n  a.txt\n  pkg/b.txt"
        );
    }

    #[test]
    fn test_synth_output_json() {
        let output = SynthOutput::new("/out", vec![PathBuf::from("/out/a.txt")]);
        let mut buf = Vec::new();
        write_output(OutputFormat::Json, &output, &mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["directory"], "/out");
        assert_eq!(json["files"][0], "/out/a.txt");
    }

    #[test]
    fn test_show_output_text() {
        let output = ShowOutput {
            directory: PathBuf::from("/out"),
            files: vec![
                ShownFile {
                    path: PathBuf::from("/out/a.txt"),
                    executable: false,
                    contents: Some("hello\n".into()),
                },
                ShownFile {
                    path: PathBuf::from("/out/b.bin"),
                    executable: false,
                    contents: None,
                },
            ],
        };
        assert_eq!(
            output.format_text(),
            "==> a.txt <==\nhello\n\n==> b.bin <==\n(binary contents)"
        );
    }
}
