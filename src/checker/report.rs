use std::{
    fmt,
    io::{self, Write},
};

use log::warn;

const HEADER_WIDTH: usize = 50;

/// Writes the decorated, human-readable check output.
///
/// Failing to write to the output never fails a check; the error is logged and the line is dropped.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> Reporter<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self, message: &str) {
        let rule = "=".repeat(HEADER_WIDTH);
        self.line(format_args!("\n{}\n🔧 {}\n{}", rule, message, rule));
    }

    pub fn success(&mut self, message: impl fmt::Display) {
        self.line(format_args!("✅ {}", message));
    }

    pub fn error(&mut self, message: impl fmt::Display) {
        self.line(format_args!("❌ {}", message));
    }

    pub fn info(&mut self, message: impl fmt::Display) {
        self.line(format_args!("ℹ️  {}", message));
    }

    /// Write an indented detail line under the current check.
    pub fn detail(&mut self, message: impl fmt::Display) {
        self.line(format_args!("   {}", message));
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{}", args) {
            warn!("Failed to write check output: {}", err);
        }
    }
}
