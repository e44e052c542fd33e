//! Handles all user-facing status output for the CLI.
//!
//! Status lines go to stderr as a right-aligned, colored verb followed by a message,
//! so stdout stays reserved for generated text and JSON.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Width the status verb is right-aligned to.
const VERB_WIDTH: usize = 12;

/// Prints `Verb message` status lines unless quiet.
pub struct StatusPrinter {
    stream: StandardStream,
    quiet: bool,
}

impl StatusPrinter {
    pub fn new(quiet: bool) -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            quiet,
        }
    }

    /// A green status line, e.g. `   Generated Expr -> out/Expr.rs`.
    pub fn status(&mut self, verb: &str, message: &str) {
        self.print(Color::Green, verb, message);
    }

    /// A yellow status line for things worth noticing that are not errors.
    pub fn note(&mut self, verb: &str, message: &str) {
        self.print(Color::Yellow, verb, message);
    }

    fn print(&mut self, color: Color, verb: &str, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.stream, "{verb:>VERB_WIDTH$}");
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, " {message}");
    }
}
