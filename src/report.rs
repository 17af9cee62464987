//! Console reporting
//!
//! Informational lines go to one sink (stdout in the binary), per-entry errors to
//! another (stderr). Tests swap both for in-memory buffers.

use std::fmt;
use std::io::{self, Stderr, Stdout, Write};

/// Line-oriented reporter over an info sink and an error sink.
///
/// Write failures are swallowed: a closed pipe on stdout must not abort an
/// extraction that is otherwise succeeding.
#[derive(Debug)]
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter bound to the process's stdout and stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Write one informational line
    pub fn info(&mut self, message: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{}", message);
    }

    /// Write one error line with the full context chain, e.g.
    /// `error: Failed to create file: out/a.txt: Permission denied (os error 13)`
    pub fn error(&mut self, err: &anyhow::Error) {
        let _ = writeln!(self.err, "error: {:#}", err);
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
