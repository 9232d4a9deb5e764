//! Notifications
//!
//! Shared plumbing for observers: the error they report and a line-oriented
//! output sink they can write through a shared reference.

use std::{
    cell::{Ref, RefCell},
    fmt, io,
};

use thiserror::Error;

/// Errors reported by an observer while handling a notification.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The observer could not write its notification.
    #[error("failed to write notification: {0}")]
    Io(#[from] io::Error),

    /// The observer refused the notification.
    #[error("{0}")]
    Rejected(String),
}

/// Writer shared between an observer's callbacks and whoever reads its output.
#[derive(Debug)]
pub struct Sink<W> {
    out: RefCell<W>,
}

impl<W: io::Write> Sink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Write one line.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::Io`] if the writer fails.
    pub fn line(&self, args: fmt::Arguments<'_>) -> Result<(), ObserverError> {
        let mut out = self.out.borrow_mut();

        out.write_fmt(args)?;
        out.write_all(b"\n")?;

        Ok(())
    }

    /// Borrow the underlying writer.
    pub fn get(&self) -> Ref<'_, W> {
        self.out.borrow()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_appends_newline() -> TestResult {
        let sink = Sink::new(Vec::new());

        sink.line(format_args!("first {}", 1))?;
        sink.line(format_args!("second"))?;

        assert_eq!(String::from_utf8(sink.get().clone())?, "first 1\nsecond\n");

        Ok(())
    }
}
