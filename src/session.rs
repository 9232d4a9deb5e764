//! Session
//!
//! Explicit holder for the most recent record of a calculator run.

/// Holds at most one record: the last one recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<T> {
    last: Option<T>,
}

impl<T> Session<T> {
    /// Create an empty session.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Store `record` as the latest, returning the one it replaces.
    pub fn record(&mut self, record: T) -> Option<T> {
        self.last.replace(record)
    }

    /// The latest record, if any.
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Forget the latest record, returning it.
    pub fn clear(&mut self) -> Option<T> {
        self.last.take()
    }

    /// Whether nothing has been recorded since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = Session::<u32>::new();

        assert!(session.is_empty());
        assert_eq!(session.last(), None);
    }

    #[test]
    fn record_replaces_previous() {
        let mut session = Session::new();

        assert_eq!(session.record("first"), None);
        assert_eq!(session.record("second"), Some("first"));
        assert_eq!(session.last(), Some(&"second"));
    }

    #[test]
    fn clear_empties_session() {
        let mut session = Session::new();
        session.record(7);

        assert_eq!(session.clear(), Some(7));
        assert!(session.is_empty());
        assert_eq!(session.clear(), None);
    }
}
