/// How the reader reacts to a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the first error to the caller (strict; aborts the pass).
    Return,
    /// Skip malformed records and resume at the next header.
    Skip,
}

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub error_policy: ErrorPolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Return,
        }
    }
}
