use std::fmt;
use std::fmt::{Display, Formatter};

/// A code that matched none of the known variants of its enum.
///
/// Only the owning enum's `From<String>` builds one, so a supported code can
/// never end up here.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct UnsupportedCode(String);

impl UnsupportedCode {
    pub(crate) fn new(code: String) -> Self {
        UnsupportedCode(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UnsupportedCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<UnsupportedCode> for String {
    fn from(value: UnsupportedCode) -> Self {
        value.0
    }
}
