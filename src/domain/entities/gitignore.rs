//! In-memory model of the public `.gitignore`
//!
//! Lines are kept verbatim, including blank ones, so that an install followed
//! by an uninstall writes back exactly the text that was there before.

use crate::domain::value_objects::AssetGroup;

/// Ordered lines of a `.gitignore` file, as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitignoreLines {
    lines: Vec<Vec<u8>>,
}

impl GitignoreLines {
    /// Split content on LF, CR or CRLF.
    ///
    /// Empty content yields a single empty line; a trailing newline yields a
    /// trailing empty line.
    pub fn parse(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Same as [`parse`](Self::parse) for content that need not be UTF-8
    pub fn from_bytes(content: &[u8]) -> Self {
        let mut lines = Vec::new();
        let mut current = Vec::new();
        let mut bytes = content.iter().copied().peekable();

        while let Some(b) = bytes.next() {
            match b {
                b'\r' => {
                    if bytes.peek() == Some(&b'\n') {
                        bytes.next();
                    }
                    lines.push(std::mem::take(&mut current));
                }
                b'\n' => lines.push(std::mem::take(&mut current)),
                _ => current.push(b),
            }
        }
        lines.push(current);

        Self { lines }
    }

    /// Lines as text; invalid UTF-8 is replaced
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    pub fn contains(&self, group: &AssetGroup) -> bool {
        let entry = group.gitignore_entry();
        self.lines.iter().any(|line| line == entry.as_bytes())
    }

    /// Append `group/` unless the exact line is already present.
    ///
    /// Returns true when a line was added.
    pub fn add_entry(&mut self, group: &AssetGroup) -> bool {
        if self.contains(group) {
            return false;
        }
        self.lines.push(group.gitignore_entry().into_bytes());
        true
    }

    /// Remove the first `group/` line. Returns true when a line was removed.
    pub fn remove_entry(&mut self, group: &AssetGroup) -> bool {
        let entry = group.gitignore_entry();
        match self.lines.iter().position(|line| line == entry.as_bytes()) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Lines that look like installer entries (`name/`)
    pub fn group_entries(&self) -> impl Iterator<Item = AssetGroup> + '_ {
        self.lines
            .iter()
            .filter_map(|line| std::str::from_utf8(line).ok())
            .filter_map(AssetGroup::from_gitignore_entry)
    }

    /// Newline-joined content; no trailing newline is added.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    /// [`to_bytes`](Self::to_bytes) as text, with invalid UTF-8 replaced
    pub fn render(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

impl Default for GitignoreLines {
    fn default() -> Self {
        Self::parse("")
    }
}
