//! Configuration safety gate
//!
//! Legacy module configurations are PHP scripts. Before one is read, two
//! checks run on its text:
//!
//! 1. a cheap pattern match for an `'asset_manager' =>` key, which skips the
//!    vast majority of packages that declare no assets, then
//! 2. a token scan that rejects any file using `eval` or `exit`/`die`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::php_lexer::{tokenize, LexError};
use crate::error::{AssetError, AssetResult};

/// Outcome of running both gates on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// No `asset_manager` key; nothing to read
    NotNeeded,
    /// Uses `eval` or `exit`; must not be read
    Unsafe,
    /// Safe to read statically
    Parseable,
}

fn asset_manager_key() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"['"]asset_manager['"]\s*=>"#).expect("valid regex"))
}

/// True when the text mentions an `asset_manager` array key.
///
/// Case-sensitive; whitespace (including newlines) may separate the key and
/// the arrow.
pub fn text_needs_parsing(source: &str) -> bool {
    asset_manager_key().is_match(source)
}

/// True when no token in the text is an `eval` or `exit`/`die` construct.
pub fn text_is_safe_to_parse(source: &str) -> Result<bool, LexError> {
    Ok(!tokenize(source)?.iter().any(|token| token.is_dangerous()))
}

/// Message written to the diagnostic channel for a rejected file
pub fn unsafe_config_message(path: &Path) -> String {
    format!(
        "Unable to check for asset configuration in {}; file uses one or more exit() or eval() statements.",
        path.display()
    )
}

/// File-based entry points for the two gates
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSafetyChecker;

impl ConfigSafetyChecker {
    pub fn new() -> Self {
        Self
    }

    /// Cheap pre-filter: does the file mention an `asset_manager` key?
    pub fn needs_parsing(&self, path: &Path) -> AssetResult<bool> {
        Ok(text_needs_parsing(&read(path)?))
    }

    /// Accurate check: is the file free of `eval` and `exit` constructs?
    pub fn is_safe_to_parse(&self, path: &Path) -> AssetResult<bool> {
        let source = read(path)?;
        text_is_safe_to_parse(&source).map_err(|e| lex_error(path, e))
    }

    /// Run both gates, reading the file once
    pub fn check(&self, path: &Path) -> AssetResult<SafetyVerdict> {
        let source = read(path)?;
        self.check_source(path, &source)
    }

    /// Run both gates on already-loaded source text
    pub fn check_source(&self, path: &Path, source: &str) -> AssetResult<SafetyVerdict> {
        if !text_needs_parsing(source) {
            return Ok(SafetyVerdict::NotNeeded);
        }
        if !text_is_safe_to_parse(source).map_err(|e| lex_error(path, e))? {
            return Ok(SafetyVerdict::Unsafe);
        }
        Ok(SafetyVerdict::Parseable)
    }
}

fn read(path: &Path) -> AssetResult<String> {
    let bytes = std::fs::read(path).map_err(|e| AssetError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn lex_error(path: &Path, err: LexError) -> AssetError {
    AssetError::Lex {
        file: path.to_path_buf(),
        line: err.line,
        message: err.message,
    }
}
