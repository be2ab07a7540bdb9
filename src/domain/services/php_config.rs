//! Static reader for legacy `module.config.php` files
//!
//! Evaluates the value a configuration script returns without running it.
//! Literal arrays, strings, numbers, `__DIR__`/`__FILE__`, `dirname()`,
//! concatenation and simple top-level variables are understood; anything else
//! becomes [`ConfigValue::Opaque`]. Callers must run the safety gate first.

use std::collections::HashMap;
use std::path::Path;

use super::php_lexer::{tokenize, Keyword, LexError, MagicConstant, Token, TokenKind};
use crate::domain::entities::{ConfigKey, ConfigValue};

/// Deepest operand nesting read before the rest becomes opaque
const MAX_NESTING: usize = 128;

/// Evaluate the top-level `return` of a PHP configuration script.
///
/// `file` provides `__FILE__` and `__DIR__`. Returns `Ok(None)` when the
/// script has no top-level `return`.
pub fn evaluate_return(source: &str, file: &Path) -> Result<Option<ConfigValue>, LexError> {
    let tokens: Vec<Token<'_>> = tokenize(source)?
        .into_iter()
        .filter(|t| {
            !t.is_trivia() && !matches!(t.kind, TokenKind::InlineHtml | TokenKind::OpenTag)
        })
        .collect();

    let mut reader = Reader {
        tokens,
        pos: 0,
        file,
        vars: HashMap::new(),
        nesting: 0,
    };
    Ok(reader.run())
}

struct Reader<'t, 'p> {
    tokens: Vec<Token<'t>>,
    pos: usize,
    file: &'p Path,
    vars: HashMap<String, ConfigValue>,
    nesting: usize,
}

impl<'t> Reader<'t, '_> {
    fn peek(&self) -> Option<&Token<'t>> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token<'t>> {
        self.tokens.get(self.pos + offset)
    }

    fn next_is(&self, p: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(p))
    }

    fn eat(&mut self, p: &str) -> bool {
        if self.next_is(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Scan top-level statements for the returned value
    fn run(&mut self) -> Option<ConfigValue> {
        let mut depth = 0usize;
        let mut transparent_braces = Vec::new();
        let mut pending_namespace = false;

        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Keyword(Keyword::Return) if depth == 0 => {
                    self.pos += 1;
                    return Some(self.expr());
                }
                TokenKind::Keyword(Keyword::Namespace) => {
                    pending_namespace = true;
                    self.pos += 1;
                }
                TokenKind::Variable
                    if depth == 0 && self.peek_at(1).is_some_and(|t| t.is_punct("=")) =>
                {
                    let name = token.text.to_string();
                    self.pos += 2;
                    let value = self.expr();
                    self.vars.insert(name, value);
                }
                TokenKind::Punct if token.text == ";" => {
                    pending_namespace = false;
                    self.pos += 1;
                }
                TokenKind::Punct if token.text == "{" => {
                    if pending_namespace {
                        transparent_braces.push(depth);
                        pending_namespace = false;
                    } else {
                        depth += 1;
                    }
                    self.pos += 1;
                }
                TokenKind::Punct if token.text == "}" => {
                    if transparent_braces.last() == Some(&depth) {
                        transparent_braces.pop();
                    } else {
                        depth = depth.saturating_sub(1);
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
        None
    }

    fn at_expr_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(t) if t.kind == TokenKind::CloseTag => true,
            Some(t) => {
                t.kind == TokenKind::Punct
                    && matches!(t.text, "," | "]" | ")" | "}" | ";" | "=>")
            }
        }
    }

    /// Skip to the end of the current expression, balancing brackets
    fn skip_expr(&mut self) {
        self.skip_until(|t| matches!(t, "," | "]" | ")" | "}" | ";" | "=>"));
    }

    /// Skip to the end of the current array item
    fn skip_item(&mut self) {
        self.skip_until(|t| matches!(t, "," | "]" | ")" | "}" | ";"));
    }

    fn skip_until(&mut self, stop: impl Fn(&str) -> bool) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::CloseTag && depth == 0 {
                return;
            }
            if token.kind == TokenKind::Punct {
                match token.text {
                    "(" | "[" | "{" | "#[" => depth += 1,
                    ")" | "]" | "}" if depth > 0 => depth -= 1,
                    t if depth == 0 && stop(t) => return,
                    _ => {}
                }
            }
            self.pos += 1;
        }
    }

    /// expr := operand ('.' operand)*
    fn expr(&mut self) -> ConfigValue {
        let mut parts = vec![self.operand()];
        while self.eat(".") {
            parts.push(self.operand());
        }

        if !self.at_expr_end() {
            self.skip_expr();
            return ConfigValue::Opaque;
        }

        if parts.len() == 1 {
            return parts.pop().unwrap_or(ConfigValue::Opaque);
        }
        parts
            .iter()
            .map(php_string)
            .collect::<Option<String>>()
            .map_or(ConfigValue::Opaque, ConfigValue::Str)
    }

    fn operand(&mut self) -> ConfigValue {
        if self.nesting >= MAX_NESTING {
            self.skip_expr();
            return ConfigValue::Opaque;
        }
        self.nesting += 1;
        let value = self.term();
        self.nesting -= 1;
        value
    }

    fn term(&mut self) -> ConfigValue {
        let Some(token) = self.peek().cloned() else {
            return ConfigValue::Opaque;
        };

        match &token.kind {
            TokenKind::String {
                value,
                interpolated: false,
            } => {
                self.pos += 1;
                ConfigValue::Str(value.clone())
            }
            TokenKind::Int(n) => {
                self.pos += 1;
                ConfigValue::Int(*n)
            }
            TokenKind::Float(f) => {
                self.pos += 1;
                ConfigValue::Float(*f)
            }
            TokenKind::MagicConstant(constant) => {
                self.pos += 1;
                match constant {
                    MagicConstant::Dir => ConfigValue::Str(
                        self.file
                            .parent()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                    ),
                    MagicConstant::File => ConfigValue::Str(self.file.display().to_string()),
                    MagicConstant::Line => ConfigValue::Int(token.line as i64),
                    MagicConstant::Other => ConfigValue::Opaque,
                }
            }
            TokenKind::Variable => {
                self.pos += 1;
                self.vars
                    .get(token.text)
                    .cloned()
                    .unwrap_or(ConfigValue::Opaque)
            }
            TokenKind::Keyword(Keyword::Array)
                if self.peek_at(1).is_some_and(|t| t.is_punct("(")) =>
            {
                self.pos += 2;
                self.items(")")
            }
            TokenKind::Name => self.name(token.text),
            TokenKind::Punct => match token.text {
                "[" => {
                    self.pos += 1;
                    self.items("]")
                }
                "(" => {
                    self.pos += 1;
                    let value = self.expr();
                    if self.eat(")") {
                        value
                    } else {
                        self.skip_expr();
                        ConfigValue::Opaque
                    }
                }
                sign @ ("-" | "+") => {
                    self.pos += 1;
                    match self.operand() {
                        ConfigValue::Int(n) if sign == "-" => ConfigValue::Int(-n),
                        ConfigValue::Float(f) if sign == "-" => ConfigValue::Float(-f),
                        value @ (ConfigValue::Int(_) | ConfigValue::Float(_)) => value,
                        _ => ConfigValue::Opaque,
                    }
                }
                _ if self.at_expr_end() => ConfigValue::Opaque,
                _ => {
                    self.skip_expr();
                    ConfigValue::Opaque
                }
            },
            _ => {
                self.skip_expr();
                ConfigValue::Opaque
            }
        }
    }

    /// Constants, `dirname()` and anything else that starts with a bare name
    fn name(&mut self, name: &str) -> ConfigValue {
        self.pos += 1;
        let lower = name.trim_start_matches('\\').to_ascii_lowercase();

        if self.next_is("(") {
            if lower == "dirname" {
                return self.dirname_call();
            }
            self.skip_expr();
            return ConfigValue::Opaque;
        }
        if self.next_is("::") {
            self.skip_expr();
            return ConfigValue::Opaque;
        }

        match lower.as_str() {
            "true" => ConfigValue::Bool(true),
            "false" => ConfigValue::Bool(false),
            "null" => ConfigValue::Null,
            _ => ConfigValue::Opaque,
        }
    }

    fn dirname_call(&mut self) -> ConfigValue {
        self.pos += 1;
        let path = self.expr();
        let levels = if self.eat(",") {
            self.expr()
        } else {
            ConfigValue::Int(1)
        };
        if !self.eat(")") {
            self.skip_expr();
            return ConfigValue::Opaque;
        }

        match (path, levels) {
            (ConfigValue::Str(path), ConfigValue::Int(levels)) if levels >= 1 => {
                let mut result = path;
                for _ in 0..levels {
                    let parent = php_dirname(&result);
                    if parent == result {
                        break;
                    }
                    result = parent;
                }
                ConfigValue::Str(result)
            }
            _ => ConfigValue::Opaque,
        }
    }

    /// Array literal items up to `close`
    fn items(&mut self, close: &str) -> ConfigValue {
        let mut entries = Vec::new();
        let mut next_index = 0i64;

        loop {
            if self.peek().is_none() {
                return ConfigValue::Opaque;
            }
            if self.eat(close) {
                break;
            }

            if self.eat("...") {
                self.skip_item();
            } else {
                let first = self.expr();
                if self.eat("=>") {
                    let value = self.expr();
                    if let Some(key) = array_key(&first) {
                        if let ConfigKey::Int(k) = key {
                            next_index = next_index.max(k.saturating_add(1));
                        }
                        ConfigValue::insert(&mut entries, key, value);
                    }
                } else {
                    ConfigValue::insert(&mut entries, ConfigKey::Int(next_index), first);
                    next_index = next_index.saturating_add(1);
                }
            }

            if self.eat(",") {
                continue;
            }
            if self.eat(close) {
                break;
            }
            // Something this reader does not understand; drop the rest of the item
            self.skip_item();
            if !self.eat(",") {
                if self.eat(close) {
                    break;
                }
                return ConfigValue::Opaque;
            }
        }

        ConfigValue::Map(entries)
    }
}

/// PHP array key coercion
fn array_key(value: &ConfigValue) -> Option<ConfigKey> {
    match value {
        ConfigValue::Int(n) => Some(ConfigKey::Int(*n)),
        ConfigValue::Str(s) => {
            let canonical = s
                .parse::<i64>()
                .ok()
                .filter(|n| n.to_string() == *s);
            Some(canonical.map_or_else(|| ConfigKey::Str(s.clone()), ConfigKey::Int))
        }
        ConfigValue::Bool(b) => Some(ConfigKey::Int(i64::from(*b))),
        ConfigValue::Float(f) => Some(ConfigKey::Int(f.trunc() as i64)),
        ConfigValue::Null => Some(ConfigKey::Str(String::new())),
        _ => None,
    }
}

/// String conversion used by the `.` operator
fn php_string(value: &ConfigValue) -> Option<String> {
    match value {
        ConfigValue::Str(s) => Some(s.clone()),
        ConfigValue::Int(n) => Some(n.to_string()),
        ConfigValue::Float(f) => Some(f.to_string()),
        ConfigValue::Bool(true) => Some("1".to_string()),
        ConfigValue::Bool(false) | ConfigValue::Null => Some(String::new()),
        _ => None,
    }
}

/// `dirname()` on a `/`-separated path string
fn php_dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." }.to_string();
    }
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => trimmed[..i].trim_end_matches('/').to_string(),
        None => ".".to_string(),
    }
}
