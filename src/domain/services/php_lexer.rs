//! PHP lexer
//!
//! Splits legacy `module.config.php` sources into tokens so that they can be
//! inspected without being executed. Coverage is limited to what the safety
//! gate and the static configuration reader need: tags, comments, every string
//! form, numbers, names, a small keyword set and operators. Everything else
//! degrades to `Punct` or `Name`.

use std::fmt;

/// Keywords the safety gate and configuration reader care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Eval,
    /// `exit` or its alias `die`
    Exit,
    Return,
    Array,
    Class,
    Interface,
    Trait,
    New,
    Clone,
    Extends,
    Implements,
    Function,
    Fn,
    Include,
    Require,
    Declare,
    Namespace,
    Use,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        let keyword = match word.to_ascii_lowercase().as_str() {
            "eval" => Keyword::Eval,
            "exit" | "die" => Keyword::Exit,
            "return" => Keyword::Return,
            "array" => Keyword::Array,
            "class" => Keyword::Class,
            "interface" => Keyword::Interface,
            "trait" => Keyword::Trait,
            "new" => Keyword::New,
            "clone" => Keyword::Clone,
            "extends" => Keyword::Extends,
            "implements" => Keyword::Implements,
            "function" => Keyword::Function,
            "fn" => Keyword::Fn,
            "include" | "include_once" => Keyword::Include,
            "require" | "require_once" => Keyword::Require,
            "declare" => Keyword::Declare,
            "namespace" => Keyword::Namespace,
            "use" => Keyword::Use,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Compile-time magic constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicConstant {
    Dir,
    File,
    Line,
    Other,
}

impl MagicConstant {
    fn from_word(word: &str) -> Option<Self> {
        let constant = match word.to_ascii_uppercase().as_str() {
            "__DIR__" => MagicConstant::Dir,
            "__FILE__" => MagicConstant::File,
            "__LINE__" => MagicConstant::Line,
            "__CLASS__" | "__FUNCTION__" | "__METHOD__" | "__NAMESPACE__" | "__TRAIT__"
            | "__PROPERTY__" => MagicConstant::Other,
            _ => return None,
        };
        Some(constant)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    InlineHtml,
    OpenTag,
    CloseTag,
    Whitespace,
    Comment,
    DocComment,
    /// Quoted string, heredoc or nowdoc with its decoded value.
    ///
    /// `interpolated` is set when the literal embeds variables and therefore
    /// has no static value.
    String {
        value: String,
        interpolated: bool,
    },
    /// Backtick shell-exec literal
    ShellExec,
    Int(i64),
    Float(f64),
    Variable,
    /// Identifier or namespaced name
    Name,
    Keyword(Keyword),
    MagicConstant(MagicConstant),
    Punct,
}

/// A token with its source text and starting line
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
}

impl Token<'_> {
    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }

    /// Constructs that evaluate code or terminate the process
    pub fn is_dangerous(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Keyword(Keyword::Eval) | TokenKind::Keyword(Keyword::Exit)
        )
    }

    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }
}

/// Tokenization failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// Operators, longest first so that matching is greedy
const OPERATORS: &[&str] = &[
    "**=", "...", "<=>", "===", "!==", "<<=", ">>=", "??=", "?->", "**", "++", "--", "->", "=>",
    "::", "==", "!=", "<>", "<=", ">=", "&&", "||", "??", "+=", "-=", "*=", "/=", ".=", "%=",
    "&=", "|=", "^=", "<<", ">>", "#[",
];

/// Tokenize PHP source text
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(src).run()
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    in_php: bool,
    /// Last non-trivia token was `->`, `?->` or `::`
    after_member_access: bool,
    tokens: Vec<Token<'a>>,
}

fn is_label_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_label_char(b: u8) -> bool {
    is_label_start(b) || b.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            in_php: false,
            after_member_access: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, LexError> {
        while self.pos < self.bytes.len() {
            if self.in_php {
                self.lex_php()?;
            } else {
                self.lex_inline_html();
            }
        }
        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn starts_with_ignore_case(&self, s: &str) -> bool {
        self.bytes
            .get(self.pos..self.pos + s.len())
            .is_some_and(|b| b.eq_ignore_ascii_case(s.as_bytes()))
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError {
            line: self.line,
            message: message.into(),
        }
    }

    fn push(&mut self, kind: TokenKind, end: usize) {
        let src = self.src;
        let text = &src[self.pos..end];
        let is_trivia = matches!(
            kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        );
        if !is_trivia {
            self.after_member_access =
                kind == TokenKind::Punct && matches!(text, "->" | "?->" | "::");
        }
        self.tokens.push(Token {
            kind,
            text,
            line: self.line,
        });
        self.line += text.bytes().filter(|&b| b == b'\n').count();
        self.pos = end;
    }

    fn lex_inline_html(&mut self) {
        let start = self.pos;
        let mut cursor = self.pos;
        while cursor < self.bytes.len() {
            if self.bytes[cursor..].starts_with(b"<?") {
                break;
            }
            cursor += 1;
        }
        if cursor > start {
            self.push(TokenKind::InlineHtml, cursor);
        }
        if self.pos >= self.bytes.len() {
            return;
        }

        // Opening tag: `<?php` + whitespace, `<?=`, or a short `<?`
        let end = if self.starts_with_ignore_case("<?php")
            && self.peek(5).is_none_or(|b| b.is_ascii_whitespace())
        {
            let mut end = self.pos + 5;
            if self.bytes.get(end) == Some(&b'\r') {
                end += 1;
            }
            if self.bytes.get(end) == Some(&b'\n') || self.bytes.get(end) == Some(&b' ') {
                end += 1;
            }
            end
        } else if self.starts_with("<?=") {
            self.pos + 3
        } else {
            self.pos + 2
        };
        self.push(TokenKind::OpenTag, end);
        self.in_php = true;
    }

    fn lex_php(&mut self) -> Result<(), LexError> {
        let b = self.bytes[self.pos];

        if b.is_ascii_whitespace() {
            let mut end = self.pos;
            while end < self.bytes.len() && self.bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            self.push(TokenKind::Whitespace, end);
            return Ok(());
        }

        if self.starts_with("?>") {
            let mut end = self.pos + 2;
            if self.bytes[end..].starts_with(b"\r\n") {
                end += 2;
            } else if self.bytes.get(end) == Some(&b'\n') {
                end += 1;
            }
            self.push(TokenKind::CloseTag, end);
            self.in_php = false;
            return Ok(());
        }

        if (b == b'#' && self.peek(1) != Some(b'[')) || self.starts_with("//") {
            let end = self.line_comment_end();
            self.push(TokenKind::Comment, end);
            return Ok(());
        }

        if self.starts_with("/*") {
            let is_doc = self.starts_with("/**") && self.peek(3).is_some_and(|c| c.is_ascii_whitespace());
            let kind = if is_doc {
                TokenKind::DocComment
            } else {
                TokenKind::Comment
            };
            // An unclosed comment runs to the end of the file
            let end = match self.src[self.pos + 2..].find("*/") {
                Some(i) => self.pos + 2 + i + 2,
                None => self.src.len(),
            };
            self.push(kind, end);
            return Ok(());
        }

        if b == b'\'' {
            return self.lex_single_quoted();
        }
        if b == b'"' {
            return self.lex_double_quoted();
        }
        if b == b'`' {
            let end = match self.find_unescaped(self.pos + 1, b'`') {
                Some(i) => i + 1,
                None => return Err(self.error("unterminated shell-exec literal")),
            };
            self.push(TokenKind::ShellExec, end);
            return Ok(());
        }
        if self.starts_with("<<<") {
            return self.lex_heredoc();
        }

        if b == b'$' && self.peek(1).is_some_and(is_label_start) {
            let mut end = self.pos + 1;
            while end < self.bytes.len() && is_label_char(self.bytes[end]) {
                end += 1;
            }
            self.push(TokenKind::Variable, end);
            return Ok(());
        }

        if b.is_ascii_digit() || (b == b'.' && self.peek(1).is_some_and(|c| c.is_ascii_digit())) {
            self.lex_number();
            return Ok(());
        }

        if is_label_start(b) || (b == b'\\' && self.peek(1).is_some_and(is_label_start)) {
            self.lex_name();
            return Ok(());
        }

        let op_len = OPERATORS
            .iter()
            .find(|op| self.starts_with(op))
            .map_or(1, |op| op.len());
        self.push(TokenKind::Punct, self.pos + op_len);
        Ok(())
    }

    /// End of a `//` or `#` comment: before the newline or a closing tag
    fn line_comment_end(&self) -> usize {
        let mut end = self.pos;
        while end < self.bytes.len() {
            match self.bytes[end] {
                b'\n' | b'\r' => break,
                b'?' if self.bytes.get(end + 1) == Some(&b'>') => break,
                _ => end += 1,
            }
        }
        end
    }

    fn find_unescaped(&self, from: usize, quote: u8) -> Option<usize> {
        let mut i = from;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                c if c == quote => return Some(i),
                _ => i += 1,
            }
        }
        None
    }

    fn lex_single_quoted(&mut self) -> Result<(), LexError> {
        let close = self
            .find_unescaped(self.pos + 1, b'\'')
            .ok_or_else(|| self.error("unterminated string"))?;
        let raw = &self.src[self.pos + 1..close];

        let mut value = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.peek() {
                    Some('\\') | Some('\'') => {
                        value.extend(chars.next());
                        continue;
                    }
                    _ => {}
                }
            }
            value.push(c);
        }

        self.push(
            TokenKind::String {
                value,
                interpolated: false,
            },
            close + 1,
        );
        Ok(())
    }

    fn lex_double_quoted(&mut self) -> Result<(), LexError> {
        let close = self
            .find_unescaped(self.pos + 1, b'"')
            .ok_or_else(|| self.error("unterminated string"))?;
        let (value, interpolated) = decode_double_quoted(&self.src[self.pos + 1..close], '"');
        self.push(
            TokenKind::String {
                value,
                interpolated,
            },
            close + 1,
        );
        Ok(())
    }

    fn lex_heredoc(&mut self) -> Result<(), LexError> {
        let src = self.src;
        let mut cursor = self.pos + 3;
        while matches!(self.bytes.get(cursor), Some(b' ') | Some(b'\t')) {
            cursor += 1;
        }

        let quote = match self.bytes.get(cursor) {
            Some(&q) if q == b'\'' || q == b'"' => {
                cursor += 1;
                Some(q)
            }
            _ => None,
        };

        let label_start = cursor;
        while cursor < self.bytes.len() && is_label_char(self.bytes[cursor]) {
            cursor += 1;
        }
        let label = &src[label_start..cursor];
        if label.is_empty() || !is_label_start(label.as_bytes()[0]) {
            // Not a heredoc after all; `<<<` is lexed as `<<` followed by `<`
            self.push(TokenKind::Punct, self.pos + 2);
            return Ok(());
        }
        if let Some(q) = quote {
            if self.bytes.get(cursor) != Some(&q) {
                return Err(self.error("malformed heredoc label"));
            }
            cursor += 1;
        }
        if self.bytes[cursor..].starts_with(b"\r\n") {
            cursor += 2;
        } else if self.bytes.get(cursor) == Some(&b'\n') {
            cursor += 1;
        } else {
            return Err(self.error("heredoc label must end the line"));
        }

        let body_start = cursor;
        let mut line_start = body_start;
        loop {
            if line_start > self.bytes.len() {
                return Err(self.error(format!("unterminated heredoc '{label}'")));
            }
            let rest = &src[line_start..];
            let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            let after_indent = &rest[indent..];
            let closes = after_indent.starts_with(label)
                && after_indent
                    .as_bytes()
                    .get(label.len())
                    .is_none_or(|&b| !is_label_char(b));

            if closes {
                let body_end = line_start.saturating_sub(1).max(body_start);
                let body_end = if body_end > body_start && self.bytes[body_end - 1] == b'\r' {
                    body_end - 1
                } else {
                    body_end
                };
                let raw = strip_heredoc_indent(&src[body_start..body_end], indent);
                let (value, interpolated) = if quote == Some(b'\'') {
                    (raw, false)
                } else {
                    decode_double_quoted(&raw, '\0')
                };
                let end = line_start + indent + label.len();
                self.push(
                    TokenKind::String {
                        value,
                        interpolated,
                    },
                    end,
                );
                return Ok(());
            }

            match rest.find('\n') {
                Some(i) => line_start += i + 1,
                None => return Err(self.error(format!("unterminated heredoc '{label}'"))),
            }
        }
    }

    fn lex_number(&mut self) {
        let mut end = self.pos;
        let rest = &self.bytes[self.pos..];
        let radix = if rest.len() > 2 && rest[0] == b'0' {
            match rest[1] {
                b'x' | b'X' => Some(16),
                b'b' | b'B' => Some(2),
                b'o' | b'O' => Some(8),
                _ => None,
            }
        } else {
            None
        };

        if let Some(radix) = radix {
            end += 2;
            while end < self.bytes.len()
                && ((self.bytes[end] as char).is_digit(radix) || self.bytes[end] == b'_')
            {
                end += 1;
            }
            let digits: String = self.src[self.pos + 2..end].replace('_', "");
            let kind = match i64::from_str_radix(&digits, radix) {
                Ok(n) => TokenKind::Int(n),
                Err(_) => TokenKind::Float(
                    u64::from_str_radix(&digits, radix).map_or(f64::INFINITY, |n| n as f64),
                ),
            };
            self.push(kind, end);
            return;
        }

        let mut is_float = false;
        while end < self.bytes.len() {
            let c = self.bytes[end];
            if c.is_ascii_digit() || c == b'_' {
                end += 1;
            } else if c == b'.' && !is_float && self.bytes.get(end + 1) != Some(&b'.') {
                is_float = true;
                end += 1;
            } else if (c == b'e' || c == b'E')
                && (self.bytes.get(end + 1).is_some_and(|d| d.is_ascii_digit())
                    || (matches!(self.bytes.get(end + 1), Some(b'+') | Some(b'-'))
                        && self.bytes.get(end + 2).is_some_and(|d| d.is_ascii_digit())))
            {
                is_float = true;
                end += 2;
            } else {
                break;
            }
        }

        let digits = self.src[self.pos..end].replace('_', "");
        let kind = if is_float {
            TokenKind::Float(digits.parse().unwrap_or(0.0))
        } else if digits.len() > 1 && digits.starts_with('0') {
            // Legacy octal literal
            i64::from_str_radix(&digits[1..], 8).map_or(TokenKind::Float(0.0), TokenKind::Int)
        } else {
            match digits.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(_) => TokenKind::Float(digits.parse().unwrap_or(f64::INFINITY)),
            }
        };
        self.push(kind, end);
    }

    fn lex_name(&mut self) {
        let mut end = self.pos;
        let mut qualified = false;
        loop {
            if self.bytes.get(end) == Some(&b'\\') {
                qualified = true;
                end += 1;
            }
            let segment_start = end;
            while end < self.bytes.len() && is_label_char(self.bytes[end]) {
                end += 1;
            }
            if end == segment_start {
                break;
            }
            let continues = self.bytes.get(end) == Some(&b'\\')
                && self.bytes.get(end + 1).is_some_and(|&b| is_label_start(b));
            if !continues {
                break;
            }
        }

        let word = &self.src[self.pos..end];
        let kind = if qualified || self.after_member_access {
            TokenKind::Name
        } else if let Some(keyword) = Keyword::from_word(word) {
            TokenKind::Keyword(keyword)
        } else if let Some(constant) = MagicConstant::from_word(word) {
            TokenKind::MagicConstant(constant)
        } else {
            TokenKind::Name
        };
        self.push(kind, end);
    }
}

/// Remove the closing marker's indentation from every heredoc body line
fn strip_heredoc_indent(body: &str, indent: usize) -> String {
    if indent == 0 {
        return body.to_string();
    }
    body.split('\n')
        .map(|line| {
            let strip = line
                .bytes()
                .take(indent)
                .take_while(|b| *b == b' ' || *b == b'\t')
                .count();
            &line[strip..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode escapes of a double-quoted string or heredoc body.
///
/// `quote` is the delimiter that may be escaped (`'\0'` for heredocs).
fn decode_double_quoted(raw: &str, quote: char) -> (String, bool) {
    let mut value = String::with_capacity(raw.len());
    let mut interpolated = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(&next) = chars.peek() else {
                    value.push('\\');
                    continue;
                };
                let simple = match next {
                    'n' => Some('\n'),
                    't' => Some('\t'),
                    'r' => Some('\r'),
                    'v' => Some('\u{0B}'),
                    'e' => Some('\u{1B}'),
                    'f' => Some('\u{0C}'),
                    '\\' => Some('\\'),
                    '$' => Some('$'),
                    c if c == quote => Some(c),
                    _ => None,
                };
                if let Some(decoded) = simple {
                    chars.next();
                    value.push(decoded);
                    continue;
                }
                match next {
                    '0'..='7' => {
                        let mut code = 0u32;
                        for _ in 0..3 {
                            match chars.peek().and_then(|d| d.to_digit(8)) {
                                Some(d) => {
                                    code = code * 8 + d;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        value.extend(char::from_u32(code & 0xFF));
                    }
                    'x' if chars.clone().nth(1).is_some_and(|d| d.is_ascii_hexdigit()) => {
                        chars.next();
                        let mut code = 0u32;
                        for _ in 0..2 {
                            match chars.peek().and_then(|d| d.to_digit(16)) {
                                Some(d) => {
                                    code = code * 16 + d;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        value.extend(char::from_u32(code));
                    }
                    'u' if chars.clone().nth(1) == Some('{') => {
                        chars.next();
                        chars.next();
                        let hex: String = chars.by_ref().take_while(|d| *d != '}').collect();
                        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                            Some(decoded) => value.push(decoded),
                            None => value.push('\u{FFFD}'),
                        }
                    }
                    _ => value.push('\\'),
                }
            }
            '$' if chars
                .peek()
                .is_some_and(|&n| n.is_ascii_alphabetic() || n == '_' || n == '{' || !n.is_ascii()) =>
            {
                interpolated = true;
                value.push(c);
            }
            '{' if chars.peek() == Some(&'$') => {
                interpolated = true;
                value.push(c);
            }
            _ => value.push(c),
        }
    }

    (value, interpolated)
}
