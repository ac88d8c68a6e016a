use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    comp::Comp,
    errors::errors::ErrorImpl,
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenValue, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer<'_>, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// First-match-wins token table. Longer spellings come before their
    /// prefixes, comments before the division operator.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\u{feff}").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("//.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("/\\*").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new("0[bB][01]+|0[oO][0-7]+|0[xX][0-9a-fA-F]+|[0-9]+(\\.[0-9]+)?([eE][+-]?[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShlAssign, "<<=") },
        RegexPattern { regex: Regex::new(">>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShrAssign, ">>=") },
        RegexPattern { regex: Regex::new("<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Shl, "<<") },
        RegexPattern { regex: Regex::new(">>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Shr, ">>") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Le, "<=") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ge, ">=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lt, "<") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Gt, ">") },
        RegexPattern { regex: Regex::new("::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::") },
        RegexPattern { regex: Regex::new("->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new("→").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "→") },
        RegexPattern { regex: Regex::new("\\\\/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Forall, "\\/") },
        RegexPattern { regex: Regex::new("∀").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Forall, "∀") },
        RegexPattern { regex: Regex::new("λ").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lam, "λ") },
        RegexPattern { regex: Regex::new("\\\\").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lam, "\\") },
        RegexPattern { regex: Regex::new("\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Inc, "++") },
        RegexPattern { regex: Regex::new("\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AddAssign, "+=") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Add, "+") },
        RegexPattern { regex: Regex::new("--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dec, "--") },
        RegexPattern { regex: Regex::new("-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SubAssign, "-=") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Sub, "-") },
        RegexPattern { regex: Regex::new("\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MulAssign, "*=") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Mul, "*") },
        RegexPattern { regex: Regex::new("/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DivAssign, "/=") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Div, "/") },
        RegexPattern { regex: Regex::new("%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RemAssign, "%=") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Rem, "%") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AndAnd, "&&") },
        RegexPattern { regex: Regex::new("&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AndAssign, "&=") },
        RegexPattern { regex: Regex::new("&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&") },
        RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OrOr, "||") },
        RegexPattern { regex: Regex::new("\\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OrAssign, "|=") },
        RegexPattern { regex: Regex::new("\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "|") },
        RegexPattern { regex: Regex::new("\\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::XorAssign, "^=") },
        RegexPattern { regex: Regex::new("\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Xor, "^") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Eq, "==") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ne, "!=") },
        RegexPattern { regex: Regex::new("!\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BangBracketL, "![") },
        RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ParenL, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ParenR, ")") },
        RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BracketL, "[") },
        RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BracketR, "]") },
        RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BraceL, "{") },
        RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::BraceR, "}") },
        RegexPattern { regex: Regex::new("‹").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AngleL, "‹") },
        RegexPattern { regex: Regex::new("›").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AngleR, "›") },
        RegexPattern { regex: Regex::new("«").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::QuoteL, "«") },
        RegexPattern { regex: Regex::new("»").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::QuoteR, "»") },
        RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
    ];
}

pub struct Lexer<'c> {
    comp: &'c mut Comp,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl<'c> Lexer<'c> {
    fn new(comp: &'c mut Comp, source: String, file: Option<String>) -> Lexer<'c> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<inline>"))
        };

        Lexer {
            comp,
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    pub fn span_here(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex
        .find(lexer.remainder())
        .expect("skip pattern matched during dispatch")
        .end();
    lexer.advance_n(matched);
}

fn block_comment_handler(lexer: &mut Lexer, _regex: &Regex) {
    let close = lexer.remainder()[2..].find("*/");
    let len = lexer.remainder().len();
    match close {
        Some(end) => lexer.advance_n(2 + end + 2),
        None => {
            let position = lexer.position();
            lexer.comp.err(position, ErrorImpl::UnterminatedComment);
            lexer.advance_n(len);
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex
        .find(lexer.remainder())
        .expect("number pattern matched during dispatch")
        .as_str()
        .to_string();
    let span = lexer.span_here(matched.len());

    let radix = match matched.get(..2) {
        Some("0b") | Some("0B") => Some(2),
        Some("0o") | Some("0O") => Some(8),
        Some("0x") | Some("0X") => Some(16),
        _ => None,
    };

    let (kind, value) = if let Some(radix) = radix {
        match u64::from_str_radix(&matched[2..], radix) {
            Ok(u) => (TokenKind::LitU, TokenValue::U(u)),
            Err(_) => {
                let position = lexer.position();
                lexer.comp.err(
                    position,
                    ErrorImpl::NumberParseError {
                        token: matched.clone(),
                    },
                );
                (TokenKind::LitU, TokenValue::U(0))
            }
        }
    } else if matched.contains('.') || matched.contains('e') || matched.contains('E') {
        match matched.parse::<f64>() {
            Ok(f) => (TokenKind::LitF, TokenValue::F(f)),
            Err(_) => {
                let position = lexer.position();
                lexer.comp.err(
                    position,
                    ErrorImpl::NumberParseError {
                        token: matched.clone(),
                    },
                );
                (TokenKind::LitF, TokenValue::F(0.0))
            }
        }
    } else {
        match matched.parse::<u64>() {
            Ok(u) => (TokenKind::LitU, TokenValue::U(u)),
            Err(_) => {
                let position = lexer.position();
                lexer.comp.err(
                    position,
                    ErrorImpl::NumberParseError {
                        token: matched.clone(),
                    },
                );
                (TokenKind::LitU, TokenValue::U(0))
            }
        }
    };

    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex
        .find(lexer.remainder())
        .expect("symbol pattern matched during dispatch")
        .as_str()
        .to_string();
    let span = lexer.span_here(matched.len());
    let sym = lexer.comp.sym(&matched);

    let kind = RESERVED_LOOKUP
        .get(matched.as_str())
        .copied()
        .unwrap_or(TokenKind::Id);

    lexer.push(MK_TOKEN!(kind, TokenValue::Sym(sym), span));
    lexer.advance_n(matched.len());
}

/// Tokenizes `source`, reporting (not throwing) lexical errors through
/// `comp`. The result always ends with exactly one `Eof` token, even for
/// empty or completely unrecognizable input.
pub fn tokenize(comp: &mut Comp, source: &str, file: Option<String>) -> Vec<Token> {
    let mut lexer = Lexer::new(comp, source.to_string(), file);

    while !lexer.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            let match_here = pattern.regex.find(lexer.remainder());

            if let Some(m) = match_here {
                if m.start() == 0 {
                    (pattern.handler)(&mut lexer, &pattern.regex);
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            // Unrecognized character: report, skip it, keep lexing.
            let character = lexer
                .remainder()
                .chars()
                .next()
                .expect("not at eof, so at least one char remains");
            let position = lexer.position();
            lexer.comp.err(
                position,
                ErrorImpl::InvalidCharacter {
                    character: character.to_string(),
                },
            );
            lexer.advance_n(character.len_utf8());
        }
    }

    let span = lexer.span_here(0);
    lexer.push(MK_TOKEN!(TokenKind::Eof, TokenValue::None, span));
    lexer.tokens
}
