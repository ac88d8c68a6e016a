use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    severity: Severity,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error::with_severity(error_impl, position, Severity::Error)
    }

    pub fn with_severity(error_impl: ErrorImpl, position: Position, severity: Severity) -> Self {
        Error {
            internal_error: error_impl,
            position,
            severity,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::InvalidUtf8 => "InvalidUtf8",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::Unsupported { .. } => "Unsupported",
            ErrorImpl::ContinuationCodomain => "ContinuationCodomain",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::PreviousDeclaration { .. } => "PreviousDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::AnonymousIdentifier => "AnonymousIdentifier",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { character } => ErrorTip::Suggestion(format!(
                "The character `{}` is not part of the language",
                character
            )),
            ErrorImpl::InvalidUtf8 => ErrorTip::Suggestion(String::from(
                "The input is not valid UTF-8 and was decoded lossily",
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::ExpectedToken {
                expected,
                found,
                ctxt,
            } => ErrorTip::Suggestion(format!(
                "Expected {}, got `{}` while parsing {}",
                expected, found, ctxt
            )),
            ErrorImpl::Unsupported { construct } => {
                ErrorTip::Suggestion(format!("{} are not supported yet", construct))
            }
            ErrorImpl::ContinuationCodomain => ErrorTip::Suggestion(String::from(
                "A continuation never returns; its codomain cannot be declared",
            )),
            ErrorImpl::Redefinition { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::PreviousDeclaration { name } => {
                ErrorTip::Suggestion(format!("Previous declaration of `{}` was here", name))
            }
            ErrorImpl::UndeclaredIdentifier { name } => {
                ErrorTip::Suggestion(format!("`{}` has not been declared", name))
            }
            ErrorImpl::AnonymousIdentifier => ErrorTip::Suggestion(String::from(
                "`_` is reserved for anonymous declarations and cannot be used as a value",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("invalid character {character:?}")]
    InvalidCharacter { character: String },
    #[error("input is not valid utf-8")]
    InvalidUtf8,
    #[error("non-terminated block comment")]
    UnterminatedComment,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expected {expected}, got {found:?} while parsing {ctxt}")]
    ExpectedToken {
        expected: String,
        found: String,
        ctxt: String,
    },
    #[error("{construct} are not supported yet")]
    Unsupported { construct: String },
    #[error("a continuation cannot declare a codomain")]
    ContinuationCodomain,
    #[error("redefinition of {name:?}")]
    Redefinition { name: String },
    #[error("previous declaration of {name:?} was here")]
    PreviousDeclaration { name: String },
    #[error("use of undeclared identifier {name:?}")]
    UndeclaredIdentifier { name: String },
    #[error("identifier `_` is reserved for anonymous declarations")]
    AnonymousIdentifier,
}
