#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod binder;
pub mod comp;
pub mod emitter;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

use std::rc::Rc;

/// A byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Joins two spans into one covering both.
    pub fn to(&self, end: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: end.end.clone(),
        }
    }

    /// A zero-width span sitting at the end of this one, used for
    /// synthesized nodes (implicit `_`, implicit unit tuples).
    pub fn after(&self) -> Span {
        Span {
            start: self.end.clone(),
            end: self.end.clone(),
        }
    }
}

pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len().saturating_sub(1));

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

pub fn display_error(error: &Error, source: &str) {
    /*
        error: message
        -> final.kp
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        eprintln!("{}: {}", error.severity(), error.get_error_name());
    } else {
        eprintln!(
            "{}: {} ({})",
            error.severity(),
            error.get_error_name(),
            error.get_tip()
        );
    }
    eprintln!("-> {}", position.1);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
