//! Lexical context: nesting frames and the last significant token
//!
//! Together these answer the two questions a tokenizer without a parser has
//! to guess at: does `/` start a regex, and is `{` a block or an object
//! literal.

use crate::module::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParenKind {
    Group,
    /// Head of `if` / `while` / `for` / `with`
    Control,
    /// Argument list of `import(...)`
    DynamicImport {
        start: usize,
        specifier: Option<Range>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BraceKind {
    Block,
    Class,
    /// Object literal or destructuring pattern
    Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Paren(ParenKind),
    Bracket,
    Brace(BraceKind),
    /// `${` inside a template; `template` is the template's backtick offset
    Interpolation { template: usize },
}

impl FrameKind {
    pub(crate) fn opener(&self) -> char {
        match self {
            FrameKind::Paren(_) => '(',
            FrameKind::Bracket => '[',
            FrameKind::Brace(_) => '{',
            FrameKind::Interpolation { .. } => '$',
        }
    }

    pub(crate) fn closed_by(&self, closer: u8) -> bool {
        matches!(
            (self, closer),
            (FrameKind::Paren(_), b')')
                | (FrameKind::Bracket, b']')
                | (FrameKind::Brace(_), b'}')
                | (FrameKind::Interpolation { .. }, b'}')
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub kind: FrameKind,
    /// Offset of the opening delimiter
    pub open: usize,
}

/// Keyword classes that change how the next token is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    /// Operand follows: `return`, `typeof`, `case`, ...
    Expression,
    /// `if`, `while`, `for`, `with`: a parenthesized head follows
    Control,
    /// `else`, `do`, `try`, `finally`, `catch`: a block may follow
    BlockOpener,
    Class,
}

pub(crate) fn keyword(word: &str) -> Option<Keyword> {
    match word {
        "return" | "typeof" | "instanceof" | "in" | "new" | "delete" | "void" | "throw"
        | "case" | "yield" | "await" | "debugger" | "default" | "extends" => {
            Some(Keyword::Expression)
        }
        "if" | "while" | "for" | "with" => Some(Keyword::Control),
        "else" | "do" | "try" | "finally" | "catch" => Some(Keyword::BlockOpener),
        "class" => Some(Keyword::Class),
        _ => None,
    }
}

/// Last significant token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Start,
    /// Identifier, literal, `]`, postfix `++`/`--`
    Value,
    Keyword(Keyword),
    /// `.` or `?.`: the next identifier is a property name
    Dot,
    Arrow,
    /// `;` or the end of a recognized import/export statement
    Terminator,
    Colon,
    OpenBrace,
    /// Any other punctuator
    Operator,
    CloseParen { control: bool },
    CloseBrace(BraceKind),
}

impl Token {
    /// Whether a `/` after this token starts a regular expression
    pub(crate) fn allows_regex(self) -> bool {
        match self {
            Token::Start
            | Token::Keyword(_)
            | Token::Arrow
            | Token::Terminator
            | Token::Colon
            | Token::OpenBrace
            | Token::Operator => true,
            Token::CloseParen { control } => control,
            Token::CloseBrace(kind) => kind != BraceKind::Expression,
            Token::Value | Token::Dot => false,
        }
    }

    /// Whether this token can end an expression
    pub(crate) fn ends_value(self) -> bool {
        matches!(
            self,
            Token::Value | Token::CloseParen { .. } | Token::CloseBrace(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_classes() {
        assert_eq!(keyword("return"), Some(Keyword::Expression));
        assert_eq!(keyword("while"), Some(Keyword::Control));
        assert_eq!(keyword("else"), Some(Keyword::BlockOpener));
        assert_eq!(keyword("class"), Some(Keyword::Class));
        assert_eq!(keyword("this"), None);
    }

    #[test]
    fn test_regex_after_tokens() {
        assert!(Token::Start.allows_regex());
        assert!(Token::Keyword(Keyword::Expression).allows_regex());
        assert!(Token::CloseParen { control: true }.allows_regex());
        assert!(!Token::CloseParen { control: false }.allows_regex());
        assert!(Token::CloseBrace(BraceKind::Block).allows_regex());
        assert!(!Token::CloseBrace(BraceKind::Expression).allows_regex());
        assert!(!Token::Value.allows_regex());
        assert!(!Token::Dot.allows_regex());
    }

    #[test]
    fn test_closed_by() {
        assert!(FrameKind::Paren(ParenKind::Group).closed_by(b')'));
        assert!(FrameKind::Interpolation { template: 0 }.closed_by(b'}'));
        assert!(!FrameKind::Bracket.closed_by(b'}'));
    }
}
