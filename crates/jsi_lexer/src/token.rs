//! Token kinds produced by the scanner.

use jsi_ir::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Identifier(Box<str>),
    Keyword(Keyword),
    Number(f64),
    String(Box<str>),
    Regex { pattern: Box<str>, flags: Box<str> },

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    OptionalDot, // ?.
    Colon,
    Question,
    Arrow, // => (not in spec's grammar but harmless to recognize and reject in the parser)

    // Operators
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    StarStarAssign,
    AmpAssign,
    PipeAssign,
    CaretAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    AndAndAssign,
    OrOrAssign,
    QuestionQuestionAssign,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,

    Eq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    AndAnd,
    OrOr,
    QuestionQuestion,
    Bang,

    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    UShr,

    Eof,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Keyword {
    Var,
    Function,
    Return,
    If,
    Else,
    While,
    Do,
    For,
    In,
    Break,
    Continue,
    Throw,
    Try,
    Catch,
    Finally,
    New,
    Typeof,
    Void,
    Delete,
    Instanceof,
    True,
    False,
    Null,
    Undefined,
    This,
    Switch,
    Case,
    Default,
}

impl Keyword {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Keyword> {
        Some(match s {
            "var" => Keyword::Var,
            "function" => Keyword::Function,
            "return" => Keyword::Return,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "do" => Keyword::Do,
            "for" => Keyword::For,
            "in" => Keyword::In,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "throw" => Keyword::Throw,
            "try" => Keyword::Try,
            "catch" => Keyword::Catch,
            "finally" => Keyword::Finally,
            "new" => Keyword::New,
            "typeof" => Keyword::Typeof,
            "void" => Keyword::Void,
            "delete" => Keyword::Delete,
            "instanceof" => Keyword::Instanceof,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "undefined" => Keyword::Undefined,
            "this" => Keyword::This,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "default" => Keyword::Default,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Whether a line terminator appeared between this token and the
    /// previous one. No automatic semicolon insertion is implemented;
    /// statements must be explicitly terminated.
    pub preceded_by_newline: bool,
}
