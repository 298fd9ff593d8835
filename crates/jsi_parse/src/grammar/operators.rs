//! Operator-matching helpers, one per precedence level, mirroring the
//! `match_*_op` idiom the teacher's parser uses to keep each precedence
//! level's "is the current token one of mine" check in one place.

use jsi_ir::{AssignOp, BinaryOp};
use jsi_lexer::TokenKind;

use crate::parser::Parser;

impl Parser<'_> {
    pub(crate) fn match_assign_op(&self) -> Option<Option<AssignOp>> {
        match self.current_kind() {
            TokenKind::Assign => Some(None),
            TokenKind::PlusAssign => Some(Some(AssignOp::Add)),
            TokenKind::MinusAssign => Some(Some(AssignOp::Sub)),
            TokenKind::StarAssign => Some(Some(AssignOp::Mul)),
            TokenKind::SlashAssign => Some(Some(AssignOp::Div)),
            TokenKind::PercentAssign => Some(Some(AssignOp::Mod)),
            TokenKind::StarStarAssign => Some(Some(AssignOp::Pow)),
            TokenKind::AmpAssign => Some(Some(AssignOp::BitAnd)),
            TokenKind::PipeAssign => Some(Some(AssignOp::BitOr)),
            TokenKind::CaretAssign => Some(Some(AssignOp::BitXor)),
            TokenKind::ShlAssign => Some(Some(AssignOp::ShiftLeft)),
            TokenKind::ShrAssign => Some(Some(AssignOp::ShiftRight)),
            TokenKind::UShrAssign => Some(Some(AssignOp::UnsignedShiftRight)),
            TokenKind::AndAndAssign => Some(Some(AssignOp::LogicalAnd)),
            TokenKind::OrOrAssign => Some(Some(AssignOp::LogicalOr)),
            TokenKind::QuestionQuestionAssign => Some(Some(AssignOp::NullishCoalesce)),
            _ => None,
        }
    }

    pub(crate) fn match_nullish_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::QuestionQuestion).then_some(BinaryOp::NullishCoalesce)
    }

    pub(crate) fn match_logical_or_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::OrOr).then_some(BinaryOp::LogicalOr)
    }

    pub(crate) fn match_logical_and_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::AndAnd).then_some(BinaryOp::LogicalAnd)
    }

    pub(crate) fn match_bit_or_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::Pipe).then_some(BinaryOp::BitOr)
    }

    pub(crate) fn match_bit_xor_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::Caret).then_some(BinaryOp::BitXor)
    }

    pub(crate) fn match_bit_and_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::Amp).then_some(BinaryOp::BitAnd)
    }

    pub(crate) fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::EqEqEq => Some(BinaryOp::StrictEq),
            TokenKind::NotEqEq => Some(BinaryOp::StrictNotEq),
            _ => None,
        }
    }

    pub(crate) fn match_relational_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::Keyword(jsi_lexer::Keyword::Instanceof) => Some(BinaryOp::Instanceof),
            _ => None,
        }
    }

    pub(crate) fn match_shift_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Shl => Some(BinaryOp::ShiftLeft),
            TokenKind::Shr => Some(BinaryOp::ShiftRight),
            TokenKind::UShr => Some(BinaryOp::UnsignedShiftRight),
            _ => None,
        }
    }

    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_pow_op(&self) -> Option<BinaryOp> {
        matches!(self.current_kind(), TokenKind::StarStar).then_some(BinaryOp::Pow)
    }
}
