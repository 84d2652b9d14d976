//! Parser: recursive descent parser for step conditions
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or         := and ( "||" and )*
//! and        := comparison ( "&&" comparison )*
//! comparison := operand ( cmp_op operand )?
//! operand    := "(" or ")" | atom
//! atom       := identifier | number | "-" number | string | "true" | "false"
//! ```
//!
//! Comparisons do not chain: `a < b < c` is rejected. `&&` / `||` chains
//! are collected into one flat node, so tree depth only grows with
//! parentheses, which are capped at [`MAX_NESTING`].

use crate::ast::{CompareOp, Expr};
use crate::errors::{ConditionError, ConditionResult};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::Value;

/// Maximum parenthesis nesting accepted in a condition
pub const MAX_NESTING: usize = 32;

/// Parser for the condition language
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Parse condition text into an expression tree
    pub fn parse(input: &str) -> ConditionResult<Expr> {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize()?;
        let mut parser = Self {
            tokens,
            pos: 0,
            depth: 0,
        };

        let expr = parser.parse_or()?;
        parser.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    fn parse_or(&mut self) -> ConditionResult<Expr> {
        let first = self.parse_and()?;
        if !self.check(TokenKind::Or) {
            return Ok(first);
        }

        let mut terms = vec![first];
        while self.check(TokenKind::Or) {
            self.advance();
            terms.push(self.parse_and()?);
        }
        Ok(Expr::Or(terms))
    }

    fn parse_and(&mut self) -> ConditionResult<Expr> {
        let first = self.parse_comparison()?;
        if !self.check(TokenKind::And) {
            return Ok(first);
        }

        let mut terms = vec![first];
        while self.check(TokenKind::And) {
            self.advance();
            terms.push(self.parse_comparison()?);
        }
        Ok(Expr::And(terms))
    }

    fn parse_comparison(&mut self) -> ConditionResult<Expr> {
        let left = self.parse_operand()?;
        if !self.peek_kind().is_comparison() {
            return Ok(left);
        }

        let op = match self.peek_kind() {
            TokenKind::Greater => CompareOp::Greater,
            TokenKind::Less => CompareOp::Less,
            TokenKind::GreaterEq => CompareOp::GreaterEq,
            TokenKind::LessEq => CompareOp::LessEq,
            TokenKind::Equal => CompareOp::Equal,
            _ => CompareOp::NotEqual,
        };
        self.advance();

        let right = self.parse_operand()?;
        Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_operand(&mut self) -> ConditionResult<Expr> {
        if !self.check(TokenKind::OpenParen) {
            return self.parse_atom();
        }

        let open = self.advance().clone();
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ConditionError::Parse {
                line: open.line,
                col: open.col,
                message: format!("Expression nested deeper than {} levels", MAX_NESTING),
            });
        }

        let inner = self.parse_or()?;
        self.expect(TokenKind::CloseParen)?;
        self.depth -= 1;
        Ok(inner)
    }

    fn parse_atom(&mut self) -> ConditionResult<Expr> {
        match self.peek_kind() {
            TokenKind::Identifier => Ok(Expr::VarRef(self.advance().text.clone())),
            TokenKind::StringLiteral => {
                Ok(Expr::Literal(Value::String(self.advance().text.clone())))
            }
            TokenKind::NumberLiteral => Ok(Expr::Literal(Value::Number(self.expect_number()?))),
            TokenKind::Minus => {
                self.advance();
                Ok(Expr::Literal(Value::Number(-self.expect_number()?)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(false)))
            }
            TokenKind::Eof => Err(ConditionError::UnexpectedEof("operand".into())),
            _ => {
                let tok = self.peek();
                Err(ConditionError::Parse {
                    line: tok.line,
                    col: tok.col,
                    message: format!("Expected an operand, found '{}'", tok.text),
                })
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn advance(&mut self) -> &Token {
        let tok = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> ConditionResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.check(TokenKind::Eof) {
            Err(ConditionError::UnexpectedEof(format!("{}", kind)))
        } else {
            let tok = self.peek();
            Err(ConditionError::UnexpectedToken {
                expected: format!("{}", kind),
                found: tok.text.clone(),
            })
        }
    }

    fn expect_number(&mut self) -> ConditionResult<f64> {
        let tok = self.expect(TokenKind::NumberLiteral)?;
        tok.text.parse::<f64>().map_err(|_| ConditionError::Parse {
            line: tok.line,
            col: tok.col,
            message: format!("'{}' is not a valid number", tok.text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::VarRef(name.to_string()))
    }

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Value::Number(n)))
    }

    #[test]
    fn test_parse_simple_comparison() {
        let expr = Parser::parse("amount > 10000").unwrap();
        assert_eq!(
            expr,
            Expr::Compare {
                op: CompareOp::Greater,
                left: var("amount"),
                right: num(10000.0),
            }
        );
    }

    #[test]
    fn test_parse_strict_equality() {
        let expr = Parser::parse(r#"urgency === "critical""#).unwrap();
        assert_eq!(
            expr,
            Expr::Compare {
                op: CompareOp::Equal,
                left: var("urgency"),
                right: Box::new(Expr::Literal(Value::String("critical".into()))),
            }
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = Parser::parse("a > 1 || b > 2 && c > 3").unwrap();
        match expr {
            Expr::Or(terms) => {
                assert_eq!(terms.len(), 2);
                assert!(matches!(terms[0], Expr::Compare { .. }));
                assert!(matches!(&terms[1], Expr::And(inner) if inner.len() == 2));
            }
            other => panic!("expected Or at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = Parser::parse("(a > 1 || b > 2) && c > 3").unwrap();
        match expr {
            Expr::And(terms) => assert!(matches!(terms[0], Expr::Or(_))),
            other => panic!("expected And at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_and_decimal_literals() {
        let expr = Parser::parse("balance >= -12.5").unwrap();
        assert_eq!(
            expr,
            Expr::Compare {
                op: CompareOp::GreaterEq,
                left: var("balance"),
                right: num(-12.5),
            }
        );
    }

    #[test]
    fn test_bare_atoms() {
        assert_eq!(
            Parser::parse("true").unwrap(),
            Expr::Literal(Value::Bool(true))
        );
        assert_eq!(Parser::parse("isUrgent").unwrap(), *var("isUrgent"));
    }

    #[test]
    fn test_chained_comparison_rejected() {
        let err = Parser::parse("1 < a < 3").unwrap_err();
        assert!(matches!(err, ConditionError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = Parser::parse("").unwrap_err();
        assert!(matches!(err, ConditionError::UnexpectedEof(_)));
    }

    #[test]
    fn test_dangling_operator_rejected() {
        assert!(matches!(
            Parser::parse("amount >").unwrap_err(),
            ConditionError::UnexpectedEof(_)
        ));
        assert!(Parser::parse("&& amount > 1").is_err());
        assert!(Parser::parse("amount > 1 &&").is_err());
    }

    #[test]
    fn test_unbalanced_parentheses_rejected() {
        assert!(Parser::parse("(amount > 1").is_err());
        assert!(Parser::parse("amount > 1)").is_err());
    }

    #[test]
    fn test_function_call_rejected() {
        assert!(Parser::parse("alert(1)").is_err());
        assert!(Parser::parse("amount > 1 foo").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}a > 1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(Parser::parse(&ok).is_ok());

        let deep = format!(
            "{}a > 1{}",
            "(".repeat(MAX_NESTING + 1),
            ")".repeat(MAX_NESTING + 1)
        );
        assert!(matches!(
            Parser::parse(&deep).unwrap_err(),
            ConditionError::Parse { .. }
        ));
    }

    #[test]
    fn test_long_chains_stay_flat() {
        let and_chain = vec!["a > 1"; 100_000].join(" && ");
        match Parser::parse(&and_chain).unwrap() {
            Expr::And(terms) => assert_eq!(terms.len(), 100_000),
            other => panic!("expected And at the root, got {:?}", other),
        }

        let or_chain = vec!["a > 1 && b > 2"; 50_000].join(" || ");
        match Parser::parse(&or_chain).unwrap() {
            Expr::Or(terms) => {
                assert_eq!(terms.len(), 50_000);
                assert!(terms.iter().all(|t| matches!(t, Expr::And(inner) if inner.len() == 2)));
            }
            other => panic!("expected Or at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_variables_are_deduplicated() {
        let expr = Parser::parse("amount > 1 && (tier == 'gold' || amount < 0)").unwrap();
        assert_eq!(expr.variables(), vec!["amount", "tier"]);
    }
}
