//! Pratt parser implementation
//! Handles expression parsing with binding power
//!
//! Grammar, loosest first:
//!
//! ```text
//! expr     = or ["?" or ":" expr]
//! or       = and {"||" and}          (binary levels via binding power)
//! unary    = member | "!" unary | "-" unary
//! member   = primary {"." IDENT ["(" args ")"] | "[" expr "]"}
//! primary  = literal | IDENT ["(" args ")"] | "(" expr ")" | list | map
//! ```

use crate::frontend::lexer::tokens::*;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::macros;
use crate::frontend::parser::operators::*;
use crate::frontend::parser::{ParseError, ParserState};

impl ParserState<'_> {
    /// Parse a full expression, including the conditional operator
    pub fn parse_expr(&mut self) -> Option<Expr> {
        if !self.enter() {
            return None;
        }
        let result = self.parse_conditional();
        self.leave();
        result
    }

    fn parse_conditional(&mut self) -> Option<Expr> {
        let condition = self.parse_binary(BP_LOGICAL_OR)?;
        if !self.skip(&TokenKind::Question) {
            return Some(condition);
        }

        let then_branch = self.parse_binary(BP_LOGICAL_OR)?;
        self.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;

        let span = condition.span.to(else_branch.span);
        Some(self.call(
            None,
            CONDITIONAL,
            vec![condition, then_branch, else_branch],
            span,
        ))
    }

    /// Left-associative binary operators with binding power at least `min_bp`
    fn parse_binary(
        &mut self,
        min_bp: u8,
    ) -> Option<Expr> {
        let depth = self.depth();
        let result = self.parse_binary_chain(min_bp);
        self.restore_depth(depth);
        result
    }

    fn parse_binary_chain(
        &mut self,
        min_bp: u8,
    ) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        while let Some((function, bp)) = binary_operator(&self.current_kind()) {
            if bp < min_bp {
                break;
            }
            // every link nests the left operand one level deeper
            if !self.enter() {
                return None;
            }
            self.bump();
            let right = self.parse_binary(bp + 1)?;
            let span = left.span.to(right.span);
            left = self.call(None, function, vec![left, right], span);
        }

        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let function = match self.current_kind() {
            TokenKind::Not => LOGICAL_NOT,
            TokenKind::Minus => NEGATE,
            _ => return self.parse_member(),
        };

        if !self.enter() {
            return None;
        }
        let op_span = self.bump().map(|t| t.span)?;
        let operand = self.parse_unary();
        self.leave();
        let operand = operand?;
        let span = op_span.to(operand.span);

        if function == NEGATE {
            // Negative numeric literals are constants, not negation calls
            let folded = match &operand.kind {
                ExprKind::Literal(Constant::Int(n)) => n.checked_neg().map(Constant::Int),
                ExprKind::Literal(Constant::Double(d)) => Some(Constant::Double(-d)),
                _ => None,
            };
            if let Some(constant) = folded {
                return Some(self.node(ExprKind::Literal(constant), span));
            }
        }

        Some(self.call(None, function, vec![operand], span))
    }

    fn parse_member(&mut self) -> Option<Expr> {
        let depth = self.depth();
        let result = self.parse_member_chain();
        self.restore_depth(depth);
        result
    }

    fn parse_member_chain(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if !matches!(self.current_kind(), TokenKind::Dot | TokenKind::LBracket) {
                break;
            }
            if !self.enter() {
                return None;
            }

            if self.skip(&TokenKind::Dot) {
                let name_token = self.bump()?;
                let TokenKind::Identifier(name) = name_token.kind else {
                    self.error(ParseError::message(
                        format!("expected field name, found {}", name_token.kind.describe()),
                        name_token.span,
                    ));
                    return None;
                };

                if self.skip(&TokenKind::LParen) {
                    let args = self.parse_list_items(&TokenKind::RParen)?;
                    let span = expr.span.to(self.previous_span());
                    expr = macros::receiver_call(self, expr, name, args, span)?;
                } else {
                    let span = expr.span.to(name_token.span);
                    expr = self.node(
                        ExprKind::Select {
                            operand: Box::new(expr),
                            field: name,
                            test_only: false,
                        },
                        span,
                    );
                }
            } else if self.skip(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket)?;
                let span = expr.span.to(self.previous_span());
                expr = self.call(None, INDEX, vec![expr, index], span);
            } else {
                break;
            }
        }

        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let Some(token) = self.current().cloned() else {
            self.unexpected();
            return None;
        };

        let constant = match &token.kind {
            TokenKind::NullLiteral => Some(Constant::Null),
            TokenKind::BoolLiteral(b) => Some(Constant::Bool(*b)),
            TokenKind::IntLiteral(n) => Some(Constant::Int(*n)),
            TokenKind::UintLiteral(n) => Some(Constant::Uint(*n)),
            TokenKind::DoubleLiteral(d) => Some(Constant::Double(*d)),
            TokenKind::StringLiteral(s) => Some(Constant::String(s.clone())),
            _ => None,
        };
        if let Some(constant) = constant {
            self.bump();
            return Some(self.node(ExprKind::Literal(constant), token.span));
        }

        match token.kind {
            TokenKind::Identifier(name) => {
                self.bump();
                if self.skip(&TokenKind::LParen) {
                    let args = self.parse_list_items(&TokenKind::RParen)?;
                    let span = token.span.to(self.previous_span());
                    macros::global_call(self, name, args, span)
                } else {
                    Some(self.node(ExprKind::Ident(name), token.span))
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Some(inner)
            }
            TokenKind::LBracket => {
                self.bump();
                let elements = self.parse_list_items(&TokenKind::RBracket)?;
                let span = token.span.to(self.previous_span());
                Some(self.node(ExprKind::List(elements), span))
            }
            TokenKind::LBrace => {
                self.bump();
                let entries = self.parse_map_entries()?;
                let span = token.span.to(self.previous_span());
                Some(self.node(ExprKind::Map(entries), span))
            }
            _ => {
                self.unexpected();
                None
            }
        }
    }

    /// Comma separated expressions up to and including `close`; a trailing
    /// comma is allowed
    fn parse_list_items(
        &mut self,
        close: &TokenKind,
    ) -> Option<Vec<Expr>> {
        let mut items = Vec::new();
        while !self.at(close) {
            items.push(self.parse_expr()?);
            if !self.skip(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Some(items)
    }

    fn parse_map_entries(&mut self) -> Option<Vec<MapEntry>> {
        let mut entries = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            let key = self.parse_expr()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_expr()?;
            entries.push(MapEntry { key, value });
            if !self.skip(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Some(entries)
    }

    /// Allocate a call node
    pub fn call(
        &mut self,
        target: Option<Expr>,
        function: &str,
        args: Vec<Expr>,
        span: crate::util::span::Span,
    ) -> Expr {
        self.node(
            ExprKind::Call {
                target: target.map(Box::new),
                function: function.to_string(),
                args,
            },
            span,
        )
    }
}
