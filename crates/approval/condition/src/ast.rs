//! Condition syntax tree

use crate::Value;

/// A parsed condition expression
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A literal number, string or boolean
    Literal(Value),
    /// A reference to a context variable
    VarRef(String),
    /// A binary comparison
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuiting conjunction over two or more terms
    And(Vec<Expr>),
    /// Short-circuiting disjunction over two or more terms
    Or(Vec<Expr>),
}

impl Expr {
    /// Collect referenced variable names, first occurrence first
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Literal(_) => {}
            Self::VarRef(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
            Self::Compare { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Self::And(terms) | Self::Or(terms) => {
                for term in terms {
                    term.collect_variables(names);
                }
            }
        }
    }
}

/// Comparison operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Equal,
    NotEqual,
}

impl CompareOp {
    /// Whether the operator needs an ordering rather than equality
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::Greater | Self::Less | Self::GreaterEq | Self::LessEq
        )
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greater => write!(f, ">"),
            Self::Less => write!(f, "<"),
            Self::GreaterEq => write!(f, ">="),
            Self::LessEq => write!(f, "<="),
            Self::Equal => write!(f, "=="),
            Self::NotEqual => write!(f, "!="),
        }
    }
}
