use dggs_graph_model::{Expression, Literal, Variable};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Whether an [InequalityConstraint] is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    Less,
    LessOrEqual,
}

impl Display for ConstraintType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
        })
    }
}

/// A side of an [InequalityConstraint].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintOperand {
    Variable(Variable),
    Literal(Literal),
}

impl ConstraintOperand {
    fn from_expression(expression: &Expression) -> Result<Self, InvalidOperandError> {
        match expression {
            Expression::Variable(variable) => Ok(Self::Variable(variable.clone())),
            Expression::Literal(literal) => Ok(Self::Literal(literal.clone())),
            other => Err(InvalidOperandError {
                operand: other.to_string(),
            }),
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Variable(_) => None,
            Self::Literal(literal) => Some(literal),
        }
    }
}

impl Display for ConstraintOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// An operand of an inequality that is neither a variable nor a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported inequality operand: {operand}")]
pub struct InvalidOperandError {
    pub operand: String,
}

/// An inequality `left < right` or `left <= right` between variables and literals.
///
/// Greater-than comparisons are normalized by swapping their operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InequalityConstraint {
    left: ConstraintOperand,
    right: ConstraintOperand,
    constraint_type: ConstraintType,
}

impl InequalityConstraint {
    pub fn new(
        left: ConstraintOperand,
        right: ConstraintOperand,
        constraint_type: ConstraintType,
    ) -> Self {
        Self {
            left,
            right,
            constraint_type,
        }
    }

    /// Extracts the inequality of `expression`.
    ///
    /// Returns `Ok(None)` if `expression` is not an inequality and an error if it is an
    /// inequality with an unsupported operand.
    pub fn from_expression(expression: &Expression) -> Result<Option<Self>, InvalidOperandError> {
        let (left, right, constraint_type) = match expression {
            Expression::Less(left, right) => (left, right, ConstraintType::Less),
            Expression::LessOrEqual(left, right) => (left, right, ConstraintType::LessOrEqual),
            Expression::Greater(left, right) => (right, left, ConstraintType::Less),
            Expression::GreaterOrEqual(left, right) => (right, left, ConstraintType::LessOrEqual),
            _ => return Ok(None),
        };
        Ok(Some(Self::new(
            ConstraintOperand::from_expression(left)?,
            ConstraintOperand::from_expression(right)?,
            constraint_type,
        )))
    }

    pub fn left(&self) -> &ConstraintOperand {
        &self.left
    }

    pub fn right(&self) -> &ConstraintOperand {
        &self.right
    }

    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    /// Returns whether `variable` is one of the operands.
    pub fn mentions(&self, variable: &Variable) -> bool {
        self.left.as_variable() == Some(variable) || self.right.as_variable() == Some(variable)
    }
}

impl Display for InequalityConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.constraint_type, self.right)
    }
}
