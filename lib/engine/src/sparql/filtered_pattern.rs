use crate::sparql::inequality::InequalityConstraint;
use dggs_graph_model::{Expression, GraphPattern, TermPattern, TriplePattern, Variable};
use rustc_hash::FxHashMap;

/// Blank nodes of a pattern are matched through variables named with this prefix. A colon can
/// not appear in the name of a query variable.
const BLANK_NODE_VARIABLE_PREFIX: &str = "bnode:";

/// A basic graph pattern together with the inequality constraints of the filters on top of it.
///
/// The constraints are hints for pruning. They never replace the evaluation of the filter
/// expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredBasicPattern {
    patterns: Vec<TriplePattern>,
    annotations: FxHashMap<Variable, Vec<InequalityConstraint>>,
    blank_node_variables: Vec<Variable>,
}

impl FilteredBasicPattern {
    /// Blank nodes in `patterns` are replaced by fresh variables, they match any term.
    pub fn new(patterns: Vec<TriplePattern>) -> Self {
        let mut result = Self::default();
        result.extend_patterns(patterns);
        result
    }

    /// Collects the basic graph pattern of `pattern` and the inequalities of the filter on top
    /// of it, if any.
    ///
    /// Returns `None` for every other shape of graph pattern.
    pub fn from_graph_pattern(pattern: &GraphPattern) -> Option<Self> {
        match pattern {
            GraphPattern::Bgp { patterns } => Some(Self::new(patterns.clone())),
            GraphPattern::Filter { expr, inner } => {
                let GraphPattern::Bgp { patterns } = inner.as_ref() else {
                    return None;
                };
                let mut result = Self::new(patterns.clone());
                result.add_filter(expr);
                Some(result)
            }
            _ => None,
        }
    }

    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    /// Attaches `constraint` to every variable it mentions.
    pub fn add_constraint(&mut self, constraint: InequalityConstraint) {
        let variables = [constraint.left(), constraint.right()]
            .into_iter()
            .filter_map(|operand| operand.as_variable().cloned())
            .collect::<Vec<_>>();
        for variable in variables {
            let constraints = self.annotations.entry(variable).or_default();
            if !constraints.contains(&constraint) {
                constraints.push(constraint.clone());
            }
        }
    }

    /// Collects the inequalities of the conjunction `expression`.
    ///
    /// Conjuncts that are no inequalities, or inequalities on unsupported operands, are ignored.
    pub fn add_filter(&mut self, expression: &Expression) {
        match expression {
            Expression::And(left, right) => {
                self.add_filter(left);
                self.add_filter(right);
            }
            other => match InequalityConstraint::from_expression(other) {
                Ok(Some(constraint)) => self.add_constraint(constraint),
                Ok(None) => {}
                Err(error) => tracing::debug!(%error, "Ignoring filter conjunct"),
            },
        }
    }

    /// Returns the constraints attached to `variable`.
    pub fn constraints_on(&self, variable: &Variable) -> &[InequalityConstraint] {
        self.annotations
            .get(variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the variables standing in for the blank nodes of the pattern.
    ///
    /// They are not part of the solutions of the group.
    pub fn blank_node_variables(&self) -> &[Variable] {
        &self.blank_node_variables
    }

    /// Appends `patterns` to the basic graph pattern.
    pub fn extend_patterns(&mut self, patterns: impl IntoIterator<Item = TriplePattern>) {
        for pattern in patterns {
            let pattern = TriplePattern {
                subject: self.replace_blank_node(pattern.subject),
                predicate: pattern.predicate,
                object: self.replace_blank_node(pattern.object),
            };
            self.patterns.push(pattern);
        }
    }

    fn replace_blank_node(&mut self, term: TermPattern) -> TermPattern {
        let TermPattern::BlankNode(node) = term else {
            return term;
        };
        let variable =
            Variable::new_unchecked(format!("{BLANK_NODE_VARIABLE_PREFIX}{}", node.as_str()));
        if !self.blank_node_variables.contains(&variable) {
            self.blank_node_variables.push(variable.clone());
        }
        TermPattern::Variable(variable)
    }
}
