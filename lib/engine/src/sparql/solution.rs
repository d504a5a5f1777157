use dggs_graph_model::{Term, TermPattern, TermRef, Variable};
use std::fmt::{Display, Formatter};

/// A lazy sequence of solutions.
pub type SolutionIter<'graph> = Box<dyn Iterator<Item = Solution> + 'graph>;

/// A set of variable bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: Vec<(Variable, Term)>,
}

impl Solution {
    /// Creates a solution without any binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `variable`.
    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == variable)
            .map(|(_, value)| value)
    }

    /// Returns a copy of this solution that additionally binds `variable` to `value`.
    ///
    /// Returns `None` if `variable` is already bound to a different value.
    #[must_use]
    pub fn extended(&self, variable: &Variable, value: Term) -> Option<Self> {
        let mut result = self.clone();
        result.bind(variable, value).then_some(result)
    }

    /// Binds `variable` to `value`. Returns whether the binding is compatible with the existing
    /// binding of `variable`, if any.
    pub fn bind(&mut self, variable: &Variable, value: Term) -> bool {
        match self.get(variable) {
            Some(existing) => *existing == value,
            None => {
                self.bindings.push((variable.clone(), value));
                true
            }
        }
    }

    /// Removes the bindings of `variables`.
    pub fn unbind(&mut self, variables: &[Variable]) {
        self.bindings
            .retain(|(variable, _)| !variables.contains(variable));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter().map(|(variable, value)| (variable, value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolves `pattern` to a term if it is concrete or a bound variable.
    pub fn resolve<'a>(&'a self, pattern: &'a TermPattern) -> Option<TermRef<'a>> {
        match pattern {
            TermPattern::Variable(variable) => self.get(variable).map(Term::as_ref),
            concrete => concrete_term(concrete),
        }
    }
}

impl FromIterator<(Variable, Term)> for Solution {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        let mut solution = Self::new();
        for (variable, value) in iter {
            solution.bind(&variable, value);
        }
        solution
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (variable, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable} -> {value}")?;
        }
        f.write_str("}")
    }
}

/// Returns the term of a pattern that is not a variable.
pub(crate) fn concrete_term(pattern: &TermPattern) -> Option<TermRef<'_>> {
    match pattern {
        TermPattern::NamedNode(node) => Some(node.as_ref().into()),
        TermPattern::BlankNode(node) => Some(node.as_ref().into()),
        TermPattern::Literal(literal) => Some(literal.as_ref().into()),
        TermPattern::Variable(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dggs_graph_model::Literal;

    #[test]
    fn incompatible_bindings_are_rejected() {
        let s = Variable::new_unchecked("s");
        let solution = Solution::new()
            .extended(&s, Literal::from(1).into())
            .unwrap();
        assert!(solution.extended(&s, Literal::from(1).into()).is_some());
        assert!(solution.extended(&s, Literal::from(2).into()).is_none());
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn unbind_keeps_other_bindings() {
        let mut solution = [
            (Variable::new_unchecked("a"), Literal::from(1).into()),
            (Variable::new_unchecked("b"), Literal::from(2).into()),
        ]
        .into_iter()
        .collect::<Solution>();
        solution.unbind(&[Variable::new_unchecked("a"), Variable::new_unchecked("c")]);
        assert_eq!(solution.len(), 1);
        assert!(solution.get(&Variable::new_unchecked("b")).is_some());
    }

    #[test]
    fn display_lists_bindings() {
        let solution = [
            (Variable::new_unchecked("a"), Literal::new_simple_literal("x").into()),
            (Variable::new_unchecked("b"), Literal::new_simple_literal("y").into()),
        ]
        .into_iter()
        .collect::<Solution>();
        insta::assert_snapshot!(solution, @r#"{?a -> "x", ?b -> "y"}"#);
    }
}
