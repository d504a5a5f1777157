use dggs_graph_model::{NamedNodePattern, TermPattern, TriplePattern};
use std::cmp::Ordering;

/// Orders term patterns: concrete terms come before variables, variables are ordered by name.
///
/// Concrete terms are ordered by their N-Triples representation.
pub fn compare_term_patterns(left: &TermPattern, right: &TermPattern) -> Ordering {
    match (left, right) {
        (TermPattern::Variable(left), TermPattern::Variable(right)) => {
            left.as_str().cmp(right.as_str())
        }
        (TermPattern::Variable(_), _) => Ordering::Greater,
        (_, TermPattern::Variable(_)) => Ordering::Less,
        (left, right) => left.to_string().cmp(&right.to_string()),
    }
}

/// Same as [compare_term_patterns] for predicate positions.
pub fn compare_named_node_patterns(left: &NamedNodePattern, right: &NamedNodePattern) -> Ordering {
    match (left, right) {
        (NamedNodePattern::Variable(left), NamedNodePattern::Variable(right)) => {
            left.as_str().cmp(right.as_str())
        }
        (NamedNodePattern::Variable(_), NamedNodePattern::NamedNode(_)) => Ordering::Greater,
        (NamedNodePattern::NamedNode(_), NamedNodePattern::Variable(_)) => Ordering::Less,
        (NamedNodePattern::NamedNode(left), NamedNodePattern::NamedNode(right)) => {
            left.as_str().cmp(right.as_str())
        }
    }
}

/// Orders triple patterns by subject, then predicate, then object.
pub fn compare_triple_patterns(left: &TriplePattern, right: &TriplePattern) -> Ordering {
    compare_term_patterns(&left.subject, &right.subject)
        .then_with(|| compare_named_node_patterns(&left.predicate, &right.predicate))
        .then_with(|| compare_term_patterns(&left.object, &right.object))
}
