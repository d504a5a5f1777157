use crate::graph::ObservationGraph;
use crate::sparql::solution::{Solution, SolutionIter};
use dggs_graph_model::{NamedNodePattern, Term, TermPattern, Triple, TriplePattern};

/// Joins `input` with the matches of a single triple pattern.
///
/// For every input solution, the bound variables of `pattern` are substituted before asking the
/// graph. Each matching triple extends the solution with the remaining variables.
pub fn match_pattern<'graph>(
    graph: &'graph ObservationGraph,
    pattern: TriplePattern,
    input: SolutionIter<'graph>,
) -> SolutionIter<'graph> {
    Box::new(input.flat_map(move |solution| {
        let pattern = pattern.clone();
        let predicate = predicate_pattern(&pattern.predicate);
        let triples = graph.find(
            solution.resolve(&pattern.subject),
            solution.resolve(&predicate),
            solution.resolve(&pattern.object),
        );
        triples.filter_map(move |triple| bind_triple(&solution, &pattern, triple))
    }))
}

fn predicate_pattern(pattern: &NamedNodePattern) -> TermPattern {
    match pattern {
        NamedNodePattern::NamedNode(node) => TermPattern::NamedNode(node.clone()),
        NamedNodePattern::Variable(variable) => TermPattern::Variable(variable.clone()),
    }
}

/// Extends `solution` with the variables of `pattern` bound by `triple`.
fn bind_triple(solution: &Solution, pattern: &TriplePattern, triple: Triple) -> Option<Solution> {
    let predicate = predicate_pattern(&pattern.predicate);
    let slots = [
        (&pattern.subject, Term::from(triple.subject)),
        (&predicate, Term::from(triple.predicate)),
        (&pattern.object, triple.object),
    ];

    let mut result = solution.clone();
    for (slot, value) in slots {
        if let TermPattern::Variable(variable) = slot {
            if !result.bind(variable, value) {
                return None;
            }
        }
    }
    Some(result)
}
