use crate::filter::ObservationFilter;
use crate::graph::ObservationGraph;
use crate::sparql::solution::{concrete_term, Solution, SolutionIter};
use dggs_graph_model::{NamedNodePattern, Term, TermPattern, TriplePattern, Variable};
use std::iter;

/// Evaluates a block of patterns that share an unbound subject variable and only have concrete
/// predicates and objects.
///
/// All patterns are combined into a single [ObservationFilter] up front. Evaluating the block for
/// a solution then either checks the observation the subject is already bound to or enumerates
/// the observations that pass the filter.
#[derive(Debug, Clone)]
pub struct VariableBlockHandler<'graph> {
    graph: &'graph ObservationGraph,
    subject: Variable,
    filter: ObservationFilter<'graph>,
}

impl<'graph> VariableBlockHandler<'graph> {
    /// Creates a handler for `patterns`.
    ///
    /// Patterns whose subject is not `subject` or whose predicate or object is not concrete make
    /// the block unsatisfiable, as they cannot be expressed as a filter constraint.
    pub fn new(
        graph: &'graph ObservationGraph,
        subject: Variable,
        patterns: &[TriplePattern],
    ) -> Self {
        let mut filter = graph.filter();
        for pattern in patterns {
            let predicate = match &pattern.predicate {
                NamedNodePattern::NamedNode(predicate) => predicate,
                NamedNodePattern::Variable(_) => {
                    filter.constrain_impossibly();
                    continue;
                }
            };
            let shares_subject =
                matches!(&pattern.subject, TermPattern::Variable(variable) if *variable == subject);
            match concrete_term(&pattern.object) {
                Some(object) if shares_subject => {
                    filter.constrain_property(predicate.as_ref(), object);
                }
                _ => filter.constrain_impossibly(),
            }
        }
        Self {
            graph,
            subject,
            filter,
        }
    }

    pub fn subject(&self) -> &Variable {
        &self.subject
    }

    pub fn filter(&self) -> &ObservationFilter<'graph> {
        &self.filter
    }

    /// Extends `solution` with every observation that satisfies the block.
    pub fn execute(&self, solution: Solution) -> SolutionIter<'graph> {
        match solution.get(&self.subject) {
            Some(Term::NamedNode(iri)) => {
                let matches = self
                    .graph
                    .observation_for_iri(iri.as_str())
                    .is_some_and(|observation| self.filter.matches(&observation));
                if matches {
                    Box::new(iter::once(solution))
                } else {
                    Box::new(iter::empty())
                }
            }
            Some(_) => Box::new(iter::empty()),
            None => {
                let graph = self.graph;
                let subject = self.subject.clone();
                Box::new(self.filter.clone().execute().filter_map(move |observation| {
                    solution.extended(&subject, graph.observation_iri(&observation).into())
                }))
            }
        }
    }
}
