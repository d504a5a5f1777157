use crate::graph::ObservationGraph;
use crate::sparql::block_triples::match_pattern;
use crate::sparql::bounding_box::extent_bound_patterns;
use crate::sparql::filtered_pattern::FilteredBasicPattern;
use crate::sparql::partition::{partition_blocks, TripleBlock};
use crate::sparql::solution::SolutionIter;
use crate::sparql::variable_block::VariableBlockHandler;
use itertools::Itertools;

/// Evaluates basic graph patterns against an [ObservationGraph].
///
/// This is the hook a query engine calls instead of matching every triple pattern on its own.
#[derive(Debug, Clone, Copy)]
pub struct ObservationStageGenerator<'graph> {
    graph: &'graph ObservationGraph,
}

impl<'graph> ObservationStageGenerator<'graph> {
    pub fn new(graph: &'graph ObservationGraph) -> Self {
        Self { graph }
    }

    /// Partitions `group` into the blocks that [Self::execute] evaluates, in evaluation order.
    ///
    /// Bounding box patterns derived from the inequalities of `group` are added before
    /// partitioning.
    pub fn plan(&self, group: &FilteredBasicPattern) -> Vec<TripleBlock> {
        let mut patterns = group.patterns().to_vec();
        patterns.extend(extent_bound_patterns(group));
        let blocks = partition_blocks(&patterns);
        tracing::debug!(
            "Planned basic graph pattern:\n{}",
            blocks.iter().join("")
        );
        blocks
    }

    /// Joins `input` with the solutions of `group`.
    ///
    /// Blocks are chained in the order of their first pattern. Each block consumes the solutions
    /// of the previous one, so variables bound by earlier blocks restrict later ones.
    pub fn execute(
        &self,
        group: &FilteredBasicPattern,
        input: SolutionIter<'graph>,
    ) -> SolutionIter<'graph> {
        let solutions = self
            .plan(group)
            .into_iter()
            .fold(input, |solutions, block| self.execute_block(block, solutions));
        hide_blank_node_variables(group, solutions)
    }

    fn execute_block(
        &self,
        block: TripleBlock,
        input: SolutionIter<'graph>,
    ) -> SolutionIter<'graph> {
        let graph = self.graph;
        match block {
            TripleBlock::VariablePattern {
                subject, patterns, ..
            } => {
                let handler = VariableBlockHandler::new(graph, subject, &patterns);
                Box::new(input.flat_map(move |solution| handler.execute(solution)))
            }
            TripleBlock::Arbitrary { patterns, .. } => patterns
                .into_iter()
                .fold(input, |solutions, pattern| {
                    match_pattern(graph, pattern, solutions)
                }),
        }
    }

    /// Joins `input` with the solutions of `group` by matching every pattern on its own, in the
    /// given order.
    ///
    /// The inequalities of `group` are not used.
    pub fn execute_naively(
        &self,
        group: &FilteredBasicPattern,
        input: SolutionIter<'graph>,
    ) -> SolutionIter<'graph> {
        let graph = self.graph;
        let solutions = group
            .patterns()
            .iter()
            .cloned()
            .fold(input, |solutions, pattern| {
                match_pattern(graph, pattern, solutions)
            });
        hide_blank_node_variables(group, solutions)
    }
}

fn hide_blank_node_variables<'graph>(
    group: &FilteredBasicPattern,
    solutions: SolutionIter<'graph>,
) -> SolutionIter<'graph> {
    let hidden = group.blank_node_variables().to_vec();
    if hidden.is_empty() {
        return solutions;
    }
    Box::new(solutions.map(move |mut solution| {
        solution.unbind(&hidden);
        solution
    }))
}
