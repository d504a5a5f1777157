//! Hooks for evaluating basic graph patterns against the virtual graph.
//!
//! Matching every triple pattern on its own and joining the results would enumerate all facts of
//! all observations for patterns like `?obs led:etmBand 3`. The [ObservationStageGenerator]
//! instead partitions a basic graph pattern into [TripleBlock]s. Blocks of patterns that share an
//! unbound subject variable and only have concrete predicates and objects are resolved with a
//! single [ObservationFilter](crate::ObservationFilter). All other blocks are matched pattern by
//! pattern.
//!
//! Inequality filters on top of a basic graph pattern are collected in a [FilteredBasicPattern].
//! Inequalities on the extent of a cell are turned into internal bounding box patterns that prune
//! cells early. The filter expression itself must still be evaluated by the caller.

mod block_triples;
mod bounding_box;
mod filtered_pattern;
mod inequality;
mod ordering;
mod partition;
mod solution;
mod stage;
mod variable_block;

pub use block_triples::match_pattern;
pub use bounding_box::extent_bound_patterns;
pub use filtered_pattern::FilteredBasicPattern;
pub use inequality::{ConstraintOperand, ConstraintType, InequalityConstraint, InvalidOperandError};
pub use ordering::{compare_named_node_patterns, compare_term_patterns, compare_triple_patterns};
pub use partition::{constraint_subject, partition_blocks, TripleBlock};
pub use solution::{Solution, SolutionIter};
pub use stage::ObservationStageGenerator;
pub use variable_block::VariableBlockHandler;
