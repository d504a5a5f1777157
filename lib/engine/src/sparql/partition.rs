use crate::sparql::ordering::{compare_term_patterns, compare_triple_patterns};
use dggs_graph_model::{NamedNodePattern, TermPattern, TriplePattern, Variable};
use std::fmt::{Display, Formatter};

/// A group of triple patterns that is evaluated as one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripleBlock {
    /// Patterns that share the subject variable and only have concrete predicates and objects.
    /// The whole block can be resolved with a single observation filter.
    VariablePattern {
        subject: Variable,
        patterns: Vec<TriplePattern>,
        position: usize,
    },
    /// Any other patterns. They are matched one by one.
    Arbitrary {
        patterns: Vec<TriplePattern>,
        position: usize,
    },
}

impl TripleBlock {
    pub fn patterns(&self) -> &[TriplePattern] {
        match self {
            Self::VariablePattern { patterns, .. } | Self::Arbitrary { patterns, .. } => patterns,
        }
    }

    /// The position of the first pattern of this block in the original pattern list.
    pub fn position(&self) -> usize {
        match self {
            Self::VariablePattern { position, .. } | Self::Arbitrary { position, .. } => *position,
        }
    }
}

impl Display for TripleBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariablePattern { subject, .. } => writeln!(f, "VariablePattern {subject}")?,
            Self::Arbitrary { .. } => writeln!(f, "Arbitrary")?,
        }
        for pattern in self.patterns() {
            writeln!(f, "  {pattern}")?;
        }
        Ok(())
    }
}

/// Returns the subject variable of `pattern` if the pattern can be expressed as a single filter
/// constraint, i.e., if its subject is a variable and both its predicate and object are concrete.
pub fn constraint_subject(pattern: &TriplePattern) -> Option<&Variable> {
    match (&pattern.subject, &pattern.predicate, &pattern.object) {
        (TermPattern::Variable(subject), NamedNodePattern::NamedNode(_), object)
            if !matches!(object, TermPattern::Variable(_)) =>
        {
            Some(subject)
        }
        _ => None,
    }
}

/// Partitions `patterns` into maximal blocks.
///
/// The patterns are first ordered by subject, constraint patterns of a subject before its other
/// patterns, so that all constraint patterns of a subject variable end up adjacent. Adjacent
/// constraint patterns of the same subject form a [TripleBlock::VariablePattern], every other run
/// of adjacent patterns forms a [TripleBlock::Arbitrary]. Within a block and among blocks, the
/// original order of the patterns is restored afterward.
pub fn partition_blocks(patterns: &[TriplePattern]) -> Vec<TripleBlock> {
    let mut ordered = patterns.iter().enumerate().collect::<Vec<_>>();
    ordered.sort_by(|(_, left), (_, right)| {
        compare_term_patterns(&left.subject, &right.subject)
            .then_with(|| {
                let left = constraint_subject(left).is_some();
                let right = constraint_subject(right).is_some();
                right.cmp(&left)
            })
            .then_with(|| compare_triple_patterns(left, right))
    });

    let mut groups: Vec<(Option<&Variable>, Vec<(usize, &TriplePattern)>)> = Vec::new();
    for (position, pattern) in ordered {
        let subject = constraint_subject(pattern);
        match groups.last_mut() {
            Some((group_subject, members)) if *group_subject == subject => {
                members.push((position, pattern));
            }
            _ => groups.push((subject, vec![(position, pattern)])),
        }
    }

    let mut blocks = groups
        .into_iter()
        .map(|(subject, mut members)| {
            members.sort_by_key(|(position, _)| *position);
            let position = members.first().map_or(0, |(position, _)| *position);
            let patterns = members
                .into_iter()
                .map(|(_, pattern)| pattern.clone())
                .collect();
            match subject {
                Some(subject) => TripleBlock::VariablePattern {
                    subject: subject.clone(),
                    patterns,
                    position,
                },
                None => TripleBlock::Arbitrary { patterns, position },
            }
        })
        .collect::<Vec<_>>();
    blocks.sort_by_key(TripleBlock::position);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use dggs_graph_model::{Literal, NamedNode};
    use itertools::Itertools;

    fn var(name: &str) -> TermPattern {
        TermPattern::Variable(Variable::new_unchecked(name))
    }

    fn iri(suffix: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{suffix}"))
    }

    fn pattern(subject: TermPattern, predicate: &str, object: TermPattern) -> TriplePattern {
        TriplePattern {
            subject,
            predicate: NamedNodePattern::NamedNode(iri(predicate)),
            object,
        }
    }

    fn render(blocks: &[TripleBlock]) -> String {
        blocks.iter().join("")
    }

    #[test]
    fn constraint_subject_requires_concrete_predicate_and_object() {
        let literal = TermPattern::Literal(Literal::new_simple_literal("v"));
        assert!(constraint_subject(&pattern(var("s"), "p", literal.clone())).is_some());
        assert!(constraint_subject(&pattern(var("s"), "p", var("o"))).is_none());
        assert!(constraint_subject(&pattern(TermPattern::NamedNode(iri("s")), "p", literal.clone()))
            .is_none());
        assert!(constraint_subject(&TriplePattern {
            subject: var("s"),
            predicate: NamedNodePattern::Variable(Variable::new_unchecked("p")),
            object: literal,
        })
        .is_none());
    }

    #[test]
    fn mixed_patterns_are_partitioned() {
        let patterns = vec![
            pattern(var("a"), "p", TermPattern::NamedNode(iri("x"))),
            pattern(TermPattern::NamedNode(iri("s")), "p", var("o")),
            pattern(var("b"), "q", TermPattern::Literal(Literal::new_simple_literal("1"))),
            pattern(var("a"), "q", var("o")),
            pattern(var("a"), "r", TermPattern::NamedNode(iri("y"))),
            pattern(var("b"), "r", TermPattern::Literal(Literal::new_simple_literal("2"))),
            pattern(var("c"), "p", var("a")),
        ];
        let blocks = partition_blocks(&patterns);

        insta::assert_snapshot!(render(&blocks), @r#"
        VariablePattern ?a
          ?a <http://example.com/p> <http://example.com/x>
          ?a <http://example.com/r> <http://example.com/y>
        Arbitrary
          <http://example.com/s> <http://example.com/p> ?o
        VariablePattern ?b
          ?b <http://example.com/q> "1"
          ?b <http://example.com/r> "2"
        Arbitrary
          ?a <http://example.com/q> ?o
        Arbitrary
          ?c <http://example.com/p> ?a
        "#);
    }

    #[test]
    fn empty_pattern_has_no_blocks() {
        assert!(partition_blocks(&[]).is_empty());
    }
}
