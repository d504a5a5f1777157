use crate::properties::{parse_numeric_literal, BoxSide, ExtentSide};
use crate::sparql::filtered_pattern::FilteredBasicPattern;
use crate::sparql::inequality::ConstraintOperand;
use dggs_graph_model::{Literal, NamedNodePattern, TermPattern, TriplePattern};

/// Derives internal bounding box patterns from the inequalities on extent values.
///
/// For a pattern `?obs led:latMax ?v` with the constraint `?v <= c` (or `?v < c`), cells must lie
/// south of `c`, which yields the pattern `?obs <top> c`. Lower bounds on `led:latMin` and
/// `led:longMin` as well as upper bounds on `led:longMax` are handled the same way. Strict
/// inequalities become inclusive bounds, so the result may only contain too many observations.
pub fn extent_bound_patterns(pattern: &FilteredBasicPattern) -> Vec<TriplePattern> {
    let mut result = Vec::new();
    for triple in pattern.patterns() {
        let (
            TermPattern::Variable(_),
            NamedNodePattern::NamedNode(predicate),
            TermPattern::Variable(value),
        ) = (&triple.subject, &triple.predicate, &triple.object)
        else {
            continue;
        };
        let Some(side) = ExtentSide::from_predicate(predicate.as_ref()) else {
            continue;
        };

        for constraint in pattern.constraints_on(value) {
            let bound = match (side, constraint.left(), constraint.right()) {
                (ExtentSide::LatMax, ConstraintOperand::Variable(v), ConstraintOperand::Literal(c))
                    if v == value =>
                {
                    Some((BoxSide::Top, c))
                }
                (ExtentSide::LonMax, ConstraintOperand::Variable(v), ConstraintOperand::Literal(c))
                    if v == value =>
                {
                    Some((BoxSide::Right, c))
                }
                (ExtentSide::LatMin, ConstraintOperand::Literal(c), ConstraintOperand::Variable(v))
                    if v == value =>
                {
                    Some((BoxSide::Bottom, c))
                }
                (ExtentSide::LonMin, ConstraintOperand::Literal(c), ConstraintOperand::Variable(v))
                    if v == value =>
                {
                    Some((BoxSide::Left, c))
                }
                _ => None,
            };
            let Some((box_side, bound)) = bound else {
                continue;
            };
            if parse_numeric_literal(bound.as_ref().into()).is_none() {
                tracing::debug!(%bound, "Ignoring non-numeric extent bound");
                continue;
            }

            let bound_pattern = box_pattern(triple.subject.clone(), box_side, bound.clone());
            if !result.contains(&bound_pattern) {
                result.push(bound_pattern);
            }
        }
    }
    result
}

fn box_pattern(subject: TermPattern, side: BoxSide, bound: Literal) -> TriplePattern {
    TriplePattern {
        subject,
        predicate: NamedNodePattern::NamedNode(side.predicate().into_owned()),
        object: TermPattern::Literal(bound),
    }
}
