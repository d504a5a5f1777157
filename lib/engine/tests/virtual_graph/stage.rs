use crate::{integer, observation_iri, open_graph, pattern, var};
use dggs_graph_engine::sparql::{
    FilteredBasicPattern, ObservationStageGenerator, Solution, SolutionIter, TripleBlock,
    VariableBlockHandler,
};
use dggs_graph_model::vocab::{led, rdf};
use dggs_graph_model::{Expression, Literal, Term, TermPattern, Variable};
use itertools::Itertools;
use std::error::Error;
use std::iter;

fn single_empty_solution<'a>() -> SolutionIter<'a> {
    Box::new(iter::once(Solution::new()))
}

/// Renders solutions independently of the order of solutions and bindings.
fn rendered(solutions: SolutionIter<'_>) -> Vec<String> {
    solutions
        .map(|solution| {
            solution
                .iter()
                .map(|(variable, value)| format!("{variable}={value}"))
                .sorted()
                .join(" ")
        })
        .sorted()
        .collect()
}

fn subject() -> Variable {
    Variable::new_unchecked("s")
}

#[test]
fn variable_block_yields_one_binding_per_observation() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let stage = ObservationStageGenerator::new(&graph);
    let group = FilteredBasicPattern::new(vec![
        pattern(var("s"), led::DGGS_CELL, Literal::new_simple_literal("R78")),
        pattern(var("s"), rdf::TYPE, led::PIXEL.into_owned()),
        pattern(var("s"), led::ETM_BAND, integer(3)),
    ]);

    let blocks = stage.plan(&group);
    assert_eq!(blocks.len(), 1);
    assert!(matches!(blocks[0], TripleBlock::VariablePattern { .. }));

    let solutions = stage
        .execute(&group, single_empty_solution())
        .collect::<Vec<_>>();
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get(&subject()),
        Some(&Term::from(observation_iri("R78", 3, 3, 3)))
    );
    Ok(())
}

#[test]
fn fast_path_agrees_with_pattern_matching() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let stage = ObservationStageGenerator::new(&graph);
    let groups = [
        vec![
            pattern(var("s"), led::DGGS_CELL, Literal::new_simple_literal("R78")),
            pattern(var("s"), rdf::TYPE, led::PIXEL.into_owned()),
            pattern(var("s"), led::ETM_BAND, integer(3)),
        ],
        vec![
            pattern(var("s"), led::DGGS_CELL, Literal::new_simple_literal("R7852")),
            pattern(var("s"), led::ETM_BAND, var("band")),
            pattern(var("s"), rdf::TYPE, led::PIXEL.into_owned()),
            pattern(var("s"), led::VALUE, var("value")),
        ],
        vec![
            pattern(var("s"), led::DGGS_LEVEL_SQUARE, integer(6)),
            pattern(var("s"), led::ETM_BAND, integer(2)),
            pattern(var("s"), led::DGGS_CELL, var("cell")),
            pattern(var("t"), led::DGGS_CELL, var("cell")),
            pattern(var("t"), rdf::TYPE, led::GRID_SQUARE.into_owned()),
            pattern(var("t"), led::ETM_BAND, integer(2)),
        ],
        vec![
            pattern(var("s"), led::ETM_BAND, integer(9)),
            pattern(var("s"), led::DGGS_CELL, var("cell")),
        ],
    ];

    for patterns in groups {
        let group = FilteredBasicPattern::new(patterns);
        let fast = rendered(stage.execute(&group, single_empty_solution()));
        let naive = rendered(stage.execute_naively(&group, single_empty_solution()));
        assert_eq!(fast, naive);
    }
    Ok(())
}

#[test]
fn joined_blocks_bind_every_variable() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let stage = ObservationStageGenerator::new(&graph);
    let group = FilteredBasicPattern::new(vec![
        pattern(var("s"), led::DGGS_CELL, Literal::new_simple_literal("R7852")),
        pattern(var("s"), led::ETM_BAND, var("band")),
        pattern(var("s"), rdf::TYPE, led::PIXEL.into_owned()),
        pattern(var("s"), led::VALUE, var("value")),
    ]);

    let solutions = stage
        .execute(&group, single_empty_solution())
        .collect::<Vec<_>>();
    assert_eq!(solutions.len(), 7);
    assert!(solutions.iter().all(|s| s.len() == 3));
    Ok(())
}

#[test]
fn bound_subject_is_checked_against_the_block() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let patterns = [
        pattern(var("s"), rdf::TYPE, led::PIXEL.into_owned()),
        pattern(var("s"), led::ETM_BAND, integer(3)),
    ];
    let handler = VariableBlockHandler::new(&graph, subject(), &patterns);

    let matching = Solution::new()
        .extended(&subject(), observation_iri("R78", 3, 3, 3).into())
        .ok_or("binding failed")?;
    assert_eq!(handler.execute(matching.clone()).collect::<Vec<_>>(), [matching]);

    let other_band = Solution::new()
        .extended(&subject(), observation_iri("R78", 3, 3, 4).into())
        .ok_or("binding failed")?;
    assert_eq!(handler.execute(other_band).count(), 0);

    let literal = Solution::new()
        .extended(&subject(), Literal::new_simple_literal("R78").into())
        .ok_or("binding failed")?;
    assert_eq!(handler.execute(literal).count(), 0);
    Ok(())
}

#[test]
fn input_bindings_restrict_the_block() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let stage = ObservationStageGenerator::new(&graph);
    let group = FilteredBasicPattern::new(vec![
        pattern(var("s"), rdf::TYPE, led::GRID_SQUARE.into_owned()),
        pattern(var("s"), led::ETM_BAND, integer(0)),
    ]);
    let input = [
        observation_iri("R78", 3, 5, 0),
        observation_iri("R78", 3, 5, 1),
        observation_iri("R78", 3, 3, 0),
    ]
    .into_iter()
    .filter_map(|iri| Solution::new().extended(&subject(), iri.into()))
    .collect::<Vec<_>>();

    let solutions = stage
        .execute(&group, Box::new(input.into_iter()))
        .collect::<Vec<_>>();
    assert_eq!(solutions.len(), 1);
    Ok(())
}

#[test]
fn extent_filters_prune_cells() -> Result<(), Box<dyn Error>> {
    let graph = open_graph()?;
    let stage = ObservationStageGenerator::new(&graph);
    let obs = || TermPattern::Variable(Variable::new_unchecked("obs"));
    let mut group = FilteredBasicPattern::new(vec![
        pattern(obs(), rdf::TYPE, led::GRID_SQUARE.into_owned()),
        pattern(obs(), led::ETM_BAND, integer(0)),
        pattern(obs(), led::LAT_MIN, var("latMin")),
        pattern(obs(), led::LAT_MAX, var("latMax")),
        pattern(obs(), led::LONG_MIN, var("lonMin")),
        pattern(obs(), led::LONG_MAX, var("lonMax")),
    ]);
    let bound = |name: &str, value: f64| {
        (
            Box::new(Expression::Variable(Variable::new_unchecked(name))),
            Box::new(Expression::Literal(Literal::from(value))),
        )
    };
    let (lat_min, south) = bound("latMin", -35.45);
    let (lat_max, north) = bound("latMax", -35.0);
    let (lon_min, west) = bound("lonMin", 148.8);
    let (lon_max, east) = bound("lonMax", 149.3);
    group.add_filter(&Expression::And(
        Box::new(Expression::And(
            Box::new(Expression::GreaterOrEqual(lat_min, south)),
            Box::new(Expression::LessOrEqual(lat_max, north)),
        )),
        Box::new(Expression::And(
            Box::new(Expression::Greater(lon_min, west)),
            Box::new(Expression::Less(lon_max, east)),
        )),
    ));

    let blocks = stage.plan(&group);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].patterns().len(), 6);

    let solutions = stage
        .execute(&group, single_empty_solution())
        .collect::<Vec<_>>();
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get(&Variable::new_unchecked("obs")),
        Some(&Term::from(observation_iri("R78523", 6, 8, 0)))
    );

    let unpruned = stage
        .execute_naively(&group, single_empty_solution())
        .count();
    assert_eq!(unpruned, 6);
    Ok(())
}
