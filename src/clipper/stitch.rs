use tracing::trace;

use crate::{
    Budget, ConsistencyError, EdgeLoop, Location, Result, Scalar, Segment, Side, encompasses,
    position_on_boundary,
};

/// A chain of sections being stitched into a single output loop.
#[derive(Debug, Clone, Copy)]
struct Chain<T> {
    /// The index of the section the chain started with.
    first: usize,
    /// Where the chain started.
    start: Location<T>,
}

/// Joins the given sections back together into the output path.
///
/// When close_path is false the sections are just concatenated. Otherwise each section is
/// followed by the one picking up where it ends: either directly, when it ends away from the
/// boundary, or after walking forward along the boundary until the nearest section starting on
/// the same edge loop.
pub(super) fn stitch<T>(
    sections: &[Vec<Segment<T>>],
    boundary: &[Segment<T>],
    close_path: bool,
    budget: &Budget,
) -> Result<Vec<Segment<T>>>
where
    T: Scalar,
{
    let edge_loops = EdgeLoop::split(boundary);

    let mut starts = Vec::with_capacity(sections.len());
    for section in sections {
        let position = match section.first() {
            Some(segment) => position_on_boundary(&segment.end()?, boundary)?,
            None => None,
        };

        starts.push(position);
    }

    let first_undrawn = |drawn: &[bool]| drawn.iter().position(|drawn| !drawn);

    let mut drawn = vec![false; sections.len()];
    let mut output = Vec::new();
    let mut chain: Option<Chain<T>> = None;
    let mut next = first_undrawn(&drawn);
    let mut iterations = 0;

    while let Some(index) = next.take() {
        let section = &sections[index];
        let Some(section_start) = section.first() else {
            drawn[index] = true;
            next = first_undrawn(&drawn);
            continue;
        };

        let current = match chain {
            Some(current) => {
                output.extend(section.iter().skip(1).copied());
                current
            }
            None => {
                output.extend(section.iter().copied());
                Chain {
                    first: index,
                    start: section_start.end()?,
                }
            }
        };

        drawn[index] = true;
        chain = Some(current);

        if close_path {
            let end = match section.last() {
                Some(segment) => segment.end()?,
                None => current.start,
            };

            if end == current.start {
                chain = None;
            } else if let Some(end_position) = position_on_boundary(&end, boundary)? {
                let loop_index = end_position.loop_index;
                let Some(edge_loop) = edge_loops.get(loop_index) else {
                    return Err(ConsistencyError::NoRestart(loop_index).into());
                };

                let edge_count = T::from(edge_loop.edge_count()).unwrap_or_else(T::zero);
                let mut best: Option<(usize, T)> = None;
                for (candidate, start) in starts.iter().enumerate() {
                    let Some(start) = start else {
                        continue;
                    };

                    if start.loop_index != loop_index
                        || (drawn[candidate] && candidate != current.first)
                    {
                        continue;
                    }

                    let relative = if start.index < end_position.index {
                        start.index + edge_count
                    } else {
                        start.index
                    };

                    if best.is_none_or(|(_, nearest)| relative < nearest) {
                        best = Some((candidate, relative));
                    }
                }

                let Some((restart, restart_index)) = best else {
                    return Err(ConsistencyError::NoRestart(loop_index).into());
                };

                let restart_start = match sections[restart].first() {
                    Some(segment) => segment.end()?,
                    None => current.start,
                };

                let end_edge = end_position.index.trunc().to_usize().unwrap_or_default() + 1;
                let restart_edge = restart_index.trunc().to_usize().unwrap_or_default() + 1;
                for edge_index in end_edge..=restart_edge {
                    let Some(edge) = edge_loop.edge(edge_index) else {
                        return Err(ConsistencyError::NoRestart(loop_index).into());
                    };

                    let target = if edge_index == restart_edge {
                        restart_start
                    } else {
                        edge.end()?
                    };

                    trace!(
                        edge_loop = loop_index,
                        edge = edge_index,
                        target = %target,
                        "following the boundary"
                    );

                    output.push(edge.with_end(target));
                }

                if restart == current.first {
                    chain = None;
                } else if !drawn[restart] {
                    next = Some(restart);
                } else {
                    return Err(ConsistencyError::AlreadyDrawn {
                        start: format!("{restart_start}"),
                        chain: format!("{}", current.start),
                    }
                    .into());
                }
            } else {
                let mut picking_up = None;
                for (candidate, section) in sections.iter().enumerate() {
                    if let Some(segment) = section.first()
                        && segment.end()? == end
                    {
                        picking_up = Some(candidate);
                        break;
                    }
                }

                let Some(picking_up) = picking_up else {
                    return Err(ConsistencyError::Dangling(format!("{end}")).into());
                };

                if drawn[picking_up] {
                    return Err(ConsistencyError::AlreadyDrawn {
                        start: format!("{end}"),
                        chain: format!("{}", current.start),
                    }
                    .into());
                }

                next = Some(picking_up);
            }
        } else {
            chain = None;
        }

        if next.is_none() {
            chain = None;
            next = first_undrawn(&drawn);
        }

        iterations += 1;
        budget.check(iterations, || {
            format!("stitching stalled on the chain started at {}", current.start)
        })?;
    }

    Ok(output)
}

/// Appends every edge loop of the boundary that is inside out relative to the output.
///
/// An empty output is judged by the uncropped input instead, so a path enclosing the whole
/// boundary still yields the boundary.
pub(super) fn complete_outline<T>(
    output: &mut Vec<Segment<T>>,
    input: &[Segment<T>],
    boundary: &[Segment<T>],
    periodic: bool,
) -> Result<()>
where
    T: Scalar,
{
    for edge_loop in EdgeLoop::split(boundary) {
        let inside_out = if output.is_empty() {
            encompasses(input, edge_loop.segments(), periodic)? != Side::Out
        } else {
            encompasses(output, edge_loop.segments(), periodic)? == Side::In
        };

        if inside_out {
            output.extend_from_slice(edge_loop.segments());
        }
    }

    Ok(())
}

/// Removes zero-length segments and then moves leading nowhere.
pub(super) fn cleanup<T>(output: &mut Vec<Segment<T>>) -> Result<()>
where
    T: Scalar,
{
    for index in (1..output.len()).rev() {
        if output[index - 1].end()? == output[index].end()? {
            output.remove(index);
        }
    }

    for index in (1..output.len()).rev() {
        if output[index - 1].is_move() && output[index].is_move() {
            output.remove(index - 1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        Budget, ConsistencyError, Error, Segment,
        clipper::stitch::{cleanup, complete_outline, stitch},
        rectangle,
    };

    #[test]
    fn stitch_sections() {
        struct Test {
            name: &'static str,
            sections: Vec<Vec<Segment<f64>>>,
            close_path: bool,
            want: Vec<Segment<f64>>,
        }

        vec![
            Test {
                name: "along the boundary to the next section",
                sections: vec![
                    vec![
                        Segment::move_to(0.5, 0.25),
                        Segment::line_to(0.5, 0.75),
                        Segment::line_to(1., 0.75),
                    ],
                    vec![Segment::move_to(1., 0.25), Segment::line_to(0.5, 0.25)],
                ],
                close_path: true,
                want: vec![
                    Segment::move_to(0.5, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(1., 0.75),
                    Segment::line_to(1., 0.25),
                    Segment::line_to(0.5, 0.25),
                ],
            },
            Test {
                name: "sections left open",
                sections: vec![
                    vec![
                        Segment::move_to(0.5, 0.25),
                        Segment::line_to(0.5, 0.75),
                        Segment::line_to(1., 0.75),
                    ],
                    vec![Segment::move_to(1., 0.25), Segment::line_to(0.5, 0.25)],
                ],
                close_path: false,
                want: vec![
                    Segment::move_to(0.5, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(1., 0.75),
                    Segment::move_to(1., 0.25),
                    Segment::line_to(0.5, 0.25),
                ],
            },
            Test {
                name: "around a corner back to itself",
                sections: vec![vec![
                    Segment::move_to(0., 0.5),
                    Segment::line_to(0.5, 0.5),
                    Segment::line_to(0.5, 0.),
                ]],
                close_path: true,
                want: vec![
                    Segment::move_to(0., 0.5),
                    Segment::line_to(0.5, 0.5),
                    Segment::line_to(0.5, 0.),
                    Segment::line_to(0., 0.),
                    Segment::line_to(0., 0.5),
                ],
            },
            Test {
                name: "continued away from the boundary",
                sections: vec![
                    vec![Segment::move_to(0.5, 0.5), Segment::line_to(0.75, 0.5)],
                    vec![Segment::move_to(0.75, 0.5), Segment::line_to(0.5, 0.5)],
                ],
                close_path: true,
                want: vec![
                    Segment::move_to(0.5, 0.5),
                    Segment::line_to(0.75, 0.5),
                    Segment::line_to(0.5, 0.5),
                ],
            },
            Test {
                name: "no sections",
                sections: vec![],
                close_path: true,
                want: vec![],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let boundary = rectangle(0., 0., 1., 1., false);
            let got = stitch(&test.sections, &boundary, test.close_path, &Budget::default())
                .unwrap_or_else(|error| panic!("{}: {error}", test.name));

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn dangling_section() {
        let boundary = rectangle(0., 0., 1., 1., false);
        let sections = vec![vec![Segment::move_to(0.5, 0.5), Segment::line_to(0.75, 0.5)]];

        let got = stitch(&sections, &boundary, true, &Budget::default());
        assert!(matches!(
            got,
            Err(Error::Inconsistent(ConsistencyError::Dangling(_)))
        ));
    }

    #[test]
    fn section_picked_up_twice() {
        let boundary = rectangle(0., 0., 1., 1., false);
        let sections = vec![
            vec![Segment::move_to(0.5, 0.5), Segment::line_to(0.6, 0.5)],
            vec![Segment::move_to(0.6, 0.5), Segment::line_to(0.7, 0.5)],
            vec![Segment::move_to(0.7, 0.5), Segment::line_to(0.6, 0.5)],
        ];

        let got = stitch(&sections, &boundary, true, &Budget::default());
        assert!(matches!(
            got,
            Err(Error::Inconsistent(ConsistencyError::AlreadyDrawn { .. }))
        ));
    }

    #[test]
    fn outline_completion() {
        struct Test {
            name: &'static str,
            input: Vec<Segment<f64>>,
            want: Vec<Segment<f64>>,
        }

        vec![
            Test {
                name: "input enclosing the boundary",
                input: rectangle(-1., -1., 2., 2., false).into_inner(),
                want: rectangle(0., 0., 1., 1., false).into_inner(),
            },
            Test {
                name: "input away from the boundary",
                input: rectangle(5., 5., 6., 6., false).into_inner(),
                want: vec![],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let boundary = rectangle(0., 0., 1., 1., false);
            let mut got = Vec::new();
            complete_outline(&mut got, &test.input, &boundary, false)
                .unwrap_or_else(|error| panic!("{}: {error}", test.name));

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn cleanup_output() {
        let mut output = vec![
            Segment::move_to(0., 0.),
            Segment::line_to(0., 0.),
            Segment::line_to(1., 1.),
            Segment::move_to(2., 2.),
            Segment::move_to(3., 3.),
            Segment::line_to(4., 4.),
        ];

        cleanup(&mut output).unwrap();
        assert_eq!(
            output,
            vec![
                Segment::move_to(0., 0.),
                Segment::line_to(1., 1.),
                Segment::move_to(3., 3.),
                Segment::line_to(4., 4.),
            ]
        );
    }
}
