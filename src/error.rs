use thiserror::Error;

use crate::segment::SegmentKind;

/// Top-level error type of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedError),

    #[error(transparent)]
    Inconsistent(#[from] ConsistencyError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

/// The input does not satisfy the preconditions of the operation.
#[derive(Debug, Error)]
pub enum MalformedError {
    #[error("non-finite coordinate in segment {0}")]
    NonFinite(String),

    #[error("path must begin with a moveto, not {0}")]
    MissingMoveTo(SegmentKind),

    #[error("this operation requires some segments to work at all")]
    EmptyPath,

    #[error("the path is open: {0}")]
    OpenPath(String),

    #[error("the boundary is open: {0}")]
    OpenBoundary(String),

    #[error("degenerate arc, its start is the same as its end: {0}")]
    DegenerateArc(String),

    #[error("impossible arc, it spans a chord of {chord} with a radius of only {radius}")]
    ImpossibleArc { chord: String, radius: String },

    #[error("elliptical arcs are not supported: {0}")]
    EllipticalArc(String),

    #[error("{kind} segments are not supported in {operation}")]
    Unsupported {
        kind: SegmentKind,
        operation: &'static str,
    },

    #[error("{kind} segment must keep its shared coordinate: from {from} to {to}")]
    MismatchedEndpoints {
        kind: SegmentKind,
        from: String,
        to: String,
    },

    #[error("the path must be cropped before projecting it, no line goes from {from} to {to}")]
    Uncropped { from: String, to: String },

    #[error("invalid path syntax: {0}")]
    Syntax(String),
}

/// An invariant that should hold for any well-formed input was broken.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("no section picks up from {0}")]
    Dangling(String),

    #[error("the section starting at {start} was already drawn, the chain started at {chain}")]
    AlreadyDrawn { start: String, chain: String },

    #[error("no section restarts on edge loop {0}")]
    NoRestart(usize),

    #[error("containment of {0} is still indeterminate after re-probing")]
    Indeterminate(String),

    #[error("the polygon has no segment to probe with: {0}")]
    Featureless(String),
}

/// A bounded loop ran out of iterations.
#[derive(Debug, Error)]
pub enum ConvergenceError {
    #[error("gave up after {budget} iterations: {context}")]
    Exhausted { budget: usize, context: String },
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
