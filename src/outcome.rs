use derive_more::Display;
use thiserror::Error;

/// A safety limit was hit; says nothing about membership.
#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exhausted {
    #[error("input of length {len} exceeds the limit of {limit}")]
    InputTooLong { len: usize, limit: usize },
    #[error("item set {position} would exceed the limit of {limit} items")]
    TooManyItems { position: usize, limit: usize },
}

/// The chart itself could not be built.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ParseFault {
    #[error("chart for an input of length {len} overflows the address space")]
    ChartTooLarge { len: usize },
    #[error("could not allocate a chart of {cells} cells")]
    Allocation { cells: usize },
}

#[derive(Display, Clone, PartialEq, Eq, Debug)]
pub enum Verdict {
    #[display(fmt = "accepted")]
    Accepted,
    #[display(fmt = "rejected")]
    Rejected,
    #[display(fmt = "resource exhausted: {}", _0)]
    ResourceExhausted(Exhausted),
    #[display(fmt = "construction fault: {}", _0)]
    ConstructionFault(ParseFault),
}

/// What a recognizer hands back: always a verdict, and the chart it built
/// unless construction failed (or never started).
#[derive(Clone, Debug)]
pub struct Recognition<C> {
    verdict: Verdict,
    chart: Option<C>,
}

impl<C> Recognition<C> {
    pub(crate) fn new(verdict: Verdict, chart: Option<C>) -> Self {
        Recognition { verdict, chart }
    }

    pub fn accepted(&self) -> bool { self.verdict == Verdict::Accepted }

    pub fn verdict(&self) -> &Verdict { &self.verdict }

    pub fn exhausted(&self) -> Option<Exhausted> {
        match self.verdict {
            Verdict::ResourceExhausted(e) => Some(e),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&C> { self.chart.as_ref() }

    pub fn into_chart(self) -> Option<C> { self.chart }
}
