//! Bottom-up chart recognition (Cocke-Younger-Kasami).
//!
//! Cell `[start][end]` holds every non-terminal that derives
//! `input[start..=end]`. Only two production shapes take part: `A -> a`
//! fills the diagonal, `A -> B C` combines two adjacent cells. Anything
//! else in the grammar (unit rules, long rules, binary rules mentioning a
//! terminal) is never matched; convert with `Grammar::to_binary_form` first
//! if that matters.
//!
//! Next to each cell sits a small backtrace map recording, per symbol, the
//! production and sub-spans that put it there. When several splits or
//! productions derive the same symbol over the same span the one computed
//! last wins: splits ascend, then non-terminals in grammar order, then their
//! productions in insertion order.

use derive_more::Display;
use linear_map::LinearMap;

use crate::config::Limits;
use crate::events::{NoEvents, ParseEvents};
use crate::grammar::{Grammar, NonTerm, ProdId, Symbol};
use crate::outcome::{ParseFault, Recognition, Verdict};

/// Inclusive range of input positions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[display(fmt = "[{}, {}]", start, end)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self { Span { start, end } }

    /// Zero for a reversed span.
    pub fn len(&self) -> usize { (self.end + 1).saturating_sub(self.start) }
}

/// Why a symbol sits in a cell. Unary entries have no sub-spans.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Backpointer {
    pub production: ProdId,
    pub left: Option<Span>,
    pub right: Option<Span>,
}

type CellMap<K, V> = LinearMap<K, V>;

#[derive(Clone, Debug)]
pub struct CykChart<'g> {
    grammar: &'g Grammar,
    input: Vec<char>,
    /// `u64` words per cell in `bits`.
    words: usize,
    /// One fixed-width bit set per cell, cell `(s, e)` at `s * n + e`.
    bits: Vec<u64>,
    backtrace: Vec<CellMap<NonTerm, Backpointer>>,
}

pub fn parse<'g>(grammar: &'g Grammar, input: &[char]) -> Recognition<CykChart<'g>> {
    parse_with(grammar, input, &Limits::default(), &mut NoEvents)
}

pub fn parse_with<'g>(grammar: &'g Grammar,
                      input: &[char],
                      limits: &Limits,
                      events: &mut dyn ParseEvents) -> Recognition<CykChart<'g>>
{
    if let Err(e) = limits.check_length(input.len()) {
        let verdict = Verdict::ResourceExhausted(e);
        events.finished(&verdict);
        return Recognition::new(verdict, None);
    }
    let mut chart = match CykChart::allocate(grammar, input) {
        Ok(chart) => chart,
        Err(fault) => {
            let verdict = Verdict::ConstructionFault(fault);
            events.finished(&verdict);
            return Recognition::new(verdict, None);
        }
    };
    chart.fill(events);
    let verdict = if chart.accepts() { Verdict::Accepted } else { Verdict::Rejected };
    events.finished(&verdict);
    Recognition::new(verdict, Some(chart))
}

/// `A -> a` and `A -> B C` productions, in the order the chart tries them.
struct RuleTables {
    unary: Vec<(NonTerm, ProdId, char)>,
    binary: Vec<(NonTerm, ProdId, NonTerm, NonTerm)>,
}

impl RuleTables {
    fn new(grammar: &Grammar) -> Self {
        let mut unary = Vec::new();
        let mut binary = Vec::new();
        for lhs in grammar.nonterms() {
            for &id in grammar.alternatives(lhs) {
                match *grammar.production(id).rhs() {
                    [Symbol::Term(c)] => unary.push((lhs, id, c)),
                    [Symbol::NonTerm(b), Symbol::NonTerm(c)] => binary.push((lhs, id, b, c)),
                    _ => {}
                }
            }
        }
        RuleTables { unary, binary }
    }
}

impl<'g> CykChart<'g> {
    fn allocate(grammar: &'g Grammar, input: &[char]) -> Result<Self, ParseFault> {
        let len = input.len();
        let words = (grammar.nonterm_count() + 63) / 64;
        let too_large = ParseFault::ChartTooLarge { len };
        let cells = len.checked_mul(len).ok_or_else(|| too_large.clone())?;
        let total = cells.checked_mul(words).ok_or(too_large)?;

        let mut bits = Vec::new();
        bits.try_reserve_exact(total).map_err(|_| ParseFault::Allocation { cells })?;
        bits.resize(total, 0);
        let mut backtrace = Vec::new();
        backtrace.try_reserve_exact(cells).map_err(|_| ParseFault::Allocation { cells })?;
        backtrace.resize_with(cells, CellMap::new);

        Ok(CykChart { grammar, input: input.to_vec(), words, bits, backtrace })
    }

    fn fill(&mut self, events: &mut dyn ParseEvents) {
        let n = self.len();
        let rules = RuleTables::new(self.grammar);

        for i in 0..n {
            let c = self.input[i];
            for &(lhs, production, t) in &rules.unary {
                if t == c {
                    let bp = Backpointer { production, left: None, right: None };
                    self.record(Span::new(i, i), lhs, bp, events);
                }
            }
        }

        for length in 2..=n {
            for start in 0..=(n - length) {
                let end = start + length - 1;
                for split in start..end {
                    let left = Span::new(start, split);
                    let right = Span::new(split + 1, end);
                    for &(lhs, production, b, c) in &rules.binary {
                        if self.contains(left, b) && self.contains(right, c) {
                            let bp = Backpointer { production, left: Some(left), right: Some(right) };
                            self.record(Span::new(start, end), lhs, bp, events);
                        }
                    }
                }
            }
        }
    }

    fn record(&mut self, span: Span, symbol: NonTerm, bp: Backpointer, events: &mut dyn ParseEvents) {
        let cell = self.cell(span);
        let (word, mask) = (cell * self.words + symbol.0 / 64, 1u64 << (symbol.0 % 64));
        if self.bits[word] & mask == 0 {
            self.bits[word] |= mask;
            events.cell_filled(self.grammar, span, symbol);
        }
        self.backtrace[cell].insert(symbol, bp);
    }

    fn cell(&self, span: Span) -> usize { span.start * self.len() + span.end }

    fn in_bounds(&self, span: Span) -> bool {
        span.start <= span.end && span.end < self.len()
    }

    pub fn grammar(&self) -> &'g Grammar { self.grammar }

    pub fn input(&self) -> &[char] { &self.input }

    /// Length of the input the chart was built for.
    pub fn len(&self) -> usize { self.input.len() }

    pub fn is_empty(&self) -> bool { self.input.is_empty() }

    pub fn contains(&self, span: Span, symbol: NonTerm) -> bool {
        if !self.in_bounds(span) || symbol.0 >= self.grammar.nonterm_count() {
            return false;
        }
        let word = self.cell(span) * self.words + symbol.0 / 64;
        self.bits[word] & (1u64 << (symbol.0 % 64)) != 0
    }

    /// Non-terminals covering `span`, in grammar order.
    pub fn symbols(&self, span: Span) -> impl Iterator<Item=NonTerm> + '_ {
        let present = self.in_bounds(span);
        self.grammar.nonterms().filter(move |&nt| present && self.contains(span, nt))
    }

    pub fn backpointer(&self, span: Span, symbol: NonTerm) -> Option<&Backpointer> {
        if !self.in_bounds(span) {
            return None;
        }
        self.backtrace[self.cell(span)].get(&symbol)
    }

    /// The whole input, if there is any.
    pub fn root_span(&self) -> Option<Span> {
        self.len().checked_sub(1).map(|last| Span::new(0, last))
    }

    pub fn accepts(&self) -> bool {
        self.root_span().map_or(false, |span| self.contains(span, self.grammar.start()))
    }
}

#[cfg(test)]
#[path = "tests/cyk.rs"]
mod tests_for_cyk;
