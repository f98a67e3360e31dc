//! Hooks through which the recognizers report what they are doing.
//!
//! The engines never print; a caller that wants a running commentary passes
//! something implementing `ParseEvents`. Every callback fires only for a
//! genuinely new chart entry, never for a suppressed duplicate.

use crate::cyk::Span;
use crate::earley::Item;
use crate::grammar::{Grammar, NonTerm};
use crate::outcome::Verdict;

#[allow(unused_variables)]
pub trait ParseEvents {
    /// CYK: `symbol` now covers `span`.
    fn cell_filled(&mut self, grammar: &Grammar, span: Span, symbol: NonTerm) {}

    /// Earley: the walk over set `position` begins, holding `items` so far.
    fn position_started(&mut self, position: usize, items: usize) {}

    fn seeded(&mut self, grammar: &Grammar, item: &Item) {}
    fn predicted(&mut self, grammar: &Grammar, position: usize, item: &Item) {}
    /// `position` is the set the advanced item went into.
    fn scanned(&mut self, grammar: &Grammar, position: usize, item: &Item) {}
    fn completed(&mut self, grammar: &Grammar, position: usize, item: &Item) {}

    fn finished(&mut self, verdict: &Verdict) {}
}

pub struct NoEvents;

impl ParseEvents for NoEvents {}

/// Keeps one line of text per event.
#[derive(Clone, Default, Debug)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> &[String] { &self.lines }

    pub fn into_lines(self) -> Vec<String> { self.lines }
}

impl ParseEvents for EventLog {
    fn cell_filled(&mut self, grammar: &Grammar, span: Span, symbol: NonTerm) {
        self.lines.push(format!("cell {} {}", span, grammar.name(symbol)));
    }

    fn position_started(&mut self, position: usize, items: usize) {
        self.lines.push(format!("position {} ({} items)", position, items));
    }

    fn seeded(&mut self, grammar: &Grammar, item: &Item) {
        self.lines.push(format!("seed {}", grammar.with(item)));
    }

    fn predicted(&mut self, grammar: &Grammar, position: usize, item: &Item) {
        self.lines.push(format!("predict [{}] {}", position, grammar.with(item)));
    }

    fn scanned(&mut self, grammar: &Grammar, position: usize, item: &Item) {
        self.lines.push(format!("scan [{}] {}", position, grammar.with(item)));
    }

    fn completed(&mut self, grammar: &Grammar, position: usize, item: &Item) {
        self.lines.push(format!("complete [{}] {}", position, grammar.with(item)));
    }

    fn finished(&mut self, verdict: &Verdict) {
        self.lines.push(format!("finished: {}", verdict));
    }
}
