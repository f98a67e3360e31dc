//! Reading a derivation back out of a filled CYK chart.
//!
//! A derivation is the pre-order list of productions applied: the root's
//! production first, then everything under its left child, then everything
//! under its right child. Replaying the steps as leftmost substitutions from
//! the start symbol yields the input again.

use crate::cyk::{CykChart, Span};
use crate::grammar::{Grammar, NonTerm, ProdId, Symbol};

/// One application of a production.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Step {
    pub lhs: NonTerm,
    pub production: ProdId,
}

#[derive(Clone, Debug)]
pub struct Derivation<'g> {
    grammar: &'g Grammar,
    steps: Vec<Step>,
}

impl<'g> CykChart<'g> {
    /// Pre-order trace of how `symbol` came to cover `span`. Empty when the
    /// chart has no entry for the pair.
    pub fn trace(&self, span: Span, symbol: NonTerm) -> Derivation<'g> {
        let mut steps = Vec::new();
        self.trace_into(span, symbol, &mut steps);
        Derivation { grammar: self.grammar(), steps }
    }

    fn trace_into(&self, span: Span, symbol: NonTerm, steps: &mut Vec<Step>) {
        let bp = match self.backpointer(span, symbol) {
            Some(bp) => *bp,
            None => return,
        };
        steps.push(Step { lhs: symbol, production: bp.production });
        if let (Some(left), Some(right)) = (bp.left, bp.right) {
            if let [Symbol::NonTerm(b), Symbol::NonTerm(c)] = *self.grammar().production(bp.production).rhs() {
                self.trace_into(left, b, steps);
                self.trace_into(right, c, steps);
            }
        }
    }

    /// Trace of the start symbol over the whole input; empty unless the chart
    /// accepts.
    pub fn derivation(&self) -> Derivation<'g> {
        match self.root_span() {
            Some(span) => self.trace(span, self.grammar().start()),
            None => Derivation { grammar: self.grammar(), steps: Vec::new() },
        }
    }
}

impl<'g> Derivation<'g> {
    pub fn grammar(&self) -> &'g Grammar { self.grammar }

    pub fn steps(&self) -> &[Step] { &self.steps }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// `"A -> B C"` for each step, in order.
    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(|step| self.grammar.with(step).to_string()).collect()
    }

    /// Rewrite the leftmost non-terminal with each step in turn, starting
    /// from the start symbol. `None` if some step does not rewrite the
    /// leftmost non-terminal, or if non-terminals remain at the end.
    pub fn replay(&self) -> Option<String> {
        let mut form = vec![Symbol::NonTerm(self.grammar.start())];
        for step in &self.steps {
            let production = self.grammar.production(step.production);
            if production.lhs() != step.lhs {
                return None;
            }
            let at = form.iter().position(|s| !s.is_term())?;
            if form[at] != Symbol::NonTerm(step.lhs) {
                return None;
            }
            form.splice(at..=at, production.rhs().iter().copied());
        }
        form.into_iter()
            .map(|s| match s { Symbol::Term(c) => Some(c), Symbol::NonTerm(_) => None })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/derivation.rs"]
mod tests_for_derivation;
