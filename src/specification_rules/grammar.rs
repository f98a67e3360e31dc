use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::grammar::{Grammar, Symbol};

/// Sentential forms reachable from the start symbol by leftmost rewriting,
/// cut off at `max_len` symbols. Without empty productions a form never
/// shrinks, so the cut loses nothing of length `max_len` or less.
struct Leftmost<'g, 'w> {
    grammar: &'g Grammar,
    max_len: usize,
    /// When set, forms whose leading terminals disagree with it are dropped.
    target: Option<&'w [char]>,
    queue: VecDeque<Vec<Symbol>>,
    seen: HashSet<Vec<Symbol>>,
}

impl<'g, 'w> Leftmost<'g, 'w> {
    fn new(grammar: &'g Grammar, max_len: usize, target: Option<&'w [char]>) -> Self {
        let start = vec![Symbol::NonTerm(grammar.start())];
        Leftmost {
            grammar,
            max_len,
            target,
            queue: VecDeque::from([start.clone()]),
            seen: HashSet::from([start]),
        }
    }

    fn agrees(&self, form: &[Symbol]) -> bool {
        let target = match self.target { Some(t) => t, None => return true };
        form.iter()
            .take_while(|s| s.is_term())
            .zip(target.iter())
            .all(|(s, &c)| *s == Symbol::Term(c))
    }

    /// Next form off the queue, its successors already queued.
    fn expand(&mut self) -> Option<Vec<Symbol>> {
        let form = self.queue.pop_front()?;
        if let Some(at) = form.iter().position(|s| !s.is_term()) {
            if let Symbol::NonTerm(a) = form[at] {
                for &id in self.grammar.alternatives(a) {
                    let rhs = self.grammar.production(id).rhs();
                    if form.len() - 1 + rhs.len() > self.max_len {
                        continue;
                    }
                    let mut next = Vec::with_capacity(form.len() - 1 + rhs.len());
                    next.extend_from_slice(&form[..at]);
                    next.extend_from_slice(rhs);
                    next.extend_from_slice(&form[at + 1..]);
                    if self.agrees(&next) && self.seen.insert(next.clone()) {
                        self.queue.push_back(next);
                    }
                }
            }
        }
        Some(form)
    }
}

fn terminal_string(form: &[Symbol]) -> Option<String> {
    form.iter()
        .map(|s| match s { Symbol::Term(c) => Some(*c), Symbol::NonTerm(_) => None })
        .collect()
}

impl Grammar {
    /// Does the start symbol derive `input`? `None` if the search expanded
    /// `budget` sentential forms without deciding.
    pub fn derives(&self, input: &[char], budget: usize) -> Option<bool> {
        if input.is_empty() {
            return Some(false);
        }
        let mut search = Leftmost::new(self, input.len(), Some(input));
        let mut expanded = 0;
        while let Some(form) = search.expand() {
            if let Some(s) = terminal_string(&form) {
                if s.chars().eq(input.iter().copied()) {
                    return Some(true);
                }
            }
            expanded += 1;
            if expanded >= budget && !search.queue.is_empty() {
                return None;
            }
        }
        Some(false)
    }

    /// Every string of length `1..=max_len` the grammar generates.
    pub fn sentences(&self, max_len: usize) -> BTreeSet<String> {
        let mut search = Leftmost::new(self, max_len, None);
        let mut found = BTreeSet::new();
        while let Some(form) = search.expand() {
            if let Some(s) = terminal_string(&form) {
                found.insert(s);
            }
        }
        found
    }
}
