//! Traditional earley: gradually build, from left-to-right, a set of "Earley
//! items" for each position in the input.
//!
//! An item `A -> α . β, origin: j` in set `i` says that `α` derives
//! `input[j..i]` and the recognizer is looking for `β` next. Set `i` is
//! walked with an index, so items appended while walking it (by prediction or
//! completion) are themselves processed before moving on to `i + 1`:
//!
//! * dot at the end: *complete*, advancing every item in set `j` that was
//!   waiting on `A`;
//! * dot before a non-terminal `B`: *predict* every production of `B` with
//!   origin `i`;
//! * dot before a terminal equal to `input[i]`: *scan*, advancing the item
//!   into set `i + 1`.
//!
//! Sets never hold the same `(production, dot, origin)` twice.

use std::collections::HashSet;

use crate::config::Limits;
use crate::events::{NoEvents, ParseEvents};
use crate::grammar::{Grammar, NonTerm, ProdId, Symbol};
use crate::outcome::{Exhausted, Recognition, Verdict};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Item {
    pub production: ProdId,
    pub dot: usize,
    pub origin: usize,
}

impl Item {
    pub fn seed(production: ProdId, origin: usize) -> Self {
        Item { production, dot: 0, origin }
    }

    pub fn advance(self) -> Self {
        Item { dot: self.dot + 1, ..self }
    }

    /// Symbol right after the dot; `None` once the item is complete.
    pub fn next_symbol(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar.production(self.production).rhs().get(self.dot).copied()
    }

    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.production).len()
    }

    pub fn lhs(&self, grammar: &Grammar) -> NonTerm {
        grammar.production(self.production).lhs()
    }
}

/// Items of one position, in insertion order.
#[derive(Clone, Default, Debug)]
pub struct ItemSet {
    items: Vec<Item>,
    index: HashSet<Item>,
}

impl ItemSet {
    /// `Ok(false)` for an item already present. Adding a new item to a set
    /// that already holds `limit` items is an error.
    fn push(&mut self, item: Item, limit: usize, position: usize) -> Result<bool, Exhausted> {
        if self.index.contains(&item) {
            return Ok(false);
        }
        if self.items.len() >= limit {
            return Err(Exhausted::TooManyItems { position, limit });
        }
        self.index.insert(item);
        self.items.push(item);
        Ok(true)
    }

    pub fn items(&self) -> &[Item] { &self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn contains(&self, item: &Item) -> bool { self.index.contains(item) }
}

#[derive(Clone, Debug)]
pub struct EarleyChart<'g> {
    grammar: &'g Grammar,
    input: Vec<char>,
    sets: Vec<ItemSet>,
}

/// Borrowed view of all item sets, printable as a state table.
#[derive(Copy, Clone)]
pub struct ItemSets<'c> {
    pub(crate) grammar: &'c Grammar,
    pub(crate) sets: &'c [ItemSet],
}

impl<'c> ItemSets<'c> {
    pub fn len(&self) -> usize { self.sets.len() }

    pub fn is_empty(&self) -> bool { self.sets.is_empty() }

    pub fn get(&self, position: usize) -> Option<&'c ItemSet> { self.sets.get(position) }

    pub fn iter(&self) -> std::slice::Iter<'c, ItemSet> { self.sets.iter() }
}

pub fn parse<'g>(grammar: &'g Grammar, input: &[char]) -> Recognition<EarleyChart<'g>> {
    parse_with(grammar, input, &Limits::default(), &mut NoEvents)
}

pub fn parse_with<'g>(grammar: &'g Grammar,
                      input: &[char],
                      limits: &Limits,
                      events: &mut dyn ParseEvents) -> Recognition<EarleyChart<'g>>
{
    if let Err(e) = limits.check_length(input.len()) {
        let verdict = Verdict::ResourceExhausted(e);
        events.finished(&verdict);
        return Recognition::new(verdict, None);
    }
    let mut chart = EarleyChart {
        grammar,
        input: input.to_vec(),
        sets: vec![ItemSet::default(); input.len() + 1],
    };
    let verdict = match chart.run(limits.max_states, events) {
        Err(e) => Verdict::ResourceExhausted(e),
        Ok(()) if chart.accepts() => Verdict::Accepted,
        Ok(()) => Verdict::Rejected,
    };
    events.finished(&verdict);
    Recognition::new(verdict, Some(chart))
}

impl<'g> EarleyChart<'g> {
    fn run(&mut self, limit: usize, events: &mut dyn ParseEvents) -> Result<(), Exhausted> {
        let grammar = self.grammar;
        for &id in grammar.alternatives(grammar.start()) {
            let item = Item::seed(id, 0);
            if self.sets[0].push(item, limit, 0)? {
                events.seeded(grammar, &item);
            }
        }

        for i in 0..self.sets.len() {
            events.position_started(i, self.sets[i].len());
            let mut j = 0;
            while j < self.sets[i].len() {
                let item = self.sets[i].items[j];
                j += 1;
                match item.next_symbol(grammar) {
                    None => self.complete(i, item, limit, events)?,
                    Some(Symbol::NonTerm(b)) => self.predict(i, b, limit, events)?,
                    Some(Symbol::Term(c)) => self.scan(i, item, c, limit, events)?,
                }
            }
        }
        Ok(())
    }

    fn complete(&mut self, i: usize, item: Item, limit: usize, events: &mut dyn ParseEvents) -> Result<(), Exhausted> {
        let grammar = self.grammar;
        let lhs = Symbol::NonTerm(item.lhs(grammar));
        let waiting: Vec<Item> = self.sets[item.origin].items.iter()
            .filter(|w| w.next_symbol(grammar) == Some(lhs))
            .copied()
            .collect();
        for w in waiting {
            let advanced = w.advance();
            if self.sets[i].push(advanced, limit, i)? {
                events.completed(grammar, i, &advanced);
            }
        }
        Ok(())
    }

    fn predict(&mut self, i: usize, b: NonTerm, limit: usize, events: &mut dyn ParseEvents) -> Result<(), Exhausted> {
        let grammar = self.grammar;
        for &id in grammar.alternatives(b) {
            let item = Item::seed(id, i);
            if self.sets[i].push(item, limit, i)? {
                events.predicted(grammar, i, &item);
            }
        }
        Ok(())
    }

    fn scan(&mut self, i: usize, item: Item, c: char, limit: usize, events: &mut dyn ParseEvents) -> Result<(), Exhausted> {
        if self.input.get(i) != Some(&c) {
            return Ok(());
        }
        let advanced = item.advance();
        if self.sets[i + 1].push(advanced, limit, i + 1)? {
            events.scanned(self.grammar, i + 1, &advanced);
        }
        Ok(())
    }

    pub fn grammar(&self) -> &'g Grammar { self.grammar }

    pub fn input(&self) -> &[char] { &self.input }

    /// Length of the input; there is one more set than this.
    pub fn len(&self) -> usize { self.input.len() }

    pub fn is_empty(&self) -> bool { self.input.is_empty() }

    pub fn sets(&self) -> ItemSets<'_> {
        ItemSets { grammar: self.grammar, sets: &self.sets }
    }

    pub fn accepts(&self) -> bool {
        let grammar = self.grammar;
        let n = self.len();
        n > 0 && self.sets[n].items.iter().any(|item| {
            item.origin == 0 && item.is_complete(grammar) && item.lhs(grammar) == grammar.start()
        })
    }
}

#[cfg(test)]
#[path = "tests/earley.rs"]
mod tests_for_earley;
