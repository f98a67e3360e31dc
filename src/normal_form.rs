//! Conversion to the binary form the chart recognizer understands: every
//! production is either `A -> a` or `A -> B C`.
//!
//! Three rewrites, applied per production:
//!
//! * unit rules `A -> B` are dropped and `A` inherits the non-unit
//!   productions of everything reachable from it through unit rules;
//! * terminals inside productions of length two or more are lifted into
//!   fresh non-terminals `Xi -> c`, one per distinct terminal;
//! * productions longer than two are folded to the right through fresh
//!   non-terminals, `A -> B C D` becoming `A -> B Xi` and `Xi -> C D`.
//!
//! Fresh names are `X1`, `X2`, ... skipping any name the grammar already
//! uses. Non-terminals keep their indices; fresh ones come after them.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grammar::{Grammar, NonTerm, Production, Symbol};

struct Rewriter {
    names: Vec<String>,
    taken: HashSet<String>,
    counter: usize,
    productions: Vec<Production>,
    seen: HashSet<(NonTerm, Vec<Symbol>)>,
    lifted: HashMap<char, NonTerm>,
}

impl Rewriter {
    fn new(grammar: &Grammar) -> Self {
        Rewriter {
            names: grammar.names.clone(),
            taken: grammar.names.iter().cloned().collect(),
            counter: 0,
            productions: Vec::new(),
            seen: HashSet::new(),
            lifted: HashMap::new(),
        }
    }

    fn fresh(&mut self) -> NonTerm {
        loop {
            self.counter += 1;
            let name = format!("X{}", self.counter);
            if self.taken.insert(name.clone()) {
                self.names.push(name);
                return NonTerm(self.names.len() - 1);
            }
        }
    }

    fn lift(&mut self, c: char) -> NonTerm {
        if let Some(&nt) = self.lifted.get(&c) {
            return nt;
        }
        let nt = self.fresh();
        self.lifted.insert(c, nt);
        self.productions.push(Production::new(nt, vec![Symbol::Term(c)]));
        nt
    }

    /// `rhs` is never a unit rule.
    fn add(&mut self, lhs: NonTerm, rhs: &[Symbol]) {
        let mut rest: Vec<Symbol> = if rhs.len() == 1 {
            rhs.to_vec()
        } else {
            rhs.iter()
                .map(|&s| match s {
                    Symbol::Term(c) => Symbol::NonTerm(self.lift(c)),
                    nt => nt,
                })
                .collect()
        };
        if !self.seen.insert((lhs, rest.clone())) {
            return;
        }
        let mut lhs = lhs;
        while rest.len() > 2 {
            let helper = self.fresh();
            let head = rest.remove(0);
            self.productions.push(Production::new(lhs, vec![head, Symbol::NonTerm(helper)]));
            lhs = helper;
        }
        self.productions.push(Production::new(lhs, rest));
    }
}

impl Grammar {
    /// `nt` followed by every non-terminal reachable from it through unit
    /// rules, breadth first.
    pub fn unit_closure(&self, nt: NonTerm) -> Vec<NonTerm> {
        let mut order = vec![nt];
        let mut visited: HashSet<NonTerm> = HashSet::from([nt]);
        let mut queue = VecDeque::from([nt]);
        while let Some(a) = queue.pop_front() {
            for &id in self.alternatives(a) {
                if let [Symbol::NonTerm(b)] = *self.production(id).rhs() {
                    if visited.insert(b) {
                        order.push(b);
                        queue.push_back(b);
                    }
                }
            }
        }
        order
    }

    /// An equivalent grammar in which `is_binary_form` holds.
    pub fn to_binary_form(&self) -> Grammar {
        let mut rw = Rewriter::new(self);
        for a in self.nonterms() {
            for b in self.unit_closure(a) {
                for &id in self.alternatives(b) {
                    let rhs = self.production(id).rhs();
                    if let [Symbol::NonTerm(_)] = rhs {
                        continue;
                    }
                    rw.add(a, rhs);
                }
            }
        }
        // lifted and folded helpers were pushed mid-way; group by left-hand side
        rw.productions.sort_by_key(|p| p.lhs());
        Grammar::from_parts(rw.names, self.start(), rw.productions)
    }
}

#[cfg(test)]
#[path = "tests/normal_form.rs"]
mod tests_for_normal_form;
