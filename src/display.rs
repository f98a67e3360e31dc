use std::fmt;

use crate::cyk::{CykChart, Span};
use crate::derivation::{Derivation, Step};
use crate::earley::{Item, ItemSets};
use crate::grammar::{Grammar, NonTerm, Production, Symbol, START};

/// A value whose printed form needs the grammar's name table.
pub struct WithGrammar<'a, T: ?Sized> {
    grammar: &'a Grammar,
    value: &'a T,
}

impl Grammar {
    pub fn with<'a, T: ?Sized>(&'a self, value: &'a T) -> WithGrammar<'a, T> {
        WithGrammar { grammar: self, value }
    }
}

impl fmt::Display for WithGrammar<'_, NonTerm> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{}", self.grammar.name(*self.value))
    }
}

impl fmt::Display for WithGrammar<'_, Symbol> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match *self.value {
            Symbol::Term(c) => write!(w, "{}", c),
            Symbol::NonTerm(nt) => write!(w, "{}", self.grammar.name(nt)),
        }
    }
}

impl fmt::Display for WithGrammar<'_, Production> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{} ->", self.grammar.name(self.value.lhs()))?;
        for s in self.value.rhs() {
            write!(w, " {}", self.grammar.with(s))?;
        }
        Ok(())
    }
}

impl fmt::Display for WithGrammar<'_, Item> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let production = self.grammar.production(self.value.production);
        write!(w, "{} ->", self.grammar.name(production.lhs()))?;
        for (i, s) in production.rhs().iter().enumerate() {
            if i == self.value.dot {
                write!(w, " .")?;
            }
            write!(w, " {}", self.grammar.with(s))?;
        }
        if self.value.dot >= production.len() {
            write!(w, " .")?;
        }
        write!(w, ", origin: {}", self.value.origin)
    }
}

impl fmt::Display for WithGrammar<'_, Step> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{}", self.grammar.with(self.grammar.production(self.value.production)))
    }
}

impl fmt::Display for Derivation<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        for step in self.steps() {
            writeln!(w, "{}", self.grammar().with(step))?;
        }
        Ok(())
    }
}

// Terminals are always quoted so that reading the text back never mistakes
// one for a non-terminal of the same name.
fn write_term(w: &mut fmt::Formatter, c: char) -> fmt::Result {
    if c == '\'' { write!(w, "\"'\"") } else { write!(w, "'{}'", c) }
}

impl Grammar {
    /// Would reading the rules alone number the non-terminals as they are
    /// numbered now? Only if left-hand sides first appear in index order and
    /// every non-terminal has a production.
    fn numbered_by_rules(&self) -> bool {
        let mut next = 0;
        for p in &self.productions {
            if p.lhs().index() == next {
                next += 1;
            } else if p.lhs().index() > next {
                return false;
            }
        }
        next == self.nonterm_count()
    }
}

/// The grammar in the notation `Grammar::from_str` reads, such that reading
/// it back gives an equal grammar. Consecutive productions of one
/// non-terminal share a line; a `%nonterm` header lists every non-terminal
/// when the rules alone would number them differently.
impl fmt::Display for Grammar {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        if self.name(self.start()) != START {
            writeln!(w, "%start {}", self.name(self.start()))?;
        }
        if !self.numbered_by_rules() {
            write!(w, "%nonterm")?;
            for nt in self.nonterms() {
                write!(w, " {}", self.name(nt))?;
            }
            writeln!(w)?;
        }
        let mut current = None;
        for p in &self.productions {
            if current == Some(p.lhs()) {
                write!(w, " |")?;
            } else {
                if current.is_some() {
                    writeln!(w)?;
                }
                write!(w, "{} ->", self.name(p.lhs()))?;
                current = Some(p.lhs());
            }
            for s in p.rhs() {
                write!(w, " ")?;
                match *s {
                    Symbol::Term(c) => write_term(w, c)?,
                    Symbol::NonTerm(b) => write!(w, "{}", self.name(b))?,
                }
            }
        }
        if current.is_some() {
            writeln!(w)?;
        }
        Ok(())
    }
}

/// One line per span length, one `{..}` per start position.
pub struct Levels<'c, 'g> {
    chart: &'c CykChart<'g>,
}

impl<'g> CykChart<'g> {
    pub fn levels(&self) -> Levels<'_, 'g> { Levels { chart: self } }
}

impl fmt::Display for Levels<'_, '_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let chart = self.chart;
        let grammar = chart.grammar();
        let n = chart.len();
        for length in 1..=n {
            write!(w, "level {}:", length)?;
            for start in 0..=(n - length) {
                let mut names: Vec<&str> = chart.symbols(Span::new(start, start + length - 1))
                    .map(|nt| grammar.name(nt))
                    .collect();
                names.sort_unstable();
                let sep = if start == 0 { " " } else { "  " };
                write!(w, "{}{{{}}}", sep, names.join(", "))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl fmt::Display for ItemSets<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        for (i, set) in self.iter().enumerate() {
            writeln!(w, "chart[{}]:", i)?;
            for item in set.items() {
                writeln!(w, "    {}", self.grammar.with(item))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/display.rs"]
mod tests_for_display;
