//! Context-free grammars over single-character terminals.
//!
//! A grammar maps each non-terminal to an ordered list of productions. The
//! order of productions (and of non-terminals, which are numbered by their
//! first appearance as a left-hand side) is the only priority in the system;
//! it affects which derivation a chart keeps, never which inputs are
//! accepted.
//!
//! Symbols are resolved once, when the grammar is built: a right-hand side
//! holds `Symbol::Term(c)` or `Symbol::NonTerm(id)`, never a bare string.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;
use std::sync::OnceLock;

use derive_more::From;
use regex::Regex;
use thiserror::Error;

/// Name of the start non-terminal unless the builder picks another one.
pub const START: &str = "S";

/// Generates `+ b a^k b c^k`.
pub const EXAMPLE_GRAMMAR: &str = "
X -> +
A -> a
B -> b
C -> c
S -> X T
T -> B V
V -> A E | b
E -> V C
";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NonTerm(pub(crate) usize);

impl NonTerm {
    pub fn index(self) -> usize { self.0 }
}

/// Index of a production in its grammar.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProdId(pub(crate) usize);

impl ProdId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, From)]
pub enum Symbol {
    Term(char),
    NonTerm(NonTerm),
}

impl Symbol {
    pub fn is_term(&self) -> bool { matches!(self, Symbol::Term(_)) }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Production {
    pub(crate) lhs: NonTerm,
    pub(crate) rhs: Vec<Symbol>,
}

impl Production {
    pub(crate) fn new(lhs: NonTerm, rhs: Vec<Symbol>) -> Self {
        Production { lhs, rhs }
    }

    pub fn lhs(&self) -> NonTerm { self.lhs }
    pub fn rhs(&self) -> &[Symbol] { &self.rhs }
    pub fn len(&self) -> usize { self.rhs.len() }

    /// `A -> a` or `A -> B C`: the only shapes the chart recognizer matches.
    pub fn is_binary_form(&self) -> bool {
        matches!(self.rhs[..],
                 [Symbol::Term(_)] |
                 [Symbol::NonTerm(_), Symbol::NonTerm(_)])
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grammar {
    pub(crate) names: Vec<String>,
    pub(crate) productions: Vec<Production>,
    pub(crate) by_lhs: Vec<Vec<ProdId>>,
    pub(crate) start: NonTerm,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder { GrammarBuilder::new() }

    pub(crate) fn from_parts(names: Vec<String>, start: NonTerm, productions: Vec<Production>) -> Self {
        let mut by_lhs = vec![Vec::new(); names.len()];
        for (i, p) in productions.iter().enumerate() {
            by_lhs[p.lhs.0].push(ProdId(i));
        }
        Grammar { names, productions, by_lhs, start }
    }

    pub fn start(&self) -> NonTerm { self.start }

    pub fn nonterms(&self) -> impl Iterator<Item=NonTerm> {
        (0..self.names.len()).map(NonTerm)
    }

    pub fn nonterm_count(&self) -> usize { self.names.len() }

    pub fn name(&self, nt: NonTerm) -> &str {
        self.names.get(nt.0).map_or("?", String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<NonTerm> {
        self.names.iter().position(|n| n == name).map(NonTerm)
    }

    pub fn productions(&self) -> &[Production] { &self.productions }

    /// `id` must come from this grammar.
    pub fn production(&self, id: ProdId) -> &Production { &self.productions[id.0] }

    /// Productions of `nt` in insertion order; empty for an undefined
    /// non-terminal.
    pub fn alternatives(&self, nt: NonTerm) -> &[ProdId] {
        self.by_lhs.get(nt.0).map_or(&[], Vec::as_slice)
    }

    pub fn terminals(&self) -> BTreeSet<char> {
        self.productions.iter()
            .flat_map(|p| p.rhs.iter())
            .filter_map(|s| match s { Symbol::Term(c) => Some(*c), Symbol::NonTerm(_) => None })
            .collect()
    }

    pub fn is_binary_form(&self) -> bool {
        self.productions.iter().all(Production::is_binary_form)
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum GrammarError {
    #[error("a rule has an empty left-hand side")]
    EmptyLhs,
    #[error("a declared non-terminal has an empty name")]
    EmptyName,
    #[error("production for `{lhs}` has no symbols")]
    EmptyProduction { lhs: String },
    #[error("line {line}: expected `A -> ...`, found `{text}`")]
    MalformedRule { line: usize, text: String },
    #[error("line {line}: unterminated quote")]
    UnterminatedQuote { line: usize },
}

/// Right-hand side symbol before resolution.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RawSymbol {
    Term(char),
    NonTerm(String),
    /// A defined non-terminal if one has this name, its chars as terminals
    /// otherwise.
    Word(String),
}

pub fn t(c: char) -> RawSymbol { RawSymbol::Term(c) }
pub fn nt(name: &str) -> RawSymbol { RawSymbol::NonTerm(name.to_string()) }

#[derive(Clone, Debug)]
enum RawRhs {
    Chars(String),
    Symbols(Vec<RawSymbol>),
}

#[derive(Clone, Debug, Default)]
pub struct GrammarBuilder {
    start: Option<String>,
    declared: Vec<String>,
    rules: Vec<(String, RawRhs)>,
}

struct Names {
    names: Vec<String>,
    index: HashMap<String, NonTerm>,
}

impl Names {
    fn intern(&mut self, name: &str) -> NonTerm {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = NonTerm(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }
}

impl GrammarBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Makes `name` a non-terminal even if it never gets a production.
    /// Declared names are numbered before any left-hand side, in order.
    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.declared.push(name.into());
        self
    }

    /// One symbol per char of `rhs`: a char naming a single-char
    /// non-terminal defined anywhere in this builder is that non-terminal,
    /// any other char is a terminal.
    pub fn rule(mut self, lhs: impl Into<String>, rhs: &str) -> Self {
        self.rules.push((lhs.into(), RawRhs::Chars(rhs.to_string())));
        self
    }

    pub fn production(mut self, lhs: impl Into<String>, rhs: impl IntoIterator<Item=RawSymbol>) -> Self {
        self.rules.push((lhs.into(), RawRhs::Symbols(rhs.into_iter().collect())));
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut names = Names { names: Vec::new(), index: HashMap::new() };
        for name in &self.declared {
            if name.is_empty() {
                return Err(GrammarError::EmptyName);
            }
            names.intern(name);
        }
        for (lhs, _) in &self.rules {
            if lhs.is_empty() {
                return Err(GrammarError::EmptyLhs);
            }
            names.intern(lhs);
        }
        let defined: HashSet<String> = self.rules.iter()
            .map(|(lhs, _)| lhs.clone())
            .chain(self.declared.iter().cloned())
            .collect();
        let single: HashSet<char> = defined.iter()
            .filter_map(|name| {
                let mut cs = name.chars();
                match (cs.next(), cs.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect();

        let mut productions = Vec::with_capacity(self.rules.len());
        for (lhs, rhs) in self.rules {
            let lhs_id = names.intern(&lhs);
            let mut symbols: Vec<Symbol> = Vec::new();
            match rhs {
                RawRhs::Chars(s) => {
                    for c in s.chars() {
                        if single.contains(&c) {
                            symbols.push(names.intern(&c.to_string()).into());
                        } else {
                            symbols.push(c.into());
                        }
                    }
                }
                RawRhs::Symbols(raw) => {
                    for r in raw {
                        match r {
                            RawSymbol::Term(c) => symbols.push(c.into()),
                            RawSymbol::NonTerm(name) => symbols.push(names.intern(&name).into()),
                            RawSymbol::Word(w) if defined.contains(&w) => symbols.push(names.intern(&w).into()),
                            RawSymbol::Word(w) => symbols.extend(w.chars().map(Symbol::from)),
                        }
                    }
                }
            }
            if symbols.is_empty() {
                return Err(GrammarError::EmptyProduction { lhs });
            }
            productions.push(Production::new(lhs_id, symbols));
        }

        let start = names.intern(self.start.as_deref().unwrap_or(START));
        Ok(Grammar::from_parts(names.names, start, productions))
    }
}

fn rule_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?P<lhs>\S+?)\s*(?:->|::=)(?P<rhs>.*)$").expect("valid regex"))
}

fn start_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*%start\s+(?P<name>\S+)\s*$").expect("valid regex"))
}

fn nonterm_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*%nonterm(?P<names>(?:\s+\S+)+)\s*$").expect("valid regex"))
}

fn rhs_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"'(?P<sq>[^']*)'|"(?P<dq>[^"]*)"|(?P<bar>\|)|(?P<bad>['"])|(?P<bare>[^\s|'"]+)"#)
            .expect("valid regex")
    })
}

/// Split one right-hand side into its `|`-separated alternatives.
fn alternatives(rhs: &str, line: usize) -> Result<Vec<Vec<RawSymbol>>, GrammarError> {
    let mut alts = Vec::new();
    let mut current = Vec::new();
    for cap in rhs_token().captures_iter(rhs) {
        if let Some(q) = cap.name("sq").or_else(|| cap.name("dq")) {
            current.extend(q.as_str().chars().map(RawSymbol::Term));
        } else if cap.name("bar").is_some() {
            alts.push(std::mem::take(&mut current));
        } else if cap.name("bad").is_some() {
            return Err(GrammarError::UnterminatedQuote { line });
        } else if let Some(word) = cap.name("bare") {
            current.push(RawSymbol::Word(word.as_str().to_string()));
        }
    }
    alts.push(current);
    Ok(alts)
}

/// Grammar notation, one rule per line:
///
/// ```text
/// %start S
/// S -> X T
/// V -> A E | b
/// Q -> '|' "->"
/// %nonterm S V Q
/// ```
///
/// Blank lines and lines starting with `#` are skipped. `%nonterm` declares
/// non-terminals ahead of the rules (fixing their numbering), which is the
/// only way to name one that has no productions.
impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = GrammarBuilder::new();
        for (i, text) in s.lines().enumerate() {
            let line = i + 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(cap) = start_line().captures(trimmed) {
                builder = builder.start(&cap["name"]);
                continue;
            }
            if let Some(cap) = nonterm_line().captures(trimmed) {
                for name in cap["names"].split_whitespace() {
                    builder = builder.nonterm(name);
                }
                continue;
            }
            let cap = rule_line().captures(trimmed)
                .ok_or_else(|| GrammarError::MalformedRule { line, text: trimmed.to_string() })?;
            let lhs = cap["lhs"].to_string();
            for alt in alternatives(&cap["rhs"], line)? {
                if alt.is_empty() {
                    return Err(GrammarError::EmptyProduction { lhs });
                }
                builder = builder.production(lhs.clone(), alt);
            }
        }
        builder.build()
    }
}

#[cfg(test)]
#[path = "tests/grammar.rs"]
mod tests_for_grammar;
