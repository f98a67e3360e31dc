//! Two chart recognizers for context-free grammars over characters.
//!
//! * [`cyk`]: bottom-up, over grammars in binary form (`A -> a`,
//!   `A -> B C`), with a derivation read back from its backpointers.
//! * [`earley`]: predict/scan/complete, over productions of any length.
//!
//! Both take a [`Grammar`] and a slice of chars and return a
//! [`Recognition`]: a [`Verdict`] plus whatever chart was built.

pub mod config;
pub mod cyk;
pub mod derivation;
pub mod earley;
pub mod events;
pub mod grammar;
pub mod normal_form;
pub mod outcome;

mod display;
mod rendering;
mod specification_rules;

pub use config::Limits;
pub use cyk::{Backpointer, CykChart, Span};
pub use derivation::{Derivation, Step};
pub use display::{Levels, WithGrammar};
pub use earley::{EarleyChart, Item, ItemSet, ItemSets};
pub use events::{EventLog, NoEvents, ParseEvents};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, NonTerm, ProdId, Production, RawSymbol, Symbol};
pub use outcome::{Exhausted, ParseFault, Recognition, Verdict};
pub use rendering::Rendered;

#[cfg(test)]
mod tests;
