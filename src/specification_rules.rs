//! Reference semantics: what it *means* for a grammar to generate a string,
//! computed the slow way, by searching leftmost derivations. The chart
//! recognizers are checked against these relations.

mod grammar;

#[cfg(test)]
#[path = "tests/specification_rules.rs"]
mod tests_for_specification_rules;
