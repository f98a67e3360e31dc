use expect_test::expect;

use crate::config::Limits;
use crate::events::NoEvents;
use crate::grammar::ProdId;
use crate::rendering::Rendered;
use crate::tests::*;
use crate::{cyk, earley};
use super::*;

#[test]
fn cyk_levels() {
    let g = example_grammar();
    let r = cyk::parse(&g, &input("+bb"));
    expect![[r#"
        level 1: {X}  {B, V}  {B, V}
        level 2: {}  {T}
        level 3: {S}
    "#]].assert_eq(&r.chart().unwrap().levels().to_string());
}

#[test]
fn earley_sets() {
    let g = example_grammar();
    let r = earley::parse(&g, &input("+bb"));
    expect![[r#"
        chart[0]:
            S -> . X T, origin: 0
            X -> . +, origin: 0
        chart[1]:
            X -> + ., origin: 0
            S -> X . T, origin: 0
            T -> . B V, origin: 1
            B -> . b, origin: 1
        chart[2]:
            B -> b ., origin: 1
            T -> B . V, origin: 1
            V -> . A E, origin: 2
            V -> . b, origin: 2
            A -> . a, origin: 2
        chart[3]:
            V -> b ., origin: 2
            T -> B V ., origin: 1
            S -> X T ., origin: 0
    "#]].assert_eq(&r.chart().rendered());
}

#[test]
fn derivation() {
    let g = example_grammar();
    let r = cyk::parse(&g, &input("+bb"));
    expect![[r#"
        S -> X T
        X -> +
        T -> B V
        B -> b
        V -> b
    "#]].assert_eq(&r.chart().unwrap().derivation().rendered());
}

#[test]
fn grammar_notation() {
    let g: Grammar = "%start E\nE -> E '+' T | T\nT -> n | \"'\"".parse().unwrap();
    expect![[r#"
        %start E
        E -> E '+' T | T
        T -> 'n' | "'"
    "#]].assert_eq(&g.to_string());
}

#[test]
fn productions_and_symbols() {
    let g = example_grammar();
    let v = g.lookup("V").unwrap();
    assert_eq!(g.with(&v).to_string(), "V");
    assert_eq!(g.with(&Symbol::Term('+')).to_string(), "+");
    assert_eq!(g.with(g.production(ProdId(6))).to_string(), "V -> A E");
    assert_eq!(g.with(&crate::earley::Item { production: ProdId(0), dot: 1, origin: 3 }).to_string(),
               "X -> + ., origin: 3");
}

#[test]
fn verdicts() {
    let g = example_grammar();
    let limits = Limits::default().with_max_states(1);
    let r = earley::parse_with(&g, &input("+bb"), &limits, &mut NoEvents);
    expect!["resource exhausted: item set 0 would exceed the limit of 1 items"]
        .assert_eq(&r.verdict().to_string());
    assert_eq!(cyk::parse(&g, &input("+b")).verdict().to_string(), "rejected");
}

#[test]
fn rendered() {
    assert_eq!(input("+baabcc").as_slice().rendered(), "+baabcc");
    let none: Option<cyk::CykChart> = None;
    assert_eq!(none.rendered(), "nil");
    let g = example_grammar();
    let r = cyk::parse(&g, &[]);
    assert_eq!(r.chart().rendered(), "");
}
