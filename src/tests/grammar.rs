use expect_test::expect;

use crate::tests::*;
use super::*;

fn example_by_builder() -> Grammar {
    Grammar::builder()
        .rule("X", "+")
        .rule("A", "a")
        .rule("B", "b")
        .rule("C", "c")
        .rule("S", "XT")
        .rule("T", "BV")
        .rule("V", "AE")
        .rule("V", "b")
        .rule("E", "VC")
        .build()
        .unwrap()
}

#[test]
fn builder_and_notation_agree() {
    assert_eq!(example_by_builder(), example_grammar());
}

#[test]
fn nonterminals_numbered_by_first_definition() {
    let g = example_grammar();
    let order: Vec<&str> = g.nonterms().map(|nt| g.name(nt)).collect();
    assert_eq!(order, ["X", "A", "B", "C", "S", "T", "V", "E"]);
    assert_eq!(g.start(), NonTerm(4));
    assert_eq!(g.lookup("V"), Some(NonTerm(6)));
    assert_eq!(g.lookup("Z"), None);
}

#[test]
fn alternatives_keep_insertion_order() {
    let g = example_grammar();
    let v = g.lookup("V").unwrap();
    assert_eq!(g.alternatives(v), &[ProdId(6), ProdId(7)]);
    assert_eq!(g.production(ProdId(7)).rhs(), &[Symbol::Term('b')]);
    assert_eq!(g.production(ProdId(6)).rhs(),
               &[Symbol::NonTerm(NonTerm(1)), Symbol::NonTerm(NonTerm(7))]);
}

#[test]
fn terminals() {
    let g = example_grammar();
    assert_eq!(g.terminals().into_iter().collect::<String>(), "+abc");
    assert!(g.is_binary_form());
}

#[test]
fn char_resolution_needs_a_definition() {
    // `b` is never a left-hand side, so it stays a terminal even though `B` is.
    let g = Grammar::builder().rule("S", "aB").rule("B", "b").build().unwrap();
    let b = g.lookup("B").unwrap();
    assert_eq!(g.production(ProdId(0)).rhs(), &[Symbol::Term('a'), Symbol::NonTerm(b)]);
    assert!(!g.is_binary_form());
}

#[test]
fn explicit_symbols() {
    let g = Grammar::builder()
        .start("Expr")
        .production("Expr", [nt("Term"), t('+'), nt("Expr")])
        .production("Expr", [nt("Term")])
        .production("Term", [t('x')])
        .build()
        .unwrap();
    assert_eq!(g.name(g.start()), "Expr");
    assert_eq!(g.alternatives(g.start()).len(), 2);
    assert_eq!(g.production(ProdId(0)).len(), 3);
}

#[test]
fn rhs_only_nonterminal_has_no_productions() {
    let g = Grammar::builder().production("S", [nt("A"), t('a')]).build().unwrap();
    let a = g.lookup("A").unwrap();
    assert_eq!(a, NonTerm(1));
    assert!(g.alternatives(a).is_empty());
    assert!(g.alternatives(NonTerm(99)).is_empty());
    assert_eq!(g.name(NonTerm(99)), "?");
}

#[test]
fn start_without_productions() {
    let g = Grammar::builder().rule("A", "a").build().unwrap();
    assert_eq!(g.name(g.start()), START);
    assert!(g.alternatives(g.start()).is_empty());
}

#[test]
fn notation_comments_and_start() {
    let g: Grammar = "
        # arithmetic, kind of
        %start E
        E -> E '+' E | n
    ".parse().unwrap();
    let e = g.lookup("E").unwrap();
    assert_eq!(g.start(), e);
    assert_eq!(g.production(ProdId(0)).rhs(),
               &[Symbol::NonTerm(e), Symbol::Term('+'), Symbol::NonTerm(e)]);
    assert_eq!(g.production(ProdId(1)).rhs(), &[Symbol::Term('n')]);
}

#[test]
fn notation_quotes() {
    let g: Grammar = r#"Q -> '|' "->" | 'S'"#.parse().unwrap();
    assert_eq!(g.production(ProdId(0)).rhs(),
               &[Symbol::Term('|'), Symbol::Term('-'), Symbol::Term('>')]);
    assert_eq!(g.production(ProdId(1)).rhs(), &[Symbol::Term('S')]);
}

#[test]
fn notation_accumulates_across_lines() {
    let g: Grammar = "S -> a\nS -> b | c".parse().unwrap();
    assert_eq!(g.alternatives(g.start()).len(), 3);
    assert_eq!(g.nonterm_count(), 1);
}

#[test]
fn notation_errors() {
    assert_eq!("S ->".parse::<Grammar>(), Err(GrammarError::EmptyProduction { lhs: "S".into() }));
    assert_eq!("S -> a |".parse::<Grammar>(), Err(GrammarError::EmptyProduction { lhs: "S".into() }));
    assert_eq!("S -> a\nS a b".parse::<Grammar>(),
               Err(GrammarError::MalformedRule { line: 2, text: "S a b".into() }));
    assert_eq!("S -> 'ab".parse::<Grammar>(), Err(GrammarError::UnterminatedQuote { line: 1 }));
}

#[test]
fn builder_errors() {
    assert_eq!(Grammar::builder().rule("", "a").build(), Err(GrammarError::EmptyLhs));
    assert_eq!(Grammar::builder().rule("S", "").build(),
               Err(GrammarError::EmptyProduction { lhs: "S".into() }));
}

#[test]
fn notation_round_trips() {
    let g = example_grammar();
    let again: Grammar = g.to_string().parse().unwrap();
    assert_eq!(again, g);

    let e: Grammar = "%start E\nE -> E \"'\" E | n".parse().unwrap();
    assert_eq!(e.to_string().parse::<Grammar>().unwrap(), e);

    // Q has no productions, so only a declaration keeps it a non-terminal.
    let undefined = Grammar::builder()
        .production("S", [nt("Q"), t('a')])
        .production("S", [t('a')])
        .build()
        .unwrap();
    expect![[r#"
        %nonterm S Q
        S -> Q 'a' | 'a'
    "#]].assert_eq(&undefined.to_string());
    assert_eq!(undefined.to_string().parse::<Grammar>().unwrap(), undefined);

    let interleaved: Grammar = "S -> A B\nA -> a\nB -> b\nA -> c".parse().unwrap();
    expect![[r#"
        S -> A B
        A -> 'a'
        B -> 'b'
        A -> 'c'
    "#]].assert_eq(&interleaved.to_string());
    assert_eq!(interleaved.to_string().parse::<Grammar>().unwrap(), interleaved);

    let start_last = Grammar::builder().rule("A", "a").rule("S", "AA").build().unwrap();
    assert_eq!(start_last.to_string().parse::<Grammar>().unwrap(), start_last);

    let bin: Grammar = "S -> a S b | a b".parse::<Grammar>().unwrap().to_binary_form();
    assert!(!bin.to_string().contains("%nonterm"));
    assert_eq!(bin.to_string().parse::<Grammar>().unwrap(), bin);
}

#[test]
fn declared_nonterminals() {
    let g: Grammar = "%nonterm Q\nS -> Q a | a".parse().unwrap();
    let q = g.lookup("Q").unwrap();
    assert_eq!(q, NonTerm(0));
    assert!(g.alternatives(q).is_empty());
    assert_eq!(g.production(ProdId(0)).rhs(), &[Symbol::NonTerm(q), Symbol::Term('a')]);

    // a declared single char is a non-terminal inside char rules too
    let g = Grammar::builder().nonterm("Q").rule("S", "Qa").build().unwrap();
    assert_eq!(g.production(ProdId(0)).rhs()[0], Symbol::NonTerm(NonTerm(0)));

    assert_eq!(Grammar::builder().nonterm("").rule("S", "a").build(), Err(GrammarError::EmptyName));
}

#[test]
fn symbol_conversions() {
    assert_eq!(Symbol::from('a'), Symbol::Term('a'));
    assert_eq!(Symbol::from(NonTerm(2)), Symbol::NonTerm(NonTerm(2)));
}
