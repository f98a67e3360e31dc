use crate::*;

pub(crate) fn example_grammar() -> Grammar {
    crate::grammar::EXAMPLE_GRAMMAR.parse().unwrap()
}

pub(crate) fn input(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Every string over `alphabet` of length `1..=max_len`.
pub(crate) fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer.iter()
            .flat_map(|prefix| alphabet.iter().map(move |&c| format!("{}{}", prefix, c)))
            .collect();
        out.extend(layer.iter().cloned());
    }
    out
}

fn assert_engines_agree(g: &Grammar, alphabet: &[char], max_len: usize) {
    let language = g.sentences(max_len);
    for s in all_strings(alphabet, max_len) {
        let w = input(&s);
        let expected = language.contains(&s);
        assert_eq!(cyk::parse(g, &w).accepted(), expected, "cyk on {:?}", s);
        assert_eq!(earley::parse(g, &w).accepted(), expected, "earley on {:?}", s);
    }
}

#[test]
fn example_language() {
    let g = example_grammar();
    let expected: std::collections::BTreeSet<String> =
        ["+bb", "+babc", "+baabcc", "+baaabccc"].iter().map(|s| s.to_string()).collect();
    assert_eq!(g.sentences(9), expected);
}

#[test]
fn example_grammar_both_engines() {
    let g = example_grammar();
    for s in ["+bb", "+babc", "+baabcc"] {
        assert!(cyk::parse(&g, &input(s)).accepted(), "{}", s);
        assert!(earley::parse(&g, &input(s)).accepted(), "{}", s);
    }
    for s in ["+baabccc", "+babcc", "+b", "bb", "+bbb", "+baabc"] {
        assert!(!cyk::parse(&g, &input(s)).accepted(), "{}", s);
        assert!(!earley::parse(&g, &input(s)).accepted(), "{}", s);
    }
}

#[test]
fn engines_agree_on_example() {
    assert_engines_agree(&example_grammar(), &['+', 'a', 'b', 'c'], 5);
}

#[test]
fn engines_agree_on_ambiguous_grammar() {
    let g: Grammar = "S -> S S | a".parse().unwrap();
    assert_engines_agree(&g, &['a', 'b'], 6);
    assert_eq!(g.sentences(3).len(), 3);
}

#[test]
fn engines_agree_on_balanced_pairs() {
    let g: Grammar = "S -> S S | L R | L Q\nQ -> S R\nL -> (\nR -> )".parse().unwrap();
    assert_engines_agree(&g, &['(', ')'], 8);
    assert!(earley::parse(&g, &input("(()())")).accepted());
    assert!(!earley::parse(&g, &input("(()")).accepted());
}

#[test]
fn binary_form_feeds_cyk() {
    let g: Grammar = "S -> a S b | a b".parse().unwrap();
    let bin = g.to_binary_form();
    for s in all_strings(&['a', 'b'], 6) {
        let w = input(&s);
        assert_eq!(cyk::parse(&bin, &w).accepted(), earley::parse(&g, &w).accepted(), "{}", s);
    }
    assert!(cyk::parse(&bin, &input("aaabbb")).accepted());
}

#[test]
fn verdicts_are_repeatable() {
    let g = example_grammar();
    let w = input("+baabcc");
    let first = earley::parse(&g, &w);
    let second = earley::parse(&g, &w);
    assert_eq!(first.verdict(), second.verdict());
    assert_eq!(first.chart().rendered(), second.chart().rendered());
    assert_eq!(cyk::parse(&g, &w).chart().rendered(), cyk::parse(&g, &w).chart().rendered());
}
