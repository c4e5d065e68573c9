use std::sync::Arc;
use std::thread;

use hashbrown::HashSet;
use smol_str::SmolStr;
use symdel::distance::StringDistance;
use symdel::speller::error::SpellerError;
use symdel::speller::suggestion::Suggestion;
use symdel::speller::{Speller, SymSpell, SymSpellBuilder, Verbosity};

fn speller() -> Arc<SymSpell> {
    SymSpellBuilder::new()
        .unigram_lexicon(vec![
            ("summarized", 1000u64),
            ("summarize", 800),
            ("summary", 5000),
            ("where", 3000),
            ("is", 90000),
            ("the", 200000),
            ("love", 4000),
            ("cat", 10),
            ("bat", 50),
            ("hat", 30),
            ("a", 20000),
            ("i", 15000),
            ("in", 60000),
        ])
        .build()
        .unwrap()
}

fn is_sorted(suggestions: &[Suggestion]) -> bool {
    suggestions.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn word_in_dictionary() {
    let speller = speller();

    for (word, &count) in speller.unigram_lexicon().iter() {
        for verbosity in [Verbosity::Top, Verbosity::Closest].iter() {
            let result = speller.lookup(word, *verbosity, false).unwrap();
            assert_eq!(result, vec![Suggestion::new(word.clone(), 0, count as f64)]);
        }

        let result = speller.lookup(word, Verbosity::All, false).unwrap();
        assert_eq!(result[0], Suggestion::new(word.clone(), 0, count as f64));
        assert!(is_sorted(&result));
    }
}

#[test]
fn missing_letter() {
    let speller = speller();

    let result = speller.lookup("sumarized", Verbosity::All, false).unwrap();
    assert_eq!(result[0].value(), "summarized");
    assert_eq!(result[0].distance(), 1);
    assert!(result.iter().all(|s| s.distance() <= 2));
    assert!(is_sorted(&result));

    let result = speller.lookup("sumarized", Verbosity::Top, false).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].value(), "summarized");
}

#[test]
fn top_prefers_frequency() {
    let speller = speller();

    let result = speller.lookup("xat", Verbosity::Top, false).unwrap();
    assert_eq!(result, vec![Suggestion::new("bat", 1, 50.0)]);

    let result = speller.lookup("xat", Verbosity::Closest, false).unwrap();
    let values: Vec<&str> = result.iter().map(|s| s.value()).collect();
    assert_eq!(values, vec!["bat", "hat", "cat"]);
}

#[test]
fn unknown_word() {
    let speller = speller();

    assert!(speller
        .lookup("qwertyuiop", Verbosity::Top, false)
        .unwrap()
        .is_empty());

    let result = speller.lookup("qwertyuiop", Verbosity::Top, true).unwrap();
    assert_eq!(result, vec![Suggestion::new("qwertyuiop", 3, 0.0)]);
}

#[test]
fn input_longer_than_any_word() {
    let speller = speller();
    let long = "summarizedsummarized";

    assert!(speller.lookup(long, Verbosity::All, false).unwrap().is_empty());

    let result = speller
        .lookup_with_max_distance(long, Verbosity::All, 1, true)
        .unwrap();
    assert_eq!(result, vec![Suggestion::new(long, 2, 0.0)]);
}

#[test]
fn zero_distance() {
    let speller = speller();

    assert!(speller
        .lookup_with_max_distance("wher", Verbosity::All, 0, false)
        .unwrap()
        .is_empty());
    assert_eq!(
        speller
            .lookup_with_max_distance("where", Verbosity::All, 0, false)
            .unwrap(),
        vec![Suggestion::new("where", 0, 3000.0)]
    );
}

#[test]
fn errors() {
    let speller = speller();
    assert_eq!(
        speller.lookup_with_max_distance("where", Verbosity::Top, 3, false),
        Err(SpellerError::InvalidMaxEditDistance { requested: 3, max: 2 })
    );

    let empty = SymSpellBuilder::new().build().unwrap();
    assert_eq!(
        empty.lookup("where", Verbosity::Top, false),
        Err(SpellerError::NotInitialized)
    );
    assert_eq!(
        empty.lookup_compound("where is", 2, false),
        Err(SpellerError::NotInitialized)
    );
}

#[test]
fn lookup_is_repeatable() {
    let speller = speller();

    let first = speller.lookup("hwere", Verbosity::All, false).unwrap();
    let second = speller.lookup("hwere", Verbosity::All, false).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0], Suggestion::new("where", 1, 3000.0));
}

#[test]
fn edits_follow_configuration() {
    let speller = SymSpellBuilder::new()
        .max_dictionary_edit_distance(1)
        .unigram_lexicon(vec![("example", 1u64)])
        .build()
        .unwrap();

    assert_eq!(speller.edits("example", 0, HashSet::new()).len(), 7);
    assert!(speller.edits("example", 1, HashSet::new()).is_empty());

    let keys = speller.edits_prefix("example");
    assert_eq!(keys.len(), 8);
    assert!(keys.contains(&SmolStr::new("example")));

    for key in keys.iter() {
        assert!(speller
            .deletes()
            .get(key)
            .unwrap()
            .iter()
            .any(|w| w == "example"));
    }
}

struct Hamming;

impl StringDistance for Hamming {
    fn distance_with_early_stop(&self, a: &str, b: &str, max_distance: usize) -> Option<usize> {
        if a.chars().count() != b.chars().count() {
            return None;
        }

        let distance = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
        if distance <= max_distance {
            Some(distance)
        } else {
            None
        }
    }
}

#[test]
fn custom_distance() {
    let speller = SymSpellBuilder::new()
        .unigram_lexicon(vec![("ab", 10u64), ("abc", 20)])
        .string_distance(Hamming)
        .build()
        .unwrap();

    // "ba" is a transposition of "ab", which is two substitutions apart
    let result = speller.lookup("ba", Verbosity::All, false).unwrap();
    assert_eq!(result[0], Suggestion::new("ab", 2, 10.0));
    assert!(result.iter().all(|s| s.value() != "abc"));
}

#[test]
fn shared_between_threads() {
    let speller = speller();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let speller = Arc::clone(&speller);
            thread::spawn(move || {
                (0..50)
                    .map(|_| speller.lookup("sumarized", Verbosity::Closest, false).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let expected = speller.lookup("sumarized", Verbosity::Closest, false).unwrap();
    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}
