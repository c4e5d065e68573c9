use std::sync::Arc;

use symdel::lexicon::Bigram;
use symdel::speller::{Speller, SymSpell, SymSpellBuilder};

fn speller() -> Arc<SymSpell> {
    SymSpellBuilder::new()
        .unigram_lexicon(vec![
            ("where", 3000u64),
            ("is", 90000),
            ("the", 200000),
            ("love", 4000),
        ])
        .bigram_lexicon(vec![(Bigram::new("the", "love"), 800u64)])
        .build()
        .unwrap()
}

#[test]
fn correct_phrase_is_kept() {
    let speller = speller();

    let result = speller.lookup_compound("where is the love", 2, false).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].value(), "where is the love");
    assert_eq!(result[0].distance(), 0);
    assert!(result[0].frequency() > 0.0);
}

#[test]
fn extra_whitespace_is_ignored() {
    let speller = speller();

    let result = speller.lookup_compound("  where\tis  ", 2, false).unwrap();
    assert_eq!(result[0].value(), "where is");
}

#[test]
fn missing_space_is_inserted() {
    let speller = speller();

    let result = speller.lookup_compound("thelove", 2, false).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].value(), "the love");
    assert_eq!(result[0].distance(), 1);
}

#[test]
fn split_word_is_merged() {
    let speller = SymSpellBuilder::new()
        .unigram_lexicon(vec![("inspired", 1000u64), ("in", 50000), ("tired", 2000)])
        .build()
        .unwrap();

    let result = speller.lookup_compound("ins pired", 2, false).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].value(), "inspired");
    assert_eq!(result[0].distance(), 1);
}

#[test]
fn unknown_words_are_kept() {
    let speller = SymSpellBuilder::new()
        .max_dictionary_edit_distance(1)
        .unigram_lexicon(vec![
            ("was", 5000u64),
            ("assigned", 300),
            ("to", 90000),
            ("the", 200000),
        ])
        .build()
        .unwrap();

    let result = speller
        .lookup_compound("xyzzyqwv wasassigned to the", 1, false)
        .unwrap();
    assert_eq!(result[0].value(), "xyzzyqwv was assigned to the");
    assert_eq!(result[0].distance(), 1);
    assert_eq!(result[0].frequency(), 0.0);
}

fn sentence_speller() -> Arc<SymSpell> {
    SymSpellBuilder::new()
        .prefix_length(10)
        .unigram_lexicon(vec![
            ("the", 23135851162u64),
            ("of", 13151942776),
            ("and", 12997637966),
            ("in", 8469404971),
            ("for", 5933321709),
            ("is", 4705743816),
            ("this", 3228469771),
            ("you", 2996181025),
            ("can", 1242323499),
            ("he", 842847219),
            ("who", 580000000),
            ("where", 500000000),
            ("had", 480000000),
            ("love", 400000000),
            ("read", 370000000),
            ("him", 320000000),
            ("much", 300000000),
            ("past", 250000000),
            ("message", 180000000),
            ("grade", 90000000),
            ("despite", 30000000),
            ("sixth", 25000000),
            ("dated", 15000000),
            ("mistakes", 14000000),
            ("spelling", 9000000),
            ("horrible", 8000000),
            ("inspired", 7000000),
            ("couldn't", 6000000),
        ])
        .bigram_lexicon(vec![
            (Bigram::new("where", "is"), 4000000u64),
            (Bigram::new("he", "had"), 9000000),
            (Bigram::new("the", "past"), 12000000),
            (Bigram::new("sixth", "grade"), 300000),
            (Bigram::new("read", "this"), 2500000),
            (Bigram::new("the", "horrible"), 400000),
            (Bigram::new("spelling", "mistakes"), 200000),
        ])
        .build()
        .unwrap()
}

#[test]
fn sentence_with_split_and_merged_words() {
    let speller = sentence_speller();

    let result = speller
        .lookup_compound(
            "whereis th elove hehad dated forimuch of thepast who couqdn'tread in sixthgrade and ins pired him",
            2,
            false,
        )
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].value(),
        "where is the love he had dated for much of the past who couldn't read in sixth grade and inspired him"
    );
}

#[test]
fn sentence_with_misspellings() {
    let speller = sentence_speller();

    let result = speller
        .lookup_compound(
            "can yu readthis messa ge despite thehorible sppelingmsitakes",
            2,
            false,
        )
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].value(),
        "can you read this message despite the horrible spelling mistakes"
    );
}
