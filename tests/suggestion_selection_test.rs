use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spellkeeper::spelling::{
    Dictionary, SelectionStrategy, SuggestionEngine, levenshtein_distance, rank, suggest,
    suggest_with,
};

fn random_word(rng: &mut StdRng, alphabet: &[char], max_len: usize) -> String {
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

fn random_dictionary(rng: &mut StdRng, size: usize) -> Dictionary {
    // Small alphabet so ties and duplicates are common
    let alphabet = ['a', 'b', 'c', 'd', 'é'];
    let mut words: Vec<String> = (0..size)
        .map(|_| random_word(rng, &alphabet, 6))
        .collect();
    words.push(" ".to_string());
    Dictionary::from_words(words)
}

#[test]
fn test_strategies_agree_on_random_dictionaries() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet = ['a', 'b', 'c', 'd', 'é'];

    for _ in 0..200 {
        let size = rng.random_range(0..40);
        let dict = random_dictionary(&mut rng, size);
        let word = random_word(&mut rng, &alphabet, 6);
        let k = rng.random_range(0..8);

        let rescan = rank(&word, &dict, k, SelectionStrategy::Rescan);
        let heap = rank(&word, &dict, k, SelectionStrategy::Heap);
        assert_eq!(rescan, heap, "word {word:?}, k {k}, dict {:?}", dict.words());
    }
}

#[test]
fn test_results_are_sorted_and_distinct() {
    let mut rng = StdRng::seed_from_u64(7);
    let alphabet = ['a', 'b', 'c', 'd', 'é'];

    for _ in 0..100 {
        let dict = random_dictionary(&mut rng, 30);
        let word = random_word(&mut rng, &alphabet, 5);
        let ranked = rank(&word, &dict, 5, SelectionStrategy::Heap);

        assert!(ranked.len() <= 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
            assert_ne!(pair[0].word, pair[1].word);
        }
        for suggestion in &ranked {
            assert_eq!(suggestion.distance, levenshtein_distance(&word, &suggestion.word));
            assert!(!suggestion.word.is_empty());
        }
    }
}

#[test]
fn test_reference_dictionary() {
    let dict = Dictionary::from_words(["jupiter", "neptune", "earth", "hello", "something", "random"]);

    let suggestions = suggest("cello", &dict, 3);
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0], "hello");
    assert_eq!(suggestions, vec!["hello", "earth", "random"]);

    assert!(suggest("random", &dict, 3).is_empty());
}

#[test]
fn test_empty_dictionary_never_suggests() {
    let dict = Dictionary::new();
    for k in [0, 1, 3, 100] {
        for word in ["", "cello", "日本"] {
            assert!(suggest_with(word, &dict, k, SelectionStrategy::Rescan).is_empty());
            assert!(suggest_with(word, &dict, k, SelectionStrategy::Heap).is_empty());
        }
    }
}

#[test]
fn test_loaded_dictionary_with_blank_lines() {
    let dict = Dictionary::load_from_reader("\nhello\n\n  \nhelp\n".as_bytes()).unwrap();
    let engine = SuggestionEngine::new(dict.clone());

    assert_eq!(engine.suggest("helo"), vec!["hello", "help"]);
    // Filtering blank lines does not change suggestions
    let filtered = SuggestionEngine::new(dict.without_blank_entries());
    assert_eq!(filtered.suggest("helo"), engine.suggest("helo"));
}
