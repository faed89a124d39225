// Unit tests for the WordNet graph adapter.
//
// Each test loads a small handwritten WNdb fixture from a temp directory and
// exercises sense lookup and hypernym traversal against it. The fixture
// lines follow the real index/data file formats.

use tempfile::TempDir;

use taproot::wordnet::{PartOfSpeech, WordNetGraph};

/// Write a minimal WNdb dict directory:
///
///   nouns: entity (root) <- animal <- vertebrate <- bird
///                                  <- dog (also head of domestic_dog)
///          entity <- unpleasant_woman <- frump (whose synset also lists "dog")
///   verbs: utter (root) <- {bark, chase} ("dog" is a word of the chase synset)
fn fixture_dict() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    std::fs::write(
        dir.path().join("index.noun"),
        "  1 This is a license header line and must be skipped.\n\
         entity n 1 0 1 1 00001000\n\
         animal n 1 1 @ 1 1 00005000\n\
         vertebrate n 1 1 @ 1 1 00006000\n\
         bird n 1 1 @ 1 1 00004000\n\
         dog n 2 1 @ 2 2 00002000 00003000\n\
         domestic_dog n 1 1 @ 1 1 00002000\n\
         frump n 1 1 @ 1 1 00003000\n\
         unpleasant_woman n 1 1 @ 1 1 00007000\n",
    )
    .unwrap();

    std::fs::write(
        dir.path().join("data.noun"),
        "  1 This is a license header line and must be skipped.\n\
         00001000 03 n 01 entity 0 000 | that which exists\n\
         00005000 05 n 01 animal 0 001 @ 00001000 n 0000 | a living organism\n\
         00006000 05 n 01 vertebrate 0 001 @ 00005000 n 0000 | has a backbone\n\
         00004000 05 n 01 bird 0 002 @ 00006000 n 0000 @ 00005000 n 0000 | warm-blooded and egg-laying\n\
         00002000 05 n 02 dog 0 domestic_dog 0 001 @ 00005000 n 0000 | a domesticated canine\n\
         00003000 18 n 02 frump 0 dog 0 001 @ 00007000 n 0000 | a dull unattractive person\n\
         00007000 18 n 01 unpleasant_woman 0 001 @ 00001000 n 0000 | a disagreeable woman\n",
    )
    .unwrap();

    std::fs::write(
        dir.path().join("index.verb"),
        "bark v 1 1 @ 1 1 00010000\n\
         chase v 1 1 @ 1 1 00011000\n\
         dog v 1 1 @ 1 1 00011000\n\
         utter v 1 0 1 1 00012000\n",
    )
    .unwrap();

    std::fs::write(
        dir.path().join("data.verb"),
        "00010000 32 v 01 bark 0 001 @ 00012000 v 0000 | make a barking sound\n\
         00011000 38 v 02 chase 0 dog 0 001 @ 00012000 v 0000 | go after persistently\n\
         00012000 32 v 01 utter 0 000 | emit sounds\n",
    )
    .unwrap();

    dir
}

// ============================================================
// Loading
// ============================================================

#[test]
fn load_fails_with_instructions_when_files_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = WordNetGraph::load(dir.path()).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("not found"), "got: {msg}");
    assert!(msg.contains("TAPROOT_WORDNET_DIR"), "got: {msg}");
}

#[test]
fn files_present_reflects_directory_contents() {
    let dir = fixture_dict();
    assert!(WordNetGraph::files_present(dir.path()));
    assert!(!WordNetGraph::files_present(&dir.path().join("nope")));
}

#[test]
fn license_header_lines_are_skipped() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();
    // Loading succeeded and the header lines did not become lemmas
    assert!(graph.senses("this", 5).is_empty());
}

// ============================================================
// Sense lookup
// ============================================================

#[test]
fn senses_noun_before_verb_in_database_order() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let senses = graph.senses("dog", 10);
    assert_eq!(senses.len(), 3);

    // First noun sense: the dog synset itself
    assert_eq!(senses[0].lemma, "dog");
    assert_eq!(senses[0].part_of_speech, PartOfSpeech::Noun);
    assert_eq!(senses[0].sense_index, 1);

    // Second noun sense: the frump synset, named after its head word
    assert_eq!(senses[1].lemma, "frump");
    assert_eq!(senses[1].part_of_speech, PartOfSpeech::Noun);

    // Verb sense last: the chase synset
    assert_eq!(senses[2].lemma, "chase");
    assert_eq!(senses[2].part_of_speech, PartOfSpeech::Verb);
}

#[test]
fn senses_cap_applies_across_parts_of_speech() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let senses = graph.senses("dog", 2);
    assert_eq!(senses.len(), 2);
    assert!(senses.iter().all(|s| s.part_of_speech == PartOfSpeech::Noun));
}

#[test]
fn senses_unknown_word_is_empty() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();
    assert!(graph.senses("xylophone", 5).is_empty());
}

#[test]
fn senses_normalizes_case_whitespace_and_spaces() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    assert_eq!(graph.senses("  DOG ", 10).len(), 3);

    // Multi-word lookup maps spaces to underscores; the sense is named after
    // the synset's head word
    let senses = graph.senses("Domestic Dog", 5);
    assert_eq!(senses.len(), 1);
    assert_eq!(senses[0].lemma, "dog");
    assert_eq!(senses[0].canonical(), "dog.n.01");
}

#[test]
fn senses_empty_word_is_empty() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();
    assert!(graph.senses("", 5).is_empty());
    assert!(graph.senses("   ", 5).is_empty());
}

// ============================================================
// Hypernym traversal
// ============================================================

#[test]
fn generalizations_direct_parent() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let dog = graph.senses("dog", 1).remove(0);
    let parents = graph.generalizations(&dog, 1);
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].lemma, "animal");
    assert_eq!(parents[0].part_of_speech, PartOfSpeech::Noun);
    assert_eq!(parents[0].sense_index, 1);
}

#[test]
fn generalizations_multiple_parents() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let bird = graph.senses("bird", 1).remove(0);
    let parents = graph.generalizations(&bird, 1);
    let lemmas: Vec<&str> = parents.iter().map(|s| s.lemma.as_str()).collect();
    assert_eq!(lemmas, vec!["vertebrate", "animal"]);
}

#[test]
fn generalizations_root_sense_is_empty() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let entity = graph.senses("entity", 1).remove(0);
    assert!(graph.generalizations(&entity, 1).is_empty());
    assert!(graph.generalizations(&entity, 5).is_empty());
}

#[test]
fn generalizations_depth_two_walks_ancestors_once() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    // bird -> {vertebrate, animal} -> {animal, entity}; animal is reached on
    // both levels but must appear only once
    let bird = graph.senses("bird", 1).remove(0);
    let parents = graph.generalizations(&bird, 2);
    let lemmas: Vec<&str> = parents.iter().map(|s| s.lemma.as_str()).collect();
    assert_eq!(lemmas, vec!["vertebrate", "animal", "entity"]);
}

#[test]
fn generalizations_of_verb_sense_are_verbs() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let bark = graph.senses("bark", 1).remove(0);
    assert_eq!(bark.part_of_speech, PartOfSpeech::Verb);

    let parents = graph.generalizations(&bark, 1);
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].lemma, "utter");
    assert!(parents[0].part_of_speech.is_verb());
}

#[test]
fn generalizations_depth_zero_is_empty() {
    let dir = fixture_dict();
    let graph = WordNetGraph::load(dir.path()).unwrap();

    let dog = graph.senses("dog", 1).remove(0);
    assert!(graph.generalizations(&dog, 0).is_empty());
}
