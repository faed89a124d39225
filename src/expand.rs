// Topic expansion — turning extracted keywords into candidate topic labels.
//
// For each keyword: look up its top senses in the lexical graph, collect
// their generalization (hypernym) senses, and keep the lemmas that survive
// two filters — generalizations tagged as verbs are dropped, and so is any
// lemma that already appears in the keyword list (a keyword is never its own
// topic candidate). The survivors are deduplicated into an ordered set.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::wordnet::WordNetGraph;

/// Sense lookups per keyword. Bounds fan-out from ambiguous words while
/// still capturing the dominant meaning(s).
pub const DEFAULT_MAX_SENSES: usize = 2;

/// Hypernym levels to walk. 1 = direct parents only.
pub const DEFAULT_GENERALIZATION_DEPTH: usize = 1;

/// Expands keywords into a deduplicated candidate label set.
pub struct TopicExpander {
    graph: Arc<WordNetGraph>,
    /// How many senses to consider per keyword
    pub max_senses_per_keyword: usize,
    /// How many hypernym levels to walk per sense
    pub generalization_depth: usize,
}

impl TopicExpander {
    pub fn new(graph: Arc<WordNetGraph>) -> Self {
        Self {
            graph,
            max_senses_per_keyword: DEFAULT_MAX_SENSES,
            generalization_depth: DEFAULT_GENERALIZATION_DEPTH,
        }
    }

    /// Expand keywords into candidate topic labels.
    ///
    /// Keywords unknown to the graph contribute nothing, as do root senses
    /// with no hypernyms — neither is an error. The returned set iterates in
    /// lexical order, so downstream classification input is deterministic.
    pub fn expand(&self, keywords: &[String]) -> BTreeSet<String> {
        let mut candidates = BTreeSet::new();

        for keyword in keywords {
            let senses = self.graph.senses(keyword, self.max_senses_per_keyword);
            if senses.is_empty() {
                debug!(keyword = %keyword, "not in lexical graph, skipped");
                continue;
            }

            for sense in &senses {
                for parent in self.graph.generalizations(sense, self.generalization_depth) {
                    if parent.part_of_speech.is_verb() {
                        continue;
                    }
                    if keywords.contains(&parent.lemma) {
                        continue;
                    }
                    candidates.insert(parent.lemma);
                }
            }
        }

        debug!(
            keywords = keywords.len(),
            candidates = candidates.len(),
            "Expanded keywords into candidate labels"
        );
        candidates
    }
}
