// WordNet adapter — read-only queries into the static noun/verb sense graph.
//
// The graph module loads the standard WNdb database files into memory and
// answers two questions: which senses does a word have, and what are a
// sense's generalization (hypernym) senses. Canonical sense names are parsed
// here at the boundary — downstream code only ever sees structured Sense
// values, never raw `lemma.pos.NN` strings.

pub mod graph;
pub mod sense;

pub use graph::WordNetGraph;
pub use sense::{PartOfSpeech, Sense};
