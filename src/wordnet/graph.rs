// In-memory WordNet graph loaded from the standard WNdb database files.
//
// Parses `index.noun` / `data.noun` / `index.verb` / `data.verb` (the
// adjective and adverb files carry no hypernym structure and are not needed).
// The index files map each lemma to its synset offsets in frequency order;
// the data files hold the synsets themselves with their `@` / `@i` hypernym
// pointers. Everything is loaded once at startup and queried read-only.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::sense::{PartOfSpeech, Sense};

/// Where to get the database files when they are missing.
const WNDB_HINT: &str = "Download WNdb from https://wordnetcode.princeton.edu/3.0/WNdb-3.0.tar.gz,\n\
     extract it, and point TAPROOT_WORDNET_DIR at the extracted dict/ directory.";

/// The database files the graph needs, paired with the part of speech they cover.
const DICT_FILES: [(PartOfSpeech, &str, &str); 2] = [
    (PartOfSpeech::Noun, "index.noun", "data.noun"),
    (PartOfSpeech::Verb, "index.verb", "data.verb"),
];

/// One synset record: its member words (lowercased) and hypernym pointers.
#[derive(Debug)]
struct Synset {
    words: Vec<String>,
    hypernyms: Vec<(PartOfSpeech, u64)>,
}

/// Read-only noun/verb sense graph.
#[derive(Debug)]
pub struct WordNetGraph {
    /// lemma -> synset offsets, in the database's frequency order.
    index: HashMap<(PartOfSpeech, String), Vec<u64>>,
    synsets: HashMap<(PartOfSpeech, u64), Synset>,
}

impl WordNetGraph {
    /// Load the graph from a WNdb `dict/` directory.
    ///
    /// Fails with download instructions if the files are missing — the graph
    /// is the entire expansion mechanism, so there is no degraded mode.
    pub fn load(dict_dir: &Path) -> Result<Self> {
        let mut index = HashMap::new();
        let mut synsets = HashMap::new();

        for (pos, index_name, data_name) in DICT_FILES {
            let index_path = dict_dir.join(index_name);
            let data_path = dict_dir.join(data_name);

            if !index_path.exists() || !data_path.exists() {
                anyhow::bail!(
                    "WordNet database files not found in {}\n{}",
                    dict_dir.display(),
                    WNDB_HINT
                );
            }

            let index_text = std::fs::read_to_string(&index_path)
                .with_context(|| format!("Failed to read {}", index_path.display()))?;
            for line in index_text.lines() {
                // License header lines start with whitespace
                if line.starts_with(' ') {
                    continue;
                }
                if let Some((lemma, offsets)) = parse_index_line(line) {
                    index.insert((pos, lemma), offsets);
                }
            }

            let data_text = std::fs::read_to_string(&data_path)
                .with_context(|| format!("Failed to read {}", data_path.display()))?;
            for line in data_text.lines() {
                if line.starts_with(' ') {
                    continue;
                }
                if let Some((offset, synset)) = parse_data_line(line) {
                    synsets.insert((pos, offset), synset);
                }
            }
        }

        info!(
            lemmas = index.len(),
            synsets = synsets.len(),
            "Loaded WordNet graph from {}",
            dict_dir.display()
        );

        Ok(Self { index, synsets })
    }

    /// Whether a directory holds the database files the graph needs.
    pub fn files_present(dict_dir: &Path) -> bool {
        DICT_FILES
            .iter()
            .all(|(_, idx, data)| dict_dir.join(idx).exists() && dict_dir.join(data).exists())
    }

    /// Look up a word's senses, noun senses first, each part of speech in the
    /// database's frequency order, capped at `max`. Empty for unknown words.
    pub fn senses(&self, word: &str, max: usize) -> Vec<Sense> {
        let needle = word.trim().to_lowercase().replace(' ', "_");
        if needle.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for (pos, _, _) in DICT_FILES {
            if let Some(offsets) = self.index.get(&(pos, needle.clone())) {
                for &offset in offsets {
                    if out.len() >= max {
                        return out;
                    }
                    if let Some(sense) = self.sense_at(pos, offset) {
                        out.push(sense);
                    }
                }
            }
        }
        out.truncate(max);
        out
    }

    /// Collect a sense's generalization senses by walking hypernym pointers
    /// breadth-first, up to `depth` levels. Revisited synsets (the hierarchy
    /// is a DAG) appear once. Root senses return an empty vector.
    pub fn generalizations(&self, sense: &Sense, depth: usize) -> Vec<Sense> {
        let mut out = Vec::new();
        let mut seen: HashSet<(PartOfSpeech, u64)> = HashSet::new();
        seen.insert((sense.part_of_speech, sense.offset));

        let mut frontier = vec![(sense.part_of_speech, sense.offset)];
        for _ in 0..depth {
            let mut next = Vec::new();
            for (pos, offset) in frontier {
                let Some(synset) = self.synsets.get(&(pos, offset)) else {
                    continue;
                };
                for &(hpos, hoffset) in &synset.hypernyms {
                    if !seen.insert((hpos, hoffset)) {
                        continue;
                    }
                    if let Some(parent) = self.sense_at(hpos, hoffset) {
                        debug!(
                            child = %sense.canonical(),
                            parent = %parent.canonical(),
                            "hypernym"
                        );
                        out.push(parent);
                        next.push((hpos, hoffset));
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        out
    }

    /// Build a structured Sense for the synset at the given offset, named
    /// after the synset's head word. The sense index is the offset's 1-based
    /// position in the head word's own sense list.
    fn sense_at(&self, pos: PartOfSpeech, offset: u64) -> Option<Sense> {
        let synset = self.synsets.get(&(pos, offset))?;
        let lemma = synset.words.first()?.clone();
        let sense_index = self
            .index
            .get(&(pos, lemma.clone()))
            .and_then(|offsets| offsets.iter().position(|&o| o == offset))
            .map(|i| i as u32 + 1)
            .unwrap_or(1);

        Some(Sense {
            lemma,
            part_of_speech: pos,
            sense_index,
            offset,
        })
    }
}

/// Parse one `index.pos` line into (lemma, synset offsets).
///
/// Format: `lemma pos synset_cnt p_cnt ptr_symbol... sense_cnt tagsense_cnt
/// synset_offset...` — the offsets are always the last `synset_cnt` fields.
fn parse_index_line(line: &str) -> Option<(String, Vec<u64>)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return None;
    }
    let lemma = fields[0].to_string();
    let synset_cnt: usize = fields[2].parse().ok()?;
    if synset_cnt == 0 || fields.len() < 4 + synset_cnt {
        return None;
    }
    let offsets = fields[fields.len() - synset_cnt..]
        .iter()
        .map(|f| f.parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;
    Some((lemma, offsets))
}

/// Parse one `data.pos` line into (offset, synset).
///
/// Format: `synset_offset lex_filenum ss_type w_cnt word lex_id ... p_cnt
/// ptr...  | gloss` where w_cnt is 2-digit hex and each pointer is four
/// fields: `symbol target_offset pos source/target`. Only `@` and `@i`
/// (hypernym / instance hypernym) pointers are kept.
fn parse_data_line(line: &str) -> Option<(u64, Synset)> {
    let body = line.split('|').next()?;
    let fields: Vec<&str> = body.split_whitespace().collect();
    if fields.len() < 6 {
        return None;
    }

    let offset: u64 = fields[0].parse().ok()?;
    let w_cnt = usize::from_str_radix(fields[3], 16).ok()?;
    if w_cnt == 0 {
        return None;
    }

    let words_end = 4 + 2 * w_cnt;
    if fields.len() < words_end + 1 {
        return None;
    }
    let words: Vec<String> = fields[4..words_end]
        .iter()
        .step_by(2)
        .map(|w| w.to_lowercase())
        .collect();

    let p_cnt: usize = fields[words_end].parse().ok()?;
    let mut hypernyms = Vec::new();
    for i in 0..p_cnt {
        let base = words_end + 1 + i * 4;
        if base + 4 > fields.len() {
            break;
        }
        let symbol = fields[base];
        if symbol != "@" && symbol != "@i" {
            continue;
        }
        let target: u64 = fields[base + 1].parse().ok()?;
        let target_pos = PartOfSpeech::from_tag(fields[base + 2].chars().next()?)?;
        hypernyms.push((target_pos, target));
    }

    Some((offset, Synset { words, hypernyms }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_line_offsets_are_tail_fields() {
        let line = "dog n 2 4 @ ~ #m #p 2 2 02086723 10133978";
        let (lemma, offsets) = parse_index_line(line).unwrap();
        assert_eq!(lemma, "dog");
        assert_eq!(offsets, vec![2086723, 10133978]);
    }

    #[test]
    fn test_parse_index_line_rejects_short_lines() {
        assert!(parse_index_line("dog n 1").is_none());
        assert!(parse_index_line("").is_none());
    }

    #[test]
    fn test_parse_data_line_words_and_hypernyms() {
        let line = "02086723 05 n 03 dog 0 domestic_dog 0 Canis_familiaris 0 \
                    002 @ 02085998 n 0000 ~ 01322604 n 0000 | a domesticated carnivore";
        let (offset, synset) = parse_data_line(line).unwrap();
        assert_eq!(offset, 2086723);
        assert_eq!(synset.words, vec!["dog", "domestic_dog", "canis_familiaris"]);
        // Only the @ pointer is a hypernym; ~ is a hyponym and is dropped
        assert_eq!(synset.hypernyms, vec![(PartOfSpeech::Noun, 2085998)]);
    }

    #[test]
    fn test_parse_data_line_instance_hypernym() {
        let line = "09183971 15 n 01 everest 0 001 @i 09184llll n 0000 | highest peak";
        // Malformed offset in the pointer — the whole line is rejected rather
        // than silently keeping a dangling pointer
        assert!(parse_data_line(line).is_none());

        let line = "09183971 15 n 01 everest 0 001 @i 09184000 n 0000 | highest peak";
        let (_, synset) = parse_data_line(line).unwrap();
        assert_eq!(synset.hypernyms, vec![(PartOfSpeech::Noun, 9184000)]);
    }

    #[test]
    fn test_parse_data_line_root_synset_has_no_hypernyms() {
        let line = "00001740 03 n 01 entity 0 000 | that which is perceived";
        let (_, synset) = parse_data_line(line).unwrap();
        assert!(synset.hypernyms.is_empty());
    }

    #[test]
    fn test_parse_data_line_hex_word_count() {
        // 0x0a = 10 words
        let line = "00000001 03 n 0a a 0 b 0 c 0 d 0 e 0 f 0 g 0 h 0 i 0 j 0 000 | ten words";
        let (_, synset) = parse_data_line(line).unwrap();
        assert_eq!(synset.words.len(), 10);
    }
}
