//! Typo-variation generation.
//!
//! Produces cheap, local, single-edit perturbations of a search term: the
//! kind of slip a person makes on a keyboard. No dictionary is consulted and
//! no edit is ever applied on top of another, so the candidate space stays
//! linear in the length of the term.
//!
//! Edits operate on extended grapheme clusters, so accented and combined
//! characters are never split in half.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Neighbouring keys on a QWERTY layout.
static KEYBOARD_NEIGHBOURS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('q', "wa"),
        ('w', "qes"),
        ('e', "wrd"),
        ('r', "etf"),
        ('t', "ryg"),
        ('y', "tuh"),
        ('u', "yij"),
        ('i', "uok"),
        ('o', "ipl"),
        ('p', "ol"),
        ('a', "qsz"),
        ('s', "adwx"),
        ('d', "sfex"),
        ('f', "dgrc"),
        ('g', "fhtv"),
        ('h', "gjyb"),
        ('j', "hkun"),
        ('k', "jlim"),
        ('l', "kop"),
        ('z', "asx"),
        ('x', "zcsd"),
        ('c', "xvdf"),
        ('v', "cbfg"),
        ('b', "vngh"),
        ('n', "bmhj"),
        ('m', "njk"),
    ])
});

/// Which edit classes to generate, and how many candidates at most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptions {
    /// Remove one character
    #[serde(default = "default_true")]
    pub deletions: bool,
    /// Swap two adjacent characters
    #[serde(default = "default_true")]
    pub transpositions: bool,
    /// Replace a character with a neighbouring key
    #[serde(default = "default_true")]
    pub substitutions: bool,
    /// Type a character twice
    #[serde(default = "default_true")]
    pub duplications: bool,
    /// Stop after this many variants
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self {
            deletions: true,
            transpositions: true,
            substitutions: true,
            duplications: true,
            limit: None,
        }
    }
}

impl VariantOptions {
    /// Only character deletions
    #[must_use]
    pub fn deletions_only() -> Self {
        Self {
            transpositions: false,
            substitutions: false,
            duplications: false,
            ..Self::default()
        }
    }

    /// Builder-style method to cap the number of variants
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn default_true() -> bool {
    true
}

/// Generate typo variants of `term` with every edit class enabled.
///
/// # Example
///
/// ```
/// use artmarket_search::typo_variants;
///
/// let variants = typo_variants("monett");
/// assert!(variants.contains(&"monet".to_string()));
/// ```
#[must_use]
pub fn typo_variants(term: &str) -> Vec<String> {
    typo_variants_with(term, &VariantOptions::default())
}

/// Generate typo variants of `term`.
///
/// The term is trimmed and lowercased first. Output order is deletions,
/// transpositions, substitutions, then duplications, each scanning left to
/// right. The normalized term itself and repeated candidates are left out.
#[must_use]
pub fn typo_variants_with(term: &str, options: &VariantOptions) -> Vec<String> {
    let normalized = term.trim().to_lowercase();
    let graphemes: Vec<&str> = normalized.graphemes(true).collect();

    let mut sink = VariantSink::new(&normalized, options.limit);
    if graphemes.is_empty() {
        return sink.finish();
    }

    if options.deletions {
        for i in 0..graphemes.len() {
            if sink.is_full() {
                break;
            }
            sink.push(splice(&graphemes, i, 1, &[]));
        }
    }

    if options.transpositions {
        for i in 0..graphemes.len().saturating_sub(1) {
            if sink.is_full() {
                break;
            }
            if graphemes[i] != graphemes[i + 1] {
                sink.push(splice(&graphemes, i, 2, &[graphemes[i + 1], graphemes[i]]));
            }
        }
    }

    if options.substitutions {
        let mut buf = [0u8; 4];
        'outer: for (i, grapheme) in graphemes.iter().enumerate() {
            let Some(neighbours) = single_char(grapheme).and_then(|c| KEYBOARD_NEIGHBOURS.get(&c))
            else {
                continue;
            };
            for neighbour in neighbours.chars() {
                if sink.is_full() {
                    break 'outer;
                }
                let key: &str = neighbour.encode_utf8(&mut buf);
                sink.push(splice(&graphemes, i, 1, &[key]));
            }
        }
    }

    if options.duplications {
        for (i, grapheme) in graphemes.iter().enumerate() {
            if sink.is_full() {
                break;
            }
            if grapheme.trim().is_empty() {
                continue;
            }
            sink.push(splice(&graphemes, i, 0, &[*grapheme]));
        }
    }

    sink.finish()
}

/// Replace `len` graphemes at `at` with `with`.
fn splice(graphemes: &[&str], at: usize, len: usize, with: &[&str]) -> String {
    let mut out = String::new();
    for g in &graphemes[..at] {
        out.push_str(g);
    }
    for g in with {
        out.push_str(g);
    }
    for g in &graphemes[at + len..] {
        out.push_str(g);
    }
    out
}

fn single_char(grapheme: &str) -> Option<char> {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Ordered, de-duplicated accumulator with an optional cap.
struct VariantSink {
    seen: HashSet<String>,
    out: Vec<String>,
    limit: Option<usize>,
}

impl VariantSink {
    fn new(original: &str, limit: Option<usize>) -> Self {
        let mut seen = HashSet::new();
        seen.insert(original.to_string());
        Self {
            seen,
            out: Vec::new(),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.out.len() >= limit)
    }

    fn push(&mut self, candidate: String) {
        if self.is_full() || candidate.trim().is_empty() {
            return;
        }
        if self.seen.insert(candidate.clone()) {
            self.out.push(candidate);
        }
    }

    fn finish(self) -> Vec<String> {
        self.out
    }
}
