// Copyright (C) 2020-2026 Andy Kurnia.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

// The dictionary oracle. Opaque beyond its boolean answer; unknown words are
// false, never an error.
pub trait Lexicon {
    fn is_word(&self, word: &str) -> bool;
}

impl<T: Lexicon + ?Sized> Lexicon for &T {
    #[inline(always)]
    fn is_word(&self, word: &str) -> bool {
        (*self).is_word(word)
    }
}

pub struct SetLexicon {
    words: HashSet<String>,
}

impl SetLexicon {
    pub fn new() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    // one word per line, anything else on the line is ignored.
    pub fn from_lines(lines: &str) -> Self {
        Self {
            words: lines
                .lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    pub fn from_words<'a, II: IntoIterator<Item = &'a str>>(words: II) -> Self {
        Self {
            words: words.into_iter().map(|word| word.to_lowercase()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for SetLexicon {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon for SetLexicon {
    #[inline(always)]
    fn is_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

// Memoizes oracle answers within one generation/validation pass so the same
// word is never asked twice.
pub struct MemoLexicon<'a> {
    inner: &'a dyn Lexicon,
    seen: RefCell<HashMap<String, bool>>,
}

impl<'a> MemoLexicon<'a> {
    pub fn new(inner: &'a dyn Lexicon) -> Self {
        Self {
            inner,
            seen: RefCell::new(HashMap::new()),
        }
    }

    pub fn num_queries(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Lexicon for MemoLexicon<'_> {
    fn is_word(&self, word: &str) -> bool {
        let key = word.to_lowercase();
        if let Some(&known) = self.seen.borrow().get(&key) {
            return known;
        }
        let answer = self.inner.is_word(&key);
        self.seen.borrow_mut().insert(key, answer);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_lookup() {
        let lexicon = SetLexicon::from_words(["CAT", "racing"]);
        assert!(lexicon.is_word("cat"));
        assert!(lexicon.is_word("CAT"));
        assert!(lexicon.is_word("Racing"));
        assert!(!lexicon.is_word("dog"));
        assert!(!lexicon.is_word(""));
    }

    #[test]
    fn from_lines_trims_and_skips_blanks() {
        let lexicon = SetLexicon::from_lines("cat\n\n  dog  \nrat\n");
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.is_word("dog"));
    }

    #[test]
    fn memo_asks_inner_once_per_word() {
        struct Counting {
            hits: RefCell<usize>,
        }
        impl Lexicon for Counting {
            fn is_word(&self, word: &str) -> bool {
                *self.hits.borrow_mut() += 1;
                word == "cat"
            }
        }
        let counting = Counting {
            hits: RefCell::new(0),
        };
        let memo = MemoLexicon::new(&counting);
        assert!(memo.is_word("cat"));
        assert!(memo.is_word("CAT"));
        assert!(!memo.is_word("dog"));
        assert!(!memo.is_word("dog"));
        assert_eq!(*counting.hits.borrow(), 2);
        assert_eq!(memo.num_queries(), 2);
    }
}
