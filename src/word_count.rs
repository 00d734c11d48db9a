//! Word frequency counting on top of [`OrderedCountingTree`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, trace};

use crate::OrderedCountingTree;

/// Returned by lookups for words that have not been read.
pub const WORD_NOT_FOUND: &str = "WORD NOT FOUND";

/// Counts how often each word occurs in a text.
///
/// ```
/// use counting_avl::WordCount;
/// let mut word_count = WordCount::new();
/// word_count.read("the cat, the hat.".as_bytes()).unwrap();
/// assert_eq!(word_count.count("the"), 2);
/// assert_eq!(word_count.count("hat"), 1);
/// assert_eq!(word_count.find("dog"), "WORD NOT FOUND");
/// ```
#[derive(Clone, Debug)]
pub struct WordCount {
    words: OrderedCountingTree<String>,
}

impl WordCount {
    /// Creates a counter that has not seen any words.
    pub fn new() -> Self {
        Self {
            words: OrderedCountingTree::new(WORD_NOT_FOUND.to_string()),
        }
    }

    /// Reads whitespace separated words until end of input.
    /// Bytes that are not valid UTF-8 are replaced by `U+FFFD` instead of ending the read.
    /// Returns the number of words counted.
    pub fn read<R: BufRead>(&mut self, mut reader: R) -> io::Result<usize> {
        let mut num_words = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            for token in line.split_whitespace() {
                match normalize(token) {
                    Some(word) => {
                        self.words.insert(word);
                        num_words += 1;
                    }
                    None => trace!("dropping token {:?}", token),
                }
            }
        }
        debug!(
            "counted {} words, {} distinct so far",
            num_words,
            self.words.len()
        );
        Ok(num_words)
    }

    /// Reads all words of a text file.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<usize> {
        let path = path.as_ref();
        debug!("reading words from {}", path.display());
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Writes one `<word> - <count>` line per distinct word, in tree pre-order.
    pub fn display<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut result = Ok(());
        self.words.traverse_preorder(|word, count| {
            if result.is_ok() {
                result = writeln!(out, "{} - {}", word, count);
            }
        });
        result
    }

    /// Returns how often the word has been read.
    pub fn count(&self, word: &str) -> usize {
        self.words.count(word)
    }

    /// Returns the stored word, or [`WORD_NOT_FOUND`].
    pub fn find(&self, word: &str) -> &str {
        self.words.find(word)
    }

    /// Returns the underlying tree of words and their counts.
    pub fn words(&self) -> &OrderedCountingTree<String> {
        &self.words
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips punctuation and whitespace from a token.
/// Returns `None` if nothing is left.
pub fn normalize(token: &str) -> Option<String> {
    let word: String = token
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
        .collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}
