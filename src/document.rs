//! Input validation for the text file N3 is asked to read.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::N3Error;

/// Most words a document may hold; both models stop at 512 tokens.
pub const MAX_WORDS: usize = 500;

/// The only extension N3 accepts.
pub const TEXT_EXTENSION: &str = "txt";

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("non-word pattern is a valid regex"));

/// A file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    word_count: usize,
}

impl SourceDocument {
    /// Path exactly as the user typed it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// Check that `filename` names a readable `.txt` file of at most [`MAX_WORDS`] words.
///
/// The extension is checked before the file is touched, so a missing `notes.md`
/// reports [`N3Error::InvalidFileType`] rather than [`N3Error::FileNotFound`].
pub fn validate(filename: &str) -> Result<SourceDocument, N3Error> {
    let path = Path::new(filename);
    if path.extension().and_then(|ext| ext.to_str()) != Some(TEXT_EXTENSION) {
        tracing::debug!(filename, "rejected extension");
        return Err(N3Error::InvalidFileType);
    }

    let words = count_words(path)?;
    tracing::debug!(filename, words, "counted words");
    if words > MAX_WORDS {
        return Err(N3Error::DocumentTooLong { words });
    }

    Ok(SourceDocument {
        path: path.to_path_buf(),
        word_count: words,
    })
}

/// Read the whole file as text, with `\r\n` and lone `\r` line endings folded to `\n`.
///
/// Any failure to open or decode the file is reported as [`N3Error::FileNotFound`].
pub fn read_document(path: &Path) -> Result<String, N3Error> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text.replace("\r\n", "\n").replace('\r', "\n")),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not read document");
            Err(N3Error::FileNotFound)
        }
    }
}

/// Word count of the file at `path`, see [`word_count`].
pub fn count_words(path: &Path) -> Result<usize, N3Error> {
    read_document(path).map(|text| word_count(&text))
}

/// Count words after turning every character that is not a letter, digit or
/// underscore into a space.
///
/// Punctuation inside a word splits it, so "didn't" counts as two words. So do
/// combining marks: a decomposed "nai\u{308}ve" is two words.
pub fn word_count(text: &str) -> usize {
    NON_WORD.replace_all(text, " ").split_whitespace().count()
}
