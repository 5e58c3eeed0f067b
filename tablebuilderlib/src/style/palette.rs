//! Fixed palettes of style tokens and the value-to-token hash.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::TableError;
use crate::Result;

/// Default rainbow palette: red, orange, yellow, green, cyan, deep sky
/// blue, blue, violet. 256-colour codes stand in where no basic name exists.
pub const RAINBOW: [&str; 8] = ["red", "214", "yellow", "green", "cyan", "39", "blue", "128"];

/// Stable 64-bit hash of a text: the first eight bytes of its SHA-256 digest.
///
/// Depends only on the text, so the same value lands on the same palette
/// slot across builds and across process restarts.
pub fn stable_hash(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// A non-empty, ordered set of visually distinct style tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    tokens: Vec<String>,
}

impl Palette {
    /// Create a palette. Fails if `tokens` is empty.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(TableError::EmptyPalette);
        }
        Ok(Self { tokens })
    }

    /// The default rainbow palette
    pub fn rainbow() -> Self {
        Self {
            tokens: RAINBOW.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; palettes are never empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Palette slot for a text: `stable_hash(text) mod len`.
    pub fn index_for(&self, text: &str) -> usize {
        (stable_hash(text) % self.tokens.len() as u64) as usize
    }

    /// Token for a text. Distinct texts may share a token.
    pub fn token_for(&self, text: &str) -> &str {
        &self.tokens[self.index_for(text)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::rainbow()
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = TableError;

    fn try_from(tokens: Vec<String>) -> Result<Self> {
        Palette::new(tokens)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.tokens
    }
}
