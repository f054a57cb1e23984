use std::fs;
use std::path::Path;

use rand::Rng;
use rand::rngs::SmallRng;
use rust_embed::Embed;
use serde::Deserialize;

use crate::error::PassageError;
use crate::generator::{TextSource, collapse_whitespace};

#[derive(Embed)]
#[folder = "assets/passages/"]
struct PassageAssets;

const BUNDLED_POOL: &str = "sample.toml";

#[derive(Deserialize)]
struct PassageFile {
    passages: Vec<String>,
}

/// A validated, non-empty set of single-line paragraphs to type.
#[derive(Clone, Debug)]
pub struct PassagePool {
    passages: Vec<String>,
}

impl PassagePool {
    /// Line breaks and tabs inside a passage become single spaces, since the
    /// session screen binds Enter and Tab to other actions.
    pub fn new(passages: Vec<String>) -> Result<Self, PassageError> {
        if passages.is_empty() {
            return Err(PassageError::EmptyPool);
        }
        let passages: Vec<String> = passages.into_iter().map(|p| collapse_whitespace(&p)).collect();
        if let Some(index) = passages.iter().position(|p| p.is_empty()) {
            return Err(PassageError::BlankPassage { index });
        }
        Ok(Self { passages })
    }

    /// The paragraphs shipped inside the binary.
    pub fn bundled() -> Result<Self, PassageError> {
        let file = PassageAssets::get(BUNDLED_POOL).ok_or(PassageError::MissingAsset(BUNDLED_POOL))?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        Self::from_toml(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, PassageError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, PassageError> {
        let file: PassageFile = toml::from_str(content)?;
        Self::new(file.passages)
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }
}

/// Draws passages uniformly at random, repeats allowed.
pub struct PassageGenerator {
    pool: PassagePool,
    rng: SmallRng,
    last_idx: Option<usize>,
}

impl PassageGenerator {
    pub fn new(pool: PassagePool, rng: SmallRng) -> Self {
        Self {
            pool,
            rng,
            last_idx: None,
        }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_idx
    }
}

impl TextSource for PassageGenerator {
    fn next_text(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.pool.passages.len());
        self.last_idx = Some(idx);
        self.pool.passages[idx].clone()
    }
}
