use crate::error::EngineResult;
use crate::models::LearnedPattern;
use crate::storage::backend::PatternBackend;
use crate::storage::record::{format_record, parse_record};

/// Learned patterns cached in memory over a durable append-only backend.
pub struct PatternStore {
    backend: Box<dyn PatternBackend>,
    patterns: Vec<LearnedPattern>,
}

impl std::fmt::Debug for PatternStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternStore")
            .field("backend", &self.backend.describe())
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl PatternStore {
    /// Wrap a backend without reading it; call [`PatternStore::load_all`] to populate.
    pub fn new(backend: Box<dyn PatternBackend>) -> Self {
        Self {
            backend,
            patterns: Vec::new(),
        }
    }

    /// Rebuild the in-memory set from the backend, skipping malformed records.
    ///
    /// The cache is emptied first, so on failure the store is left empty but usable.
    pub fn load_all(&mut self) -> EngineResult<usize> {
        self.patterns.clear();
        let lines = self.backend.read_lines()?;

        for (line_num, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Ok(pattern) => self.patterns.push(pattern),
                Err(e) => log::warn!(
                    "Skipping malformed pattern record at {}:{}: {}",
                    self.backend.describe(),
                    line_num + 1,
                    e
                ),
            }
        }

        log::debug!(
            "Loaded {} learned patterns from {}",
            self.patterns.len(),
            self.backend.describe()
        );
        Ok(self.patterns.len())
    }

    /// Persist one pattern, then add it to the cache. A failed write leaves the cache untouched.
    pub fn append(&mut self, pattern: LearnedPattern) -> EngineResult<()> {
        self.backend.append_line(&format_record(&pattern))?;
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn clear_all(&mut self) -> EngineResult<()> {
        self.backend.clear()?;
        self.patterns.clear();
        Ok(())
    }

    pub fn snapshot(&self) -> &[LearnedPattern] {
        &self.patterns
    }

    /// First-match scan over the cached patterns.
    pub fn find_match(&self, value: f32, minute: u8, hour: u8) -> Option<&LearnedPattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.matches(value, minute, hour))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }
}
