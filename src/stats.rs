use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A single completed check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Plain-text result (markup stripped).
    pub text: String,
    /// Chars of input scanned by the run.
    pub char_count: usize,
    pub timestamp: String,
}

/// Persistent usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_chars: usize,
    pub total_checks: usize,
    #[serde(default)]
    pub history: Vec<CheckRecord>,
}

impl Stats {
    /// Directory: ~/.local/share/speller-pad/
    fn dir() -> PathBuf {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("speller-pad");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("stats.json")
    }

    /// Load from disk, returning defaults if missing.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }

    /// Record a completed check run.
    pub fn record_check(&mut self, char_count: usize, text: &str) {
        self.total_checks += 1;
        self.total_chars += char_count;
        self.history.push(CheckRecord {
            text: text.to_string(),
            char_count,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_check_accumulates_totals() {
        let mut stats = Stats::default();
        stats.record_check(7, "Hello.");
        stats.record_check(12, "둘째 결과");
        assert_eq!(stats.total_checks, 2);
        assert_eq!(stats.total_chars, 19);
        assert_eq!(stats.history.len(), 2);
        assert_eq!(stats.history[0].text, "Hello.");
        assert_eq!(stats.history[1].char_count, 12);
    }
}
