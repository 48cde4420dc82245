//! Book metadata model.
//!
//! # Invariants
//! - `tags` preserves insertion order and holds no blank or duplicate values.
//! - `now_words` and `total_words` are refreshed from the live editor state at
//!   encode time; stored values are only what the last encode saw.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Scalar book metadata plus tag set and save statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInfo {
    pub title: String,
    pub author: String,
    pub premise: String,
    pub tagline: String,
    pub genre: String,
    pub synopsis: String,
    tags: Vec<String>,
    /// Last successful save. Volatile; excluded from canonical snapshots.
    pub last_saved: Option<DateTime<Utc>>,
    /// Whole-project word count supplied by the host.
    pub total_words: u64,
    /// Visible character count of the live editing buffer.
    pub now_words: u64,
}

impl BookInfo {
    /// Tags in author order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds one tag.
    ///
    /// Returns `false` when the trimmed tag is blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.tags.iter().any(|existing| existing == trimmed) {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }

    /// Removes one tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag.trim());
        before != self.tags.len()
    }

    /// Replaces the whole tag set, dropping blanks and later duplicates.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
    }

    /// Whether the book section is untouched enough to be left out of a file.
    ///
    /// Premise and tagline alone do not make the section worth saving.
    pub fn is_effectively_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.author.trim().is_empty()
            && self.genre.trim().is_empty()
            && self.synopsis.trim().is_empty()
            && self.tags.is_empty()
    }

    /// Records a save at `now`, truncated to the millisecond precision the
    /// file format keeps.
    pub fn stamp_saved(&mut self, now: DateTime<Utc>) {
        let truncated = now
            .duration_trunc(TimeDelta::milliseconds(1))
            .unwrap_or(now);
        self.last_saved = Some(truncated);
    }
}

/// Counts characters that are not whitespace.
pub fn count_visible_chars(text: &str) -> u64 {
    text.chars().filter(|c| !c.is_whitespace()).count() as u64
}
