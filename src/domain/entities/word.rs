use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::entities::row::{CellValue, TableRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Anything unrecognised is treated as easy.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: i64,
    pub word: String,
    pub meaning: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub created_at: String,
    pub favorite: bool,
    pub progress: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
    pub word: String,
    pub meaning: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub created_at: String,
    pub favorite: bool,
    pub progress: i64,
}

impl TableRow for WordEntry {
    fn row_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn cell(&self, field: &str) -> CellValue {
        match field {
            "id" => CellValue::from(self.id),
            "word" => CellValue::text(&self.word),
            "meaning" => CellValue::text(&self.meaning),
            "difficulty" => CellValue::text(self.difficulty.as_str()),
            "tags" => CellValue::List(self.tags.clone()),
            "createdAt" => CellValue::text(&self.created_at),
            "favorite" => CellValue::Bool(self.favorite),
            "progress" => CellValue::from(self.progress),
            _ => CellValue::Null,
        }
    }

    /// Same columns the word store searches.
    fn search_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.word,
            self.meaning,
            self.tags.join(","),
            self.difficulty.as_str()
        )
    }
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

const DEMO_WORDS: [&str; 26] = [
    "abate", "benevolent", "candid", "daunt", "eclectic", "fervent", "galvanize", "harbinger",
    "idyllic", "jubilant", "keen", "lucid", "meticulous", "novice", "opaque", "prudent", "quaint",
    "ravenous", "serene", "tenacious", "ubiquitous", "venerate", "wistful", "xenial", "yonder",
    "zealous",
];
const DEMO_TAGS: [&str; 7] = ["vocab", "verb", "adjective", "noun", "phrasal", "formal", "slang"];

/// Deterministic sample vocabulary, one entry per day going back from `today`.
pub fn demo_words(count: usize, today: NaiveDate) -> Vec<NewWord> {
    const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    (0..count)
        .map(|i| {
            let base = DEMO_WORDS[i % DEMO_WORDS.len()];
            let word = if i >= DEMO_WORDS.len() {
                format!("{base}-{i}")
            } else {
                base.to_string()
            };
            let created = today - Days::new(i as u64);
            NewWord {
                meaning: format!("Meaning of {word} - a short description to demo the table row."),
                word,
                difficulty: DIFFICULTIES[i % DIFFICULTIES.len()],
                tags: vec![
                    DEMO_TAGS[i % DEMO_TAGS.len()].to_string(),
                    DEMO_TAGS[(i + 2) % DEMO_TAGS.len()].to_string(),
                ],
                created_at: created.format("%Y-%m-%d").to_string(),
                favorite: i % 7 == 0,
                progress: ((i as f64 + 1.0).sin() * 100.0).abs().floor() as i64,
            }
        })
        .collect()
}

impl NewWord {
    pub fn into_entry(self, id: i64) -> WordEntry {
        WordEntry {
            id,
            word: self.word,
            meaning: self.meaning,
            difficulty: self.difficulty,
            tags: self.tags,
            created_at: self.created_at,
            favorite: self.favorite,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_difficulty_falls_back_to_easy() {
        assert_eq!(Difficulty::parse_lenient("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient("extreme"), Difficulty::Easy);
    }

    #[test]
    fn tags_split_on_commas_and_semicolons() {
        assert_eq!(split_tags("verb; noun,, vocab "), vec!["verb", "noun", "vocab"]);
    }

    #[test]
    fn demo_words_are_deterministic() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date");
        let words = demo_words(30, today);

        assert_eq!(words.len(), 30);
        assert_eq!(words[0].word, "abate");
        assert_eq!(words[0].created_at, "2024-06-30");
        assert!(words[0].favorite);
        assert_eq!(words[0].progress, 84);
        assert_eq!(words[1].difficulty, Difficulty::Medium);
        assert_eq!(words[1].tags, vec!["verb", "noun"]);
        assert_eq!(words[25].word, "zealous");
        assert_eq!(words[26].word, "abate-26");
        assert_eq!(words[27].word, "benevolent-27");
    }
}
