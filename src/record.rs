//! Challenge records and the portfolio data file.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Placeholder content path meaning "write-up not published yet".
pub const NO_CONTENT: &str = "#";

/// Challenge difficulty as labelled in the data file.
///
/// Labels are matched case-insensitively; anything else is kept verbatim
/// in `Other` and rendered with the default badge style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    /// Parses a difficulty label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(label.trim().to_string()),
        }
    }

    /// CSS modifier class for the difficulty badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Difficulty::Easy => "badge-easy",
            Difficulty::Medium => "badge-medium",
            Difficulty::Hard => "badge-hard",
            Difficulty::Other(_) => "badge-default",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Other(String::new())
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        Difficulty::from_label(&label)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Other(label) => write!(f, "{}", label),
        }
    }
}

/// One challenge write-up entry.
///
/// Records are immutable after construction: fields are only reachable
/// through accessors, and the builder methods consume the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: u64,
    title: String,
    platform: String,
    category: String,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    date: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "writeup_path")]
    content_path: Option<String>,
}

impl Record {
    /// Creates record with the grouping keys set and everything else empty.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        platform: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            platform: platform.into(),
            category: category.into(),
            difficulty: Difficulty::default(),
            date: String::new(),
            description: String::new(),
            content_path: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content_path(mut self, path: impl Into<String>) -> Self {
        self.content_path = Some(path.into());
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Free-form month label such as "Nov 2024".
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Write-up resource path, or None when no content is published.
    ///
    /// An absent path, an empty path and the `"#"` placeholder are all the
    /// same "no content" state.
    pub fn content_path(&self) -> Option<&str> {
        self.content_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty() && *path != NO_CONTENT)
    }

    /// Returns true when the record links to write-up content.
    pub fn has_writeup(&self) -> bool {
        self.content_path().is_some()
    }
}

/// Side project listed on the projects page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default, alias = "github_url")]
    pub url: Option<String>,
}

/// Contents of the portfolio data file.
///
/// ```toml
/// owner = "forrof"
/// github = "https://github.com/forrof"
///
/// [[challenge]]
/// id = 1
/// title = "SQL Injection in Login Portal"
/// platform = "HackTheBox"
/// category = "Web"
/// difficulty = "Medium"
/// date = "Nov 2024"
/// content_path = "/writeups/sql-injection-login.md"
///
/// [[project]]
/// name = "Network Scanner"
/// tech = ["Python", "Scapy"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default, rename = "challenge")]
    challenges: Vec<Record>,
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
}

impl Portfolio {
    /// Builds portfolio from already constructed records.
    pub fn new(challenges: Vec<Record>, projects: Vec<Project>) -> Self {
        Self {
            owner: None,
            github: None,
            challenges,
            projects,
        }
    }

    /// Reads and validates portfolio data file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// contains duplicate challenge ids.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid data file: {}", path.display()))
    }

    /// Parses and validates portfolio from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error on malformed TOML or duplicate challenge ids.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(content).context("Failed to parse TOML")?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Checks that challenge ids are unique.
    ///
    /// # Errors
    ///
    /// Returns error naming the first repeated id.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for record in &self.challenges {
            if !seen.insert(record.id()) {
                bail!("Duplicate challenge id: {}", record.id());
            }
        }
        Ok(())
    }

    pub fn challenges(&self) -> &[Record] {
        &self.challenges
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}
