//! Rewrite styles and prompt construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

/// Target register for a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteStyle {
    /// Dry, precise, journal-abstract tone.
    Scientific,
    /// Ironic internet-native tone.
    Meme,
    /// Plain conversational tone.
    #[default]
    Casual,
}

impl RewriteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteStyle::Scientific => "scientific",
            RewriteStyle::Meme => "meme",
            RewriteStyle::Casual => "casual",
        }
    }

    /// All styles, for help output.
    pub fn all() -> &'static [RewriteStyle] {
        &[
            RewriteStyle::Scientific,
            RewriteStyle::Meme,
            RewriteStyle::Casual,
        ]
    }

    fn instruction(&self) -> &'static str {
        match self {
            RewriteStyle::Scientific => {
                "Rewrite it in a dry, precise, academic register, the way a journal \
                 abstract would state the facts. No exclamations, no slang."
            }
            RewriteStyle::Meme => {
                "Rewrite it in an ironic, internet-native register with a light \
                 touch of humor. Keep it readable and do not invent events."
            }
            RewriteStyle::Casual => {
                "Rewrite it in a plain, friendly, conversational register, the way \
                 you would retell the story to a colleague."
            }
        }
    }
}

impl fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewriteStyle {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scientific" => Ok(RewriteStyle::Scientific),
            "meme" => Ok(RewriteStyle::Meme),
            "casual" => Ok(RewriteStyle::Casual),
            other => Err(RewriteError::UnknownStyle(other.to_string())),
        }
    }
}

/// Assemble the completion prompt for one article.
///
/// The rules are fixed across styles: keep the article's language, keep its
/// facts, answer with nothing but the rewritten text.
pub fn build_prompt(style: RewriteStyle, article: &str) -> String {
    format!(
        "You rewrite news articles for a Telegram channel.\n\
         {}\n\
         Rules:\n\
         - KEEP THE ORIGINAL LANGUAGE of the article.\n\
         - Keep every fact, name, number and date intact.\n\
         - Do not add commentary, headers or explanations.\n\
         - Output ONLY the rewritten article text.\n\n\
         Article:\n{}",
        style.instruction(),
        article
    )
}
