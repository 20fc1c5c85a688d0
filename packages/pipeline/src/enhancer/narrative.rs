//! Persona-flavored narrative hooks.

use serde::{Deserialize, Serialize};

/// Writing persona for the emotional framing of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Adventure,
    Family,
    Luxury,
    Budget,
    Culture,
}

impl Persona {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adventure" => Some(Self::Adventure),
            "family" => Some(Self::Family),
            "luxury" => Some(Self::Luxury),
            "budget" => Some(Self::Budget),
            "culture" => Some(Self::Culture),
            _ => None,
        }
    }

    /// Opening line prepended to the introduction.
    pub fn hook(self) -> &'static str {
        match self {
            Self::Adventure => {
                "Some journeys change the way you see the world. This was one of them."
            }
            Self::Family => {
                "Traveling together turns ordinary days into the stories your family retells for years."
            }
            Self::Luxury => {
                "There is a version of every destination reserved for those who take their time with it."
            }
            Self::Budget => {
                "Proof, once again, that the best experiences rarely cost the most."
            }
            Self::Culture => {
                "Every street here carries centuries of stories, and we went looking for them."
            }
        }
    }
}
