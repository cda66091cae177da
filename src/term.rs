use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An academic term. Summer is not part of the planning year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Term {
    Fall,
    Winter,
    Spring,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown term tag '{0}' (expected F, W, or S)")]
pub struct UnknownTermTag(pub String);

impl Term {
    /// Terms in the order they occur within one academic year.
    pub const ALL: [Term; 3] = [Term::Fall, Term::Winter, Term::Spring];

    /// Single-letter tag used by catalog and schedule files.
    pub fn tag(self) -> &'static str {
        match self {
            Term::Fall => "F",
            Term::Winter => "W",
            Term::Spring => "S",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Term::Fall => "Fall",
            Term::Winter => "Winter",
            Term::Spring => "Spring",
        }
    }

    /// Position of the term within [`Term::ALL`].
    pub fn index(self) -> usize {
        match self {
            Term::Fall => 0,
            Term::Winter => 1,
            Term::Spring => 2,
        }
    }

    /// Splits a tag list such as `"F, W"` into its raw tags.
    pub fn split_tags(input: &str) -> Vec<&str> {
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Joins terms back into the `"F, W"` form.
    pub fn join_tags(terms: &[Term]) -> String {
        terms
            .iter()
            .map(|term| term.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Term {
    type Err = UnknownTermTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" | "FALL" => Ok(Term::Fall),
            "W" | "WINTER" => Ok(Term::Winter),
            "S" | "SPRING" => Ok(Term::Spring),
            _ => Err(UnknownTermTag(s.to_string())),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
