//! Package author, parsed from the common "Name <email>" form

use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A package author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  pub name: String,
  pub email: Option<String>,
}

impl Author {
  /// Parse "Jane Doe <jane@example.org>" or a bare name
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(ParseError::new("author", input, "empty string"));
    }

    if let Some(open) = trimmed.find('<') {
      let close = trimmed
        .rfind('>')
        .ok_or_else(|| ParseError::new("author", input, "unterminated email address"))?;
      if close < open {
        return Err(ParseError::new("author", input, "malformed email address"));
      }
      let name = trimmed[..open].trim();
      let email = trimmed[open + 1..close].trim();
      if name.is_empty() {
        return Err(ParseError::new("author", input, "missing name"));
      }
      Ok(Self {
        name: name.to_string(),
        email: if email.is_empty() { None } else { Some(email.to_string()) },
      })
    } else {
      Ok(Self {
        name: trimmed.to_string(),
        email: None,
      })
    }
  }
}

impl fmt::Display for Author {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.email {
      Some(email) => write!(f, "{} <{}>", self.name, email),
      None => write!(f, "{}", self.name),
    }
  }
}

impl FromStr for Author {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Author::parse(s)
  }
}

impl Serialize for Author {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_string())
  }
}

impl<'de> Deserialize<'de> for Author {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Author::parse(&s).map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_name_and_email() {
    let author = Author::parse("Jane Doe <jane@example.org>").unwrap();
    assert_eq!(author.name, "Jane Doe");
    assert_eq!(author.email.as_deref(), Some("jane@example.org"));
    assert_eq!(author.to_string(), "Jane Doe <jane@example.org>");
  }

  #[test]
  fn test_parse_bare_name() {
    let author = Author::parse("Jane Doe").unwrap();
    assert_eq!(author.name, "Jane Doe");
    assert!(author.email.is_none());
    assert_eq!(author.to_string(), "Jane Doe");
  }

  #[test]
  fn test_parse_errors() {
    assert!(Author::parse("").is_err());
    assert!(Author::parse("Jane <oops").is_err());
    assert!(Author::parse("<jane@example.org>").is_err());
  }
}
