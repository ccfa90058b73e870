//! Library kinds a GPR library project can be built as.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// How the compiled binding is packaged.
///
/// The textual form is the value of the project's `LIBRARY_TYPE` scenario
/// variable, and is also what gets stored in the configuration cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LibraryType {
  Static,
  StaticPic,
  Relocatable,
}

impl LibraryType {
  /// Every supported kind, static first.
  pub const ALL: [LibraryType; 3] = [LibraryType::Static, LibraryType::StaticPic, LibraryType::Relocatable];

  pub fn as_str(self) -> &'static str {
    match self {
      LibraryType::Static => "static",
      LibraryType::StaticPic => "static-pic",
      LibraryType::Relocatable => "relocatable",
    }
  }
}

impl fmt::Display for LibraryType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LibraryType {
  type Err = SetupError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "static" => Ok(LibraryType::Static),
      "static-pic" => Ok(LibraryType::StaticPic),
      "relocatable" => Ok(LibraryType::Relocatable),
      other => Err(SetupError::UnsupportedLibraryType(other.to_string())),
    }
  }
}

impl TryFrom<String> for LibraryType {
  type Error = SetupError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<LibraryType> for String {
  fn from(value: LibraryType) -> Self {
    value.as_str().to_string()
  }
}

/// Comma-join library kinds for display.
pub fn join(types: &[LibraryType]) -> String {
  types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_supported_names() {
    for kind in LibraryType::ALL {
      assert_eq!(kind.as_str().parse::<LibraryType>().unwrap(), kind);
    }
  }

  #[test]
  fn rejects_unknown_name() {
    let err = "shared".parse::<LibraryType>().unwrap_err();
    assert!(matches!(err, SetupError::UnsupportedLibraryType(ref name) if name == "shared"));
  }

  #[test]
  fn serializes_as_plain_string() {
    let json = serde_json::to_string(&vec![LibraryType::Static, LibraryType::StaticPic]).unwrap();
    assert_eq!(json, r#"["static","static-pic"]"#);
  }

  #[test]
  fn deserialize_rejects_unknown_kind() {
    let result: Result<Vec<LibraryType>, _> = serde_json::from_str(r#"["static","dynamic"]"#);
    assert!(result.is_err());
  }

  #[test]
  fn join_uses_comma_space() {
    assert_eq!(join(&LibraryType::ALL), "static, static-pic, relocatable");
    assert_eq!(join(&[LibraryType::Static]), "static");
  }
}
