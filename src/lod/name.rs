use std::fmt;

use crate::lod::AssemblyIssue;

pub const NAME_DELIMITER: char = ';';
pub const HIRES_TAG: &str = "hires";

/// Resolution tier of a primitive. Every tag other than `"hires"` collapses
/// into a single generic low-resolution band; the original tier string is kept
/// for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolutionTag {
    Hires,
    Lowres(String),
}

impl ResolutionTag {
    pub fn parse(token: &str) -> Self {
        if token == HIRES_TAG {
            ResolutionTag::Hires
        } else {
            ResolutionTag::Lowres(token.to_string())
        }
    }

    pub fn is_hires(&self) -> bool {
        matches!(self, ResolutionTag::Hires)
    }
}

impl fmt::Display for ResolutionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionTag::Hires => f.write_str(HIRES_TAG),
            ResolutionTag::Lowres(tier) => f.write_str(tier),
        }
    }
}

/// Splits a compound primitive name `"object;resolution"` into its parts.
/// Exactly one delimiter and two non-empty tokens are required.
pub fn parse_compound_name(name: &str) -> Result<(String, ResolutionTag), AssemblyIssue> {
    let mut tokens = name.split(NAME_DELIMITER);

    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(object), Some(resolution), None) if !object.is_empty() && !resolution.is_empty() => {
            Ok((object.to_string(), ResolutionTag::parse(resolution)))
        }
        _ => Err(AssemblyIssue::MalformedName {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hires_name() {
        let (object, tag) = parse_compound_name("pump;hires").unwrap();
        assert_eq!(object, "pump");
        assert_eq!(tag, ResolutionTag::Hires);
        assert!(tag.is_hires());
    }

    #[test]
    fn parses_lowres_name() {
        let (object, tag) = parse_compound_name("valve;lowres").unwrap();
        assert_eq!(object, "valve");
        assert_eq!(tag, ResolutionTag::Lowres("lowres".to_string()));
        assert!(!tag.is_hires());
    }

    #[test]
    fn rejects_name_without_delimiter() {
        assert_eq!(
            parse_compound_name("orphan"),
            Err(AssemblyIssue::MalformedName {
                name: "orphan".to_string()
            })
        );
    }

    #[test]
    fn rejects_repeated_delimiter() {
        assert!(parse_compound_name("pump;hires;extra").is_err());
    }

    #[test]
    fn rejects_empty_tokens() {
        assert!(parse_compound_name(";hires").is_err());
        assert!(parse_compound_name("pump;").is_err());
        assert!(parse_compound_name(";").is_err());
    }
}
