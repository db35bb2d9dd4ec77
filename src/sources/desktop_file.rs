use crate::error::ParseError;
use std::collections::HashMap;

/// A parsed `.desktop` file: `[Section]` headers holding `key=value` pairs.
#[derive(Debug, Default)]
pub struct DesktopFile {
    sections: HashMap<String, HashMap<String, String>>,
}

impl DesktopFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = &current else {
                return Err(ParseError::MissingSectionHeader(line_no));
            };
            let Some((key, value)) = line.split_once('=') else {
                return Err(ParseError::Malformed(line_no));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ParseError::Malformed(line_no));
            }

            // Later duplicates win
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self { sections })
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Boolean lookup with `default` for an absent key.
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, ParseError> {
        let Some(value) = self.get(section, key) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ParseError::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_keys_per_section() {
        let file = DesktopFile::parse(
            "# comment\n\n[Desktop Entry]\nName = Firefox\nExec=firefox %u\n\n[Desktop Action new]\nName=New Window\n",
        )
        .unwrap();

        assert_eq!(file.get("Desktop Entry", "Name"), Some("Firefox"));
        assert_eq!(file.get("Desktop Entry", "Exec"), Some("firefox %u"));
        assert_eq!(file.get("Desktop Action new", "Name"), Some("New Window"));
        assert_eq!(file.get("Desktop Entry", "Icon"), None);
        assert!(!file.has_section("Other"));
    }

    #[test]
    fn value_may_contain_equals() {
        let file = DesktopFile::parse("[Desktop Entry]\nExec=env FOO=bar app\n").unwrap();
        assert_eq!(file.get("Desktop Entry", "Exec"), Some("env FOO=bar app"));
    }

    #[test]
    fn later_duplicate_overrides() {
        let file = DesktopFile::parse("[Desktop Entry]\nName=One\nName=Two\n").unwrap();
        assert_eq!(file.get("Desktop Entry", "Name"), Some("Two"));
    }

    #[test]
    fn key_before_header_is_an_error() {
        let err = DesktopFile::parse("Name=Orphan\n[Desktop Entry]\n").unwrap_err();
        assert_eq!(err, ParseError::MissingSectionHeader(1));
    }

    #[test]
    fn line_without_delimiter_is_an_error() {
        let err = DesktopFile::parse("[Desktop Entry]\nName=Ok\ngarbage\n").unwrap_err();
        assert_eq!(err, ParseError::Malformed(3));
    }

    #[test]
    fn colon_delimiter_is_rejected() {
        let err = DesktopFile::parse("[Desktop Entry]\nName: Firefox\nExec=firefox\n").unwrap_err();
        assert_eq!(err, ParseError::Malformed(2));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let file = DesktopFile::parse("[Desktop Entry]\nname=lower\nNAME=upper\n").unwrap();
        assert_eq!(file.get("Desktop Entry", "Name"), None);
        assert_eq!(file.get("Desktop Entry", "name"), Some("lower"));
        assert_eq!(file.get("Desktop Entry", "NAME"), Some("upper"));
    }

    #[test]
    fn booleans_are_case_insensitive() {
        let file =
            DesktopFile::parse("[S]\na=TRUE\nb=False\nc=yes\nd=0\ne=maybe\n").unwrap();

        assert_eq!(file.get_bool("S", "a", false), Ok(true));
        assert_eq!(file.get_bool("S", "b", true), Ok(false));
        assert_eq!(file.get_bool("S", "c", false), Ok(true));
        assert_eq!(file.get_bool("S", "d", true), Ok(false));
        assert_eq!(file.get_bool("S", "missing", true), Ok(true));
        assert!(matches!(
            file.get_bool("S", "e", false),
            Err(ParseError::InvalidBool { .. })
        ));
    }
}
