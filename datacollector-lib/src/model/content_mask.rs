use crate::Result;
use ohno::IntoAppError;
use regex::Regex;

/// A redaction rule applied to copied configuration files.
///
/// `files` are regular expressions matched against the whole original path of a file
/// (absolute, `/` separated). The first mask with a matching pattern rewrites the file.
pub trait ContentMask: core::fmt::Debug {
    fn files(&self) -> &[String];

    fn mask(&self, lines: Vec<String>) -> Vec<String>;
}

/// Replaces every match of a regular expression on every line.
#[derive(Debug, Clone)]
pub struct RegexLineMask {
    files: Vec<String>,
    pattern: Regex,
    replacement: String,
}

impl RegexLineMask {
    pub fn new(files: Vec<String>, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            files,
            pattern: Regex::new(pattern).into_app_err_with(|| format!("invalid mask pattern '{pattern}'"))?,
            replacement: replacement.into(),
        })
    }
}

impl ContentMask for RegexLineMask {
    fn files(&self) -> &[String] {
        &self.files
    }

    fn mask(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| self.pattern.replace_all(&line, self.replacement.as_str()).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_line_mask() {
        let mask = RegexLineMask::new(vec![".*".to_string()], r"(password=)\S+", "${1}****").unwrap();
        let masked = mask.mask(vec!["user=bob".to_string(), "password=hunter2".to_string()]);
        assert_eq!(masked, vec!["user=bob", "password=****"]);
        assert_eq!(mask.files(), [".*".to_string()]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegexLineMask::new(vec![], "(", "").unwrap_err();
        assert!(err.to_string().contains("invalid mask pattern"));
    }
}
