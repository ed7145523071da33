use crate::Result;
use crate::model::RegexLineMask;

const CONFIG_FILES: &str = r".*\.(properties|conf|cfg|ini|xml|yaml|yml|env|json)";
const SECRET_ASSIGNMENT: &str = r#"(?i)((?:password|passwd|secret|token|apikey)["']?\s*[=:]\s*["']?)[^"'\s,<]+"#;
const MASKED: &str = "****";

/// Blanks out values assigned to password-like keys in common configuration formats.
pub(super) fn mask() -> Result<RegexLineMask> {
    RegexLineMask::new(vec![CONFIG_FILES.to_string()], SECRET_ASSIGNMENT, format!("${{1}}{MASKED}"))
}
