use crate::Result;
use crate::model::ContentMask;
use ohno::IntoAppError;
use regex::Regex;
use std::fs;
use std::path::Path;

const LOG_TARGET: &str = "   masking";

/// Compiled file patterns of an assessment unit's content masks.
pub struct MaskSet<'a> {
    masks: Vec<(&'a dyn ContentMask, Vec<Regex>)>,
}

impl core::fmt::Debug for MaskSet<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MaskSet").field("masks", &self.masks.len()).finish()
    }
}

impl<'a> MaskSet<'a> {
    /// Compiles every file pattern. A pattern must match a whole path to select a mask.
    pub fn new(masks: &'a [Box<dyn ContentMask>]) -> Result<Self> {
        let masks = masks
            .iter()
            .map(|mask| -> Result<_> {
                let patterns = mask
                    .files()
                    .iter()
                    .map(|p| Regex::new(&format!("^(?:{p})$")).into_app_err_with(|| format!("invalid content mask file pattern '{p}'")))
                    .collect::<Result<Vec<_>>>()?;
                Ok((mask.as_ref(), patterns))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { masks })
    }

    /// The first mask with a pattern matching `original_path`.
    #[must_use]
    pub fn select(&self, original_path: &str) -> Option<&'a dyn ContentMask> {
        self.masks
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(original_path)))
            .map(|(mask, _)| *mask)
    }

    /// Rewrites `copy` through the mask selected by `original_path`.
    ///
    /// Returns whether a mask was applied. Masked files are rewritten with `\n` line endings.
    pub fn apply(&self, original_path: &str, copy: &Path) -> Result<bool> {
        let Some(mask) = self.select(original_path) else {
            return Ok(false);
        };

        log::info!(target: LOG_TARGET, "Applying mask to file '{}'", copy.display());

        let text = fs::read_to_string(copy).into_app_err_with(|| format!("unable to read file '{}' for masking", copy.display()))?;
        let lines = text.lines().map(str::to_string).collect();

        let mut masked = String::with_capacity(text.len());
        for line in mask.mask(lines) {
            masked.push_str(&line);
            masked.push('\n');
        }

        fs::write(copy, masked).into_app_err_with(|| format!("unable to write masked file '{}'", copy.display()))?;
        Ok(true)
    }
}
