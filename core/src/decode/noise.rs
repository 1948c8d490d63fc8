use regex::Regex;

/// Whole-line patterns that may sit between documents and are dropped.
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Compiles `patterns`. Entries that fail to compile are logged and ignored;
    /// `config::validate` rejects them before this point in normal use.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Regex::new(p.as_ref()) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(pattern = p.as_ref(), error = %e, "ignoring invalid skip pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// `line` is matched without its trailing line break.
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim_end_matches(['\r', '\n']);
        self.patterns.iter().any(|re| re.is_match(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeConfig;

    #[test]
    fn default_patterns_match_timer_line() {
        let filter = NoiseFilter::from_patterns(&MergeConfig::default().skip_patterns);
        assert!(filter.is_noise("Playbook run took 0 days, 0 hours, 0 minutes, 3 seconds\n"));
        assert!(filter.is_noise("\t Playbook run took 1 days, 2 hours, 3 minutes, 4 seconds"));
        assert!(!filter.is_noise("Playbook run took a while"));
        assert!(!filter.is_noise("{\"plays\": []}"));
    }

    #[test]
    fn invalid_patterns_are_dropped() {
        let filter = NoiseFilter::from_patterns(&["(unclosed", "^ok$"]);
        assert!(filter.is_noise("ok\r\n"));
        assert!(!filter.is_noise("(unclosed"));
    }
}
