// Ignored LaTeX commands
//
// Structural and operator commands that never name a variable. Uses a
// compile-time perfect hash set for lookups.

/// Built-in ignore list, all lowercase.
static IGNORED_COMMANDS: phf::Set<&'static str> = phf::phf_set! {
    "text", "frac", "sqrt", "left", "right", "begin", "end", "label", "mathrm",
    "operatorname", "mathbf", "boldsymbol", "cdot", "times", "sin", "cos", "tan",
    "log", "exp", "sum", "int", "prod", "lim", "min", "max", "det", "dim",
    "displaystyle", "qquad", "quad", "smallskip", "bigskip",
};

/// Commands whose braced argument is prose or markup rather than math.
static TEXT_ARGUMENT_COMMANDS: phf::Set<&'static str> = phf::phf_set! {
    "text", "mathrm", "operatorname", "label", "begin", "end",
};

/// Whether a command consumes its braced argument as plain text.
#[inline]
pub fn takes_text_argument(name: &str) -> bool {
    TEXT_ARGUMENT_COMMANDS.contains(name)
}

/// Ignore list used while classifying tokens.
///
/// Combines the built-in set with user-configured extras. Matching is
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    extra: Vec<String>,
}

impl IgnoreList {
    /// Ignore list with only the built-in commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore list with additional command names.
    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extra: names
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Check a command name (without the backslash).
    pub fn contains(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        IGNORED_COMMANDS.contains(lower.as_str()) || self.extra.iter().any(|e| *e == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_commands_ignored() {
        let ignore = IgnoreList::new();
        assert!(ignore.contains("frac"));
        assert!(ignore.contains("Sqrt"));
        assert!(ignore.contains("displaystyle"));
        assert!(!ignore.contains("alpha"));
        assert!(!ignore.contains("Delta"));
    }

    #[test]
    fn test_extra_commands() {
        let ignore = IgnoreList::with_extra(["MathCal"]);
        assert!(ignore.contains("mathcal"));
        assert!(ignore.contains("frac"));
        assert!(!ignore.contains("vec"));
    }

    #[test]
    fn test_text_argument_commands() {
        assert!(takes_text_argument("text"));
        assert!(takes_text_argument("label"));
        assert!(!takes_text_argument("frac"));
    }
}
