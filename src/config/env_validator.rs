//! Validation of enum-like environment variables
//!
//! Invalid values fall back to a default, with a warning that lists the
//! accepted values and suggests the closest one.

use std::fmt;
use std::io::Write;

/// Rejected environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarWarning {
    pub var_name: String,
    pub value: String,
    pub suggestion: Option<String>,
    pub valid_values: Vec<String>,
}

impl fmt::Display for EnvVarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: Invalid {} value '{}'", self.var_name, self.value)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". Did you mean '{}'?", suggestion)?;
        }
        write!(f, "\nValid values: {}", self.valid_values.join(", "))
    }
}

/// Validator for one environment variable.
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Run `parser` over `value`, describing the rejection on failure.
    pub fn check<T>(&self, value: &str, parser: impl Fn(&str) -> Option<T>) -> Result<T, EnvVarWarning> {
        parser(value).ok_or_else(|| EnvVarWarning {
            var_name: self.var_name.to_string(),
            value: value.to_string(),
            suggestion: self.suggest(value).map(str::to_string),
            valid_values: self.valid_values.iter().map(|v| v.to_string()).collect(),
        })
    }

    /// Parse `value`, falling back to `default` and writing the warning
    /// to `writer` if it is rejected.
    pub fn parse_with_writer<T, W: Write>(
        &self,
        value: &str,
        parser: impl Fn(&str) -> Option<T>,
        default: T,
        writer: &mut W,
    ) -> T {
        self.check(value, parser).unwrap_or_else(|warning| {
            let _ = writeln!(writer, "{}", warning);
            default
        })
    }

    /// Closest accepted value within two edits.
    fn suggest(&self, value: &str) -> Option<&'a str> {
        let input = value.trim().to_lowercase();
        self.valid_values
            .iter()
            .map(|&valid| (valid, levenshtein(&input, valid)))
            .min_by_key(|&(_, dist)| dist)
            .filter(|&(_, dist)| dist > 0 && dist <= 2)
            .map(|(valid, _)| valid)
    }
}

/// Levenshtein distance over bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
