use std::fmt;

/// An excerpt identifier as typed by the user or derived from a file name.
///
/// `123` and `123.ly` name the same excerpt: the notation extension is
/// stripped once on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExcerptId(String);

impl ExcerptId {
    pub fn new(raw: &str, extension: &str) -> Self {
        let id = raw.strip_suffix(extension).unwrap_or(raw);
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this excerpt's notation file.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}{}", self.0, extension)
    }

    /// Whether `file_name` is a variant of this excerpt under `separator`.
    pub fn matches(&self, file_name: &str, separator: &str, extension: &str) -> bool {
        file_name.ends_with(extension) && file_name.starts_with(&format!("{}{}", self.0, separator))
    }
}

impl fmt::Display for ExcerptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `[ i/N ]` label with `i` right-aligned to the width of `N`.
pub fn progress_label(position: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("[ {:>width$}/{} ]", position, total, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_extension_once() {
        assert_eq!(ExcerptId::new("123.ly", ".ly").as_str(), "123");
        assert_eq!(ExcerptId::new("123", ".ly").as_str(), "123");
        assert_eq!(ExcerptId::new("1.ly.ly", ".ly").as_str(), "1.ly");
    }

    #[test]
    fn test_matches_requires_separator() {
        let id = ExcerptId::new("1", ".ly");
        assert!(id.matches("1_1.ly", "_", ".ly"));
        assert!(id.matches("1_2.ly", "_", ".ly"));
        assert!(!id.matches("123_1.ly", "_", ".ly"));
        assert!(!id.matches("1.ly", "_", ".ly"));
        assert!(!id.matches("1_1.pdf", "_", ".ly"));
    }

    #[test]
    fn test_matches_multi_part_variant() {
        let id = ExcerptId::new("2", ".ly");
        assert!(id.matches("2_1_2.ly", "_", ".ly"));
    }

    #[test]
    fn test_progress_label_alignment() {
        assert_eq!(progress_label(1, 5), "[ 1/5 ]");
        assert_eq!(progress_label(3, 12), "[  3/12 ]");
        assert_eq!(progress_label(12, 12), "[ 12/12 ]");
        assert_eq!(progress_label(7, 100), "[   7/100 ]");
    }
}
