/// Key/value column aligner used to render node summaries.
///
/// Every key is padded to the width of the widest key, so
///
/// ```text
/// Section:      .text
/// Size:         40 B
/// Known size:   60 B
/// ```
use std::fmt;

#[derive(Debug, Default, Clone)]
pub struct Aligner {
    rows: Vec<(String, String)>,
}

impl Aligner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row. Chainable.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.rows.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0);
        for (i, (key, value)) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{key:<width$} {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_keys_to_widest() {
        let mut align = Aligner::new();
        align.add("Size:", "1 B").add("File Size:", "2 B");
        assert_eq!(align.to_string(), "Size:      1 B\nFile Size: 2 B");
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(Aligner::new().to_string(), "");
    }
}
