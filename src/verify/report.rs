//! Count report produced by structure verification.

use std::fmt;

/// Per-split, per-class file counts, in the order they were verified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureReport {
    /// One entry per split.
    pub splits: Vec<SplitCounts>,
}

/// File counts for the class folders of one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitCounts {
    pub split: String,
    pub classes: Vec<ClassCount>,
}

/// Number of files directly inside one class folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassCount {
    pub class: String,
    pub files: usize,
}

impl StructureReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { splits: Vec::new() }
    }

    /// Adds the counts for one split.
    pub fn push(&mut self, counts: SplitCounts) {
        self.splits.push(counts);
    }

    /// Returns the count for `split/class`, if it was recorded.
    pub fn count(&self, split: &str, class: &str) -> Option<usize> {
        self.splits
            .iter()
            .find(|s| s.split == split)?
            .classes
            .iter()
            .find(|c| c.class == class)
            .map(|c| c.files)
    }

    /// Iterates `(split, class, count)` triples in verification order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.splits.iter().flat_map(|split| {
            split
                .classes
                .iter()
                .map(move |class| (split.split.as_str(), class.class.as_str(), class.files))
        })
    }

    /// Total number of files across all splits and classes.
    pub fn total(&self) -> usize {
        self.entries().map(|(_, _, files)| files).sum()
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verified structure and counts:")?;
        for (split, class, files) in self.entries() {
            writeln!(f, "{}/{}: {} images", split, class, files)?;
        }
        Ok(())
    }
}
