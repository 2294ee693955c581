//! Numbered legend mapping marker labels to point names

use super::PointRecord;

/// One legend line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// 1-based position of the record in its source file
    pub index: usize,
    pub name: String,
}

impl std::fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.index, self.name)
    }
}

/// Ordered legend, one entry per record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build the legend in file order.
    ///
    /// Every record gets an entry, including ones that are not plotted for
    /// lack of coordinates, so numbering always follows file position.
    pub fn from_records(records: &[PointRecord]) -> Self {
        let entries = records
            .iter()
            .enumerate()
            .map(|(idx, record)| LegendEntry {
                index: idx + 1,
                name: record.name.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    /// Multi-line legend text, one entry per line
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
