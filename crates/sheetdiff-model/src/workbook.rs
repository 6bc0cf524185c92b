//! Named sheets as handed over by a workbook reader.

use serde::{Deserialize, Serialize};

use crate::grid::MemoryGrid;

/// A named grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet<G = MemoryGrid> {
    pub name: String,
    pub grid: G,
}

impl<G> Sheet<G> {
    pub fn new(name: impl Into<String>, grid: G) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// Ordered collection of sheets from one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook<G = MemoryGrid> {
    pub sheets: Vec<Sheet<G>>,
}

impl<G> Workbook<G> {
    pub fn new(sheets: Vec<Sheet<G>>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet<G>> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl<G> Default for Workbook<G> {
    fn default() -> Self {
        Self { sheets: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_sheets_by_exact_name() {
        let workbook = Workbook::new(vec![
            Sheet::new("Summary", MemoryGrid::new()),
            Sheet::new("Detail", MemoryGrid::new()),
        ]);
        assert!(workbook.sheet("Detail").is_some());
        assert!(workbook.sheet("detail").is_none());
        assert_eq!(workbook.sheet_names().collect::<Vec<_>>(), vec!["Summary", "Detail"]);
    }
}
