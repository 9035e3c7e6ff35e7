use phf::{Map, phf_map};
use std::collections::BTreeMap;
use thiserror::Error;

const LIVE_CELL: char = '#';
const DEAD_CELL: char = '_';

/// The built-in pattern library as row art, keyed by `category/name`.
///
/// `#` is a live cell, `_` a dead one. The set mirrors the classic menagerie
/// an interactive sandbox ships with: still lifes, oscillators, spaceships
/// and long-lived starter seeds.
static BUILTIN_PATTERNS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "still_lifes/block" => &[
        "##",
        "##",
    ],
    "still_lifes/beehive" => &[
        "_##_",
        "#__#",
        "_##_",
    ],
    "still_lifes/loaf" => &[
        "_##_",
        "#__#",
        "_#_#",
        "__#_",
    ],
    "oscillators/blinker" => &[
        "###",
    ],
    "oscillators/toad" => &[
        "_###",
        "###_",
    ],
    "oscillators/beacon" => &[
        "##__",
        "##__",
        "__##",
        "__##",
    ],
    "oscillators/pulsar" => &[
        "__###___###__",
        "_____________",
        "#____#_#____#",
        "#____#_#____#",
        "#____#_#____#",
        "__###___###__",
        "_____________",
        "__###___###__",
        "#____#_#____#",
        "#____#_#____#",
        "#____#_#____#",
        "_____________",
        "__###___###__",
    ],
    "spaceships/glider" => &[
        "_#_",
        "__#",
        "###",
    ],
    "spaceships/spaceship_l" => &[
        "_####",
        "#___#",
        "____#",
        "#__#_",
    ],
    "spaceships/spaceship_m" => &[
        "_#####",
        "#____#",
        "_____#",
        "#___#_",
        "__#___",
    ],
    "spaceships/spaceship_h" => &[
        "_######",
        "#_____#",
        "______#",
        "_____#_",
    ],
    "starters/acorn" => &[
        "_#_____",
        "___#___",
        "##__###",
    ],
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("A pattern template needs at least one row and one column")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Unrecognised cell character {found:?} (expected '#' or '_')")]
    BadCell { found: char },
}

/// An immutable named boolean matrix: the shape of a placeable pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    category: String,
    name: String,
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl PatternTemplate {
    /// Parses a template from row art (`#` live, `_` dead).
    pub fn from_rows<S: AsRef<str>>(
        category: &str,
        name: &str,
        rows: &[S],
    ) -> Result<Self, TemplateError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(TemplateError::Empty);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row_idx, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(TemplateError::RaggedRow {
                    row: row_idx,
                    found,
                    expected: width,
                });
            }
            for ch in row.as_ref().chars() {
                match ch {
                    LIVE_CELL => cells.push(true),
                    DEAD_CELL => cells.push(false),
                    other => return Err(TemplateError::BadCell { found: other }),
                }
            }
        }

        Ok(Self {
            category: category.to_string(),
            name: name.to_string(),
            rows: height,
            cols: width,
            cells,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Iterates over the (row, col) coordinates of the live cells.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
    }

    /// The number of live cells in the template.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// A read-only mapping `category -> name -> template`, injected at
/// construction of a session. The engine never loads or parses one itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternLibrary {
    categories: BTreeMap<String, BTreeMap<String, PatternTemplate>>,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic built-in pattern set.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        for (key, rows) in BUILTIN_PATTERNS.entries() {
            let (category, name) = key
                .split_once('/')
                .expect("built-in pattern keys are 'category/name'");
            let template = PatternTemplate::from_rows(category, name, rows)
                .expect("built-in pattern table is well-formed");
            library.insert(template);
        }
        library
    }

    /// Adds a template, replacing any previous one with the same
    /// (category, name).
    pub fn insert(&mut self, template: PatternTemplate) {
        self.categories
            .entry(template.category.clone())
            .or_default()
            .insert(template.name.clone(), template);
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&PatternTemplate> {
        self.categories.get(category)?.get(name)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Templates of one category in sorted name order, if the category exists.
    pub fn patterns_in(&self, category: &str) -> Option<impl Iterator<Item = &PatternTemplate>> {
        self.categories.get(category).map(|names| names.values())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of templates across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}
