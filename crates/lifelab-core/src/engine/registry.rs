use super::error::EngineError;
use super::grid::GridEngine;
use crate::core::models::geometry::CellVec;
use crate::core::models::ids::InstanceId;
use crate::core::models::pattern::PatternLibrary;
use itertools::Itertools;
use slotmap::SlotMap;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// Which grid edges an instance currently touches (or overhangs), relative
/// to its actual in-bounds extent. Used to stop keyboard drags at the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFlags {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

/// A user-placed, not-yet-committed pattern instance.
///
/// The cell matrix itself stays in the library; the instance caches only the
/// shape it needs for bounds checks and hit tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPattern {
    pub category: String,
    pub name: String,
    /// Human-readable id, `{name}_{seq}` with a per-(category, name) counter.
    pub label: String,
    /// Top-left corner in cell space (x = column, y = row).
    pub pos: CellVec,
    pub rows: usize,
    pub cols: usize,
    pub selected: bool,
    pub edges: EdgeFlags,
}

impl PlacedPattern {
    /// Bounding-box hit test in cell space.
    pub fn contains(&self, point: CellVec) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x < self.pos.x + self.cols as i32
            && point.y < self.pos.y + self.rows as i32
    }
}

/// Exclusive owner of all placed pattern instances.
///
/// Everything else refers to instances by [`InstanceId`] only; a stale id
/// simply misses and the operation is a no-op, never an error.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    grid_rows: usize,
    grid_cols: usize,
    instances: SlotMap<InstanceId, PlacedPattern>,
    placement_counts: HashMap<(String, String), usize>,
    selected: Option<InstanceId>,
    frozen: bool,
}

impl PatternRegistry {
    pub fn new(grid_rows: usize, grid_cols: usize) -> Self {
        Self {
            grid_rows,
            grid_cols,
            instances: SlotMap::with_key(),
            placement_counts: HashMap::new(),
            selected: None,
            frozen: false,
        }
    }

    /// Allocates a new instance of `category/name` at `pos`.
    ///
    /// A template that would fall entirely outside the grid is rejected;
    /// partial overhang is allowed (it is clipped at merge time).
    pub fn place(
        &mut self,
        library: &PatternLibrary,
        category: &str,
        name: &str,
        pos: CellVec,
    ) -> Result<InstanceId, EngineError> {
        let template = library
            .get(category, name)
            .ok_or_else(|| EngineError::UnknownPattern {
                category: category.to_string(),
                name: name.to_string(),
            })?;

        let rows = template.rows();
        let cols = template.cols();
        let entirely_outside = pos.x >= self.grid_cols as i32
            || pos.y >= self.grid_rows as i32
            || pos.x + cols as i32 <= 0
            || pos.y + rows as i32 <= 0;
        if entirely_outside {
            return Err(EngineError::PlacementOutOfBounds {
                category: category.to_string(),
                name: name.to_string(),
                x: pos.x,
                y: pos.y,
                rows: self.grid_rows,
                cols: self.grid_cols,
            });
        }

        let seq = self
            .placement_counts
            .entry((category.to_string(), name.to_string()))
            .or_insert(0);
        let label = format!("{}_{}", name, *seq);
        *seq += 1;

        let edges = self.edges_at(pos, rows, cols);
        let id = self.instances.insert(PlacedPattern {
            category: category.to_string(),
            name: name.to_string(),
            label,
            pos,
            rows,
            cols,
            selected: false,
            edges,
        });
        trace!(
            "Placed '{}/{}' as '{}' at ({}, {})",
            category, name, self.instances[id].label, pos.x, pos.y
        );
        Ok(id)
    }

    /// Translates an instance by `delta`, clamped per axis.
    ///
    /// An axis delta pointing past an edge the instance already touches is
    /// dropped; otherwise the landing position is clamped to that wall, so a
    /// large delta stops at the corner instead of crossing it. Returns
    /// whether the position changed. Unknown ids and a frozen registry are
    /// no-ops.
    pub fn move_by(&mut self, id: InstanceId, delta: CellVec) -> bool {
        if self.frozen {
            return false;
        }
        let (grid_rows, grid_cols) = (self.grid_rows, self.grid_cols);
        let Some(instance) = self.instances.get_mut(id) else {
            return false;
        };

        let max_x = grid_cols as i32 - instance.cols as i32;
        let max_y = grid_rows as i32 - instance.rows as i32;
        let new_pos = CellVec::new(
            clamp_axis(
                instance.pos.x,
                delta.x,
                max_x,
                instance.edges.left,
                instance.edges.right,
            ),
            clamp_axis(
                instance.pos.y,
                delta.y,
                max_y,
                instance.edges.top,
                instance.edges.bottom,
            ),
        );
        if new_pos == instance.pos {
            return false;
        }

        instance.pos = new_pos;
        let (rows, cols) = (instance.rows, instance.cols);
        instance.edges = edge_flags(new_pos, rows, cols, grid_rows, grid_cols);
        true
    }

    /// Marks an instance as the one live selection, clearing any previous
    /// one. Unknown ids are a no-op.
    pub fn select(&mut self, id: InstanceId) -> bool {
        if !self.instances.contains_key(id) {
            return false;
        }
        if let Some(previous) = self.selected.take()
            && let Some(instance) = self.instances.get_mut(previous)
        {
            instance.selected = false;
        }
        self.instances[id].selected = true;
        self.selected = Some(id);
        true
    }

    /// Clears the live selection, if any.
    pub fn deselect(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        if let Some(instance) = self.instances.get_mut(id) {
            instance.selected = false;
        }
        true
    }

    pub fn selected(&self) -> Option<InstanceId> {
        self.selected
    }

    /// The topmost instance whose bounding box contains `point`, if any.
    pub fn hit_test(&self, point: CellVec) -> Option<InstanceId> {
        self.instances
            .iter()
            .find(|(_, instance)| instance.contains(point))
            .map(|(id, _)| id)
    }

    /// OR-merges every instance into the grid engine and freezes the
    /// registry. A second call is a no-op returning `false`.
    pub fn merge_into(&mut self, library: &PatternLibrary, engine: &mut GridEngine) -> bool {
        if self.frozen {
            debug!("Registry already frozen; merge skipped");
            return false;
        }
        for (_, instance) in &self.instances {
            if let Some(template) = library.get(&instance.category, &instance.name) {
                engine.merge_pattern(instance.pos, template);
            }
        }
        self.frozen = true;
        info!(
            "Committed {} instance(s) to the grid: {}",
            self.instances.len(),
            self.instances
                .values()
                .map(|i| i.label.as_str())
                .join(", ")
        );
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Destroys every instance and unfreezes the registry. Placement
    /// sequence numbers restart as well.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.placement_counts.clear();
        self.selected = None;
        self.frozen = false;
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedPattern> {
        self.instances.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &PlacedPattern)> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn edges_at(&self, pos: CellVec, rows: usize, cols: usize) -> EdgeFlags {
        edge_flags(pos, rows, cols, self.grid_rows, self.grid_cols)
    }
}

fn edge_flags(
    pos: CellVec,
    rows: usize,
    cols: usize,
    grid_rows: usize,
    grid_cols: usize,
) -> EdgeFlags {
    EdgeFlags {
        left: pos.x <= 0,
        top: pos.y <= 0,
        right: pos.x >= grid_cols as i32 - cols as i32,
        bottom: pos.y >= grid_rows as i32 - rows as i32,
    }
}

/// One axis of a clamped move: `max` is the largest in-bounds position.
fn clamp_axis(pos: i32, delta: i32, max: i32, at_low: bool, at_high: bool) -> i32 {
    match delta {
        d if d < 0 => {
            if at_low {
                pos
            } else {
                (pos + d).max(0)
            }
        }
        d if d > 0 => {
            if at_high {
                pos
            } else {
                (pos + d).min(max)
            }
        }
        _ => pos,
    }
}
