use std::collections::BTreeSet;

use serde::Serialize;

use crate::store::PointCloudStore;
use crate::types::{GroupId, Point, PointId};

/// Rough diagonal of the embedding cube, used to normalise centroid distance
pub const MAX_DIAGONAL: f32 = 24.2;

/// Single selection plus hover. A point and a group are never selected together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_point: Option<PointId>,
    pub selected_group: Option<GroupId>,
    pub hovered_point: Option<PointId>,
}

/// Two groups picked for side-by-side comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComparisonState {
    pub group_a: Option<GroupId>,
    pub group_b: Option<GroupId>,
}

impl ComparisonState {
    pub fn is_full(&self) -> bool {
        self.group_a.is_some() && self.group_b.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.group_a.is_none() && self.group_b.is_none()
    }

    /// Next state after clicking `group`:
    /// clicking A clears both, clicking B clears B, an empty A is filled,
    /// anything else replaces B.
    pub fn after_click(self, group: GroupId) -> Self {
        match (self.group_a, self.group_b) {
            (Some(a), _) if a == group => Self::default(),
            (a, Some(b)) if b == group => Self {
                group_a: a,
                group_b: None,
            },
            (None, _) => Self {
                group_a: Some(group),
                group_b: None,
            },
            (a, _) => Self {
                group_a: a,
                group_b: Some(group),
            },
        }
    }
}

/// Spatial and taxonomic overlap between the two compared groups
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub group_a: GroupId,
    pub group_b: GroupId,
    /// Centroid distance, rounded to 2 decimals
    pub distance: f32,
    /// 100 for coincident centroids, falling to 0 at [`MAX_DIAGONAL`] and beyond
    pub spatial_proximity: u32,
    pub shared_categories: Vec<String>,
    pub shared_subcategories: Vec<String>,
}

impl ComparisonMetrics {
    /// `None` unless both groups are visible in `store`
    pub fn measure(store: &PointCloudStore, a: GroupId, b: GroupId) -> Option<Self> {
        let group_a = store.group(a)?;
        let group_b = store.group(b)?;

        let raw = group_a.centroid.distance(group_b.centroid);
        let spatial_proximity = (100.0 * (1.0 - raw / MAX_DIAGONAL)).round().max(0.0) as u32;

        Some(Self {
            group_a: a,
            group_b: b,
            distance: (raw * 100.0).round() / 100.0,
            spatial_proximity,
            shared_categories: shared_labels(store, a, b, |p| p.category.as_str()),
            shared_subcategories: shared_labels(store, a, b, |p| p.subcategory.as_str()),
        })
    }
}

fn member_labels<F>(store: &PointCloudStore, group: GroupId, field: F) -> BTreeSet<String>
where
    F: Fn(&Point) -> &str,
{
    store
        .all_points()
        .iter()
        .filter(|p| p.group_id == Some(group))
        .map(|p| field(p))
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sorted labels present among the members of both groups
fn shared_labels<F>(store: &PointCloudStore, a: GroupId, b: GroupId, field: F) -> Vec<String>
where
    F: Fn(&Point) -> &str + Copy,
{
    let left = member_labels(store, a, field);
    let right = member_labels(store, b, field);
    left.intersection(&right).cloned().collect()
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selection: SelectionState,
    comparison: ComparisonState,
}

impl SelectionController {
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn comparison(&self) -> ComparisonState {
        self.comparison
    }

    pub fn select_point(&mut self, id: PointId) {
        self.selection.selected_point = Some(id);
        self.selection.selected_group = None;
    }

    pub fn select_group(&mut self, id: GroupId) {
        self.selection.selected_group = Some(id);
        self.selection.selected_point = None;
    }

    pub fn hover(&mut self, id: Option<PointId>) {
        self.selection.hovered_point = id;
    }

    pub fn clear_selection(&mut self) {
        self.selection.selected_point = None;
        self.selection.selected_group = None;
    }

    /// Comparison click. Always selects the group as well.
    pub fn compare_click(&mut self, group: GroupId) -> ComparisonState {
        self.comparison = self.comparison.after_click(group);
        self.select_group(group);
        log::debug!("Comparison now {:?}", self.comparison);
        self.comparison
    }

    /// Clears the comparison pair only
    pub fn clear_comparison(&mut self) {
        self.comparison = ComparisonState::default();
    }

    /// Drop references to entities that are no longer visible
    pub fn retain(
        &mut self,
        point_alive: impl Fn(PointId) -> bool,
        group_alive: impl Fn(GroupId) -> bool,
    ) {
        let s = &mut self.selection;
        s.selected_point = s.selected_point.filter(|&id| point_alive(id));
        s.hovered_point = s.hovered_point.filter(|&id| point_alive(id));
        s.selected_group = s.selected_group.filter(|&id| group_alive(id));

        let c = &mut self.comparison;
        c.group_a = c.group_a.filter(|&id| group_alive(id));
        c.group_b = c.group_b.filter(|&id| group_alive(id));
        if c.group_a.is_none() {
            // B moves up so a later click fills the empty slot correctly
            c.group_a = c.group_b.take();
        }
    }
}
