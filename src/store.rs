use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;

use crate::types::{Group, GroupId, Point, PointId};

/// Restricts which points are visible. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub group_id: Option<GroupId>,
    /// Case-insensitive substring of the label
    pub search: Option<String>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, point: &Point) -> bool {
        let category = self.category.as_deref().map_or(true, |c| point.category == c);
        let subcategory = self
            .subcategory
            .as_deref()
            .map_or(true, |s| point.subcategory == s);
        let group = self.group_id.map_or(true, |g| point.group_id == Some(g));
        let search = self.search.as_deref().map_or(true, |s| {
            point.label.to_lowercase().contains(&s.to_lowercase())
        });
        category && subcategory && group && search
    }
}

/// In-memory holder of the unfiltered scene plus the active filter.
///
/// The visible set is recomputed eagerly on every filter change and tagged
/// with an epoch so readers can tell when it moved.
#[derive(Clone, Debug, Default)]
pub struct PointCloudStore {
    points: Vec<Point>,
    groups: Vec<Group>,
    filter: Filter,
    visible_points: Vec<Point>,
    visible_groups: Vec<Group>,
    epoch: u64,
}

impl PointCloudStore {
    pub fn new(points: Vec<Point>, groups: Vec<Group>) -> Self {
        let mut store = Self {
            points,
            groups,
            ..Self::default()
        };
        store.refresh();
        store
    }

    pub fn list_points(&self, filter: &Filter) -> Vec<Point> {
        self.points.iter().filter(|p| filter.matches(p)).cloned().collect()
    }

    /// Groups that keep at least one member under `filter`
    pub fn list_groups(&self, filter: &Filter) -> Vec<Group> {
        let live: HashSet<GroupId> = self
            .points
            .iter()
            .filter(|p| filter.matches(p))
            .filter_map(|p| p.group_id)
            .collect();
        self.groups
            .iter()
            .filter(|g| live.contains(&g.id))
            .cloned()
            .collect()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn visible_points(&self) -> &[Point] {
        &self.visible_points
    }

    pub fn visible_groups(&self) -> &[Group] {
        &self.visible_groups
    }

    pub fn all_points(&self) -> &[Point] {
        &self.points
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.visible_points.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.visible_groups.iter().find(|g| g.id == id)
    }

    fn refresh(&mut self) {
        self.visible_points = self.list_points(&self.filter);
        self.visible_groups = self.list_groups(&self.filter);
        self.epoch += 1;
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(json).context("Failed to parse scene snapshot")?;
        Ok(snapshot.into_store())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene: {}", path.display()))?;
        let store = Self::from_json_str(&text)
            .with_context(|| format!("Invalid scene: {}", path.display()))?;
        log::info!(
            "Loaded {} points in {} groups from {}",
            store.points.len(),
            store.groups.len(),
            path.display()
        );
        Ok(store)
    }
}

// Wire format of the cluster visualization payload

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    clusters: Vec<ClusterRecord>,
    #[serde(default)]
    terms: Vec<TermRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterRecord {
    id: GroupId,
    name: String,
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    color: Option<String>,
    term_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermRecord {
    id: PointId,
    term: String,
    category: Option<String>,
    subcategory: Option<String>,
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    cluster_id: Option<GroupId>,
}

fn coords(x: Option<f32>, y: Option<f32>, z: Option<f32>) -> Vec3 {
    Vec3::new(x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0))
}

impl Snapshot {
    fn into_store(self) -> PointCloudStore {
        let points: Vec<Point> = self
            .terms
            .into_iter()
            .map(|t| Point {
                id: t.id,
                position: coords(t.x, t.y, t.z),
                group_id: t.cluster_id,
                category: t.category.unwrap_or_default(),
                subcategory: t.subcategory.unwrap_or_default(),
                label: t.term,
            })
            .collect();

        let mut counts: HashMap<GroupId, usize> = HashMap::new();
        for group_id in points.iter().filter_map(|p| p.group_id) {
            *counts.entry(group_id).or_default() += 1;
        }

        let groups = self
            .clusters
            .into_iter()
            .map(|c| Group {
                id: c.id,
                centroid: coords(c.x, c.y, c.z),
                member_count: c
                    .term_count
                    .unwrap_or_else(|| counts.get(&c.id).copied().unwrap_or(0)),
                color: c.color.unwrap_or_else(|| "#888888".to_string()),
                name: c.name,
            })
            .collect();

        PointCloudStore::new(points, groups)
    }
}
