use glam::Vec3;
use serde::{Deserialize, Serialize};

pub type PointId = u64;
pub type GroupId = u64;

/// A single search term positioned in 3D space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub position: Vec3,
    pub group_id: Option<GroupId>,
    pub category: String,
    pub subcategory: String,
    pub label: String,
}

impl Point {
    pub fn new(id: PointId, position: Vec3) -> Self {
        Self {
            id,
            position,
            group_id: None,
            category: String::new(),
            subcategory: String::new(),
            label: format!("point-{id}"),
        }
    }

    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_category(mut self, category: &str, subcategory: &str) -> Self {
        self.category = category.to_string();
        self.subcategory = subcategory.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Coordinates were never assigned by the embedding pipeline
    pub fn is_unset(&self) -> bool {
        self.position == Vec3::ZERO
    }
}

/// A semantic cluster of points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub centroid: Vec3,
    pub member_count: usize,
    pub color: String,
}

impl Group {
    pub fn new(id: GroupId, name: &str, centroid: Vec3) -> Self {
        Self {
            id,
            name: name.to_string(),
            centroid,
            member_count: 0,
            color: "#888888".to_string(),
        }
    }
}

/// Camera eye position and the point it looks at
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit view direction, -Z when position and target coincide
    pub fn forward(&self) -> Vec3 {
        let dir = (self.target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            dir
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 20.0), Vec3::ZERO)
    }
}

/// Where the camera should end up after a focus animation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}
