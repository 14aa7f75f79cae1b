use std::fmt;

use glam::Vec3;

use crate::error::{NavError, Result};
use crate::math::label_jitter;
use crate::store::PointCloudStore;
use crate::types::{FocusTarget, GroupId, Point, PointId};

const POINT_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 4.0);
const GROUP_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 5.0);
/// Direction the camera backs away from a category centroid
const PULL_BACK: Vec3 = Vec3::new(0.0, 0.35, 1.0);
const SPREAD_SCALE: f32 = 1.5;
pub const MIN_ZOOM: f32 = 5.0;
/// Spread assumed when every match sits at the unset origin
pub const DEFAULT_RADIUS: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub enum FocusRequest {
    Point(PointId),
    Group(GroupId),
    Category(String),
    Subcategory(String),
}

impl FocusRequest {
    /// Parse `kind:value`, e.g. `category:leukemia` or `group:3`
    pub fn parse(text: &str) -> Option<Self> {
        let (kind, value) = text.split_once(':')?;
        let value = value.trim();
        match kind.trim().to_ascii_lowercase().as_str() {
            "point" => value.parse().ok().map(FocusRequest::Point),
            "group" | "cluster" => value.parse().ok().map(FocusRequest::Group),
            "category" => Some(FocusRequest::Category(value.to_string())),
            "subcategory" => Some(FocusRequest::Subcategory(value.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for FocusRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusRequest::Point(id) => write!(f, "point {}", id),
            FocusRequest::Group(id) => write!(f, "group {}", id),
            FocusRequest::Category(label) => write!(f, "category '{}'", label),
            FocusRequest::Subcategory(label) => write!(f, "subcategory '{}'", label),
        }
    }
}

/// Framing computed for a set of matching points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterFocus {
    pub centroid: Vec3,
    /// Largest distance from the centroid to a match
    pub spread: f32,
    pub zoom: f32,
    pub matched: usize,
    pub target: FocusTarget,
}

/// Turns focus requests into camera targets against the current scene
#[derive(Clone, Copy, Debug, Default)]
pub struct FocusResolver;

impl FocusResolver {
    pub fn resolve(&self, request: &FocusRequest, store: &PointCloudStore) -> Result<FocusTarget> {
        match request {
            FocusRequest::Point(id) => store
                .point(*id)
                .map(|p| FocusTarget {
                    position: p.position + POINT_OFFSET,
                    look_at: p.position,
                })
                .ok_or_else(|| NavError::EmptyInput(request.to_string())),
            FocusRequest::Group(id) => store
                .group(*id)
                .map(|g| FocusTarget {
                    position: g.centroid + GROUP_OFFSET,
                    look_at: g.centroid,
                })
                .ok_or_else(|| NavError::EmptyInput(request.to_string())),
            FocusRequest::Category(label) => self
                .resolve_cluster(store, label, |p| p.category.eq_ignore_ascii_case(label))
                .map(|c| c.target)
                .ok_or_else(|| NavError::EmptyInput(request.to_string())),
            FocusRequest::Subcategory(label) => self
                .resolve_cluster(store, label, |p| p.subcategory.eq_ignore_ascii_case(label))
                .map(|c| c.target)
                .ok_or_else(|| NavError::EmptyInput(request.to_string())),
        }
    }

    /// Frame every point accepted by `matches`.
    ///
    /// Points at the unset origin are ignored. If no visible match has real
    /// coordinates, the unfiltered scene is searched; if that also has none,
    /// the unset matches are framed with [`DEFAULT_RADIUS`].
    /// The fallback also fires when the active filter hides every match, so a
    /// hidden category still resolves instead of reporting not found.
    pub fn resolve_cluster<F>(
        &self,
        store: &PointCloudStore,
        label: &str,
        matches: F,
    ) -> Option<ClusterFocus>
    where
        F: Fn(&Point) -> bool,
    {
        let placed = |points: &[Point]| -> Vec<Vec3> {
            points
                .iter()
                .filter(|p| matches(*p) && !p.is_unset())
                .map(|p| p.position)
                .collect()
        };

        let mut positions = placed(store.visible_points());
        if positions.is_empty() {
            positions = placed(store.all_points());
        }
        let has_coordinates = !positions.is_empty();
        if !has_coordinates {
            positions = store
                .all_points()
                .iter()
                .filter(|p| matches(*p))
                .map(|p| p.position)
                .collect();
        }
        if positions.is_empty() {
            return None;
        }

        let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let spread = if has_coordinates {
            positions
                .iter()
                .map(|p| p.distance(centroid))
                .fold(0.0, f32::max)
        } else {
            DEFAULT_RADIUS
        };
        let zoom = (spread * SPREAD_SCALE).max(MIN_ZOOM);

        let (jx, jz) = label_jitter(label);
        let position = centroid + Vec3::new(jx, 0.0, jz) + PULL_BACK.normalize() * zoom;

        Some(ClusterFocus {
            centroid,
            spread,
            zoom,
            matched: positions.len(),
            target: FocusTarget {
                position,
                look_at: centroid,
            },
        })
    }
}
