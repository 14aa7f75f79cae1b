use glam::{Mat3, Quat, Vec3};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::NavigationConfig;
use crate::error::{NavError, Result};
use crate::math::{sample_closed, AABB};
use crate::types::{CameraPose, Point};

pub const MIN_TOUR_POINTS: usize = 3;
const MIN_SAMPLES: usize = 8;
const MAX_SAMPLES: usize = 12;

const LATERAL_JITTER: f32 = 1.5;
const VERTICAL_JITTER: f32 = 0.75;
/// Forward bias keeping sampled waypoints off the point itself
pub const STANDOFF: f32 = 2.5;
/// Small clouds still get a tour with some room to move
const MIN_TOUR_RADIUS: f32 = 5.0;

/// Build the closed tour through `points`.
///
/// Layout: centroid, pulled-back start, shuffled point visits, three
/// bounding-box sweeps, pulled-back reveal.
pub fn build_waypoints<R: Rng>(points: &[Point], rng: &mut R) -> Result<Vec<Vec3>> {
    let n = points.len();
    if n < MIN_TOUR_POINTS {
        return Err(NavError::DegenerateGeometry { points: n });
    }

    let positions: Vec<Vec3> = points.iter().map(|p| p.position).collect();
    let centroid = positions.iter().copied().sum::<Vec3>() / n as f32;
    let bounds = AABB::from_points(positions.iter().copied())
        .ok_or(NavError::DegenerateGeometry { points: n })?;
    let radius = bounds.radius().max(MIN_TOUR_RADIUS);

    let samples = (n / 10).clamp(MIN_SAMPLES, MAX_SAMPLES).min(n);
    let mut waypoints = Vec::with_capacity(samples + 6);

    waypoints.push(centroid);
    waypoints.push(centroid + Vec3::new(0.0, radius * 0.6, radius * 1.5));

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    for &i in order.iter().take(samples) {
        let jitter = Vec3::new(
            rng.random_range(-LATERAL_JITTER..=LATERAL_JITTER),
            rng.random_range(-VERTICAL_JITTER..=VERTICAL_JITTER),
            STANDOFF,
        );
        waypoints.push(positions[i] + jitter);
    }

    let margin = radius * 0.5;
    waypoints.push(Vec3::new(bounds.max.x + margin, centroid.y, centroid.z));
    waypoints.push(Vec3::new(centroid.x, bounds.max.y + margin, bounds.min.z - margin));
    waypoints.push(Vec3::new(bounds.min.x - margin, centroid.y, bounds.max.z + margin));

    waypoints.push(centroid + Vec3::new(0.0, radius, radius * 2.2));

    Ok(waypoints)
}

/// Rotation whose -Z axis points from `eye` toward `at`. `None` when the two
/// coincide or the direction is vertical.
pub fn look_rotation(eye: Vec3, at: Vec3) -> Option<Quat> {
    let forward = (at - eye).normalize_or_zero();
    let right = forward.cross(Vec3::Y);
    if forward == Vec3::ZERO || right.length_squared() < 1e-8 {
        return None;
    }
    let right = right.normalize();
    let up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, -forward)))
}

/// Cinematic autopilot over a closed Catmull-Rom path
#[derive(Debug, Clone)]
pub struct TourPathGenerator {
    waypoints: Vec<Vec3>,
    progress: f32,
    orientation: Quat,
    speed: f32,
    lookahead: f32,
    position_lerp: f32,
    rotation_slerp: f32,
    look_distance: f32,
    seed: u64,
}

impl TourPathGenerator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            waypoints: Vec::new(),
            progress: 0.0,
            orientation: Quat::IDENTITY,
            speed: config.tour_speed,
            lookahead: config.tour_lookahead,
            position_lerp: config.tour_position_lerp,
            rotation_slerp: config.tour_rotation_slerp,
            look_distance: config.look_distance,
            seed: config.tour_seed,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_ready(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Regenerate from a new point set. The same points and seed always
    /// produce the same path. Too few points leave the tour empty.
    pub fn rebuild(&mut self, points: &[Point]) -> Result<usize> {
        self.progress = 0.0;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        match build_waypoints(points, &mut rng) {
            Ok(waypoints) => {
                log::info!(
                    "Tour built: {} waypoints from {} points",
                    waypoints.len(),
                    points.len()
                );
                self.waypoints = waypoints;
                Ok(self.waypoints.len())
            }
            Err(e) => {
                self.waypoints.clear();
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.progress = 0.0;
    }

    /// Start turning from wherever the camera currently looks
    pub fn begin(&mut self, pose: &CameraPose) {
        self.orientation = look_rotation(pose.position, pose.position + pose.forward())
            .unwrap_or(Quat::IDENTITY);
    }

    /// Point on the path at `progress` waypoints from the start
    pub fn sample(&self, progress: f32) -> Option<Vec3> {
        sample_closed(&self.waypoints, progress)
    }

    /// Advance along the path. Returns false when there is no path to follow.
    pub fn update(&mut self, delta: f32, pose: &mut CameraPose) -> bool {
        if self.waypoints.is_empty() {
            return false;
        }
        let n = self.waypoints.len() as f32;
        self.progress = (self.progress + delta * self.speed).rem_euclid(n);

        let Some(point) = self.sample(self.progress) else {
            return false;
        };
        pose.position = pose.position.lerp(point, self.position_lerp);

        let desired = self
            .sample(self.progress + self.lookahead)
            .and_then(|ahead| look_rotation(pose.position, ahead));
        if let Some(desired) = desired {
            self.orientation = self.orientation.slerp(desired, self.rotation_slerp);
        }

        pose.target = pose.position + self.orientation * Vec3::NEG_Z * self.look_distance;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = i as f32 * 0.7;
                Point::new(i as u64, Vec3::new(a.cos() * 8.0, (i % 5) as f32, a.sin() * 8.0))
            })
            .collect()
    }

    #[test]
    fn too_few_points_is_degenerate() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            build_waypoints(&cloud(2), &mut rng),
            Err(NavError::DegenerateGeometry { points: 2 })
        );
    }

    #[test]
    fn waypoint_count_scales_with_points() {
        let mut rng = SmallRng::seed_from_u64(1);
        // 3 points: one visit each
        assert_eq!(build_waypoints(&cloud(3), &mut rng).unwrap().len(), 3 + 6);
        // 50 points: floor of 8 visits
        assert_eq!(build_waypoints(&cloud(50), &mut rng).unwrap().len(), 8 + 6);
        // 110 points: 11 visits
        assert_eq!(build_waypoints(&cloud(110), &mut rng).unwrap().len(), 11 + 6);
        // Capped at 12 visits
        assert_eq!(build_waypoints(&cloud(500), &mut rng).unwrap().len(), 12 + 6);
    }

    #[test]
    fn first_waypoint_is_centroid() {
        let points = vec![
            Point::new(1, Vec3::new(0.0, 0.0, 0.0)),
            Point::new(2, Vec3::new(3.0, 0.0, 0.0)),
            Point::new(3, Vec3::new(0.0, 3.0, 6.0)),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        let waypoints = build_waypoints(&points, &mut rng).unwrap();
        assert!((waypoints[0] - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn sampled_waypoints_keep_their_distance() {
        let points = cloud(40);
        let mut rng = SmallRng::seed_from_u64(7);
        let waypoints = build_waypoints(&points, &mut rng).unwrap();

        // 40 points -> 8 visits after centroid and start
        for w in &waypoints[2..10] {
            let anchored = points.iter().any(|p| {
                let offset = *w - p.position;
                (offset.z - STANDOFF).abs() < 1e-4
                    && offset.x.abs() <= LATERAL_JITTER
                    && offset.y.abs() <= VERTICAL_JITTER
            });
            assert!(anchored, "waypoint {:?} not anchored to a point", w);
        }
    }

    #[test]
    fn rebuild_is_deterministic_and_resets_progress() {
        let config = NavigationConfig::default();
        let mut a = TourPathGenerator::new(&config);
        let mut b = TourPathGenerator::new(&config);
        a.rebuild(&cloud(30)).unwrap();
        b.rebuild(&cloud(30)).unwrap();
        assert_eq!(a.waypoints(), b.waypoints());

        let mut pose = CameraPose::default();
        a.update(1.0, &mut pose);
        assert!(a.progress() > 0.0);
        a.rebuild(&cloud(30)).unwrap();
        assert_eq!(a.progress(), 0.0);
    }

    #[test]
    fn empty_tour_does_not_move() {
        let mut tour = TourPathGenerator::new(&NavigationConfig::default());
        assert!(tour.rebuild(&cloud(2)).is_err());
        let mut pose = CameraPose::default();
        assert!(!tour.update(0.016, &mut pose));
        assert_eq!(pose, CameraPose::default());
    }

    #[test]
    fn look_rotation_points_negative_z_at_target() {
        let q = look_rotation(Vec3::ZERO, Vec3::new(3.0, 1.0, -2.0)).unwrap();
        let dir = Vec3::new(3.0, 1.0, -2.0).normalize();
        assert!((q * Vec3::NEG_Z - dir).length() < 1e-5);
    }

    #[test]
    fn look_rotation_rejects_vertical() {
        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), None);
        assert_eq!(look_rotation(Vec3::ONE, Vec3::ONE), None);
    }
}
