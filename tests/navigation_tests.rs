use std::cell::Cell;
use std::rc::Rc;

use cloud_nav::core::ScriptedInput;
use cloud_nav::error::{NavError, Result};
use cloud_nav::traits::{Button, PointerCapture};
use cloud_nav::types::{Group, Point};
use cloud_nav::{FocusRequest, NavigationConfig, NavigationMode, Navigator, PointCloudStore};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn scene(n: u64) -> PointCloudStore {
    let points = (0..n)
        .map(|i| {
            let a = i as f32 * 0.9;
            Point::new(i, Vec3::new(a.cos() * 6.0, (i % 4) as f32, a.sin() * 6.0))
                .with_group(i % 3)
                .with_category("diagnosis", "leukemia")
        })
        .collect();
    let groups = (0..3)
        .map(|g| Group::new(g, &format!("group {}", g), Vec3::new(g as f32, 0.0, 0.0)))
        .collect();
    PointCloudStore::new(points, groups)
}

/// Capture double that counts calls and can be told to refuse
#[derive(Clone, Default)]
struct CountingCapture {
    requests: Rc<Cell<u32>>,
    releases: Rc<Cell<u32>>,
    deny: Rc<Cell<bool>>,
    /// Platform lock state, shared so a test can drop it from outside
    locked: Rc<Cell<bool>>,
}

impl PointerCapture for CountingCapture {
    fn request(&mut self) -> Result<()> {
        self.requests.set(self.requests.get() + 1);
        if self.deny.get() {
            return Err(NavError::ResourceAcquisition("denied by test".to_string()));
        }
        self.locked.set(true);
        Ok(())
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
        self.locked.set(false);
    }

    fn is_captured(&self) -> bool {
        self.locked.get()
    }
}

fn flying(capture: &CountingCapture) -> (Navigator, ScriptedInput) {
    let mut nav = Navigator::new(NavigationConfig::default(), scene(12))
        .with_capture(Box::new(capture.clone()));
    nav.toggle_fly();
    let mut input = ScriptedInput::new();
    input.tap(Button::MouseLeft);
    nav.process_input(&mut input).unwrap();
    (nav, input)
}

#[cfg(test)]
mod mode_exclusivity_tests {
    use super::*;

    #[test]
    fn test_every_toggle_sequence_keeps_one_mode() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12));
        let toggles = [true, false, false, true, true, false, true, true, false, false];

        for fly in toggles {
            if fly {
                nav.toggle_fly();
            } else {
                nav.toggle_autopilot();
            }
            nav.tick(DT);

            match nav.mode() {
                NavigationMode::Fly => {
                    assert!(nav.fly().is_attached());
                    assert!(!nav.tour().is_ready());
                }
                NavigationMode::AutoPilot => {
                    assert!(!nav.fly().is_attached());
                    assert!(nav.tour().is_ready());
                }
                NavigationMode::Orbit => {
                    assert!(!nav.fly().is_attached());
                    assert!(!nav.tour().is_ready());
                }
            }
        }
    }

    #[test]
    fn test_toggling_off_returns_to_orbit() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12));
        assert_eq!(nav.toggle_fly(), NavigationMode::Fly);
        assert_eq!(nav.toggle_fly(), NavigationMode::Orbit);
        assert_eq!(nav.toggle_autopilot(), NavigationMode::AutoPilot);
        assert_eq!(nav.toggle_autopilot(), NavigationMode::Orbit);
    }

    #[test]
    fn test_fly_cancels_autopilot_and_clears_tour() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12));
        nav.toggle_autopilot();
        assert!(nav.tour().is_ready());

        assert_eq!(nav.toggle_fly(), NavigationMode::Fly);
        assert!(nav.tour().waypoints().is_empty());
    }
}

#[cfg(test)]
mod fly_tests {
    use super::*;

    #[test]
    fn test_forward_speed_converges_to_steady_state() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);
        let config = NavigationConfig::default();
        let s = config.fly_speed;
        let d = config.fly_damping;
        let steady = s / (1.0 - d);

        input.press(Button::KeyW);
        nav.process_input(&mut input).unwrap();

        let mut previous = 0.0;
        for n in 1..=50 {
            nav.tick(DT);
            let speed = nav.fly().velocity().length();
            let expected = steady * (1.0 - d.powi(n));
            assert!((speed - expected).abs() < 1e-4, "tick {}: {} vs {}", n, speed, expected);
            assert!(speed > previous);
            previous = speed;
        }

        // 0.92^50 leaves about 1.5%; the 1% band is reached a few ticks later
        let speed = nav.fly().velocity().length();
        assert!((steady - speed) / steady < 0.016);
        for _ in 0..6 {
            nav.tick(DT);
        }
        let speed = nav.fly().velocity().length();
        assert!((steady - speed) / steady < 0.01);
    }

    #[test]
    fn test_release_glides_to_stop() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);

        input.press(Button::KeyW);
        nav.process_input(&mut input).unwrap();
        for _ in 0..20 {
            nav.tick(DT);
        }
        input.release(Button::KeyW);
        nav.process_input(&mut input).unwrap();

        let before = nav.camera_pose().position;
        nav.tick(DT);
        let after_one = nav.camera_pose().position;
        assert!(after_one != before, "inertia should carry the camera");

        for _ in 0..400 {
            nav.tick(DT);
        }
        assert!(nav.fly().velocity().length() < 1e-6);
    }

    #[test]
    fn test_forward_follows_pose_direction() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);
        let start = nav.camera_pose();

        input.press(Button::KeyW);
        nav.process_input(&mut input).unwrap();
        nav.tick(DT);

        let moved = (nav.camera_pose().position - start.position).normalize();
        assert!(moved.dot(start.forward()) > 0.999);
    }

    #[test]
    fn test_denied_capture_leaves_fly_inert_until_retry() {
        let capture = CountingCapture::default();
        capture.deny.set(true);
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12))
            .with_capture(Box::new(capture.clone()));
        nav.toggle_fly();
        let start = nav.camera_pose();

        let mut input = ScriptedInput::new();
        input.tap(Button::MouseLeft).press(Button::KeyW);
        let result = nav.process_input(&mut input);
        assert!(matches!(result, Err(NavError::ResourceAcquisition(_))));
        assert_eq!(nav.mode(), NavigationMode::Fly);

        for _ in 0..10 {
            nav.tick(DT);
        }
        assert_eq!(nav.camera_pose().position, start.position);

        capture.deny.set(false);
        input.tap(Button::MouseLeft);
        nav.process_input(&mut input).unwrap();
        nav.tick(DT);
        assert!(nav.camera_pose().position != start.position);
        assert_eq!(capture.requests.get(), 2);
    }

    #[test]
    fn test_toggle_off_detaches_before_next_input() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);

        input.press(Button::KeyW);
        nav.process_input(&mut input).unwrap();
        nav.tick(DT);
        assert!(nav.fly().velocity().length() > 0.0);

        nav.toggle_fly();
        assert_eq!(capture.releases.get(), 1);
        assert!(!nav.fly().is_attached());

        // Input arriving after the toggle must not mutate anything
        let pose = nav.camera_pose();
        input.tap(Button::MouseLeft).move_pointer(300.0, 120.0);
        nav.process_input(&mut input).unwrap();
        for _ in 0..5 {
            nav.tick(DT);
        }

        assert_eq!(nav.camera_pose(), pose);
        assert_eq!(nav.fly().velocity(), Vec3::ZERO);
        assert!(nav.fly().movement().is_idle());
        assert_eq!(capture.requests.get(), 1);
    }

    #[test]
    fn test_escape_releases_without_leaving_fly() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);

        input.tap(Button::Escape);
        nav.process_input(&mut input).unwrap();

        assert_eq!(nav.mode(), NavigationMode::Fly);
        assert!(!nav.fly().is_captured());
        assert_eq!(capture.releases.get(), 1);

        // Leaving fly afterwards does not release a second time
        nav.toggle_fly();
        assert_eq!(capture.releases.get(), 1);
    }

    #[test]
    fn test_lock_dropped_by_platform_needs_new_click() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);
        input.press(Button::KeyW);
        nav.process_input(&mut input).unwrap();
        nav.tick(DT);

        // Alt-tab: the window system releases the lock without telling fly mode
        capture.locked.set(false);
        nav.process_input(&mut input).unwrap();
        assert!(!nav.fly().is_captured());
        assert!(nav.fly().movement().is_idle());

        for _ in 0..400 {
            nav.tick(DT);
        }
        let parked = nav.camera_pose();
        nav.tick(DT);
        assert!(nav.camera_pose().position.distance(parked.position) < 1e-6);

        input.tap(Button::MouseLeft);
        nav.process_input(&mut input).unwrap();
        assert_eq!(capture.requests.get(), 2, "retry click should request capture again");
        assert!(nav.fly().is_captured());

        nav.tick(DT);
        assert!(nav.camera_pose().position != parked.position);
    }

    #[test]
    fn test_pointer_motion_applies_on_next_tick() {
        let capture = CountingCapture::default();
        let (mut nav, mut input) = flying(&capture);
        let yaw = nav.fly().yaw();

        input.move_pointer(100.0, 0.0);
        nav.process_input(&mut input).unwrap();
        assert_eq!(nav.fly().yaw(), yaw);

        nav.tick(DT);
        let expected = yaw - 100.0 * NavigationConfig::default().mouse_sensitivity;
        assert!((nav.fly().yaw() - expected).abs() < 1e-5);
    }
}

#[cfg(test)]
mod autopilot_tests {
    use super::*;

    #[test]
    fn test_two_points_produce_no_tour_and_no_motion() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(2));
        let before = nav.camera_pose();

        assert_eq!(nav.toggle_autopilot(), NavigationMode::AutoPilot);
        assert!(nav.tour().waypoints().is_empty());

        for _ in 0..10 {
            nav.tick(DT);
        }
        assert_eq!(nav.camera_pose(), before);
    }

    #[test]
    fn test_tour_moves_camera_smoothly() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(30));
        nav.toggle_autopilot();

        let mut previous = nav.camera_pose();
        let mut largest_step: f32 = 0.0;
        for _ in 0..600 {
            nav.tick(DT);
            let pose = nav.camera_pose();
            largest_step = largest_step.max(pose.position.distance(previous.position));
            previous = pose;
        }
        assert!(largest_step > 0.0);
        assert!(largest_step < 2.0, "camera jumped {} in one tick", largest_step);
    }

    #[test]
    fn test_tour_pose_target_stays_at_look_distance() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(30));
        nav.toggle_autopilot();
        for _ in 0..120 {
            nav.tick(DT);
        }
        let pose = nav.camera_pose();
        let distance = pose.position.distance(pose.target);
        assert!((distance - NavigationConfig::default().look_distance).abs() < 1e-3);
    }
}

#[cfg(test)]
mod orbit_tests {
    use super::*;

    #[test]
    fn test_seek_distance_strictly_decreases_without_overshoot() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12));
        let target = nav.request_focus(FocusRequest::Point(5)).unwrap();
        let start = nav.camera_pose().position;
        let direction = (target.position - start).normalize();
        let epsilon = NavigationConfig::default().seek_epsilon;

        let mut previous = start.distance(target.position);
        let mut ticks = 0;
        while previous >= epsilon {
            nav.tick(DT);
            let position = nav.camera_pose().position;
            let distance = position.distance(target.position);
            assert!(distance < previous);
            // Still on the near side of the target
            assert!((target.position - position).dot(direction) > 0.0);
            previous = distance;
            ticks += 1;
            assert!(ticks < 2000);
        }
        assert!(!nav.camera().is_animating());
    }

    #[test]
    fn test_seek_resumes_after_fly_without_teleport() {
        let capture = CountingCapture::default();
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12))
            .with_capture(Box::new(capture.clone()));
        let target = nav.request_focus(FocusRequest::Group(1)).unwrap();
        for _ in 0..3 {
            nav.tick(DT);
        }

        nav.toggle_fly();
        let mut input = ScriptedInput::new();
        input.tap(Button::MouseLeft).press(Button::Space);
        nav.process_input(&mut input).unwrap();
        for _ in 0..30 {
            nav.tick(DT);
        }
        nav.toggle_fly();

        let exit_pose = nav.camera_pose();
        nav.tick(DT);
        let resumed = nav.camera_pose().position;

        let k = NavigationConfig::default().seek_factor;
        let expected = exit_pose.position + (target.position - exit_pose.position) * k;
        assert!((resumed - expected).length() < 1e-4);
    }

    #[test]
    fn test_focus_request_during_autopilot_waits_for_orbit() {
        let mut nav = Navigator::new(NavigationConfig::default(), scene(12));
        nav.toggle_autopilot();
        let target = nav.request_focus(FocusRequest::Point(3)).unwrap();
        nav.tick(DT);
        assert_eq!(nav.camera().current_request(), Some(target));

        nav.toggle_autopilot();
        for _ in 0..400 {
            nav.tick(DT);
        }
        assert!(nav.camera_pose().position.distance(target.position) < 0.1);
    }
}
