use crate::camera::CameraController;
use crate::config::NavigationConfig;
use crate::error::Result;
use crate::focus::{FocusRequest, FocusResolver};
use crate::navigation::{
    FlyInputHandler, ModeManager, ModeTransition, NavigationMode, TourPathGenerator,
};
use crate::selection::{
    ComparisonMetrics, ComparisonState, SelectionController, SelectionState,
};
use crate::store::{Filter, PointCloudStore};
use crate::traits::{Button, InputSource, PointerCapture, VirtualCapture};
use crate::types::{CameraPose, FocusTarget, GroupId, PointId};

/// Outcome of the most recent focus request, kept for UI feedback
#[derive(Clone, Debug, PartialEq)]
pub struct FocusAttempt {
    pub request: FocusRequest,
    pub found: bool,
}

/// Owns all navigation and selection state for one view.
///
/// Hosts call [`Navigator::process_input`] with buffered input and then
/// [`Navigator::tick`] once per rendered frame, and read the pose back with
/// [`Navigator::camera_pose`]. Exactly one of orbit seek, fly or tour writes
/// the pose on any tick, selected by the current [`NavigationMode`].
pub struct Navigator {
    config: NavigationConfig,
    store: PointCloudStore,
    modes: ModeManager,
    camera: CameraController,
    fly: FlyInputHandler,
    tour: TourPathGenerator,
    selection: SelectionController,
    focus: FocusResolver,
    capture: Box<dyn PointerCapture>,
    last_focus: Option<FocusAttempt>,
}

impl Navigator {
    pub fn new(config: NavigationConfig, store: PointCloudStore) -> Self {
        let camera = CameraController::new(config.default_pose)
            .with_smoothing(config.seek_factor, config.seek_epsilon);
        Self {
            fly: FlyInputHandler::new(&config),
            tour: TourPathGenerator::new(&config),
            config,
            store,
            modes: ModeManager::default(),
            camera,
            selection: SelectionController::default(),
            focus: FocusResolver,
            capture: Box::new(VirtualCapture::default()),
            last_focus: None,
        }
    }

    /// Use a platform pointer lock instead of the always-granting default
    pub fn with_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn store(&self) -> &PointCloudStore {
        &self.store
    }

    pub fn mode(&self) -> NavigationMode {
        self.modes.mode()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn fly(&self) -> &FlyInputHandler {
        &self.fly
    }

    pub fn tour(&self) -> &TourPathGenerator {
        &self.tour
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.selection()
    }

    pub fn comparison_state(&self) -> ComparisonState {
        self.selection.comparison()
    }

    /// Metrics for the current pair, once both slots are filled
    pub fn comparison_metrics(&self) -> Option<ComparisonMetrics> {
        let pair = self.selection.comparison();
        ComparisonMetrics::measure(&self.store, pair.group_a?, pair.group_b?)
    }

    pub fn last_focus(&self) -> Option<&FocusAttempt> {
        self.last_focus.as_ref()
    }

    /// Resolve and start animating toward `request`. On a miss the camera
    /// stays put and the attempt is still recorded.
    pub fn request_focus(&mut self, request: FocusRequest) -> Result<FocusTarget> {
        let resolved = self.focus.resolve(&request, &self.store);
        match &resolved {
            Ok(target) => {
                log::debug!("Focus {} -> {:?}", request, target.position);
                self.camera.request(*target);
            }
            Err(e) => log::warn!("Focus failed: {}", e),
        }
        self.last_focus = Some(FocusAttempt {
            request,
            found: resolved.is_ok(),
        });
        resolved
    }

    pub fn select_point(&mut self, id: PointId) -> Result<FocusTarget> {
        let target = self.request_focus(FocusRequest::Point(id))?;
        self.selection.select_point(id);
        Ok(target)
    }

    pub fn select_group(&mut self, id: GroupId) -> Result<FocusTarget> {
        let target = self.request_focus(FocusRequest::Group(id))?;
        self.selection.select_group(id);
        Ok(target)
    }

    pub fn hover_point(&mut self, id: Option<PointId>) {
        self.selection.hover(id);
    }

    /// Deselect without moving the camera
    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    /// Comparison-mode click on a group: updates the pair, selects the
    /// group and focuses it. Unknown groups change nothing.
    pub fn compare_click(&mut self, id: GroupId) -> Result<ComparisonState> {
        self.request_focus(FocusRequest::Group(id))?;
        Ok(self.selection.compare_click(id))
    }

    pub fn clear_comparison(&mut self) {
        self.selection.clear_comparison();
    }

    pub fn toggle_fly(&mut self) -> NavigationMode {
        if let Some(transition) = self.modes.toggle_fly() {
            self.apply_transition(transition);
        }
        self.mode()
    }

    pub fn toggle_autopilot(&mut self) -> NavigationMode {
        if let Some(transition) = self.modes.toggle_autopilot() {
            self.apply_transition(transition);
        }
        self.mode()
    }

    /// Back to orbit at the configured default pose
    pub fn reset_camera(&mut self) {
        if let Some(transition) = self.modes.set(NavigationMode::Orbit) {
            self.apply_transition(transition);
        }
        self.camera.reset(self.config.default_pose);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.points_changed();
    }

    /// Swap in a freshly loaded scene
    pub fn replace_store(&mut self, store: PointCloudStore) {
        self.store = store;
        self.points_changed();
    }

    /// Drain buffered input. In fly mode everything, Escape included, goes to
    /// the fly handler, so a full comparison pair is never cleared there.
    /// Outside fly mode only Escape is meaningful and clears a full pair.
    pub fn process_input(&mut self, input: &mut dyn InputSource) -> Result<()> {
        if self.modes.is_flying() {
            return self.fly.ingest(input, self.capture.as_mut());
        }

        let presses = input.take_presses();
        input.take_motion();
        if presses.contains(&Button::Escape) && self.selection.comparison().is_full() {
            self.selection.clear_comparison();
        }
        Ok(())
    }

    /// Advance one rendered frame
    pub fn tick(&mut self, delta: f32) {
        match self.modes.mode() {
            NavigationMode::Orbit => {
                self.camera.update(NavigationMode::Orbit);
            }
            NavigationMode::Fly => self.fly.update(self.camera.pose_mut()),
            NavigationMode::AutoPilot => {
                self.tour.update(delta, self.camera.pose_mut());
            }
        }
    }

    fn apply_transition(&mut self, transition: ModeTransition) {
        if transition.exited(NavigationMode::Fly) {
            self.fly.detach(self.capture.as_mut());
        }
        if transition.exited(NavigationMode::AutoPilot) {
            self.tour.clear();
        }

        match transition.to {
            NavigationMode::Fly => self.fly.attach(&self.camera.pose()),
            NavigationMode::AutoPilot => {
                self.tour.begin(&self.camera.pose());
                if let Err(e) = self.tour.rebuild(self.store.visible_points()) {
                    log::warn!("AutoPilot idle: {}", e);
                }
            }
            NavigationMode::Orbit => {
                if self.camera.is_animating() {
                    log::debug!("Resuming focus animation from {:?}", self.camera.pose().position);
                }
            }
        }
    }

    fn points_changed(&mut self) {
        let store = &self.store;
        self.selection.retain(
            |id| store.point(id).is_some(),
            |id| store.group(id).is_some(),
        );
        if self.modes.is_autopilot() {
            if let Err(e) = self.tour.rebuild(self.store.visible_points()) {
                log::warn!("AutoPilot idle: {}", e);
            }
        }
    }
}
