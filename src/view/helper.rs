//! Conversion between workspace and view coordinates

use crate::geometry::{ViewPoint, WorkspacePoint};

/// Maps workspace coordinates to integer view pixels
///
/// View coordinates are workspace coordinates scaled and shifted by the view origin, then
/// rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkspaceHelper {
    scale: f64,
    rtl: bool,
    view_origin: WorkspacePoint,
}

impl Default for WorkspaceHelper {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rtl: false,
            view_origin: WorkspacePoint::default(),
        }
    }
}

impl WorkspaceHelper {
    /// `scale` must be positive and finite; `render_with_config` checks this for its callers
    pub fn new(scale: f64, rtl: bool) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        Self {
            scale,
            rtl,
            ..Self::default()
        }
    }

    /// Workspace point shown at view pixel (0, 0)
    pub fn with_view_origin(mut self, origin: WorkspacePoint) -> Self {
        self.view_origin = origin;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    pub fn workspace_to_view(&self, point: WorkspacePoint) -> ViewPoint {
        self.workspace_to_view_delta(point - self.view_origin)
    }

    pub fn view_to_workspace(&self, point: ViewPoint) -> WorkspacePoint {
        self.view_to_workspace_delta(point) + self.view_origin
    }

    pub fn workspace_to_view_delta(&self, delta: WorkspacePoint) -> ViewPoint {
        ViewPoint::new(
            (delta.x * self.scale).round() as i32,
            (delta.y * self.scale).round() as i32,
        )
    }

    pub fn view_to_workspace_delta(&self, delta: ViewPoint) -> WorkspacePoint {
        WorkspacePoint::new(delta.x as f64 / self.scale, delta.y as f64 / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_round_trip() {
        let helper = WorkspaceHelper::new(2.0, false);
        let offset = ViewPoint::new(37, -12);
        let ws = helper.view_to_workspace_delta(offset);
        assert_eq!(ws, WorkspacePoint::new(18.5, -6.0));
        assert_eq!(helper.workspace_to_view_delta(ws), offset);
    }

    #[test]
    fn test_view_origin_shift() {
        let helper =
            WorkspaceHelper::new(1.0, false).with_view_origin(WorkspacePoint::new(-50.0, 10.0));
        assert_eq!(
            helper.workspace_to_view(WorkspacePoint::new(0.0, 10.0)),
            ViewPoint::new(50, 0)
        );
        assert_eq!(
            helper.view_to_workspace(ViewPoint::new(50, 0)),
            WorkspacePoint::new(0.0, 10.0)
        );
    }

    #[test]
    fn test_rounds_to_pixels() {
        let helper = WorkspaceHelper::new(1.5, true);
        assert_eq!(
            helper.workspace_to_view(WorkspacePoint::new(3.0, 1.0)),
            ViewPoint::new(5, 2)
        );
        assert!(helper.is_rtl());
    }
}
