//! Draw preparation
//!
//! [`DrawOverride`] turns a node's current state into an immutable
//! [`DrawSnapshot`] per placement. A snapshot is rebuilt only after the
//! override has been marked dirty, normally because the node reported that
//! its changed inputs require a redraw. Until then every placement keeps
//! receiving the same shared snapshot, and the render stage never reaches
//! back into the node.

pub mod display;
pub mod snapshot;

pub use display::{DisplayStateProvider, DisplayStatus, PlacementPath};
pub use snapshot::DrawSnapshot;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DrawSettings;
use crate::node::{BoneNode, DirtyInputs};
use crate::shape::bounds::BoundsCalculator;
use crate::shape::mesh::MeshBuilder;

#[derive(Debug, Clone)]
struct CachedSnapshot {
    generation: u64,
    snapshot: Arc<DrawSnapshot>,
}

/// Per-node draw preparation with the last snapshot of every placement
#[derive(Debug, Clone)]
pub struct DrawOverride {
    settings: DrawSettings,
    snapshots: HashMap<PlacementPath, CachedSnapshot>,
    generation: u64,
}

impl DrawOverride {
    /// Create a draw override with the given settings
    pub fn new(settings: DrawSettings) -> Self {
        Self {
            settings,
            snapshots: HashMap::new(),
            generation: 0,
        }
    }

    /// Settings in use
    pub const fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Invalidate the snapshot of every placement
    pub fn mark_dirty(&mut self) {
        self.generation += 1;
    }

    /// Forward the host's changed inputs to the node's redraw decision
    ///
    /// Marks every snapshot stale when the node asks for a redraw and
    /// returns that decision.
    pub fn pre_evaluation(&mut self, node: &BoneNode, dirty: DirtyInputs) -> bool {
        let redraw = node.pre_evaluation(dirty);
        if redraw {
            self.mark_dirty();
        }
        redraw
    }

    /// Whether the next draw of `path` builds a new snapshot
    pub fn is_dirty(&self, path: &PlacementPath) -> bool {
        self.snapshots
            .get(path)
            .map_or(true, |cached| cached.generation != self.generation)
    }

    /// Last snapshot prepared for a placement
    pub fn snapshot(&self, path: &PlacementPath) -> Option<Arc<DrawSnapshot>> {
        self.snapshots.get(path).map(|cached| Arc::clone(&cached.snapshot))
    }

    /// Depth priority for a display status
    pub const fn depth_priority(&self, status: DisplayStatus) -> u32 {
        match status {
            DisplayStatus::ActiveComponent => self.settings.active_wire_depth_priority,
            _ => self.settings.dormant_filled_depth_priority,
        }
    }

    /// Snapshot of `node` for one placement
    ///
    /// Returns the placement's current snapshot while it is clean. Otherwise
    /// the snapshot is rebuilt from the node and the host's display state. A
    /// failed display-state lookup keeps the value of the placement's
    /// previous snapshot, or the configured default when there is none.
    pub fn prepare_for_draw(
        &mut self,
        node: &mut BoneNode,
        path: &PlacementPath,
        provider: &dyn DisplayStateProvider,
    ) -> Arc<DrawSnapshot> {
        let previous = match self.snapshots.get(path) {
            Some(cached) if cached.generation == self.generation => {
                log::trace!("Reusing draw snapshot for {}", path);
                return Arc::clone(&cached.snapshot);
            }
            Some(cached) => Some(&cached.snapshot),
            None => None,
        };
        let mut params = node.user_data();

        params.wire_color = match provider.wire_color(path) {
            Ok(color) => color,
            Err(error) => {
                log::warn!("Wire colour lookup failed: {}", error);
                previous.map_or(self.settings.default_wire_color, |snapshot| snapshot.wire_color())
            }
        };

        params.depth_priority = match provider.display_status(path) {
            Ok(status) => self.depth_priority(status),
            Err(error) => {
                log::warn!("Display status lookup failed: {}", error);
                previous.map_or(self.settings.dormant_filled_depth_priority, |snapshot| {
                    snapshot.depth_priority()
                })
            }
        };

        let object_matrix = params.current_object_matrix();
        let buffers = MeshBuilder::build(&params, &object_matrix);
        let bounds = BoundsCalculator::compute_bounds(
            params.width,
            params.height,
            params.length,
            params.taper,
            &object_matrix,
        );

        log::debug!(
            "Prepared draw for {}: {} triangles, {} lines",
            path,
            buffers.triangle_count(),
            buffers.line_count()
        );

        let snapshot = Arc::new(DrawSnapshot::new(
            params,
            object_matrix,
            self.settings.line_width,
            buffers,
            bounds,
        ));
        self.snapshots.insert(
            path.clone(),
            CachedSnapshot {
                generation: self.generation,
                snapshot: Arc::clone(&snapshot),
            },
        );
        snapshot
    }

    /// Forget the snapshot of a placement that was removed
    pub fn remove_placement(&mut self, path: &PlacementPath) -> Option<Arc<DrawSnapshot>> {
        self.snapshots.remove(path).map(|cached| cached.snapshot)
    }
}

impl Default for DrawOverride {
    fn default() -> Self {
        Self::new(DrawSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, AttributeValue, SizeField};
    use crate::error::BoneError;
    use crate::foundation::color::Color;
    use crate::shape::mesh::TRIANGLE_COUNT;
    use std::cell::Cell;

    struct FixedDisplay {
        color: Color,
        status: DisplayStatus,
        valid: Cell<bool>,
    }

    impl FixedDisplay {
        fn new(color: Color, status: DisplayStatus) -> Self {
            Self {
                color,
                status,
                valid: Cell::new(true),
            }
        }

        fn check(&self, path: &PlacementPath) -> Result<(), BoneError> {
            if self.valid.get() {
                Ok(())
            } else {
                Err(BoneError::InvalidPlacement(path.to_string()))
            }
        }
    }

    impl DisplayStateProvider for FixedDisplay {
        fn wire_color(&self, path: &PlacementPath) -> Result<Color, BoneError> {
            self.check(path).map(|()| self.color)
        }

        fn display_status(&self, path: &PlacementPath) -> Result<DisplayStatus, BoneError> {
            self.check(path).map(|()| self.status)
        }
    }

    #[test]
    fn test_snapshot_contents() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::rgb(1.0, 0.5, 0.0), DisplayStatus::ActiveComponent);

        assert!(draw.is_dirty(&path));
        let snapshot = draw.prepare_for_draw(&mut node, &path, &display);

        assert!(!draw.is_dirty(&path));
        assert_eq!(snapshot.wire_color(), Color::rgb(1.0, 0.5, 0.0));
        assert_eq!(snapshot.depth_priority(), 5);
        assert_eq!(snapshot.buffers().triangle_count(), TRIANGLE_COUNT);
        assert_eq!(snapshot.parameters().wire_color, snapshot.wire_color());
        assert!(Arc::ptr_eq(&snapshot, &draw.snapshot(&path).unwrap()));
    }

    #[test]
    fn test_dormant_priority() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::new(DrawSettings::new().with_depth_priorities(9, 2));
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Lead);

        let snapshot = draw.prepare_for_draw(&mut node, &PlacementPath::from("|a"), &display);
        assert_eq!(snapshot.depth_priority(), 2);
    }

    #[test]
    fn test_failed_lookup_keeps_previous_values() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::rgb(0.0, 1.0, 0.0), DisplayStatus::ActiveComponent);

        draw.prepare_for_draw(&mut node, &path, &display);
        display.valid.set(false);
        draw.mark_dirty();
        let snapshot = draw.prepare_for_draw(&mut node, &path, &display);

        assert_eq!(snapshot.wire_color(), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(snapshot.depth_priority(), 5);
    }

    #[test]
    fn test_failed_lookup_without_history_uses_defaults() {
        let mut node = BoneNode::new();
        let settings = DrawSettings::new().with_wire_color(Color::rgb(0.2, 0.2, 0.2));
        let mut draw = DrawOverride::new(settings);
        let display = FixedDisplay::new(Color::rgb(1.0, 1.0, 1.0), DisplayStatus::ActiveComponent);
        display.valid.set(false);

        let snapshot = draw.prepare_for_draw(&mut node, &PlacementPath::from("|gone"), &display);

        assert_eq!(snapshot.wire_color(), Color::rgb(0.2, 0.2, 0.2));
        assert_eq!(snapshot.depth_priority(), 0);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_edits() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);

        let first = draw.prepare_for_draw(&mut node, &path, &display);
        node.set_attribute(Attribute::Size(SizeField::Width), AttributeValue::Double(3.0));
        draw.mark_dirty();
        let second = draw.prepare_for_draw(&mut node, &path, &display);

        assert_eq!(first.parameters().width, 1.0);
        assert_eq!(second.parameters().width, 3.0);
        assert_ne!(first.buffers(), second.buffers());
    }

    #[test]
    fn test_clean_override_reuses_snapshot() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);

        let first = draw.prepare_for_draw(&mut node, &path, &display);
        let second = draw.prepare_for_draw(&mut node, &path, &display);
        assert!(Arc::ptr_eq(&first, &second));

        draw.mark_dirty();
        assert!(draw.is_dirty(&path));
        let third = draw.prepare_for_draw(&mut node, &path, &display);
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_redraw_inputs_invalidate_snapshots() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);

        let first = draw.prepare_for_draw(&mut node, &path, &display);

        node.set_attribute(Attribute::Size(SizeField::Taper), AttributeValue::Double(0.5));
        assert!(!draw.pre_evaluation(&node, DirtyInputs::TAPER));
        assert!(!draw.is_dirty(&path));
        assert!(Arc::ptr_eq(&first, &draw.prepare_for_draw(&mut node, &path, &display)));

        node.set_attribute(Attribute::Size(SizeField::Width), AttributeValue::Double(2.0));
        assert!(draw.pre_evaluation(&node, DirtyInputs::WIDTH));
        assert!(draw.is_dirty(&path));

        let rebuilt = draw.prepare_for_draw(&mut node, &path, &display);
        assert_eq!(rebuilt.parameters().width, 2.0);
        assert_eq!(rebuilt.parameters().taper, 0.5);
    }

    #[test]
    fn test_each_placement_gets_its_own_snapshot() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);
        let (a, b) = (PlacementPath::from("|a"), PlacementPath::from("|b"));

        draw.prepare_for_draw(&mut node, &a, &display);
        assert!(draw.is_dirty(&b));
        draw.prepare_for_draw(&mut node, &b, &display);

        draw.mark_dirty();
        draw.prepare_for_draw(&mut node, &a, &display);
        assert!(!draw.is_dirty(&a));
        assert!(draw.is_dirty(&b));
    }

    #[test]
    fn test_snapshot_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DrawSnapshot>();

        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);
        let snapshot = draw.prepare_for_draw(&mut node, &PlacementPath::from("|bone1"), &display);

        let lines = std::thread::spawn(move || snapshot.buffers().line_count())
            .join()
            .unwrap();
        assert_eq!(lines, 16);
    }

    #[test]
    fn test_remove_placement() {
        let mut node = BoneNode::new();
        let mut draw = DrawOverride::default();
        let path = PlacementPath::from("|bone1");
        let display = FixedDisplay::new(Color::BLACK, DisplayStatus::Dormant);

        draw.prepare_for_draw(&mut node, &path, &display);
        assert!(draw.remove_placement(&path).is_some());
        assert!(draw.snapshot(&path).is_none());
    }
}
