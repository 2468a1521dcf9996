//! Bone inspector
//!
//! Drives a bone node the way a scene-graph host would: creates it from a
//! configuration, edits attributes by name, evaluates every output for a set
//! of placements, duplicates it and prepares draw snapshots. Results are
//! reported through the log.
//!
//! Usage: `bone_inspector [config.toml | config.ron]`

use std::collections::HashMap;
use std::sync::Arc;

use bone_geometry::foundation::logging;
use bone_geometry::prelude::*;
use thiserror::Error;

/// Errors that stop the inspector
#[derive(Error, Debug)]
enum InspectorError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The node rejected a request
    #[error("Bone node error: {0}")]
    Bone(#[from] BoneError),

    /// A node handle did not resolve
    #[error("Node {0:?} is not registered")]
    MissingNode(NodeHandle),
}

/// Display state keyed by placement path
struct SceneDisplay {
    placements: HashMap<PlacementPath, (Color, DisplayStatus)>,
}

impl DisplayStateProvider for SceneDisplay {
    fn wire_color(&self, path: &PlacementPath) -> Result<Color, BoneError> {
        self.placements
            .get(path)
            .map(|(color, _)| *color)
            .ok_or_else(|| BoneError::InvalidPlacement(path.to_string()))
    }

    fn display_status(&self, path: &PlacementPath) -> Result<DisplayStatus, BoneError> {
        self.placements
            .get(path)
            .map(|(_, status)| *status)
            .ok_or_else(|| BoneError::InvalidPlacement(path.to_string()))
    }
}

fn load_config() -> Result<BoneConfig, InspectorError> {
    let config = match std::env::args().nth(1) {
        Some(path) => BoneConfig::load_from_file(&path)?,
        None => BoneConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), InspectorError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting bone inspector");
    log::info!("Attribute units: {:?}", config.units);

    let mut registry = NodeRegistry::with_config(config.clone());
    let handle = registry.create();
    let node = registry.get_mut(handle).ok_or(InspectorError::MissingNode(handle))?;

    let edits = [
        ("width", AttributeValue::Double(2.0)),
        ("height", AttributeValue::Double(1.5)),
        ("length", AttributeValue::Double(6.0)),
        ("taper", AttributeValue::Double(0.6)),
        ("localPositionY", AttributeValue::Distance(3.0)),
        ("localRotateZ", AttributeValue::Angle(config.units.angle.from_radians(0.25))),
        ("sideFins", AttributeValue::Bool(true)),
    ];

    let mut dirty = DirtyInputs::empty();
    for (name, value) in edits {
        node.set_attribute_by_name(name, value)?;
        dirty |= DirtyInputs::from(name.parse::<Attribute>()?);
        log::info!("{} = {:?}", name, node.get_attribute_by_name(name)?);
    }
    log::info!("Redraw required: {}", node.pre_evaluation(dirty));

    let placements = [
        Mat4::identity(),
        Mat4::translation_matrix(&Vec3::new(10.0, 0.0, 0.0)),
        Mat4::rotation_matrix(&Vec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0)),
    ];
    for plug in OutputPlug::ALL {
        match node.compute(plug, &placements) {
            ComputedOutput::Matrix(matrix) => log::info!("{}:{}", plug, matrix),
            ComputedOutput::MatrixArray(matrices) => {
                log::info!("{}: {} instances", plug, matrices.len());
                for (index, matrix) in matrices.iter().enumerate() {
                    log::debug!("{}[{}]:{}", plug, index, matrix);
                }
            }
        }
    }

    if let Err(error) = node.compute_by_name("boundingBox", &placements) {
        log::info!("Rejected request: {}", error);
    }

    log::info!("Cached world transforms: {}", node.world_transforms().len());

    if node.is_bounded() {
        let bounds = node.bounding_box().to_aabb();
        log::info!("Bounds: min {:?} max {:?}", bounds.min, bounds.max);
    }

    let copy = registry.duplicate(handle).ok_or(InspectorError::MissingNode(handle))?;
    registry
        .get_mut(handle)
        .ok_or(InspectorError::MissingNode(handle))?
        .set_attribute(Attribute::Size(SizeField::Width), AttributeValue::Double(4.0));
    let copy_width = registry
        .get(copy)
        .ok_or(InspectorError::MissingNode(copy))?
        .parameters()
        .width;
    log::info!("Duplicate keeps width {} after the source changed", copy_width);

    let display = SceneDisplay {
        placements: HashMap::from([
            (
                PlacementPath::from("|rig|bone1"),
                (Color::rgb(0.27, 1.0, 0.64), DisplayStatus::Lead),
            ),
            (
                PlacementPath::from("|rig|bone1_instance"),
                (Color::rgb(1.0, 1.0, 1.0), DisplayStatus::ActiveComponent),
            ),
        ]),
    };
    let mut draw = DrawOverride::new(config.draw);
    let node = registry.get_mut(handle).ok_or(InspectorError::MissingNode(handle))?;
    let paths = ["|rig|bone1", "|rig|bone1_instance", "|rig|deleted"].map(PlacementPath::from);

    for path in &paths {
        let snapshot = draw.prepare_for_draw(node, path, &display);
        log::info!(
            "{}: {} triangles, {} lines, colour {:?}, depth priority {}",
            path,
            snapshot.buffers().triangle_count(),
            snapshot.buffers().line_count(),
            snapshot.wire_color().to_array(),
            snapshot.depth_priority()
        );
    }

    for (name, value) in [("taper", 0.8), ("length", 8.0)] {
        let attribute = name.parse::<Attribute>()?;
        node.set_attribute(attribute, AttributeValue::Double(value));
        let redraw = draw.pre_evaluation(node, DirtyInputs::from(attribute));

        let before = draw.snapshot(&paths[0]);
        let snapshot = draw.prepare_for_draw(node, &paths[0], &display);
        let rebuilt = before.map_or(true, |before| !Arc::ptr_eq(&before, &snapshot));
        log::info!(
            "{} = {}: redraw {}, snapshot rebuilt {}, drawn length {}",
            name,
            value,
            redraw,
            rebuilt,
            snapshot.parameters().effective_length()
        );
    }

    log::info!("Bone inspector finished with {} nodes", registry.len());
    Ok(())
}
