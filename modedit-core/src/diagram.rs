//! Interface diagram
//!
//! Projects the interface list onto a box-and-arrow layout: the module is the
//! hub in the middle, inbound messages sit in a lane to its left, outbound
//! messages in a lane to its right, and services in a lane below it. The
//! result is a plain value; drawing it is left to the caller.

use modedit_libs::{
    AppError, DirectionCategory, Flow, InterfaceConfig, LayoutSettings, Point, Vocabulary,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Label used for the hub when the module has no file name yet.
pub const DEFAULT_MODULE_NAME: &str = "module";

/// Where a node sits relative to the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Hub,
    /// Left lane, inbound messages
    Upstream,
    /// Right lane, outbound messages
    Downstream,
    /// Bottom lane, services of either flow
    Service,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub label: String,
    pub role: NodeRole,
    pub position: Point,
    /// Stacking order; higher is drawn on top
    pub z: i32,
}

/// Directed arrow between two nodes, by index into [`Diagram::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub z: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub connectors: Vec<Connector>,
}

impl Diagram {
    /// Index of the hub node; always the first node.
    pub const HUB: usize = 0;

    /// `None` only for a diagram that was not produced by [`build`].
    pub fn hub(&self) -> Option<&DiagramNode> {
        self.nodes.get(Self::HUB)
    }

    /// Labels of connector endpoints, `(from, to)`.
    ///
    /// Connectors pointing outside [`Diagram::nodes`] are left out.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.connectors
            .iter()
            .filter_map(|c| {
                let from = self.nodes.get(c.from)?;
                let to = self.nodes.get(c.to)?;
                Some((from.label.as_str(), to.label.as_str()))
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the diagram as JSON for an external renderer.
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Diagram exported to: {:?}", path);
        Ok(())
    }
}

const HUB_Z: i32 = 1;
const BASE_Z: i32 = 0;

/// Build the diagram for `interfaces`.
///
/// Interfaces with a direction unknown to `vocabulary` are skipped.
pub fn build(
    module_name: &str,
    interfaces: &[InterfaceConfig],
    vocabulary: &Vocabulary,
    layout: &LayoutSettings,
) -> Diagram {
    let hub = layout.hub;

    let mut lanes: [Vec<(&InterfaceConfig, Flow)>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for interface in interfaces {
        let Some(direction) = vocabulary.direction(&interface.direction) else {
            debug!("Skipping '{}' with unknown direction", interface.name);
            continue;
        };
        let lane = match (direction.category, direction.flow) {
            (DirectionCategory::Message, Flow::Inbound) => 0,
            (DirectionCategory::Message, Flow::Outbound) => 1,
            (DirectionCategory::Service, _) => 2,
        };
        lanes[lane].push((interface, direction.flow));
    }

    let mut nodes = vec![DiagramNode {
        label: module_name.to_string(),
        role: NodeRole::Hub,
        position: hub,
        z: HUB_Z,
    }];
    let mut connectors = Vec::new();

    let roles = [NodeRole::Upstream, NodeRole::Downstream, NodeRole::Service];
    for (lane, role) in lanes.iter().zip(roles) {
        for (slot, (interface, flow)) in lane.iter().enumerate() {
            let offset = spread(slot, lane.len(), layout.node_spacing);
            let position = match role {
                NodeRole::Upstream => Point::new(hub.x - layout.lane_offset, hub.y + offset),
                NodeRole::Downstream => Point::new(hub.x + layout.lane_offset, hub.y + offset),
                _ => Point::new(hub.x + offset, hub.y + layout.service_offset),
            };

            let index = nodes.len();
            nodes.push(DiagramNode {
                label: interface.name.clone(),
                role,
                position,
                z: BASE_Z,
            });

            let (from, to) = match flow {
                Flow::Inbound => (index, Diagram::HUB),
                Flow::Outbound => (Diagram::HUB, index),
            };
            connectors.push(Connector { from, to, z: BASE_Z });
        }
    }

    Diagram { nodes, connectors }
}

/// Offset of `slot` out of `count` nodes centred on zero.
fn spread(slot: usize, count: usize, spacing: f64) -> f64 {
    (slot as f64 - (count as f64 - 1.0) / 2.0) * spacing
}
