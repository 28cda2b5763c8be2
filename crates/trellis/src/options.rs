//! Layout configuration.

use crate::error::{Error, Result};
use crate::model::Direction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_WIDTH: f64 = 160.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;
pub const DEFAULT_RANK_SPACING: f64 = 60.0;
pub const DEFAULT_NODE_SPACING: f64 = 40.0;
/// Graphs with at least this many nodes switch to `LR` under `auto_direction`.
pub const DEFAULT_AUTO_DIRECTION_THRESHOLD: usize = 20;
pub const DEFAULT_ORDERING_ITERATIONS: usize = 8;
pub const DEFAULT_COMPONENT_SPACING: f64 = 80.0;
pub const DEFAULT_PARALLEL_EDGE_SPACING: f64 = 10.0;
pub const DEFAULT_BACK_EDGE_SPACING: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutOptions {
    /// Forces the direction; wins over `auto_direction`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub node_width: f64,
    pub node_height: f64,
    pub rank_spacing: f64,
    pub node_spacing: f64,
    pub auto_direction: bool,
    pub auto_direction_threshold: usize,
    /// Number of barycenter sweeps (down and up alternate). `0` keeps the discovery order.
    pub ordering_iterations: usize,
    pub component_spacing: f64,
    pub parallel_edge_spacing: f64,
    pub back_edge_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: None,
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            rank_spacing: DEFAULT_RANK_SPACING,
            node_spacing: DEFAULT_NODE_SPACING,
            auto_direction: false,
            auto_direction_threshold: DEFAULT_AUTO_DIRECTION_THRESHOLD,
            ordering_iterations: DEFAULT_ORDERING_ITERATIONS,
            component_spacing: DEFAULT_COMPONENT_SPACING,
            parallel_edge_spacing: DEFAULT_PARALLEL_EDGE_SPACING,
            back_edge_spacing: DEFAULT_BACK_EDGE_SPACING,
        }
    }
}

impl LayoutOptions {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_auto_direction(mut self, auto_direction: bool) -> Self {
        self.auto_direction = auto_direction;
        self
    }

    /// Parses a camelCase JSON object, e.g. `{"direction":"LR","nodeSpacing":30}`. Missing keys
    /// take their defaults. The result is validated.
    pub fn from_json(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text).map_err(|e| Error::InvalidOptionsJson {
            message: e.to_string(),
        })?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("rankSpacing", self.rank_spacing),
            ("nodeSpacing", self.node_spacing),
            ("componentSpacing", self.component_spacing),
            ("parallelEdgeSpacing", self.parallel_edge_spacing),
            ("backEdgeSpacing", self.back_edge_spacing),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidOptions { field, value });
            }
        }
        // Zero would turn every graph, even an empty one, left-to-right.
        if self.auto_direction_threshold == 0 {
            return Err(Error::InvalidOptions {
                field: "autoDirectionThreshold",
                value: 0.0,
            });
        }
        Ok(())
    }
}
