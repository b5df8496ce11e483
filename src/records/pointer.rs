//! References between resources inside prefab data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to another engine object, resolved when a prefab is instantiated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerRecord {
    GameObject {
        name: String,
    },
    Component {
        game_object: String,
        component_type: String,
    },
    Resource {
        resource_type: String,
        resource_id: String,
    },
    Batch {
        canvas_id: String,
        batch_id: String,
    },
}

impl fmt::Display for PointerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerRecord::GameObject { name } => write!(f, "gmob:{}", name),
            PointerRecord::Component {
                game_object,
                component_type,
            } => write!(f, "comp:{}/{}", game_object, component_type),
            PointerRecord::Resource {
                resource_type,
                resource_id,
            } => write!(f, "res:{}/{}", resource_type, resource_id),
            PointerRecord::Batch {
                canvas_id,
                batch_id,
            } => write!(f, "batch:{}/{}", canvas_id, batch_id),
        }
    }
}
