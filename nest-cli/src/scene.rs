//! Scene file format: a small JSON document describing a bed and its items.
//!
//! Deliberately decoupled from the engine's own types — the CLI owns its
//! input format and translates it into `nest` request types, the same
//! separation the engine keeps between its public request/response shape
//! and whatever a caller's own data model looks like.

use nest::{Bed, Item, Outline};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneBed {
    Rectangle { width: f64, height: f64 },
    Circle { diameter: f64 },
}

impl From<SceneBed> for Bed {
    fn from(bed: SceneBed) -> Self {
        match bed {
            SceneBed::Rectangle { width, height } => Bed::Rectangle { width, height },
            SceneBed::Circle { diameter } => Bed::Circle { diameter },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SceneItem {
    pub contour: Vec<(f64, f64)>,
    #[serde(default)]
    pub holes: Vec<Vec<(f64, f64)>>,
    #[serde(default)]
    pub priority: i32,
}

impl From<SceneItem> for Item {
    fn from(item: SceneItem) -> Self {
        Item {
            outline: Outline::new(item.contour, item.holes),
            priority: item.priority,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Scene {
    pub bed: SceneBed,
    pub items: Vec<SceneItem>,
}
