//! Prefab scene graphs
//!
//! A prefab is a tree of transforms, each optionally carrying a game object
//! with its components and sprite. Component data is a bag of named values
//! of a closed set of kinds. Prefabs are encoded with bincode; like every
//! other record, the layout has no version field.
//!
//! Decoding is bounded: input larger than [`MAX_PREFAB_BYTES`] is rejected,
//! and a chain of nested transforms and component values may be at most
//! [`MAX_NESTING`] levels deep.

use crate::error::Result;
use crate::geometry::{Rect, Vec2};
use crate::records::pointer::PointerRecord;
use bincode::Options;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;

/// Largest encoded prefab accepted
pub const MAX_PREFAB_BYTES: u64 = 64 * 1024 * 1024;

/// Deepest chain of nested transforms and component values accepted on decode
pub const MAX_NESTING: usize = 128;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of recursive decoding for as long as it is alive
struct NestingGuard;

impl NestingGuard {
    fn enter<E: de::Error>() -> std::result::Result<Self, E> {
        DEPTH.with(|depth| {
            if depth.get() >= MAX_NESTING {
                return Err(E::custom(format!(
                    "prefab nested deeper than {} levels",
                    MAX_NESTING
                )));
            }
            depth.set(depth.get() + 1);
            Ok(NestingGuard)
        })
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_PREFAB_BYTES)
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// A reusable scene-graph template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabRecord {
    pub name: String,
    pub transform_root: TransformRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformRecord {
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f64,
    pub scale: Vec2,
    pub game_object: Option<GameObjectRecord>,
    pub children: Vec<TransformRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObjectRecord {
    pub name: String,
    pub z_update: f64,
    pub components: Vec<ComponentRecord>,
    pub sprite: Option<SpriteRecord>,
    pub draw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub type_name: String,
    pub active: bool,
    pub data: BTreeMap<String, ComponentValue>,
}

/// A single field of component data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ComponentValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vec2(Vec2),
    Pointer(PointerRecord),
    List(Vec<ComponentValue>),
}

#[derive(Deserialize)]
#[serde(rename = "TransformRecord")]
struct TransformFields {
    position: Vec2,
    angle: f64,
    scale: Vec2,
    game_object: Option<GameObjectRecord>,
    children: Vec<TransformRecord>,
}

#[derive(Deserialize)]
#[serde(rename = "ComponentValue")]
enum ComponentValueFields {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vec2(Vec2),
    Pointer(PointerRecord),
    List(Vec<ComponentValue>),
}

impl<'de> Deserialize<'de> for TransformRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let _guard = NestingGuard::enter::<D::Error>()?;
        let fields = TransformFields::deserialize(deserializer)?;

        Ok(TransformRecord {
            position: fields.position,
            angle: fields.angle,
            scale: fields.scale,
            game_object: fields.game_object,
            children: fields.children,
        })
    }
}

impl<'de> Deserialize<'de> for ComponentValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let _guard = NestingGuard::enter::<D::Error>()?;

        Ok(match ComponentValueFields::deserialize(deserializer)? {
            ComponentValueFields::Bool(value) => ComponentValue::Bool(value),
            ComponentValueFields::Int(value) => ComponentValue::Int(value),
            ComponentValueFields::Float(value) => ComponentValue::Float(value),
            ComponentValueFields::Text(value) => ComponentValue::Text(value),
            ComponentValueFields::Vec2(value) => ComponentValue::Vec2(value),
            ComponentValueFields::Pointer(value) => ComponentValue::Pointer(value),
            ComponentValueFields::List(values) => ComponentValue::List(values),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRecord {
    pub color_mask: Vec<f32>,
    pub target_area: Rect,
    pub z_draw: f32,
    pub vertex_draw_mode: u32,
    pub texture_draw_mode: u32,
    pub color_draw_mode: u32,
    pub shader_program_id: String,
    pub texture_id: String,
    pub canvas_id: String,
    pub batch_id: String,
}

impl Default for TransformRecord {
    fn default() -> Self {
        TransformRecord {
            position: Vec2::default(),
            angle: 0.0,
            scale: Vec2::new(1.0, 1.0),
            game_object: None,
            children: Vec::new(),
        }
    }
}

impl TransformRecord {
    /// This transform and its descendants in depth-first order
    pub fn walk(&self) -> Vec<&TransformRecord> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

impl PrefabRecord {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode_options().serialize(self)?)
    }

    /// Decode a prefab, rejecting oversized or overly nested input
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(bincode_options().deserialize(data)?)
    }

    /// Names of all game objects in depth-first order
    pub fn game_object_names(&self) -> Vec<&str> {
        self.transform_root
            .walk()
            .into_iter()
            .filter_map(|t| t.game_object.as_ref().map(|g| g.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn player() -> PrefabRecord {
        let health = ComponentRecord {
            type_name: "Health".to_string(),
            active: true,
            data: BTreeMap::from([
                ("max".to_string(), ComponentValue::Int(100)),
                ("regen".to_string(), ComponentValue::Float(0.5)),
                (
                    "target".to_string(),
                    ComponentValue::Pointer(PointerRecord::GameObject {
                        name: "boss".to_string(),
                    }),
                ),
                (
                    "spawn".to_string(),
                    ComponentValue::List(vec![
                        ComponentValue::Vec2(Vec2::new(1.0, 2.0)),
                        ComponentValue::Text("left".to_string()),
                        ComponentValue::Bool(false),
                    ]),
                ),
            ]),
        };

        let sprite = SpriteRecord {
            color_mask: vec![1.0, 1.0, 1.0, 1.0],
            target_area: Rect::new(0.0, 0.0, 32.0, 32.0),
            z_draw: 1.0,
            vertex_draw_mode: 0,
            texture_draw_mode: 0,
            color_draw_mode: 1,
            shader_program_id: "default".to_string(),
            texture_id: "cirno".to_string(),
            canvas_id: "world".to_string(),
            batch_id: "characters".to_string(),
        };

        let hitbox = TransformRecord {
            position: Vec2::new(0.0, 4.0),
            game_object: Some(GameObjectRecord {
                name: "hitbox".to_string(),
                z_update: 0.0,
                components: Vec::new(),
                sprite: None,
                draw: false,
            }),
            ..Default::default()
        };

        PrefabRecord {
            name: "player".to_string(),
            transform_root: TransformRecord {
                game_object: Some(GameObjectRecord {
                    name: "cirno".to_string(),
                    z_update: 1.0,
                    components: vec![health],
                    sprite: Some(sprite),
                    draw: true,
                }),
                children: vec![hitbox, TransformRecord::default()],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_prefab_round_trip() {
        let prefab = player();
        let restored = PrefabRecord::from_bytes(&prefab.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, prefab);
    }

    #[test]
    fn test_game_object_names() {
        assert_eq!(player().game_object_names(), vec!["cirno", "hitbox"]);
    }

    fn nested_list(depth: usize) -> ComponentValue {
        let mut value = ComponentValue::Int(1);
        for _ in 0..depth {
            value = ComponentValue::List(vec![value]);
        }
        value
    }

    fn with_value(value: ComponentValue) -> PrefabRecord {
        let mut prefab = player();
        if let Some(game_object) = prefab.transform_root.game_object.as_mut() {
            game_object.components[0]
                .data
                .insert("nested".to_string(), value);
        }
        prefab
    }

    #[test]
    fn test_nesting_within_limit() {
        // Root transform, then lists down to a scalar
        let prefab = with_value(nested_list(MAX_NESTING - 2));
        let restored = PrefabRecord::from_bytes(&prefab.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, prefab);
    }

    #[test]
    fn test_deep_component_nesting_rejected() {
        let bytes = with_value(nested_list(MAX_NESTING)).to_bytes().unwrap();
        assert!(matches!(
            PrefabRecord::from_bytes(&bytes),
            Err(CodecError::Serialization(_))
        ));

        // The depth counter is released after a failed decode
        let prefab = player();
        assert_eq!(
            PrefabRecord::from_bytes(&prefab.to_bytes().unwrap()).unwrap(),
            prefab
        );
    }

    #[test]
    fn test_hostile_list_nesting_does_not_recurse_unbounded() {
        // 100k single-element lists around an Int, built as raw bytes
        let mut bytes = Vec::new();
        for _ in 0..100_000 {
            bytes.extend_from_slice(&6u32.to_le_bytes());
            bytes.extend_from_slice(&1u64.to_le_bytes());
        }
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&7i64.to_le_bytes());

        let result: bincode::Result<ComponentValue> = bincode_options().deserialize(&bytes);
        assert!(result.is_err());

        let result: bincode::Result<ComponentValue> =
            bincode_options().deserialize(&bytes[bytes.len() - 24..]);
        assert_eq!(
            result.unwrap(),
            ComponentValue::List(vec![ComponentValue::Int(7)])
        );
    }

    #[test]
    fn test_deep_transform_nesting_rejected() {
        let mut root = TransformRecord::default();
        for _ in 0..MAX_NESTING {
            root = TransformRecord {
                children: vec![root],
                ..Default::default()
            };
        }
        let prefab = PrefabRecord {
            name: "tower".to_string(),
            transform_root: root,
        };

        assert!(matches!(
            PrefabRecord::from_bytes(&prefab.to_bytes().unwrap()),
            Err(CodecError::Serialization(_))
        ));
    }

    #[test]
    fn test_oversized_length_rejected() {
        // Name length prefix far beyond the size limit
        let mut bytes = (1u64 << 40).to_le_bytes().to_vec();
        bytes.extend_from_slice(b"player");

        assert!(matches!(
            PrefabRecord::from_bytes(&bytes),
            Err(CodecError::Serialization(_))
        ));
    }

    #[test]
    fn test_truncated_prefab() {
        let bytes = player().to_bytes().unwrap();
        assert!(matches!(
            PrefabRecord::from_bytes(&bytes[..bytes.len() / 2]),
            Err(CodecError::Serialization(_))
        ));
    }
}
