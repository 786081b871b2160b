//! Gameplay metadata from Tiled JSON maps
//!
//! Only what the session needs is read: object positions from one object
//! layer and the occupied cells of the reset tile layer. Tilesets, images
//! and tile properties are left to whatever renders the map.
//!
//! Tile layer `data` must be a plain JSON array (Tiled's CSV layer format).
//! Base64/compressed layers fail to parse.

use glam::Vec2;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::settings::MapSchema;
use crate::sim::{Rect, SpawnPoint};

/// A placed object (Tiled `objectgroup` entry)
#[derive(Debug, Clone, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl MapObject {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// The layer kinds we understand; anything else (image layers, groups) is skipped
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapLayer {
    TileLayer {
        name: String,
        width: usize,
        height: usize,
        /// Global tile ids, row-major; 0 means empty
        #[serde(default)]
        data: Vec<u32>,
        #[serde(default)]
        offsetx: f32,
        #[serde(default)]
        offsety: f32,
    },
    ObjectGroup {
        name: String,
        #[serde(default)]
        objects: Vec<MapObject>,
    },
    #[serde(other)]
    Other,
}

impl MapLayer {
    pub fn name(&self) -> Option<&str> {
        match self {
            MapLayer::TileLayer { name, .. } | MapLayer::ObjectGroup { name, .. } => Some(name),
            MapLayer::Other => None,
        }
    }
}

/// The parts of a Tiled map the session reads
#[derive(Debug, Clone, Deserialize)]
pub struct MapMetadata {
    /// Size in tiles
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

impl MapMetadata {
    pub fn from_tiled_json(json: &str) -> Result<Self, ConfigError> {
        let map: MapMetadata = serde_json::from_str(json)?;
        log::debug!(
            "Parsed {}x{} map with {} layers",
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }

    pub fn width_in_pixels(&self) -> f32 {
        self.width as f32 * self.tilewidth as f32
    }

    pub fn height_in_pixels(&self) -> f32 {
        self.height as f32 * self.tileheight as f32
    }

    pub fn size_in_pixels(&self) -> Vec2 {
        Vec2::new(self.width_in_pixels(), self.height_in_pixels())
    }

    pub fn layer(&self, name: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.name() == Some(name))
    }

    /// All objects of the named object layer
    pub fn objects(&self, layer: &str) -> Result<&[MapObject], ConfigError> {
        match self.layer(layer) {
            Some(MapLayer::ObjectGroup { objects, .. }) => Ok(objects),
            _ => Err(ConfigError::MissingLayer {
                name: layer.to_string(),
            }),
        }
    }

    /// Objects in `layer` whose name is `name`, in map order
    pub fn named_objects<'a>(
        &'a self,
        layer: &str,
        name: &'a str,
    ) -> Result<impl Iterator<Item = &'a MapObject> + 'a, ConfigError> {
        Ok(self.objects(layer)?.iter().filter(move |o| o.name == name))
    }

    /// Player spawns; the map must contain at least one
    pub fn spawn_points(&self, schema: &MapSchema) -> Result<Vec<SpawnPoint>, ConfigError> {
        let spawns: Vec<SpawnPoint> = self
            .named_objects(&schema.object_layer, &schema.spawn_name)?
            .map(|o| SpawnPoint::new(o.x, o.y))
            .collect();
        if spawns.is_empty() {
            return Err(ConfigError::NoSpawnPoints {
                object_name: schema.spawn_name.clone(),
            });
        }
        Ok(spawns)
    }

    /// Potion placements (bottom-left anchors)
    pub fn collectible_layout(&self, schema: &MapSchema) -> Result<Vec<Vec2>, ConfigError> {
        Ok(self
            .named_objects(&schema.object_layer, &schema.collectible_name)?
            .map(MapObject::pos)
            .collect())
    }

    /// One world rectangle per non-empty cell of a tile layer
    pub fn tile_regions(&self, layer: &str) -> Result<Vec<Rect>, ConfigError> {
        let Some(MapLayer::TileLayer {
            width,
            data,
            offsetx,
            offsety,
            ..
        }) = self.layer(layer)
        else {
            return Err(ConfigError::MissingLayer {
                name: layer.to_string(),
            });
        };

        let tile = Vec2::new(self.tilewidth as f32, self.tileheight as f32);
        let offset = Vec2::new(*offsetx, *offsety);
        let width = (*width).max(1);
        Ok(data
            .iter()
            .enumerate()
            .filter(|(_, gid)| **gid != 0)
            .map(|(i, _)| {
                let cell = Vec2::new((i % width) as f32, (i / width) as f32);
                let min = offset + cell * tile;
                Rect::new(min, min + tile)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"{
        "width": 4, "height": 3, "tilewidth": 32, "tileheight": 32,
        "orientation": "orthogonal",
        "layers": [
            { "type": "tilelayer", "name": "suelo", "width": 4, "height": 3,
              "data": [1,1,1,1, 1,1,1,1, 1,1,1,1] },
            { "type": "tilelayer", "name": "suelo2", "width": 4, "height": 3,
              "data": [0,0,0,0, 0,7,7,0, 0,0,0,0] },
            { "type": "imagelayer", "name": "sky", "image": "sky.png" },
            { "type": "objectgroup", "name": "objetos", "objects": [
                { "id": 1, "name": "pj", "x": 48, "y": 48, "width": 0, "height": 0 },
                { "id": 2, "name": "pocion", "x": 10, "y": 90,
                  "width": 32, "height": 32, "gid": 3 },
                { "id": 3, "name": "pj", "x": 100, "y": 20 },
                { "id": 4, "name": "sign", "x": 5, "y": 5 }
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_dimensions() {
        let map = MapMetadata::from_tiled_json(MAP).unwrap();
        assert_eq!(map.size_in_pixels(), Vec2::new(128.0, 96.0));
        assert_eq!(map.layers.len(), 4);
        assert!(matches!(map.layers[2], MapLayer::Other));
    }

    #[test]
    fn test_spawns_and_layout() {
        let map = MapMetadata::from_tiled_json(MAP).unwrap();
        let schema = MapSchema::default();

        let spawns = map.spawn_points(&schema).unwrap();
        assert_eq!(spawns, vec![SpawnPoint::new(48.0, 48.0), SpawnPoint::new(100.0, 20.0)]);

        let layout = map.collectible_layout(&schema).unwrap();
        assert_eq!(layout, vec![Vec2::new(10.0, 90.0)]);
    }

    #[test]
    fn test_reset_regions() {
        let map = MapMetadata::from_tiled_json(MAP).unwrap();
        let regions = map.tile_regions("suelo2").unwrap();
        assert_eq!(
            regions,
            vec![
                Rect::new(Vec2::new(32.0, 32.0), Vec2::new(64.0, 64.0)),
                Rect::new(Vec2::new(64.0, 32.0), Vec2::new(96.0, 64.0)),
            ]
        );
    }

    #[test]
    fn test_missing_layers() {
        let map = MapMetadata::from_tiled_json(MAP).unwrap();
        assert!(matches!(
            map.tile_regions("lava"),
            Err(ConfigError::MissingLayer { .. })
        ));
        // An object layer is not a tile layer
        assert!(matches!(
            map.tile_regions("objetos"),
            Err(ConfigError::MissingLayer { .. })
        ));

        let schema = MapSchema {
            object_layer: "nope".to_string(),
            ..MapSchema::default()
        };
        assert!(matches!(
            map.spawn_points(&schema),
            Err(ConfigError::MissingLayer { .. })
        ));
    }

    #[test]
    fn test_no_spawn_objects() {
        let map = MapMetadata::from_tiled_json(MAP).unwrap();
        let schema = MapSchema {
            spawn_name: "hero".to_string(),
            ..MapSchema::default()
        };
        assert!(matches!(
            map.spawn_points(&schema),
            Err(ConfigError::NoSpawnPoints { .. })
        ));
    }

    #[test]
    fn test_oversized_header_does_not_overflow() {
        let map = MapMetadata::from_tiled_json(
            r#"{ "width": 4000000000, "height": 2, "tilewidth": 64, "tileheight": 32 }"#,
        )
        .unwrap();
        assert_eq!(map.width_in_pixels(), 4_000_000_000.0 * 64.0);
        assert_eq!(map.height_in_pixels(), 64.0);
    }

    #[test]
    fn test_base64_tile_data_rejected() {
        let err = MapMetadata::from_tiled_json(
            r#"{ "width": 1, "height": 1, "tilewidth": 32, "tileheight": 32, "layers": [
                { "type": "tilelayer", "name": "suelo2", "width": 1, "height": 1,
                  "encoding": "base64", "data": "AQAAAA==" }
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_malformed_map() {
        assert!(matches!(
            MapMetadata::from_tiled_json(r#"{ "width": 2 }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
