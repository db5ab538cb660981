//! Prop layout loaded from `config/world.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::interaction::components::InteractionCategory;

const CONFIG_PATH: &str = "config/world.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawWorldLayout {
    #[serde(default)]
    props: Vec<RawProp>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProp {
    name: String,
    #[serde(default)]
    category: Option<String>,
    position: [f32; 3],
    #[serde(default)]
    radius: Option<f32>,
}

/// One prop to spawn. `category == None` spawns a plain obstacle.
#[derive(Debug, Clone)]
pub struct PropSpec {
    pub name: String,
    pub category: Option<InteractionCategory>,
    pub position: Vec3,
    pub radius: Option<f32>,
}

#[derive(Resource, Debug, Clone)]
pub struct WorldLayout {
    pub props: Vec<PropSpec>,
}

impl WorldLayout {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawWorldLayout>(raw).map(Self::from)
    }
}

impl From<RawWorldLayout> for WorldLayout {
    fn from(value: RawWorldLayout) -> Self {
        let props = value
            .props
            .into_iter()
            .map(|raw| {
                let category = raw.category.as_deref().and_then(|tag| {
                    let resolved = InteractionCategory::from_tag(tag);
                    if resolved.is_none() {
                        warn!(
                            "Prop '{}' has unknown category '{}'; spawning it as an obstacle",
                            raw.name, tag
                        );
                    }
                    resolved
                });
                let [x, y, z] = raw.position;
                PropSpec {
                    name: raw.name,
                    category,
                    position: Vec3::new(x, y, z),
                    radius: raw.radius.filter(|radius| *radius > 0.0),
                }
            })
            .collect();
        Self { props }
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        let prop = |name: &str, category: Option<InteractionCategory>, x: f32, z: f32| PropSpec {
            name: name.to_string(),
            category,
            position: Vec3::new(x, 20.0, z),
            radius: None,
        };

        Self {
            props: vec![
                prop("Cardboard box", Some(InteractionCategory::Push), -240.0, 0.0),
                prop("Water bowl", Some(InteractionCategory::Drink), -160.0, -120.0),
                prop("Scratching post", Some(InteractionCategory::Scratch), -80.0, -220.0),
                prop("Food bowl", Some(InteractionCategory::Food), 0.0, -260.0),
                prop("Toy mouse", Some(InteractionCategory::Grab), 80.0, -220.0),
                prop("Yarn ball", Some(InteractionCategory::Play), 160.0, -120.0),
                prop("Potted plant", Some(InteractionCategory::Sniff), 240.0, 0.0),
                prop("Bookshelf", None, 0.0, 0.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_covers_every_category() {
        let layout = WorldLayout::default();
        for category in InteractionCategory::ALL {
            assert!(layout
                .props
                .iter()
                .any(|prop| prop.category == Some(category)));
        }
    }

    #[test]
    fn unknown_categories_become_obstacles() {
        let layout = WorldLayout::from_toml_str(
            r#"
            [[props]]
            name = "Laser pointer"
            category = "Play"
            position = [10.0, 5.0, -30.0]
            radius = 4.0

            [[props]]
            name = "Vacuum"
            category = "hiss"
            position = [0.0, 20.0, 50.0]
            radius = -1.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(layout.props.len(), 2);
        assert_eq!(layout.props[0].category, Some(InteractionCategory::Play));
        assert_eq!(layout.props[0].radius, Some(4.0));
        assert_eq!(layout.props[1].category, None);
        assert_eq!(layout.props[1].radius, None);
    }
}
