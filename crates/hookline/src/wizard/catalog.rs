//! Static template catalog.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::models::Template;

/// Catalog entries in presentation order.
const TEMPLATES: [(&str, Template); 5] = [
    (
        "Standard",
        Template {
            description: "A well-rounded post that explains the product’s purpose, features, and why it’s the perfect solution to a common problem. It's detailed but not overwhelming.",
            style: "Standard",
            post_length: 300,
        },
    ),
    (
        "Formatted",
        Template {
            description: "A structured post that is broken down into clear sections highlighting the product's key features, benefits, and how it works. This template is great for a more formal approach to product introduction.",
            style: "Formatted",
            post_length: 500,
        },
    ),
    (
        "Chunky",
        Template {
            description: "A long-form post that provides an in-depth analysis of the product, its impact, and why it’s a game-changer. This template works well for more complex products.",
            style: "Chunky",
            post_length: 400,
        },
    ),
    (
        "Short",
        Template {
            description: "A concise, punchy post that highlights the core feature of the product. This template is best for audiences that want quick, impactful content.",
            style: "Short",
            post_length: 150,
        },
    ),
    (
        "Emojis",
        Template {
            description: "A fun and engaging post that uses emojis to convey the key benefits of the product. It's designed to capture attention and encourage interaction, great for social media platforms.",
            style: "Emojis",
            post_length: 200,
        },
    ),
];

/// Look up a template by its exact catalog name.
pub fn get(name: &str) -> Option<Template> {
    TEMPLATES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, template)| *template)
}

/// Iterate over `(name, template)` pairs in catalog order.
pub fn iter() -> impl Iterator<Item = (&'static str, Template)> {
    TEMPLATES.iter().copied()
}

/// Serializable view of the whole catalog; keeps catalog order as a JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCatalog;

impl Serialize for TemplateCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TEMPLATES.len()))?;
        for (name, template) in iter() {
            map.serialize_entry(name, &template)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_entries_in_order() {
        let names: Vec<_> = iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Standard", "Formatted", "Chunky", "Short", "Emojis"]);
    }

    #[test]
    fn test_post_lengths() {
        let lengths: Vec<_> = iter().map(|(_, t)| t.post_length).collect();
        assert_eq!(lengths, [300, 500, 400, 150, 200]);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(get("Short").map(|t| t.post_length), Some(150));
        assert!(get("short").is_none());
        assert!(get("Nonexistent").is_none());
    }

    #[test]
    fn test_style_matches_name() {
        for (name, template) in iter() {
            assert_eq!(name, template.style);
        }
    }

    #[test]
    fn test_serializes_in_catalog_order() {
        let json = serde_json::to_string(&TemplateCatalog).unwrap();
        let positions: Vec<_> = ["Standard", "Formatted", "Chunky", "Short", "Emojis"]
            .iter()
            .map(|name| json.find(&format!("\"{name}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Short"]["post_length"], 150);
        assert_eq!(value["Emojis"]["style"], "Emojis");
    }
}
