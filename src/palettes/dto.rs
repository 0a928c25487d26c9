use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Request body for creating or replacing a palette. The colors array
/// order is the display order.
#[derive(Debug, Deserialize)]
pub struct PaletteInput {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// A single color within a palette.
#[derive(Debug, Serialize)]
pub struct ColorEntry {
    pub hex: String,
    pub position: i32,
}

/// Palette with its colors, as returned by list and detail reads.
#[derive(Debug, Serialize)]
pub struct PaletteDetails {
    pub id: Uuid,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub colors: Vec<ColorEntry>,
}

/// Response returned after creating a palette.
#[derive(Debug, Serialize)]
pub struct CreatedPaletteResponse {
    pub message: String,
    #[serde(rename = "paletteId")]
    pub palette_id: Uuid,
}

/// Plain `{message}` acknowledgement for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_response_uses_palette_id_key() {
        let response = CreatedPaletteResponse {
            message: "Palette created!".into(),
            palette_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Palette created!");
        assert!(json.get("paletteId").is_some());
        assert!(json.get("palette_id").is_none());
    }

    #[test]
    fn palette_details_shape() {
        let details = PaletteDetails {
            id: Uuid::new_v4(),
            title: Some("Sunset".into()),
            theme: Some("warm".into()),
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            colors: vec![
                ColorEntry {
                    hex: "#FFFFFF".into(),
                    position: 0,
                },
                ColorEntry {
                    hex: "#000000".into(),
                    position: 1,
                },
            ],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["colors"][0]["hex"], "#FFFFFF");
        assert_eq!(json["colors"][0]["position"], 0);
        assert_eq!(json["colors"][1]["position"], 1);
        assert!(json["description"].is_null());
    }

    #[test]
    fn input_colors_default_to_empty() {
        let input: PaletteInput =
            serde_json::from_str(r#"{"title":"Bare","theme":null,"description":null}"#).unwrap();
        assert!(input.colors.is_empty());
    }
}
