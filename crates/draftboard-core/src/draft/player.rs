// Player catalog records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{opt_number_like, opt_string_like, string_like};

/// Base URL for embeddable Google Drive images.
const DRIVE_VIEW_URL: &str = "https://drive.google.com/uc?export=view&id=";

/// A draftable player from `players.public.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Catalog identifier, unique within the catalog.
    #[serde(deserialize_with = "string_like")]
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_number_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub bat_rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "opt_number_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub bowl_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_for_captains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clubs: Option<Vec<String>>,
    /// Name of the partner this player wants to be drafted with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duo_name: Option<String>,
    /// Duo opt-in as entered on the sign-up form ("Yes", "No", true, ...).
    #[serde(
        default,
        deserialize_with = "opt_string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub duo_opt_in: Option<String>,
    /// Identifier on CricClubs, the league's scoring platform.
    #[serde(
        default,
        deserialize_with = "opt_string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub cric_clubs_id: Option<String>,
    /// Fields this crate does not model, passed through untouched.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Player {
    /// Create a player with only the required fields set.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Player {
            id: id.into(),
            display_name: display_name.into(),
            photo_url: None,
            bat_rating: None,
            bowl_rating: None,
            role_preference: None,
            notes_for_captains: None,
            clubs: None,
            duo_name: None,
            duo_opt_in: None,
            cric_clubs_id: None,
            extra: BTreeMap::new(),
        }
    }

    /// Photo URL suitable for embedding.
    ///
    /// Google Drive share links (`open?id=FILE`, `file/d/FILE/view`) are
    /// rewritten to the direct `uc?export=view` form; any other URL is
    /// returned unchanged. Returns `None` when there is no photo.
    pub fn photo_view_url(&self) -> Option<String> {
        let url = self.photo_url.as_deref().filter(|u| !u.is_empty())?;
        Some(match drive_file_id(url) {
            Some(file_id) => format!("{DRIVE_VIEW_URL}{file_id}"),
            None => url.to_string(),
        })
    }

    /// Whether the player opted in to being drafted together with `duo_name`.
    pub fn is_duo_opt_in(&self) -> bool {
        self.duo_opt_in.as_deref().is_some_and(|v| {
            matches!(
                v.trim().to_lowercase().as_str(),
                "yes" | "y" | "true" | "1"
            )
        })
    }

    /// Clubs joined with ", ", or `None` when the player lists none.
    pub fn clubs_label(&self) -> Option<String> {
        self.clubs
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.join(", "))
    }
}

/// Extract the Drive file id following the first `id=` or `file/d/` marker.
fn drive_file_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 2] = ["id=", "file/d/"];

    for (start, _) in url.char_indices() {
        let rest = &url[start..];
        for marker in MARKERS {
            let Some(tail) = rest.strip_prefix(marker) else {
                continue;
            };
            let len = tail
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                .unwrap_or(tail.len());
            if len > 0 {
                return Some(&tail[..len]);
            }
        }
    }
    None
}
