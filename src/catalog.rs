//! Animal categories and the records fetched for them
//!
//! `AnimalDetail` mirrors the animals API payload and `PhotoPage` mirrors the
//! photo search payload. Every field is optional: the remote services omit
//! attributes freely and a missing attribute is never an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;

/// Closed set of categories the gallery browses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Elephant,
    Lion,
    Fox,
    Dog,
    Shark,
    Turtle,
    Whale,
    Penguin,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Elephant,
        Category::Lion,
        Category::Fox,
        Category::Dog,
        Category::Shark,
        Category::Turtle,
        Category::Whale,
        Category::Penguin,
    ];

    /// Label used as the remote query term and as the persisted `animal_name`
    pub fn label(&self) -> &'static str {
        match self {
            Category::Elephant => "Elephant",
            Category::Lion => "Lion",
            Category::Fox => "Fox",
            Category::Dog => "Dog",
            Category::Shark => "Shark",
            Category::Turtle => "Turtle",
            Category::Whale => "Whale",
            Category::Penguin => "Penguin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GalleryError::Validation("category must not be empty".into()));
        }

        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GalleryError::Validation(format!("unknown category: {}", trimmed)))
    }
}

/// Descriptive record returned by the animals API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<Taxonomy>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
}

impl AnimalDetail {
    pub fn scientific_name(&self) -> Option<&str> {
        self.taxonomy.as_ref()?.scientific_name.as_deref()
    }

    pub fn habitat(&self) -> Option<&str> {
        self.characteristics.as_ref()?.habitat.as_deref()
    }

    pub fn lifespan(&self) -> Option<&str> {
        self.characteristics.as_ref()?.lifespan.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    #[serde(rename = "class")]
    pub taxonomy_class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub scientific_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Characteristics {
    pub prey: Option<String>,
    pub name_of_young: Option<String>,
    pub group_behavior: Option<String>,
    pub estimated_population_size: Option<String>,
    pub biggest_threat: Option<String>,
    pub most_distinctive_feature: Option<String>,
    #[serde(rename = "other_name(s)")]
    pub other_names: Option<String>,
    pub gestation_period: Option<String>,
    pub habitat: Option<String>,
    pub predators: Option<String>,
    pub diet: Option<String>,
    pub average_litter_size: Option<String>,
    pub lifestyle: Option<String>,
    pub common_name: Option<String>,
    pub number_of_species: Option<String>,
    pub location: Option<String>,
    pub slogan: Option<String>,
    pub group: Option<String>,
    pub color: Option<String>,
    pub skin_type: Option<String>,
    pub top_speed: Option<String>,
    pub lifespan: Option<String>,
    pub weight: Option<String>,
    pub length: Option<String>,
    pub age_of_sexual_maturity: Option<String>,
    pub age_of_weaning: Option<String>,
    pub distinctive_feature: Option<String>,
    pub temperament: Option<String>,
    pub training: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub litter_size: Option<String>,
    pub height: Option<String>,
    pub origin: Option<String>,
    pub main_prey: Option<String>,
    pub favorite_food: Option<String>,
    pub water_type: Option<String>,
    pub optimum_ph_level: Option<String>,
    pub average_clutch_size: Option<String>,
}

/// One page of photo search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoPage {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_results: Option<u64>,
    pub next_page: Option<String>,
    pub photos: Option<Vec<Photo>>,
}

impl PhotoPage {
    /// Number of photos the page returned, with or without a usable image URL
    pub fn item_count(&self) -> usize {
        self.photos.as_ref().map_or(0, Vec::len)
    }

    /// Canonical large image URLs in response order
    pub fn image_urls(&self) -> Vec<String> {
        self.photos
            .iter()
            .flatten()
            .filter_map(|photo| photo.src.as_ref()?.large.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
    pub photographer: Option<String>,
    pub photographer_url: Option<String>,
    pub photographer_id: Option<u64>,
    pub avg_color: Option<String>,
    pub src: Option<PhotoSource>,
    pub liked: Option<bool>,
    pub alt: Option<String>,
}

/// Rendition URLs for a single photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoSource {
    pub original: Option<String>,
    #[serde(rename = "large2x")]
    pub large_2x: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub portrait: Option<String>,
    pub landscape: Option<String>,
    pub tiny: Option<String>,
}
