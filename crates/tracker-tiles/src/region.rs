//! Named region presets.
//!
//! The tracker looks for maps under `/LoRa_Tracker/Maps/<CODE>/` on its SD
//! card, so every download is filed under a short region code. The built-in
//! catalog covers the French administrative regions; more presets can be
//! loaded from a YAML file:
//!
//! ```yaml
//! - code: LUX
//!   name: Luxembourg
//!   bbox: [49.4, 5.7, 50.2, 6.6]
//! ```

use crate::{BoundingBox, Result, TileError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A named bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Short code used as the output directory name (e.g. `IDF`).
    pub code: String,
    /// Human readable name.
    pub name: String,
    /// Area covered by the region.
    pub bbox: BoundingBox,
}

/// YAML form of a region preset.
#[derive(Debug, Deserialize)]
struct RegionSpec {
    code: String,
    name: String,
    bbox: [f64; 4],
}

impl TryFrom<RegionSpec> for Region {
    type Error = TileError;

    fn try_from(spec: RegionSpec) -> Result<Self> {
        let [min_lat, min_lon, max_lat, max_lon] = spec.bbox;
        Ok(Region {
            code: spec.code,
            name: spec.name,
            bbox: BoundingBox::new(min_lat, min_lon, max_lat, max_lon)?,
        })
    }
}

// (code, name, min_lat, min_lon, max_lat, max_lon)
const FRANCE: &[(&str, &str, f64, f64, f64, f64)] = &[
    ("IDF", "Île-de-France", 48.1, 1.4, 49.2, 3.6),
    ("ARA", "Auvergne-Rhône-Alpes", 44.1, 2.0, 46.8, 7.2),
    ("PACA", "Provence-Alpes-Côte d'Azur", 42.9, 4.2, 45.1, 7.7),
    ("OCC", "Occitanie", 42.3, -0.4, 45.0, 4.9),
    ("NAQ", "Nouvelle-Aquitaine", 44.0, -1.8, 47.2, 2.6),
    ("BRE", "Bretagne", 47.2, -5.2, 48.9, -0.9),
    ("NOR", "Normandie", 48.2, -2.0, 49.8, 1.8),
    ("HDF", "Hauts-de-France", 48.8, 1.4, 51.1, 4.3),
    ("GES", "Grand Est", 47.4, 3.4, 49.6, 8.3),
    ("BFC", "Bourgogne-Franche-Comté", 46.1, 2.8, 48.4, 7.2),
    ("PDL", "Pays de la Loire", 46.2, -2.6, 48.6, 0.9),
    ("CVL", "Centre-Val de Loire", 46.3, 0.0, 48.6, 3.2),
    ("COR", "Corse", 41.3, 8.5, 43.1, 9.6),
];

/// Ordered collection of region presets.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Catalog containing only the built-in French regions.
    pub fn builtin() -> Self {
        let regions = FRANCE
            .iter()
            .map(|&(code, name, min_lat, min_lon, max_lat, max_lon)| Region {
                code: code.to_string(),
                name: name.to_string(),
                bbox: BoundingBox {
                    min_lat,
                    min_lon,
                    max_lat,
                    max_lon,
                },
            })
            .collect();
        Self { regions }
    }

    /// Look up a region by code, ignoring case.
    pub fn get(&self, code: &str) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
    }

    /// Look up a region, failing with [`TileError::UnknownRegion`].
    pub fn require(&self, code: &str) -> Result<&Region> {
        self.get(code)
            .ok_or_else(|| TileError::UnknownRegion(code.to_string()))
    }

    /// Add a region, replacing any preset with the same code.
    pub fn insert(&mut self, region: Region) {
        match self
            .regions
            .iter_mut()
            .find(|r| r.code.eq_ignore_ascii_case(&region.code))
        {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
    }

    /// Merge presets from YAML text. Returns the number of presets read.
    pub fn merge_yaml_str(&mut self, yaml: &str) -> Result<usize> {
        let specs: Vec<RegionSpec> = serde_yaml::from_str(yaml)?;
        let count = specs.len();
        for spec in specs {
            self.insert(Region::try_from(spec)?);
        }
        Ok(count)
    }

    /// Merge presets from a YAML file.
    pub fn load_yaml<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let text = fs::read_to_string(path.as_ref())?;
        let count = self.merge_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), count, "loaded region presets");
        Ok(count)
    }

    /// Regions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_regions() {
        let catalog = RegionCatalog::builtin();
        assert_eq!(catalog.len(), 13);

        let idf = catalog.get("idf").unwrap();
        assert_eq!(idf.code, "IDF");
        assert_eq!(idf.bbox, "48.1,1.4,49.2,3.6".parse().unwrap());
    }

    #[test]
    fn test_builtin_bboxes_are_valid() {
        for region in RegionCatalog::builtin().iter() {
            let b = region.bbox;
            assert!(
                BoundingBox::new(b.min_lat, b.min_lon, b.max_lat, b.max_lon).is_ok(),
                "{} has an invalid bbox",
                region.code
            );
        }
    }

    #[test]
    fn test_unknown_region() {
        let catalog = RegionCatalog::builtin();
        assert!(matches!(
            catalog.require("XYZ"),
            Err(TileError::UnknownRegion(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn test_merge_yaml_adds_and_replaces() {
        let mut catalog = RegionCatalog::builtin();
        let yaml = r#"
- code: LUX
  name: Luxembourg
  bbox: [49.4, 5.7, 50.2, 6.6]
- code: cor
  name: Corsica (north)
  bbox: [42.3, 8.5, 43.1, 9.6]
"#;
        assert_eq!(catalog.merge_yaml_str(yaml).unwrap(), 2);
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.get("LUX").unwrap().name, "Luxembourg");
        assert_eq!(catalog.get("COR").unwrap().name, "Corsica (north)");
        assert_eq!(catalog.iter().last().unwrap().code, "LUX");
    }

    #[test]
    fn test_merge_yaml_rejects_bad_bbox() {
        let mut catalog = RegionCatalog::default();
        let yaml = "- {code: BAD, name: Bad, bbox: [50.0, 1.0, 40.0, 2.0]}";
        assert!(matches!(
            catalog.merge_yaml_str(yaml),
            Err(TileError::InvalidBoundingBox { .. })
        ));
    }

    #[test]
    fn test_merge_yaml_rejects_malformed() {
        let mut catalog = RegionCatalog::default();
        assert!(matches!(
            catalog.merge_yaml_str("- code: X\n  bbox: [1, 2]"),
            Err(TileError::RegionPresets(_))
        ));
    }
}
