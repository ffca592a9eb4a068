//! Geographic bounding boxes and zoom level lists.

use crate::coord::check_zoom;
use crate::{Result, TileCoord, TileError};
use std::str::FromStr;

/// Zoom levels downloaded when none are given.
pub const DEFAULT_ZOOM_LEVELS: &str = "10,12,14";

/// A geographic rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box, validating its edges.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        let bbox = Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| TileError::InvalidBoundingBox {
            input: self.to_string(),
            reason: reason.to_string(),
        };

        let values = [self.min_lat, self.min_lon, self.max_lat, self.max_lon];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("values must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&self.min_lat) || !(-90.0..=90.0).contains(&self.max_lat) {
            return Err(invalid("latitude must be within -90..90"));
        }
        if !(-180.0..=180.0).contains(&self.min_lon) || !(-180.0..=180.0).contains(&self.max_lon)
        {
            return Err(invalid("longitude must be within -180..180"));
        }
        if self.min_lat > self.max_lat {
            return Err(invalid("min_lat is greater than max_lat"));
        }
        if self.min_lon > self.max_lon {
            return Err(invalid("min_lon is greater than max_lon"));
        }
        Ok(())
    }

    /// Corner tiles of this box at a zoom level: (north-west, south-east).
    pub fn corner_tiles(&self, zoom: u8) -> Result<(TileCoord, TileCoord)> {
        let nw = TileCoord::from_lat_lon(self.max_lat, self.min_lon, zoom)?;
        let se = TileCoord::from_lat_lon(self.min_lat, self.max_lon, zoom)?;
        Ok((nw, se))
    }

    /// Every tile touching this box at a zoom level.
    ///
    /// The range is walked lazily, so even a world-sized box at the deepest
    /// zoom costs nothing until iterated.
    pub fn tiles(&self, zoom: u8) -> Result<TileRange> {
        let (nw, se) = self.corner_tiles(zoom)?;
        Ok(TileRange { nw, se })
    }

    /// Number of tiles [`tiles`](Self::tiles) would yield.
    pub fn tile_count(&self, zoom: u8) -> Result<u64> {
        Ok(self.tiles(zoom)?.len())
    }
}

/// Rectangle of tiles at one zoom level, between two corner tiles.
///
/// Tiles are yielded column by column (x ascending), north to south within
/// a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    nw: TileCoord,
    se: TileCoord,
}

impl TileRange {
    /// North-west corner (smallest x and y).
    pub fn north_west(&self) -> TileCoord {
        self.nw
    }

    /// South-east corner (largest x and y).
    pub fn south_east(&self) -> TileCoord {
        self.se
    }

    /// Zoom level of every tile in the range.
    pub fn zoom(&self) -> u8 {
        self.nw.z
    }

    /// Number of tiles in the range.
    pub fn len(&self) -> u64 {
        let columns = u64::from(self.se.x - self.nw.x) + 1;
        let rows = u64::from(self.se.y - self.nw.y) + 1;
        columns * rows
    }

    /// Always false; a range holds at least its corner tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `coord` lies inside the range.
    pub fn contains(&self, coord: &TileCoord) -> bool {
        coord.z == self.nw.z
            && (self.nw.x..=self.se.x).contains(&coord.x)
            && (self.nw.y..=self.se.y).contains(&coord.y)
    }

    /// Iterate over the tiles in download order.
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            next: Some(self.nw),
        }
    }
}

impl IntoIterator for &TileRange {
    type Item = TileCoord;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> TileRangeIter {
        self.iter()
    }
}

impl IntoIterator for TileRange {
    type Item = TileCoord;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> TileRangeIter {
        self.iter()
    }
}

/// Iterator over a [`TileRange`].
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    next: Option<TileCoord>,
}

impl Iterator for TileRangeIter {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        let current = self.next?;
        let (nw, se) = (self.range.nw, self.range.se);

        self.next = if current.y < se.y {
            Some(TileCoord {
                y: current.y + 1,
                ..current
            })
        } else if current.x < se.x {
            Some(TileCoord {
                x: current.x + 1,
                y: nw.y,
                ..current
            })
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(current) = self.next else {
            return (0, Some(0));
        };
        let (nw, se) = (self.range.nw, self.range.se);
        let rows = u64::from(se.y - nw.y) + 1;
        let full_columns = u64::from(se.x - current.x);
        let remaining = full_columns * rows + u64::from(se.y - current.y) + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

impl FromStr for BoundingBox {
    type Err = TileError;

    /// Parse `min_lat,min_lon,max_lat,max_lon`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| TileError::InvalidBoundingBox {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("bbox must be min_lat,min_lon,max_lat,max_lon"))?;

        match values[..] {
            [min_lat, min_lon, max_lat, max_lon] => {
                BoundingBox::new(min_lat, min_lon, max_lat, max_lon)
            }
            _ => Err(invalid("need 4 values")),
        }
    }
}

/// Parse a comma-separated list of zoom levels such as `10,12,14`.
///
/// The order is kept as given; downloads proceed zoom by zoom in that order.
pub fn parse_zoom_levels(s: &str) -> Result<Vec<u8>> {
    let zooms = s
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| TileError::InvalidZoomList(s.to_string()))?;

    for &z in &zooms {
        check_zoom(z)?;
    }
    Ok(zooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ZOOM;

    #[test]
    fn test_parse_bbox() {
        let bbox: BoundingBox = "48.1, 1.4,49.2 ,3.6".parse().unwrap();
        assert_eq!(bbox, BoundingBox::new(48.1, 1.4, 49.2, 3.6).unwrap());
    }

    #[test]
    fn test_parse_bbox_wrong_arity() {
        let err = "48.1,1.4,49.2".parse::<BoundingBox>().unwrap_err();
        assert!(matches!(err, TileError::InvalidBoundingBox { .. }));
        assert!("48.1,1.4,49.2,3.6,7".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_parse_bbox_not_numbers() {
        assert!("a,b,c,d".parse::<BoundingBox>().is_err());
        assert!("".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_bbox_inverted_rejected() {
        assert!("49.2,1.4,48.1,3.6".parse::<BoundingBox>().is_err());
        assert!("48.1,3.6,49.2,1.4".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_bbox_out_of_range_rejected() {
        assert!("-91,0,0,1".parse::<BoundingBox>().is_err());
        assert!("0,-181,1,1".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_tiles_cover_corners() {
        let bbox: BoundingBox = "48.1,1.4,49.2,3.6".parse().unwrap();
        let tiles: Vec<TileCoord> = bbox.tiles(10).unwrap().iter().collect();
        assert_eq!(tiles.len() as u64, bbox.tile_count(10).unwrap());

        let (nw, se) = bbox.corner_tiles(10).unwrap();
        assert_eq!(tiles.first(), Some(&nw));
        assert_eq!(tiles.last(), Some(&se));
        assert!(nw.x <= se.x && nw.y <= se.y);
    }

    #[test]
    fn test_tiles_column_major_order() {
        let bbox: BoundingBox = "48.1,1.4,49.2,3.6".parse().unwrap();
        let tiles: Vec<TileCoord> = bbox.tiles(8).unwrap().into_iter().collect();
        let mut sorted = tiles.clone();
        sorted.sort_by_key(|t| (t.x, t.y));
        assert_eq!(tiles, sorted);
    }

    #[test]
    fn test_tiny_bbox_single_tile() {
        let bbox = BoundingBox::new(48.85, 2.35, 48.851, 2.351).unwrap();
        assert_eq!(bbox.tile_count(10).unwrap(), 1);
    }

    #[test]
    fn test_tile_count_grows_with_zoom() {
        let bbox: BoundingBox = "44.1,2.0,46.8,7.2".parse().unwrap();
        let counts: Vec<u64> = [10, 12, 14]
            .iter()
            .map(|&z| bbox.tile_count(z).unwrap())
            .collect();
        assert!(counts[0] < counts[1] && counts[1] < counts[2]);
    }

    #[test]
    fn test_range_size_hint_tracks_iteration() {
        let bbox: BoundingBox = "44.1,2.0,46.8,7.2".parse().unwrap();
        let range = bbox.tiles(9).unwrap();
        let mut iter = range.iter();
        assert_eq!(iter.size_hint().0 as u64, range.len());

        iter.nth(4).unwrap();
        assert_eq!(iter.size_hint().0 as u64, range.len() - 5);
        assert_eq!(iter.count() as u64, range.len() - 5);
    }

    #[test]
    fn test_range_contains() {
        let bbox: BoundingBox = "48.1,1.4,49.2,3.6".parse().unwrap();
        let range = bbox.tiles(12).unwrap();
        assert!(range.iter().all(|t| range.contains(&t)));
        assert!(!range.contains(&TileCoord::new(12, 0, 0)));
        assert!(!range.contains(&TileCoord { z: 11, ..range.north_west() }));
    }

    #[test]
    fn test_world_at_deepest_zoom_is_counted_not_built() {
        let world = BoundingBox::new(-85.0, -180.0, 85.0, 180.0).unwrap();
        let range = world.tiles(MAX_ZOOM).unwrap();

        assert_eq!(range.len(), 273_978_228_736);
        assert_eq!(world.tile_count(MAX_ZOOM).unwrap(), range.len());
        assert_eq!(range.iter().next(), Some(TileCoord::new(MAX_ZOOM, 0, 858)));
        assert_eq!(range.south_east(), TileCoord::new(MAX_ZOOM, 524_287, 523_429));
    }

    #[test]
    fn test_parse_zoom_levels() {
        assert_eq!(parse_zoom_levels(DEFAULT_ZOOM_LEVELS).unwrap(), vec![10, 12, 14]);
        assert_eq!(parse_zoom_levels(" 14, 8 ").unwrap(), vec![14, 8]);
    }

    #[test]
    fn test_parse_zoom_levels_invalid() {
        assert!(matches!(
            parse_zoom_levels("10,x"),
            Err(TileError::InvalidZoomList(_))
        ));
        assert!(matches!(
            parse_zoom_levels("10,25"),
            Err(TileError::InvalidZoomLevel(25))
        ));
        assert!(parse_zoom_levels("-1").is_err());
    }
}
