//! Marker placement for the event map.
//!
//! Two layouts are supported:
//!
//! - **Tiled**: Web Mercator ("slippy map") projection around a fixed centre,
//!   with OpenStreetMap-style tile URLs. Markers are 64x64 icons anchored at
//!   their bottom centre.
//! - **Static**: each marker is placed by percentage inside the padded
//!   bounding box of the events being shown. No imagery needed.

use std::f64::consts::PI;

use serde::Serialize;

use super::FoodEvent;

/// Campus centre.
pub const CAMPUS_CENTER: LatLng = LatLng {
    lat: 37.4275,
    lng: -122.1697,
};

pub const DEFAULT_ZOOM: u8 = 16;
/// Deepest zoom the tile server provides. Larger values are clamped to it.
pub const MAX_ZOOM: u8 = 19;

/// Side of a map tile in pixels.
pub const TILE_SIZE: u32 = 256;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
pub const ATTRIBUTION: &str = "\u{a9} OpenStreetMap contributors";

/// Marker icon size in pixels.
pub const MARKER_SIZE: (f64, f64) = (64.0, 64.0);
/// Offset from the icon's top-left corner to the point on the map.
pub const MARKER_ANCHOR: (f64, f64) = (32.0, 64.0);

/// Mercator is undefined at the poles; clamp to the usual limit.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Fraction of the bounding box added on every side in the static layout.
const STATIC_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&FoodEvent> for LatLng {
    fn from(event: &FoodEvent) -> Self {
        Self::new(event.lat, event.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// URL from [`TILE_URL_TEMPLATE`]. The subdomain rotates with `(x + y) % 3`.
    pub fn url(&self) -> String {
        self.url_with(TILE_URL_TEMPLATE)
    }

    pub fn url_with(&self, template: &str) -> String {
        let s = TILE_SUBDOMAINS[((self.x as u64 + self.y as u64) % 3) as usize];
        template
            .replace("{s}", s)
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Width of the whole world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE as f64 * 2f64.powi(zoom as i32)
}

/// Web Mercator world pixel coordinates. x grows east, y grows south.
pub fn project(point: LatLng, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
    let size = world_size(zoom);
    let lng = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Tile containing `point` at `zoom` (at most [`MAX_ZOOM`]).
pub fn tile_for(point: LatLng, zoom: u8) -> TileCoord {
    let zoom = zoom.min(MAX_ZOOM);
    let (x, y) = project(point, zoom);
    let max = (1u64 << zoom) as f64 - 1.0;
    let tile = |v: f64| (v / TILE_SIZE as f64).floor().clamp(0.0, max) as u32;
    TileCoord {
        z: zoom,
        x: tile(x),
        y: tile(y),
    }
}

/// A map view: centre and zoom inside a viewport of `width` x `height` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: CAMPUS_CENTER,
            zoom: DEFAULT_ZOOM,
            width: 800.0,
            height: 500.0,
        }
    }
}

impl MapView {
    /// Set the zoom, clamped to [`MAX_ZOOM`].
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom.min(MAX_ZOOM);
        self
    }

    /// Zoom actually used for projection. `zoom` is public, so clamp here too.
    pub fn zoom_level(&self) -> u8 {
        self.zoom.min(MAX_ZOOM)
    }

    /// Viewport pixel of `point`; the centre maps to the middle of the viewport.
    pub fn to_viewport(&self, point: LatLng) -> (f64, f64) {
        let zoom = self.zoom_level();
        let (cx, cy) = project(self.center, zoom);
        let (px, py) = project(point, zoom);
        (px - cx + self.width / 2.0, py - cy + self.height / 2.0)
    }

    /// Top-left corner of the marker icon for `point`.
    pub fn marker_origin(&self, point: LatLng) -> (f64, f64) {
        let (x, y) = self.to_viewport(point);
        (x - MARKER_ANCHOR.0, y - MARKER_ANCHOR.1)
    }

    /// Tiles covering the viewport, row-major from the top-left.
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let zoom = self.zoom_level();
        let (cx, cy) = project(self.center, zoom);
        let tile = TILE_SIZE as f64;
        let max = (1i64 << zoom) - 1;
        let range = |c: f64, extent: f64| {
            let lo = ((c - extent / 2.0) / tile).floor() as i64;
            let hi = ((c + extent / 2.0) / tile).floor() as i64;
            lo.max(0)..=hi.min(max)
        };
        let mut tiles = Vec::new();
        for y in range(cy, self.height) {
            for x in range(cx, self.width) {
                tiles.push(TileCoord {
                    z: zoom,
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
        tiles
    }
}

/// A marker placed on the tiled map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: String,
    pub title: String,
    pub tile: TileCoord,
    /// Icon top-left in viewport pixels.
    pub left: f64,
    pub top: f64,
}

pub fn place_markers(view: &MapView, events: &[&FoodEvent]) -> Vec<PlacedMarker> {
    events
        .iter()
        .map(|event| {
            let point = LatLng::from(*event);
            let (left, top) = view.marker_origin(point);
            PlacedMarker {
                id: event.id.clone(),
                title: event.title.clone(),
                tile: tile_for(point, view.zoom_level()),
                left,
                top,
            }
        })
        .collect()
}

/// Position in percent of the static map's width and height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticMarker {
    pub id: String,
    pub x_percent: f64,
    pub y_percent: f64,
}

/// Percentage layout inside the bounding box of `events`, padded by 10% on
/// each side. x grows east, y grows south. A degenerate axis centres at 50%.
pub fn static_positions(events: &[&FoodEvent]) -> Vec<StaticMarker> {
    if events.is_empty() {
        return Vec::new();
    }

    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
    for e in events {
        min_lat = min_lat.min(e.lat);
        max_lat = max_lat.max(e.lat);
        min_lng = min_lng.min(e.lng);
        max_lng = max_lng.max(e.lng);
    }

    let percent = |value: f64, lo: f64, hi: f64| {
        let span = hi - lo;
        if span <= f64::EPSILON {
            return 50.0;
        }
        let pad = span * STATIC_PADDING;
        (value - (lo - pad)) / (span + 2.0 * pad) * 100.0
    };

    events
        .iter()
        .map(|e| StaticMarker {
            id: e.id.clone(),
            x_percent: percent(e.lng, min_lng, max_lng),
            // North is up, so latitude runs against y.
            y_percent: 100.0 - percent(e.lat, min_lat, max_lat),
        })
        .collect()
}
