use crate::model::{LatLng, PhotoDetails};

/// Zoom used for a single photo marker
pub const SINGLE_ZOOM: u8 = 16;
pub const MAX_ZOOM: u8 = 19;

/// Visible rectangle in degrees: `(west, east, south, north)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, p: LatLng) -> bool {
        p.lng >= self.west && p.lng <= self.east && p.lat >= self.south && p.lat <= self.north
    }
}

/// What part of the world is on screen. Zoom 0 shows the whole world;
/// every level halves the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    pub fn world() -> Self {
        Viewport {
            center: LatLng::ORIGIN,
            zoom: 0,
        }
    }

    pub fn new(center: LatLng, zoom: u8) -> Self {
        Viewport {
            center,
            zoom: zoom.min(MAX_ZOOM),
        }
    }

    /// `(lng_span, lat_span)` in degrees
    pub fn span(&self) -> (f64, f64) {
        let lng = 360.0 / 2f64.powi(self.zoom as i32);
        (lng, lng / 2.0)
    }

    pub fn bounds(&self) -> Bounds {
        let (w, h) = self.span();
        Bounds {
            west: (self.center.lng - w / 2.0).max(-180.0),
            east: (self.center.lng + w / 2.0).min(180.0),
            south: (self.center.lat - h / 2.0).max(-90.0),
            north: (self.center.lat + h / 2.0).min(90.0),
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }

    /// Recenter on `p` if it has left the visible rectangle
    pub fn pan_to_include(&mut self, p: LatLng) {
        if !self.bounds().contains(p) {
            self.center = p;
        }
    }

    /// The deepest viewport that shows every point. `None` for no points.
    pub fn fit(points: &[LatLng]) -> Option<Viewport> {
        let first = points.first()?;
        let (mut west, mut east, mut south, mut north) = (first.lng, first.lng, first.lat, first.lat);
        for p in &points[1..] {
            west = west.min(p.lng);
            east = east.max(p.lng);
            south = south.min(p.lat);
            north = north.max(p.lat);
        }
        let center = LatLng::new((south + north) / 2.0, (west + east) / 2.0);
        let mut zoom = SINGLE_ZOOM;
        loop {
            let vp = Viewport { center, zoom };
            let (w, h) = vp.span();
            if zoom == 0 || ((east - west) <= w && (north - south) <= h) {
                return Some(vp);
            }
            zoom -= 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub pos: LatLng,
    /// Image id for group members; `None` for the photo itself
    pub label: Option<String>,
}

/// Markers that landed in the same canvas cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub pos: LatLng,
    pub count: usize,
    pub labels: Vec<String>,
}

/// The map widget of a detail view
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Build the map only for photos that carry coordinates: one marker at
    /// zoom 16 for `data-position`, otherwise all group points fitted.
    pub fn for_details(details: &PhotoDetails) -> Option<MapView> {
        if let Some(pos) = details.position {
            return Some(MapView {
                viewport: Viewport::new(pos, SINGLE_ZOOM),
                markers: vec![Marker { pos, label: None }],
            });
        }
        let points: Vec<LatLng> = details.positions.iter().map(|p| p.pos).collect();
        let viewport = Viewport::fit(&points)?;
        let markers = details
            .positions
            .iter()
            .map(|p| Marker {
                pos: p.pos,
                label: Some(p.label.clone()),
            })
            .collect();
        Some(MapView { viewport, markers })
    }

    /// Merge visible markers into a `cols`×`rows` grid over the viewport.
    /// Cluster position is the mean of its members.
    pub fn clusters(&self, cols: u16, rows: u16) -> Vec<Cluster> {
        let b = self.viewport.bounds();
        let cols = cols.max(1) as f64;
        let rows = rows.max(1) as f64;
        let cell_w = ((b.east - b.west) / cols).max(f64::EPSILON);
        let cell_h = ((b.north - b.south) / rows).max(f64::EPSILON);

        let mut cells: Vec<((i64, i64), Vec<&Marker>)> = Vec::new();
        for m in self.markers.iter().filter(|m| b.contains(m.pos)) {
            let key = (
                ((m.pos.lng - b.west) / cell_w).floor() as i64,
                ((m.pos.lat - b.south) / cell_h).floor() as i64,
            );
            match cells.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(m),
                None => cells.push((key, vec![m])),
            }
        }

        cells
            .into_iter()
            .map(|(_, members)| {
                let n = members.len() as f64;
                let lat = members.iter().map(|m| m.pos.lat).sum::<f64>() / n;
                let lng = members.iter().map(|m| m.pos.lng).sum::<f64>() / n;
                Cluster {
                    pos: LatLng::new(lat, lng),
                    count: members.len(),
                    labels: members.iter().filter_map(|m| m.label.clone()).collect(),
                }
            })
            .collect()
    }

    /// `/img/<id>` links for labeled markers, in marker order
    pub fn links(&self) -> Vec<String> {
        self.markers
            .iter()
            .filter_map(|m| m.label.as_ref().map(|l| format!("/img/{l}")))
            .collect()
    }
}
