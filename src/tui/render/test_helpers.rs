use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::http::GalleryClient;
use crate::io::store::ScratchStore;
use crate::model::{ClientConfig, LatLng, MapPoint, PhotoDetails};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Keeps the runtime and the scratch store's directory alive for a test
pub struct Harness {
    pub runtime: tokio::runtime::Runtime,
    pub dir: tempfile::TempDir,
}

/// A server nobody listens on; requests fail, which tests never wait for.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

fn build_app(imgid: Option<u32>) -> (Harness, App) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ClientConfig::default();
    config.server.url = DEAD_SERVER.to_string();
    let client = GalleryClient::new(&config.server).unwrap();
    let store = ScratchStore::open(&dir.path().join("state.json"));
    let app = App::new(config, client, runtime.handle().clone(), store, imgid);
    (Harness { runtime, dir }, app)
}

/// An App showing image 4711 with `details` already loaded.
pub fn detail_app(details: PhotoDetails) -> (Harness, App) {
    let (h, mut app) = build_app(Some(4711));
    app.set_details(details);
    (h, app)
}

/// An App with no image: only the search form.
pub fn search_app() -> (Harness, App) {
    build_app(None)
}

/// A photo with a grade, a position and some meta lines.
pub fn sample_details() -> PhotoDetails {
    PhotoDetails {
        imgid: Some(4711),
        grade: Some(73),
        position: Some(LatLng::new(59.3293, 18.0686)),
        positions: vec![],
        meta: vec!["Taken 2019-06-21 21:40".into(), "Canon EOS 5D".into()],
        title: Some("Midsummer".into()),
    }
}

/// A group page with three photos, two of them close together.
pub fn group_details() -> PhotoDetails {
    let point = |lat, lng, label: &str| MapPoint {
        pos: LatLng::new(lat, lng),
        label: label.into(),
    };
    PhotoDetails {
        positions: vec![
            point(59.3293, 18.0686, "17"),
            point(59.3294, 18.0687, "18"),
            point(57.7089, 11.9746, "19"),
        ],
        title: Some("Sweden".into()),
        ..Default::default()
    }
}
