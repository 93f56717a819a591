pub mod app;
pub mod input;
pub mod jobs;
pub mod lookup;
pub mod render;
pub mod theme;

pub use app::run;
