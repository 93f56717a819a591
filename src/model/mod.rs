pub mod category;
pub mod config;
pub mod photo;
pub mod reference;
pub mod suggestion;

pub use category::*;
pub use config::*;
pub use photo::*;
pub use reference::*;
pub use suggestion::*;
