pub mod catalog;
pub mod coords;
pub mod export;
pub mod extract;
pub mod formats;
pub mod history;
pub mod save;
pub mod sidecar;
pub mod tags;
