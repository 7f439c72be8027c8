mod action;
mod filter;
mod operation;
mod photo;
mod view;

pub use action::{EditAction, EditKind, EditSnapshot};
pub use filter::FilterKind;
pub use operation::{SaveOutcome, SaveSummary};
pub use photo::{CameraInfo, Classification, Coordinates, MetadataRecord, PhotoDate, PhotoEntry};
pub use view::{EditorView, MapView};
