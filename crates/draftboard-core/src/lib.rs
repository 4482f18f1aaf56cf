// Library root: draft data model, data source, projection engine, and
// configuration shared by the server and the terminal viewer.

pub mod config;
pub mod draft;
pub mod projection;
pub mod store;

pub use draft::pick::Pick;
pub use draft::player::Player;
pub use draft::state::{DraftState, Team};
pub use draft::DraftSnapshot;
pub use store::{DraftSource, JsonFileStore, StoreError};
