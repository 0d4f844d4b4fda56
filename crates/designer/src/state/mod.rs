pub mod decals;
pub mod drag;
pub mod settings;

pub use decals::DecalStore;
pub use drag::{grid_to_position, DragController};
pub use settings::{DesignerSettings, SettingsError};
