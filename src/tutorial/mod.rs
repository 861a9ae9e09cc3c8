pub mod input;
pub mod scene;
pub mod variant;

pub use scene::{Scene, SetupError};
pub use variant::{SceneConfig, Variant};
