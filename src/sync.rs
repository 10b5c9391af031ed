//! State sync: bridges the host's settings record, its labels and its
//! controls to the engine.

mod adapter;
mod debug;
mod input;
mod labels;
mod settings;
mod toggles;

pub use adapter::StateSync;
pub use debug::{DebugCommand, DebugSurface};
pub use input::{Control, ControlEvent, ControlInput};
pub use labels::{LabelBoard, Labels, NONE_SELECTED};
pub use settings::{
    BGM_KEY, MUSIC_KEY, SettingsRecord, SettingsStore, TomlSettingsFile, VOLUME_KEY,
};
pub use toggles::{ToggleHandler, ToggleTable, flip_flag};
