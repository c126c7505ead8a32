pub mod load;
pub mod template;
pub mod types;

pub use load::{SETTINGS_FILE, load_settings, load_settings_from};
pub use template::Template;
pub use types::{
    Caps, CapturePlanOptions, OptionOverrides, PresentationOptions, VideoExtensionTable,
    expand_home,
};
