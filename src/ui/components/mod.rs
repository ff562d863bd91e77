mod input;
mod loading_overlay;
mod location_input;
mod notice;

pub use input::InputResult;
pub use loading_overlay::draw_loading_overlay;
pub use location_input::LocationInput;
pub use notice::draw_notice;
