pub mod construction;
mod plugin;
#[cfg(test)]
mod tests;
pub mod types;

pub use construction::progress_construction;
pub use plugin::BuildingsPlugin;
pub use types::{Building, BuildingView};
