mod atomic_write;
mod autosave_bridge;
pub mod file_header;
mod load;
pub mod save_codec;
pub mod save_error;
mod save_plugin;
pub mod store;

pub use load::{load_or_default, save_state, try_load};
pub use save_error::SaveError;
pub use save_plugin::{ActiveSaveStore, SavePlugin, SaveStatus};
pub use store::{save_file_path, FileStore, MemoryStore, SaveStore};
