pub mod download;
pub mod local_storage;
pub mod logging;

pub use local_storage::LocalStorageStore;
pub use logging::Logger;
