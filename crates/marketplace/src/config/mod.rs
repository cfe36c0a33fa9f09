mod myconfig;

pub use self::myconfig::{CacheBackend, Config, StorageBackend};
