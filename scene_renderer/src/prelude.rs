use std::sync::Arc;

use parking_lot::RwLock;

pub type ArcRwLock<T> = Arc<RwLock<T>>;

pub fn arc_rw_lock_new<T>(value: T) -> ArcRwLock<T> {
    Arc::new(RwLock::new(value))
}
