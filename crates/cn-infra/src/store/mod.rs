//! Single-process record store.
//!
//! 单进程记录存储：内存表 + JSON 快照文件。
//!
//! Each table lives in memory behind one async mutex, which serializes all
//! access. When opened with a path, every mutation rewrites the JSON
//! snapshot atomically before the lock is released.

mod clip_table;
mod record_store;
mod snapshot;
mod task_table;

pub use record_store::RecordStore;
