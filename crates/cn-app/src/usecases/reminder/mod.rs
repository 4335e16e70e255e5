//! Reminder task use cases
//! 提醒任务相关用例

mod scan_due_tasks;
mod task_commands;

pub use scan_due_tasks::{ScanDueTasks, ScanReport};
pub use task_commands::{
    CompleteTask, CreateTask, DeleteTask, EditTask, ListTasks, SnoozeTask, TaskCommandError,
};
