/// Control over the watcher's echo suppression, used around programmatic
/// clipboard writes.
///
/// 程序写剪贴板时用于暂停监听并抑制回声的端口。
///
/// Expected sequence: `pause_capture`, write, settle, `arm_echo_suppression`,
/// delay, `resume_capture`.
pub trait CaptureGatePort: Send + Sync {
    fn pause_capture(&self);
    fn arm_echo_suppression(&self);
    fn resume_capture(&self);
}
