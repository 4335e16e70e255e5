//! Clip history use cases
//! 剪贴板历史相关用例

mod copy_to_clipboard;
mod delete_clip;
mod handle_clip_captured;
mod list_clips;
mod pin_clip;

pub use copy_to_clipboard::{CopyToClipboard, CopyToClipboardError, WriteTiming};
pub use delete_clip::DeleteClip;
pub use handle_clip_captured::HandleClipCaptured;
pub use list_clips::{ClipPreview, ListClips};
pub use pin_clip::{PinClip, PinClipError, PinClipRequest};
