use anyhow::{anyhow, Result};
use clipboard_rs::{common::RustImage, Clipboard, ClipboardContext, ContentFormat, RustImageData};

use cn_core::clipboard::{ClipContent, SystemClipboardSnapshot};

pub(super) struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    /// Read the text and image representations. Formats we do not keep
    /// (rtf, html, file lists) are ignored.
    pub fn read_snapshot(ctx: &mut ClipboardContext) -> Result<SystemClipboardSnapshot> {
        let mut snapshot = SystemClipboardSnapshot::empty(chrono::Utc::now().timestamp_millis());

        if ctx.has(ContentFormat::Text) {
            match ctx.get_text() {
                Ok(text) => snapshot.text = Some(text),
                Err(e) => log::debug!("clipboard text unreadable: {e}"),
            }
        }

        if ctx.has(ContentFormat::Image) {
            let png = map_clipboard_err(ctx.get_image())
                .and_then(|img| map_clipboard_err(img.to_png()));
            match png {
                Ok(png) => snapshot.image = Some(png.get_bytes().to_vec()),
                Err(e) => log::debug!("clipboard image unreadable: {e:#}"),
            }
        }

        Ok(snapshot)
    }

    pub fn write_content(ctx: &mut ClipboardContext, content: &ClipContent) -> Result<()> {
        match content {
            ClipContent::Text { text } => map_clipboard_err(ctx.set_text(text.clone())),
            ClipContent::Image { bytes } => {
                let img = RustImageData::from_bytes(bytes).map_err(|e| anyhow!(e))?;
                map_clipboard_err(ctx.set_image(img))
            }
        }
    }
}
