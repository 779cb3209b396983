/// Reads text from the system clipboard, if any is available.
pub fn read_clipboard_text() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            None
        }
    }
}
