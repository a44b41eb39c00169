use arboard::Clipboard;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// System clipboard. The handle is opened on first use so a headless
/// session only fails when a copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.inner.is_none() {
            let clipboard = Clipboard::new().map_err(|e| {
                log::error!("Failed to initialize clipboard: {}", e);
                e.to_string()
            })?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_string()).map_err(|e| {
                log::error!("Failed to write clipboard: {}", e);
                e.to_string()
            }),
            None => Err("clipboard unavailable".to_string()),
        }
    }
}
