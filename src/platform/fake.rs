use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::ChatSender;
use crate::keyboard::WebAppKeyboard;
use crate::render::Markup;

/// One recorded outbound call, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Photo {
        chat_id: i64,
        image_url: String,
        caption: String,
        markup: Markup,
        keyboard: WebAppKeyboard,
    },
    Text {
        chat_id: i64,
        text: String,
        markup: Markup,
        keyboard: Option<WebAppKeyboard>,
    },
}

/// Records every call; photo and text sends can be scripted to fail.
#[derive(Default)]
pub struct FakeSender {
    calls: Mutex<Vec<Sent>>,
    photo_failures: AtomicUsize,
    text_failures: AtomicUsize,
}

impl FakeSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` photo sends.
    pub fn failing_photos(self, n: usize) -> Self {
        self.photo_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Fail the next `n` text sends.
    pub fn failing_texts(self, n: usize) -> Self {
        self.text_failures.store(n, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<Sent> {
        self.calls.lock().unwrap().clone()
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ChatSender for FakeSender {
    async fn send_photo(
        &self,
        chat_id: i64,
        image_url: &str,
        caption: &str,
        markup: Markup,
        keyboard: &WebAppKeyboard,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(Sent::Photo {
            chat_id,
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            markup,
            keyboard: keyboard.clone(),
        });
        if Self::take_failure(&self.photo_failures) {
            bail!("photo rejected");
        }
        Ok(())
    }

    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        markup: Markup,
        keyboard: Option<&WebAppKeyboard>,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(Sent::Text {
            chat_id,
            text: text.to_string(),
            markup,
            keyboard: keyboard.cloned(),
        });
        if Self::take_failure(&self.text_failures) {
            bail!("text rejected");
        }
        Ok(())
    }
}
