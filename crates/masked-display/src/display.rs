//! The masked secret display component.

use crate::ack::{Acknowledger, Acknowledgment};
use crate::mask::{self, DEFAULT_MASK_CHAR};
use clipboard::{Clipboard, ClipboardError};
use common::Secret;
use serde::Serialize;
use sources::{EntitlementSource, SecretSource};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Interaction state, derived from the entitlement on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    /// Not entitled: placeholder shown, field read-only and dimmed, copy disabled.
    Locked,
    /// Entitled: masked key shown, copy enabled.
    Unlocked,
}

impl InteractionState {
    fn from_entitled(entitled: bool) -> Self {
        if entitled {
            Self::Unlocked
        } else {
            Self::Locked
        }
    }
}

/// One render of the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub state: InteractionState,
    pub value: String,
    pub copy_enabled: bool,
    pub read_only: bool,
}

/// Result of a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Raw key written; success notice shown.
    Copied,
    /// Clipboard refused; error notice shown.
    Failed(ClipboardError),
    /// No entitlement at the moment of action. Nothing written, nothing shown.
    Locked,
}

impl CopyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CopyOutcome::Copied => "copied",
            CopyOutcome::Failed(_) => "failed",
            CopyOutcome::Locked => "locked",
        }
    }
}

/// Shows an API key masked according to the viewer's entitlement and copies
/// the raw key to the clipboard for entitled viewers.
///
/// Holds no state of its own: every call reads the sources again.
pub struct MaskedSecretDisplay {
    secret: Arc<dyn SecretSource>,
    entitlement: Arc<dyn EntitlementSource>,
    clipboard: Arc<dyn Clipboard>,
    acknowledger: Arc<dyn Acknowledger>,
    mask_char: char,
}

impl MaskedSecretDisplay {
    pub fn new(
        secret: Arc<dyn SecretSource>,
        entitlement: Arc<dyn EntitlementSource>,
        clipboard: Arc<dyn Clipboard>,
        acknowledger: Arc<dyn Acknowledger>,
    ) -> Self {
        Self {
            secret,
            entitlement,
            clipboard,
            acknowledger,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub fn state(&self) -> InteractionState {
        InteractionState::from_entitled(self.entitlement.is_entitled())
    }

    pub fn render(&self) -> RenderedView {
        let entitled = self.entitlement.is_entitled();
        let state = InteractionState::from_entitled(entitled);
        // Locked views never read the key at all
        let value = if entitled {
            let secret = self.read_secret();
            mask::display_value_with(secret.expose(), true, self.mask_char)
        } else {
            mask::placeholder(self.mask_char)
        };
        RenderedView {
            state,
            value,
            copy_enabled: entitled,
            read_only: !entitled,
        }
    }

    pub fn display_value(&self) -> String {
        self.render().value
    }

    /// Copy the raw key to the clipboard and acknowledge the result.
    ///
    /// Entitlement is checked here again, not just when the copy control was
    /// rendered. Clipboard failures are logged and acknowledged, never
    /// returned as errors. No retries.
    pub async fn attempt_copy(&self) -> CopyOutcome {
        if !self.entitlement.is_entitled() {
            debug!(
                entitlement = self.entitlement.id(),
                "copy requested without entitlement, ignoring"
            );
            crate::metrics::record_copy(CopyOutcome::Locked.label());
            return CopyOutcome::Locked;
        }

        let secret = self.read_secret();
        let result = self.clipboard.write(secret.expose()).await;
        drop(secret);

        let outcome = match result {
            Ok(()) => {
                info!(
                    clipboard = self.clipboard.id(),
                    "API key copied to clipboard"
                );
                self.acknowledger.show(Acknowledgment::copied()).await;
                CopyOutcome::Copied
            }
            Err(e) => {
                error!(
                    clipboard = self.clipboard.id(),
                    error = %e,
                    "failed to copy API key"
                );
                self.acknowledger.show(Acknowledgment::copy_failed()).await;
                CopyOutcome::Failed(e)
            }
        };
        crate::metrics::record_copy(outcome.label());
        outcome
    }

    fn read_secret(&self) -> Secret<String> {
        self.secret.secret().unwrap_or_else(|e| {
            warn!(
                source = self.secret.id(),
                error = %e,
                "API key unavailable, treating as empty"
            );
            Secret::empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipboard::MemoryClipboard;
    use sources::{StaticEntitlement, StaticSecret};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    const LONG_KEY: &str = "sk-ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    #[derive(Default)]
    struct RecordingAcknowledger {
        shown: Mutex<Vec<Acknowledgment>>,
    }

    impl RecordingAcknowledger {
        fn shown(&self) -> Vec<Acknowledgment> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl Acknowledger for RecordingAcknowledger {
        fn show(&self, ack: Acknowledgment) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
            self.shown.lock().unwrap().push(ack);
            Box::pin(async {})
        }
    }

    /// Entitlement that can be revoked between render and click.
    struct Toggle(AtomicBool);

    impl EntitlementSource for Toggle {
        fn id(&self) -> &str {
            "toggle"
        }

        fn is_entitled(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    /// Secret source that counts reads.
    struct Counting {
        reads: std::sync::atomic::AtomicUsize,
    }

    impl SecretSource for Counting {
        fn id(&self) -> &str {
            "counting"
        }

        fn secret(&self) -> sources::Result<Secret<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(Secret::from(LONG_KEY))
        }
    }

    struct Fixture {
        display: MaskedSecretDisplay,
        clipboard: Arc<MemoryClipboard>,
        acks: Arc<RecordingAcknowledger>,
    }

    fn fixture(secret: &str, entitlement: Arc<dyn EntitlementSource>) -> Fixture {
        let clipboard = Arc::new(MemoryClipboard::new());
        let acks = Arc::new(RecordingAcknowledger::default());
        let display = MaskedSecretDisplay::new(
            Arc::new(StaticSecret::new(secret)),
            entitlement,
            clipboard.clone(),
            acks.clone(),
        );
        Fixture {
            display,
            clipboard,
            acks,
        }
    }

    #[test]
    fn unlocked_render_shows_masked_key() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        let view = f.display.render();
        assert_eq!(view.state, InteractionState::Unlocked);
        assert_eq!(view.value, "sk-ABCDEFGHI...YZ0123456789");
        assert!(view.copy_enabled);
        assert!(!view.read_only);
    }

    #[test]
    fn locked_render_shows_placeholder_and_disables_copy() {
        let f = fixture("short", Arc::new(StaticEntitlement::new(false)));
        let view = f.display.render();
        assert_eq!(view.state, InteractionState::Locked);
        assert_eq!(view.value, "•".repeat(33));
        assert!(!view.copy_enabled);
        assert!(view.read_only);
    }

    #[test]
    fn locked_render_does_not_read_secret() {
        let secret = Arc::new(Counting {
            reads: Default::default(),
        });
        let display = MaskedSecretDisplay::new(
            secret.clone(),
            Arc::new(StaticEntitlement::new(false)),
            Arc::new(MemoryClipboard::new()),
            Arc::new(RecordingAcknowledger::default()),
        );
        display.render();
        assert_eq!(secret.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn entitlement_change_is_visible_on_next_render() {
        let toggle = Arc::new(Toggle(AtomicBool::new(true)));
        let f = fixture(LONG_KEY, toggle.clone());
        assert_eq!(f.display.state(), InteractionState::Unlocked);

        toggle.0.store(false, Ordering::SeqCst);
        assert_eq!(f.display.state(), InteractionState::Locked);
        assert_eq!(f.display.display_value(), "•".repeat(33));
    }

    #[test]
    fn custom_mask_char_applies_to_placeholder() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(false)));
        let display = f.display.with_mask_char('*');
        assert_eq!(display.display_value(), "*".repeat(33));
    }

    #[test]
    fn empty_key_renders_empty_when_entitled() {
        let f = fixture("", Arc::new(StaticEntitlement::new(true)));
        assert_eq!(f.display.display_value(), "");
    }

    #[test]
    fn unreadable_secret_renders_as_empty() {
        let display = MaskedSecretDisplay::new(
            Arc::new(sources::FileSecret::new("/nonexistent/keyview/key")),
            Arc::new(StaticEntitlement::new(true)),
            Arc::new(MemoryClipboard::new()),
            Arc::new(RecordingAcknowledger::default()),
        );
        assert_eq!(display.display_value(), "");
    }

    #[test]
    fn rendered_view_serializes_lowercase_state() {
        let f = fixture("short", Arc::new(StaticEntitlement::new(true)));
        let json = serde_json::to_value(f.display.render()).unwrap();
        assert_eq!(json["state"], "unlocked");
        assert_eq!(json["value"], "short");
        assert_eq!(json["copy_enabled"], true);
    }

    #[tokio::test]
    async fn copy_writes_raw_key_and_acknowledges() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        let outcome = f.display.attempt_copy().await;

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(
            f.clipboard.contents().as_deref(),
            Some(LONG_KEY),
            "clipboard must receive the raw key, not the masked form"
        );
        assert_eq!(f.acks.shown(), vec![Acknowledgment::copied()]);
    }

    #[tokio::test]
    async fn copy_failure_acknowledges_error() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        f.clipboard
            .set_failure(Some(ClipboardError::Denied("no permission".into())));

        let outcome = f.display.attempt_copy().await;

        assert_eq!(
            outcome,
            CopyOutcome::Failed(ClipboardError::Denied("no permission".into()))
        );
        assert!(f.clipboard.writes().is_empty());
        assert_eq!(f.acks.shown(), vec![Acknowledgment::copy_failed()]);
    }

    /// Log sink for asserting on formatted tracing output.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn copy_failure_logs_error_without_key() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        // Current-thread runtime, so the thread-local default sees every event
        let _guard = tracing::subscriber::set_default(subscriber);

        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        f.clipboard
            .set_failure(Some(ClipboardError::Write("pipe closed".into())));
        let outcome = f.display.attempt_copy().await;
        assert!(matches!(outcome, CopyOutcome::Failed(_)));

        let text = logs.text();
        assert!(text.contains("ERROR"), "got: {text}");
        assert!(text.contains("failed to copy API key"), "got: {text}");
        assert!(text.contains("pipe closed"), "got: {text}");
        assert!(!text.contains(LONG_KEY), "key leaked into logs: {text}");
        assert!(!text.contains("sk-ABCDEFGHI"), "masked key in logs: {text}");
    }

    #[tokio::test]
    async fn locked_copy_is_noop() {
        let f = fixture("short", Arc::new(StaticEntitlement::new(false)));
        let outcome = f.display.attempt_copy().await;

        assert_eq!(outcome, CopyOutcome::Locked);
        assert!(f.clipboard.writes().is_empty());
        assert!(f.acks.shown().is_empty(), "locked copy must show nothing");
    }

    #[tokio::test]
    async fn entitlement_is_rechecked_at_copy_time() {
        let toggle = Arc::new(Toggle(AtomicBool::new(true)));
        let f = fixture(LONG_KEY, toggle.clone());
        assert!(f.display.render().copy_enabled);

        // revoked after the control was rendered enabled
        toggle.0.store(false, Ordering::SeqCst);
        assert_eq!(f.display.attempt_copy().await, CopyOutcome::Locked);
        assert!(f.clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn repeated_copies_are_independent() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        assert_eq!(f.display.attempt_copy().await, CopyOutcome::Copied);
        assert_eq!(f.display.attempt_copy().await, CopyOutcome::Copied);

        assert_eq!(f.clipboard.writes(), vec![LONG_KEY, LONG_KEY]);
        assert_eq!(f.acks.shown().len(), 2);
    }

    #[tokio::test]
    async fn failure_then_success_is_not_cached() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        f.clipboard.set_failure(Some(ClipboardError::Unsupported));
        assert!(matches!(
            f.display.attempt_copy().await,
            CopyOutcome::Failed(_)
        ));

        f.clipboard.set_failure(None);
        assert_eq!(f.display.attempt_copy().await, CopyOutcome::Copied);
        assert_eq!(
            f.acks.shown(),
            vec![Acknowledgment::copy_failed(), Acknowledgment::copied()]
        );
    }

    #[tokio::test]
    async fn concurrent_copies_both_complete() {
        let f = fixture(LONG_KEY, Arc::new(StaticEntitlement::new(true)));
        let (a, b) = tokio::join!(f.display.attempt_copy(), f.display.attempt_copy());
        assert_eq!(a, CopyOutcome::Copied);
        assert_eq!(b, CopyOutcome::Copied);
        assert_eq!(f.clipboard.writes().len(), 2);
    }

    #[tokio::test]
    async fn acknowledgment_follows_completed_write() {
        /// Checks the clipboard contents at the moment the notice is shown.
        struct Observer {
            clipboard: Arc<MemoryClipboard>,
            seen: Mutex<Option<String>>,
        }

        impl Acknowledger for Observer {
            fn show(&self, _ack: Acknowledgment) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
                *self.seen.lock().unwrap() = self.clipboard.contents();
                Box::pin(async {})
            }
        }

        let clipboard = Arc::new(MemoryClipboard::new());
        let observer = Arc::new(Observer {
            clipboard: clipboard.clone(),
            seen: Mutex::new(None),
        });
        let display = MaskedSecretDisplay::new(
            Arc::new(StaticSecret::new(LONG_KEY)),
            Arc::new(StaticEntitlement::new(true)),
            clipboard,
            observer.clone(),
        );

        display.attempt_copy().await;
        assert_eq!(observer.seen.lock().unwrap().as_deref(), Some(LONG_KEY));
    }
}
