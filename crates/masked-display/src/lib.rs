//! Masked API-key display with entitlement-gated clipboard copy
//!
//! `mask` holds the pure display rules. `MaskedSecretDisplay` wires them to
//! the secret/entitlement sources, the clipboard and an acknowledgment
//! service. Entitlement is re-read on every render and again at the moment
//! of copying, so a stale "unlocked" view can never export the key.

mod ack;
mod display;
pub mod mask;
mod metrics;

pub use ack::{Acknowledger, Acknowledgment};
pub use display::{CopyOutcome, InteractionState, MaskedSecretDisplay, RenderedView};
pub use mask::{DEFAULT_MASK_CHAR, PLACEHOLDER_LEN, display_value, masked_form, placeholder};
