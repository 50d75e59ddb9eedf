//! Copy-attempt counter
//!
//! - `keyview_copy_attempts_total` (counter): label `outcome` = copied | failed | locked

pub(crate) fn record_copy(outcome: &'static str) {
    metrics::counter!("keyview_copy_attempts_total", "outcome" => outcome).increment(1);
}
