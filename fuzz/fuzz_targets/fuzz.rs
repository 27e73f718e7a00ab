#![no_main]

use bwtblock::decompress;
use libfuzzer_sys::fuzz_target;

/// Verifies that the decoder safely handles arbitrary, potentially malformed
/// input.
///
/// This simulates scenarios involving corrupted assets, malicious payloads,
/// or random noise.
///
/// # Invariant
/// The decoder must return either `Ok(_)` or `Err(_)`. It must **never**
/// panic or index out of bounds, regardless of the input data. Truncated
/// envelopes, short payloads, and forged frequency counters all have defined
/// error outcomes.
fn verify_decompression_robustness(data: &[u8]) {
    // We explicitly ignore the result. Whether it succeeds (coincidentally
    // valid) or fails (invalid data) is irrelevant; we only assert that it
    // returns safely.
    let _ = decompress(data);
}

fuzz_target!(|data: &[u8]| {
    verify_decompression_robustness(data);
});
