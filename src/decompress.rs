use crate::error::DecompressionError;
use alloc::vec::Vec;

type Result<T> = core::result::Result<T, DecompressionError>;

// --- Constants ---

/// Length of the opaque tag leading every block. Nothing in the format
/// interprets these bytes; they are consumed and discarded.
const TAG_LEN: usize = 4;

/// Length of the fixed envelope: the 4-byte tag plus the 1-byte seed.
const ENVELOPE_LEN: usize = 5;

/// Number of distinct byte symbols tracked by both stages.
const SYMBOL_COUNT: usize = 256;

/// Size of the frequency table at the front of the recoded stream:
/// one little-endian `u32` counter per symbol.
const FREQ_TABLE_LEN: usize = SYMBOL_COUNT * 4;

/// Decompresses a single block.
///
/// A block is a 4-byte opaque tag, a 1-byte seed, and a payload that passes
/// through two stages in sequence: an inverse move-to-front recoding, then a
/// frequency-ranked run expansion whose output length is the sum of the 256
/// counters embedded at the front of the recoded stream.
///
/// Returns the reconstructed bytes. A zero counter sum yields an empty
/// buffer; a stream whose counters fail the length check also reports empty
/// rather than erroring, so an empty result is the only failure signal on
/// that path.
///
/// # Errors
///
/// * [`DecompressionError::UnexpectedEof`] if the input is shorter than the
///   5-byte envelope.
/// * [`DecompressionError::InputTooShort`] if the recoded stream cannot hold
///   the 1024-byte frequency table, or the counters claim more schedule
///   data than the stream provides.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() < ENVELOPE_LEN {
        return Err(DecompressionError::UnexpectedEof);
    }

    let seed = input[TAG_LEN];
    let payload = &input[ENVELOPE_LEN..];

    let intermediate = mtf_decode(seed, payload);

    // Nothing on the wire carries an expected length; it is always derived
    // from the embedded counters.
    expand(&intermediate, 0)
}

/// Undoes the move-to-front recoding applied as the outer compression stage.
///
/// Every input byte is a rank into a recency-ordered table of all 256 byte
/// values, the seed being simply the first rank in the stream. Emitting a
/// value promotes it to rank 0 by sliding the ranks above it down one slot.
fn mtf_decode(seed: u8, payload: &[u8]) -> Vec<u8> {
    let mut table = identity_table();
    let mut intermediate = Vec::with_capacity(payload.len() + 1);

    for &rank in core::iter::once(&seed).chain(payload) {
        let value = table[rank as usize];
        table.copy_within(..rank as usize, 1);
        table[0] = value;
        intermediate.push(value);
    }

    intermediate
}

/// Expands the recoded stream into the final output.
///
/// The first 1024 bytes are the frequency table; the rest is the
/// "introduction schedule": for each symbol, in descending frequency order,
/// one byte naming its starting rank-list slot followed by the bytes that
/// steer the rank list while its run drains.
///
/// `expected_len` of 0 means "derive the output length from the counters".
/// A nonzero value that disagrees with the counter sum makes the whole
/// decode report an empty buffer.
fn expand(intermediate: &[u8], expected_len: u32) -> Result<Vec<u8>> {
    if intermediate.len() < FREQ_TABLE_LEN {
        return Err(DecompressionError::InputTooShort);
    }
    let (freq_table, schedule) = intermediate.split_at(FREQ_TABLE_LEN);

    let mut counts = [0u32; SYMBOL_COUNT];
    for (count, bytes) in counts.iter_mut().zip(freq_table.chunks_exact(4)) {
        *count = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    // 256 counters of 32 bits each; sum in u64 so a forged table cannot
    // overflow the length computation.
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();

    if expected_len != 0 && u64::from(expected_len) != total {
        return Ok(Vec::new());
    }

    // --- Rank list and per-symbol run windows ---

    let mut rank_list = identity_table();
    let mut runs = [(0u64, 0u64); SYMBOL_COUNT];

    let ranked = rank_by_frequency(&counts);

    let mut m: u64 = 0;
    for &symbol in &ranked {
        // The byte heading the window names the rank-list slot this symbol
        // starts in; the rest of the window is its introduction run.
        let slot = schedule_byte(schedule, m)?;
        rank_list[slot as usize] = symbol;

        let count = u64::from(counts[symbol as usize]);
        runs[symbol as usize] = (m + 1, m + count);
        m += count;
    }

    // --- Expansion ---

    let mut active = ranked.len() as i32;
    let mut val = rank_list[0];

    // A well-formed stream carries exactly one schedule byte per output
    // byte, so the schedule length caps the useful reservation.
    let mut output = Vec::with_capacity(total.min(schedule.len() as u64) as usize);

    for _ in 0..total {
        output.push(val);

        let (start, end) = runs[val as usize];
        if start >= end {
            // Run exhausted: drop the front of the rank list. `active` can
            // be driven below zero by a front whose window was never
            // populated; the front symbol then simply repeats.
            active -= 1;
            if active > 0 {
                shift_front(&mut rank_list, active as usize);
                val = rank_list[0];
            }
        } else {
            let idx = schedule_byte(schedule, start)?;
            runs[val as usize].0 = start + 1;

            if idx != 0 {
                shift_front(&mut rank_list, idx as usize);
                rank_list[idx as usize] = val;
                val = rank_list[0];
            }
        }
    }

    Ok(output)
}

/// Orders symbols by descending counter value.
///
/// Repeatedly scans all 256 counters and takes the smallest index holding
/// the current maximum, so ties resolve toward lower byte values. Only
/// symbols with a nonzero count are ranked; the returned length is the live
/// run count for the expansion loop.
fn rank_by_frequency(counts: &[u32; SYMBOL_COUNT]) -> Vec<u8> {
    let mut remaining = *counts;
    let mut ranked = Vec::new();

    loop {
        let mut best_symbol = 0;
        let mut best_count = 0;

        for (symbol, &count) in remaining.iter().enumerate() {
            if count > best_count {
                best_symbol = symbol;
                best_count = count;
            }
        }

        if best_count == 0 {
            break;
        }

        ranked.push(best_symbol as u8);
        remaining[best_symbol] = 0;
    }

    ranked
}

/// Shifts the first `len` entries of the rank list down one position.
///
/// The entry at `len` is copied, not cleared, so it momentarily occupies two
/// adjacent ranks. Later schedule lookups depend on that duplicate; it is
/// not a plain rotation.
#[inline]
fn shift_front(rank_list: &mut [u8; SYMBOL_COUNT], len: usize) {
    rank_list.copy_within(1..=len, 0);
}

/// The identity symbol table: entry `i` holds byte value `i`.
#[inline]
fn identity_table() -> [u8; SYMBOL_COUNT] {
    core::array::from_fn(|i| i as u8)
}

/// Reads one byte of the introduction schedule, failing when the counters
/// claim more schedule data than the stream actually holds.
#[inline]
fn schedule_byte(schedule: &[u8], pos: u64) -> Result<u8> {
    usize::try_from(pos)
        .ok()
        .and_then(|pos| schedule.get(pos).copied())
        .ok_or(DecompressionError::InputTooShort)
}
