//! Canonical funnel for markings.
//!
//! Byte layout fed to the hash function (never persisted):
//!
//! ```text
//! [tangible: u8]                      only for classified states
//! for each place in sorted order:
//!     place id: u64 LE length + UTF-8
//!     token entries: u64 LE
//!     for each token in sorted order:
//!         token id: u64 LE length + UTF-8
//!         count: u32 LE
//! ```
//!
//! Length prefixes keep the encoding injective, so `{"P1": {"0": 1}}` and
//! `{"P10": {"": 1}}` never feed the same bytes.

use statespace_core::TokenCounts;

/// Destination for funnelled primitives
pub trait PrimitiveSink {
    fn put_bytes(&mut self, bytes: &[u8]);
    
    fn put_bool(&mut self, value: bool) {
        self.put_bytes(&[value as u8]);
    }
    
    fn put_u32(&mut self, value: u32) {
        self.put_bytes(&value.to_le_bytes());
    }
    
    fn put_u64(&mut self, value: u64) {
        self.put_bytes(&value.to_le_bytes());
    }
    
    fn put_len(&mut self, len: usize) {
        self.put_u64(len as u64);
    }
    
    fn put_str(&mut self, value: &str) {
        self.put_len(value.len());
        self.put_bytes(value.as_bytes());
    }
}

impl PrimitiveSink for Vec<u8> {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Fold a marking into `sink` in canonical order.
///
/// `TokenCounts` is ordered by key, so iterating it is the canonical
/// place order and each place's map is the canonical token order.
pub fn funnel_marking<S: PrimitiveSink + ?Sized>(
    sink: &mut S,
    tangible: Option<bool>,
    counts: &TokenCounts,
) {
    if let Some(flag) = tangible {
        sink.put_bool(flag);
    }
    for (place, tokens) in counts {
        sink.put_str(place);
        sink.put_len(tokens.len());
        for (token, count) in tokens {
            sink.put_str(token);
            sink.put_u32(*count);
        }
    }
}

/// Canonical funnel bytes of a marking
pub fn canonical_bytes(tangible: Option<bool>, counts: &TokenCounts) -> Vec<u8> {
    let mut bytes = Vec::new();
    funnel_marking(&mut bytes, tangible, counts);
    bytes
}
