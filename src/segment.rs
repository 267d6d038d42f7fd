// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! Generic segment-cursor state machines behind PS/PTYN and RT/eRT.
//!
//! Two shapes are needed because the source (the reference C encoder this was ported from)
//! treats its text fields differently:
//!
//! - PS and PTYN only ever adopt a staged update when the segment cursor is
//!   back at zero (`ps_state == 0 && rds_state.ps_update`), so an update
//!   staged mid-cycle waits for the current pass to finish. [`GatedSegmenter`]
//!   implements this.
//! - RT (and, by the same pattern, eRT) adopts a staged update on the very
//!   next emission regardless of cursor position, forcibly rewinding the
//!   cursor to segment 0 and arming a burst counter so the new text is
//!   guaranteed to transmit end-to-end before the scheduler interleaves
//!   anything else. [`BurstSegmenter`] implements this, replicating
//!   `get_rds_rt_group`'s decrement-then-rewind order exactly so a full RT
//!   update always finishes transmitting within a bounded number of ticks.

/// A segment-cursor text field whose updates only take effect at segment 0.
#[derive(Debug, Clone)]
pub struct GatedSegmenter<const TOTAL: usize, const SEG_CHARS: usize, const SEGMENTS: usize> {
    shadow: [u8; TOTAL],
    pending: [u8; TOTAL],
    update_pending: bool,
    cursor: usize,
}

impl<const TOTAL: usize, const SEG_CHARS: usize, const SEGMENTS: usize>
    GatedSegmenter<TOTAL, SEG_CHARS, SEGMENTS>
{
    /// Build a segmenter already showing `initial` (no update pending).
    #[must_use]
    pub fn new(initial: [u8; TOTAL]) -> Self {
        debug_assert_eq!(SEG_CHARS * SEGMENTS, TOTAL);
        Self {
            shadow: initial,
            pending: initial,
            update_pending: false,
            cursor: 0,
        }
    }

    /// Stage new text. Takes effect the next time the cursor reaches 0.
    pub fn set(&mut self, text: [u8; TOTAL]) {
        self.pending = text;
        self.update_pending = true;
    }

    /// Whether a staged update is still waiting for the cursor to reach 0.
    #[must_use]
    pub fn update_pending(&self) -> bool {
        self.update_pending
    }

    /// Overwrite the published text immediately, bypassing the cursor gate.
    /// Used for PTYN's clear-to-disable path, which the reference encoder
    /// applies via a direct `memset` rather than the usual staged update:
    /// clearing PTYN must suppress 10A on the very next opportunity, not
    /// after a full pass.
    pub fn force_set(&mut self, text: [u8; TOTAL]) {
        self.shadow = text;
        self.pending = text;
        self.update_pending = false;
    }

    /// Current shadow (last-published) text.
    #[must_use]
    pub fn published(&self) -> &[u8; TOTAL] {
        &self.shadow
    }

    /// Advance one emission: apply a pending update if the cursor is at 0,
    /// then return `(segment_index, segment_bytes)` and advance the cursor.
    pub fn advance(&mut self) -> (usize, [u8; SEG_CHARS]) {
        if self.cursor == 0 && self.update_pending {
            self.shadow = self.pending;
            self.update_pending = false;
        }

        let seg = self.cursor;
        let start = seg * SEG_CHARS;
        let mut chars = [0u8; SEG_CHARS];
        chars.copy_from_slice(&self.shadow[start..start + SEG_CHARS]);

        self.cursor += 1;
        if self.cursor >= SEGMENTS {
            self.cursor = 0;
        }
        (seg, chars)
    }
}

/// A segment-cursor text field whose updates take effect immediately and
/// re-burst the full text before anything else is allowed to interleave.
#[derive(Debug, Clone)]
pub struct BurstSegmenter<const TOTAL: usize, const SEG_CHARS: usize, const MAX_SEGMENTS: usize> {
    shadow: [u8; TOTAL],
    cursor: usize,
    active_segments: usize,
    pending_text: [u8; TOTAL],
    pending_segments: usize,
    update_pending: bool,
    bursting: u16,
}

impl<const TOTAL: usize, const SEG_CHARS: usize, const MAX_SEGMENTS: usize>
    BurstSegmenter<TOTAL, SEG_CHARS, MAX_SEGMENTS>
{
    /// Build a segmenter already showing `initial` across all `MAX_SEGMENTS`
    /// segments (no update pending, no burst armed).
    #[must_use]
    pub fn new(initial: [u8; TOTAL]) -> Self {
        debug_assert_eq!(SEG_CHARS * MAX_SEGMENTS, TOTAL);
        Self {
            shadow: initial,
            cursor: 0,
            active_segments: MAX_SEGMENTS,
            pending_text: initial,
            pending_segments: MAX_SEGMENTS,
            update_pending: false,
            bursting: 0,
        }
    }

    /// Stage new text with `active_segments` (1..=`MAX_SEGMENTS`) segments
    /// actively transmitted, arming the burst counter to that count.
    pub fn set(&mut self, text: [u8; TOTAL], active_segments: usize) {
        self.pending_text = text;
        self.pending_segments = active_segments.clamp(1, MAX_SEGMENTS);
        self.update_pending = true;
        self.bursting = self.pending_segments as u16;
    }

    /// Whether the scheduler should keep emitting this field back-to-back.
    #[must_use]
    pub fn is_bursting(&self) -> bool {
        self.bursting > 0
    }

    /// Current shadow (last-published) text.
    #[must_use]
    pub fn published(&self) -> &[u8; TOTAL] {
        &self.shadow
    }

    /// Number of segments currently in rotation.
    #[must_use]
    pub fn active_segments(&self) -> usize {
        self.active_segments
    }

    /// Advance one emission: decrement the burst counter, apply a pending
    /// update (rewinding the cursor), then return `(segment_index,
    /// segment_bytes)` and advance the cursor.
    pub fn advance(&mut self) -> (usize, [u8; SEG_CHARS]) {
        if self.bursting > 0 {
            self.bursting -= 1;
        }

        if self.update_pending {
            self.shadow = self.pending_text;
            self.active_segments = self.pending_segments;
            self.update_pending = false;
            self.cursor = 0;
        }

        let seg = self.cursor;
        let start = seg * SEG_CHARS;
        let mut chars = [0u8; SEG_CHARS];
        chars.copy_from_slice(&self.shadow[start..start + SEG_CHARS]);

        self.cursor += 1;
        if self.cursor >= self.active_segments {
            self.cursor = 0;
        }
        (seg, chars)
    }
}

/// Build the fixed-width buffer and active-segment count for a
/// [`BurstSegmenter`] field (RT, eRT) from a `&str`: space-pad to `TOTAL`
/// bytes, and if the input is shorter than `TOTAL`, terminate it with `\r`
/// and compute `rt_segments = ceil((len+1)/4)` (`spec.md` §4.3). Full-width
/// input uses all `TOTAL/4` segments.
#[must_use]
pub fn pad_with_cr<const TOTAL: usize>(text: &str) -> ([u8; TOTAL], usize) {
    let mut buf = [b' '; TOTAL];
    let bytes = text.as_bytes();
    let len = bytes.len().min(TOTAL);
    buf[..len].copy_from_slice(&bytes[..len]);

    if len < TOTAL {
        buf[len] = b'\r';
        let segments = (len + 1 + 3) / 4;
        (buf, segments)
    } else {
        (buf, TOTAL / 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_segmenter_no_mid_cycle_update() {
        let mut seg = GatedSegmenter::<8, 2, 4>::new(*b"AAAAAAAA");
        let (idx0, _) = seg.advance(); // cursor 0 -> 1
        assert_eq!(idx0, 0);
        seg.set(*b"BBBBBBBB");
        // Cursor is at 1, not 0: update must not appear yet.
        let (idx1, chars1) = seg.advance();
        assert_eq!(idx1, 1);
        assert_eq!(&chars1, b"AA");
        let (idx2, chars2) = seg.advance();
        assert_eq!(idx2, 2);
        assert_eq!(&chars2, b"AA");
        let (idx3, chars3) = seg.advance();
        assert_eq!(idx3, 3);
        assert_eq!(&chars3, b"AA");
        // Now cursor wraps to 0 and the staged update finally applies.
        let (idx4, chars4) = seg.advance();
        assert_eq!(idx4, 0);
        assert_eq!(&chars4, b"BB");
        assert!(!seg.update_pending());
    }

    #[test]
    fn gated_segmenter_reconstructs_full_text() {
        let mut seg = GatedSegmenter::<8, 2, 4>::new(*b"        ");
        seg.set(*b"TEST1234");
        let mut reconstructed = Vec::new();
        for _ in 0..4 {
            let (_, chars) = seg.advance();
            reconstructed.extend_from_slice(&chars);
        }
        assert_eq!(reconstructed, b"TEST1234");
    }

    #[test]
    fn burst_segmenter_rewinds_immediately() {
        let mut seg = BurstSegmenter::<64, 4, 16>::new([b' '; 64]);
        let (idx0, _) = seg.advance();
        assert_eq!(idx0, 0);
        let (idx1, _) = seg.advance();
        assert_eq!(idx1, 1);

        let mut text = [b' '; 64];
        text[0..5].copy_from_slice(b"HELLO");
        // "HELLO" (5 chars) -> pad + \r at position 5 -> 2 segments of 4.
        text[5] = b'\r';
        seg.set(text, 2);
        assert!(seg.is_bursting());

        // Update applies on the very next advance, rewinding the cursor.
        let (idx, chars) = seg.advance();
        assert_eq!(idx, 0);
        assert_eq!(&chars, b"HELL");
        let (idx, chars) = seg.advance();
        assert_eq!(idx, 1);
        assert_eq!(&chars, b"O\r  ");
        assert!(!seg.is_bursting());
    }

    #[test]
    fn pad_with_cr_terminates_short_text() {
        let (buf, segments) = pad_with_cr::<64>("HELLO");
        assert_eq!(&buf[0..6], b"HELLO\r");
        assert_eq!(buf[6], b' ');
        assert_eq!(segments, 2); // ceil(6/4)
    }

    #[test]
    fn pad_with_cr_full_width_uses_all_segments() {
        let text = "A".repeat(64);
        let (buf, segments) = pad_with_cr::<64>(&text);
        assert_eq!(buf, [b'A'; 64]);
        assert_eq!(segments, 16);
    }

    #[test]
    fn pad_with_cr_empty_text_is_one_segment() {
        let (buf, segments) = pad_with_cr::<64>("");
        assert_eq!(buf[0], b'\r');
        assert_eq!(segments, 1);
    }

    #[test]
    fn burst_segmenter_decrements_before_applying_update() {
        let mut seg = BurstSegmenter::<8, 4, 2>::new([b' '; 8]);
        seg.set([b'A'; 8], 2);
        assert_eq!(seg.active_segments(), 2); // unchanged until applied
        let _ = seg.advance();
        // bursting armed to 2, decremented to 1 on the applying advance.
        assert!(seg.is_bursting());
        let _ = seg.advance();
        assert!(!seg.is_bursting());
    }
}
