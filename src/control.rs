// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! The non-blocking setter surface.
//!
//! Every setter here validates or masks its input and either stages an
//! update (text fields, gated by the owning segmenter's cursor discipline)
//! or writes straight through (flags, PTY, DI). None of them allocate or
//! block; none of them can fail — out-of-range input is silently clamped.

use crate::config::{PTYN_LENGTH, PS_LENGTH, RT_LENGTH};
use crate::encoder::{pad_space, RdsEncoder};
use crate::segment::pad_with_cr;

impl RdsEncoder {
    /// Set the Program Identification code.
    pub fn set_pi(&mut self, pi: u16) {
        self.pi = pi;
    }

    /// Set the Program Service name, space-padded/truncated to
    /// [`PS_LENGTH`]. Takes effect the next time the PS segment cursor
    /// reaches 0.
    pub fn set_ps(&mut self, ps: &str) {
        if ps.len() > PS_LENGTH {
            log::debug!("PS {ps:?} truncated to {PS_LENGTH} characters");
        }
        self.ps.set(pad_space::<PS_LENGTH>(ps));
    }

    /// Set the Radio Text, space-padded/truncated to [`RT_LENGTH`] (and
    /// `\r`-terminated if shorter). Arms the RT burst and toggles the RT
    /// A/B flag immediately, so a receiver can tell two consecutive RT
    /// updates apart even if their text happens to match.
    pub fn set_rt(&mut self, rt: &str) {
        if rt.len() > RT_LENGTH {
            log::debug!("RT {rt:?} truncated to {RT_LENGTH} characters");
        }
        let (buf, segments) = pad_with_cr::<RT_LENGTH>(rt);
        self.rt.set(buf, segments);
        self.rt_ab ^= true;
    }

    /// Set the Program Type, masked to 5 bits.
    pub fn set_pty(&mut self, pty: u8) {
        self.pty = pty & 0x1F;
    }

    /// Set the Program Type Name. An empty string clears it and disables
    /// 10A insertion immediately, bypassing the usual cursor-gated update
    /// path (see [`crate::segment::GatedSegmenter::force_set`]).
    pub fn set_ptyn(&mut self, ptyn: &str) {
        if ptyn.is_empty() {
            self.ptyn.force_set([0u8; PTYN_LENGTH]);
            self.ptyn_enabled = false;
            return;
        }
        if ptyn.len() > PTYN_LENGTH {
            log::debug!("PTYN {ptyn:?} truncated to {PTYN_LENGTH} characters");
        }
        self.ptyn.set(pad_space::<PTYN_LENGTH>(ptyn));
        self.ptyn_enabled = true;
    }

    /// Set the Traffic Announcement flag.
    pub fn set_ta(&mut self, ta: bool) {
        self.ta = ta;
    }

    /// Set the Traffic Program flag.
    pub fn set_tp(&mut self, tp: bool) {
        self.tp = tp;
    }

    /// Set the Music/Speech flag.
    pub fn set_ms(&mut self, ms: bool) {
        self.ms = ms;
    }

    /// Set the Decoder Identification nibble, masked to 4 bits.
    pub fn set_di(&mut self, di: u8) {
        self.di = di & 0x0F;
    }

    /// Set both RT+ tag tuples: `[type0, start0, len0, type1, start1,
    /// len1]`, each masked to its field width.
    pub fn set_rtplus_tags(&mut self, tags: [u8; 6]) {
        self.rtplus.set_tags(tags);
    }

    /// Set the RT+ running/toggle flags.
    pub fn set_rtplus_flags(&mut self, running: bool, toggle: bool) {
        self.rtplus.set_flags(running, toggle);
    }

    /// Replace the Alternative Frequency list.
    pub fn set_af(&mut self, af: &[u8]) {
        self.af.set(af);
    }

    /// Clear the Alternative Frequency list.
    pub fn clear_af(&mut self) {
        self.af.clear();
    }

    /// Register an Open Data Application. Silently rejected once the
    /// registry is full.
    pub fn register_oda(&mut self, group: u8, aid: u16, scb: u16) {
        self.oda.register(group, aid, scb);
    }

    /// Enable or disable CT (clock time) group emission.
    pub fn set_ct(&mut self, enabled: bool) {
        self.tx_ctime = enabled;
    }

    /// Set the Enhanced RadioText, space-padded/truncated to 64 characters
    /// (and `\r`-terminated if shorter). Enables 12A insertion on the first
    /// call; arms the eRT burst and toggles its A/B flag immediately,
    /// mirroring RT.
    pub fn set_ert(&mut self, ert: &str) {
        self.ert.set(ert);
    }
}
