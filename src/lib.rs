// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! # rds-encoder — RDS group encoder for FM broadcast
//!
//! A pure Rust implementation of an RDS (Radio Data System, IEC 62106 / EN
//! 50067) group encoder: a state machine that continuously produces 104-bit
//! RDS groups suitable for BPSK-modulating the 57 kHz subcarrier of an FM
//! multiplex signal.
//!
//! ## Quick Start
//!
//! ```
//! use rds_encoder::{InitParams, RdsEncoder};
//!
//! let mut encoder = RdsEncoder::new(InitParams {
//!     pi: 0xF00F,
//!     ps: "TEST",
//!     rt: "",
//!     pty: 0,
//!     ptyn: "",
//!     tp: false,
//!     af: &[],
//!     call_sign: None,
//!     ert: "",
//! });
//!
//! let mut bits = [0u8; 104];
//! encoder.next_bits(&mut bits);
//! assert!(bits.iter().all(|&b| b == 0 || b == 1));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------------------+
//! |                        Control Surface                          |
//! |   set_pi/set_ps/set_rt/set_pty/set_ptyn/set_rtplus_*/register_oda|
//! +-----------------------------------------------------------------+
//! |                        Group Scheduler                          |
//! |   CT pre-emption -> low-priority insertion (3A/10A/11A/12A)      |
//! |   -> default 0A/2A alternation                                  |
//! +-----------------------------------------------------------------+
//! |  PS/RT/PTYN/eRT segmenters | AF cursor | ODA registry | RT+ tag  |
//! +-----------------------------------------------------------------+
//! |                       Block Assembler                           |
//! +-----------------------------------------------------------------+
//! |                     Checkword Generator                         |
//! +-----------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`encoder`] — [`RdsEncoder`], the owned aggregate and its `next_bits` pull
//! - [`control`] — the non-blocking setter surface
//! - [`scheduler`] — group-type arbitration
//! - [`segment`] — the generic PS/RT/PTYN/eRT segmenter state machine
//! - [`af`] — alternative-frequency list cursor
//! - [`oda`] — fixed-capacity Open Data Application registry
//! - [`rtplus`] — RT+ content tagging
//! - [`ert`] — Enhanced RadioText (ODA, group 12A)
//! - [`ct`] — clock-time group emission and [`time`] — injectable UTC source
//! - [`checkword`] — CRC-10 + offset word block serialization
//! - [`rbds`] — optional call-sign → PI derivation
//! - [`sync`] — [`sync::SyncRdsEncoder`], a `parking_lot`-backed shared wrapper
//!
//! ## See Also
//!
//! - IEC 62106 / EN 50067 (RDS standard)
//! - NRSC-4-B Annex D (RBDS call-sign to PI mapping)
//! - RDS Forum Open Data Application specification for RT+ and eRT

#![warn(missing_docs)]

pub mod af;
pub mod checkword;
pub mod config;
pub mod control;
pub mod ct;
pub mod encoder;
pub mod ert;
pub mod group;
pub mod oda;
pub mod rbds;
pub mod rtplus;
pub mod scheduler;
pub mod segment;
pub mod sync;
pub mod time;

pub use config::{MAX_ODAS, PS_LENGTH, PTYN_LENGTH, RT_LENGTH};
pub use encoder::{InitParams, RdsEncoder};
pub use sync::SyncRdsEncoder;
