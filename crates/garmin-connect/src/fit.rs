// ABOUTME: Minimal FIT file encoder producing file_id + weight_scale records for body composition
// ABOUTME: Garmin ingests scale data only as FIT uploads, so readings are serialized here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! FIT encoding for body composition uploads.
//!
//! Only the little-endian subset needed for a single `weight_scale` message
//! is implemented: a 14-byte header, one definition + data message for
//! `file_id`, one for `weight_scale`, and the trailing CRC.

use chrono::{DateTime, Utc};

use crate::errors::{ConnectError, ConnectResult};
use crate::types::BodyComposition;

/// Seconds between the unix epoch and the FIT epoch (1989-12-31T00:00:00Z)
pub const FIT_EPOCH_OFFSET: i64 = 631_065_600;

const HEADER_SIZE: u8 = 14;
const PROTOCOL_VERSION: u8 = 0x10;
const PROFILE_VERSION: u16 = 2_132;

const MESG_FILE_ID: u16 = 0;
const MESG_WEIGHT_SCALE: u16 = 30;
const FILE_TYPE_WEIGHT: u8 = 9;
const MANUFACTURER_DEVELOPMENT: u16 = 255;

const BASE_ENUM: u8 = 0x00;
const BASE_UINT8: u8 = 0x02;
const BASE_UINT16: u8 = 0x84;
const BASE_UINT32: u8 = 0x86;
const BASE_UINT32Z: u8 = 0x8C;

const INVALID_U8: u8 = 0xFF;
const INVALID_U16: u16 = 0xFFFF;

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// FIT CRC-16 over `bytes`
#[must_use]
pub fn crc16(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0, |crc, &byte| crc_step(crc, byte))
}

fn crc_step(crc: u16, byte: u8) -> u16 {
    let mut tmp = CRC_TABLE[usize::from(crc & 0xF)];
    let mut crc = (crc >> 4) & 0x0FFF;
    crc = crc ^ tmp ^ CRC_TABLE[usize::from(byte & 0xF)];
    tmp = CRC_TABLE[usize::from(crc & 0xF)];
    crc = (crc >> 4) & 0x0FFF;
    crc ^ tmp ^ CRC_TABLE[usize::from((byte >> 4) & 0xF)]
}

/// Convert a UTC instant to a FIT timestamp
///
/// # Errors
///
/// Returns an error for instants before the FIT epoch or past 2126
pub fn fit_timestamp(at: DateTime<Utc>) -> ConnectResult<u32> {
    u32::try_from(at.timestamp() - FIT_EPOCH_OFFSET)
        .map_err(|_| ConnectError::Fit(format!("timestamp {at} is outside the FIT range")))
}

struct FieldDef {
    number: u8,
    size: u8,
    base_type: u8,
}

const fn field(number: u8, size: u8, base_type: u8) -> FieldDef {
    FieldDef {
        number,
        size,
        base_type,
    }
}

#[derive(Default)]
struct FitWriter {
    records: Vec<u8>,
}

impl FitWriter {
    fn define(&mut self, local: u8, global: u16, fields: &[FieldDef]) {
        self.records.push(0x40 | local);
        self.records.push(0);
        self.records.push(0);
        self.records.extend_from_slice(&global.to_le_bytes());
        self.records.push(fields.len() as u8);
        for f in fields {
            self.records.extend_from_slice(&[f.number, f.size, f.base_type]);
        }
    }

    fn begin_data(&mut self, local: u8) {
        self.records.push(local & 0x0F);
    }

    fn u8(&mut self, value: u8) {
        self.records.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.records.extend_from_slice(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.records.extend_from_slice(&value.to_le_bytes());
    }

    fn finish(self) -> ConnectResult<Vec<u8>> {
        let data_size = u32::try_from(self.records.len())
            .map_err(|_| ConnectError::Fit("record section too large".to_owned()))?;

        let mut out = Vec::with_capacity(self.records.len() + usize::from(HEADER_SIZE) + 2);
        out.push(HEADER_SIZE);
        out.push(PROTOCOL_VERSION);
        out.extend_from_slice(&PROFILE_VERSION.to_le_bytes());
        out.extend_from_slice(&data_size.to_le_bytes());
        out.extend_from_slice(b".FIT");
        let header_crc = crc16(&out);
        out.extend_from_slice(&header_crc.to_le_bytes());

        out.extend_from_slice(&self.records);
        let file_crc = crc16(&out);
        out.extend_from_slice(&file_crc.to_le_bytes());
        Ok(out)
    }
}

fn scaled_u16(value: Option<f64>, scale: f64) -> u16 {
    value.map_or(INVALID_U16, |v| {
        (v * scale).round().clamp(0.0, f64::from(INVALID_U16 - 1)) as u16
    })
}

fn plain_u8(value: Option<f64>) -> u8 {
    value.map_or(INVALID_U8, |v| {
        v.round().clamp(0.0, f64::from(INVALID_U8 - 1)) as u8
    })
}

/// Encode one body composition reading taken at `at`
///
/// # Errors
///
/// Returns an error if `at` cannot be represented as a FIT timestamp
pub fn encode_body_composition(at: DateTime<Utc>, reading: &BodyComposition) -> ConnectResult<Vec<u8>> {
    let timestamp = fit_timestamp(at)?;
    let mut writer = FitWriter::default();

    writer.define(
        0,
        MESG_FILE_ID,
        &[
            field(0, 1, BASE_ENUM),
            field(1, 2, BASE_UINT16),
            field(2, 2, BASE_UINT16),
            field(3, 4, BASE_UINT32Z),
            field(4, 4, BASE_UINT32),
        ],
    );
    writer.begin_data(0);
    writer.u8(FILE_TYPE_WEIGHT);
    writer.u16(MANUFACTURER_DEVELOPMENT);
    writer.u16(0);
    writer.u32(1);
    writer.u32(timestamp);

    writer.define(
        1,
        MESG_WEIGHT_SCALE,
        &[
            field(253, 4, BASE_UINT32),
            field(0, 2, BASE_UINT16),
            field(1, 2, BASE_UINT16),
            field(2, 2, BASE_UINT16),
            field(3, 2, BASE_UINT16),
            field(4, 2, BASE_UINT16),
            field(5, 2, BASE_UINT16),
            field(7, 2, BASE_UINT16),
            field(8, 1, BASE_UINT8),
            field(9, 2, BASE_UINT16),
            field(10, 1, BASE_UINT8),
            field(11, 1, BASE_UINT8),
            field(13, 2, BASE_UINT16),
        ],
    );
    writer.begin_data(1);
    writer.u32(timestamp);
    writer.u16(scaled_u16(Some(reading.weight), 100.0));
    writer.u16(scaled_u16(reading.percent_fat, 100.0));
    writer.u16(scaled_u16(reading.percent_hydration, 100.0));
    writer.u16(scaled_u16(reading.visceral_fat_mass, 100.0));
    writer.u16(scaled_u16(reading.bone_mass, 100.0));
    writer.u16(scaled_u16(reading.muscle_mass, 100.0));
    writer.u16(scaled_u16(reading.basal_met, 4.0));
    writer.u8(plain_u8(reading.physique_rating));
    writer.u16(scaled_u16(reading.active_met, 4.0));
    writer.u8(plain_u8(reading.metabolic_age));
    writer.u8(plain_u8(reading.visceral_fat_rating));
    writer.u16(scaled_u16(reading.bmi, 10.0));

    writer.finish()
}
