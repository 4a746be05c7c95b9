// ABOUTME: Request-side value types for Garmin Connect write operations and downloads
// ABOUTME: Response payloads stay opaque serde_json values and are not modeled here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ConnectError, ConnectResult};

/// Scale reading uploaded as a FIT weight_scale message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    /// Local measurement time, now when absent
    pub timestamp: Option<String>,
    /// Weight in kilograms
    pub weight: f64,
    /// Body fat percentage
    pub percent_fat: Option<f64>,
    /// Hydration percentage
    pub percent_hydration: Option<f64>,
    /// Visceral fat mass in kilograms
    pub visceral_fat_mass: Option<f64>,
    /// Bone mass in kilograms
    pub bone_mass: Option<f64>,
    /// Muscle mass in kilograms
    pub muscle_mass: Option<f64>,
    /// Basal metabolic rate in kcal/day
    pub basal_met: Option<f64>,
    /// Active metabolic rate in kcal/day
    pub active_met: Option<f64>,
    /// Physique rating (1-9)
    pub physique_rating: Option<f64>,
    /// Metabolic age in years
    pub metabolic_age: Option<f64>,
    /// Visceral fat rating (1-59)
    pub visceral_fat_rating: Option<f64>,
    /// Body mass index
    pub bmi: Option<f64>,
}

/// Manual blood pressure measurement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BloodPressureReading {
    /// Systolic pressure in mmHg
    pub systolic: i64,
    /// Diastolic pressure in mmHg
    pub diastolic: i64,
    /// Pulse in beats per minute
    pub pulse: i64,
    /// Local measurement time, now when absent
    pub timestamp: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Activity entered by hand rather than recorded on a device
#[derive(Debug, Clone, PartialEq)]
pub struct ManualActivity {
    /// Local start, e.g. `2023-12-02T10:00:00.00`
    pub start_datetime: String,
    /// IANA time zone of the start time
    pub time_zone: String,
    /// Activity type key such as `running`
    pub type_key: String,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: i64,
    /// Title
    pub activity_name: String,
}

impl ManualActivity {
    /// Duration in seconds as Garmin expects it
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::InvalidArgument`] for a negative duration or
    /// one too large to express in seconds
    pub fn duration_secs(&self) -> ConnectResult<i64> {
        if self.duration_min < 0 {
            return Err(ConnectError::invalid_argument(format!(
                "duration_min must not be negative, got {}",
                self.duration_min
            )));
        }
        self.duration_min.checked_mul(60).ok_or_else(|| {
            ConnectError::invalid_argument(format!(
                "duration_min {} is too large",
                self.duration_min
            ))
        })
    }
}

/// File formats offered by the activity download service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    /// Zipped original upload
    Original,
    /// Training Center XML
    Tcx,
    /// GPS Exchange Format
    Gpx,
    /// Keyhole Markup Language
    Kml,
    /// Splits as CSV
    Csv,
}

impl DownloadFormat {
    /// Map the numeric code used by callers (1-5)
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::InvalidArgument`] for unknown codes
    pub fn from_code(code: i64) -> ConnectResult<Self> {
        match code {
            1 => Ok(Self::Original),
            2 => Ok(Self::Tcx),
            3 => Ok(Self::Gpx),
            4 => Ok(Self::Kml),
            5 => Ok(Self::Csv),
            other => Err(ConnectError::invalid_argument(format!(
                "unexpected download format {other}, expected 1 (ORIGINAL), 2 (TCX), 3 (GPX), 4 (KML) or 5 (CSV)"
            ))),
        }
    }

    /// Download path for an activity
    #[must_use]
    pub fn path(self, activity_id: i64) -> String {
        match self {
            Self::Original => format!("/download-service/files/activity/{activity_id}"),
            Self::Tcx => format!("/download-service/export/tcx/activity/{activity_id}"),
            Self::Gpx => format!("/download-service/export/gpx/activity/{activity_id}"),
            Self::Kml => format!("/download-service/export/kml/activity/{activity_id}"),
            Self::Csv => format!("/download-service/export/csv/activity/{activity_id}"),
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Original => "ORIGINAL",
            Self::Tcx => "TCX",
            Self::Gpx => "GPX",
            Self::Kml => "KML",
            Self::Csv => "CSV",
        };
        f.write_str(name)
    }
}

/// Account details captured right after login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Name used in user-scoped URLs
    pub display_name: String,
    /// Numeric profile id
    pub profile_id: Option<i64>,
    /// Full name of the account holder
    pub full_name: Option<String>,
    /// `metric` or `statute_us`
    pub unit_system: Option<String>,
}
