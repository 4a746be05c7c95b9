// ABOUTME: The GarminApi trait: one async method per Garmin Connect operation
// ABOUTME: Implemented by the HTTP client and by in-memory stubs in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Operation surface of an authenticated Garmin Connect session.
//!
//! Responses are returned as opaque JSON. Dates are `YYYY-MM-DD` strings,
//! optional arguments are `None` when the caller left them out.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ConnectResult;
use crate::types::{BloodPressureReading, BodyComposition, ManualActivity};

/// Remote operations available to a logged-in account
#[async_trait]
pub trait GarminApi: Send + Sync {
    // Profile

    /// Full name captured at login
    async fn get_full_name(&self) -> ConnectResult<Value>;
    /// `metric` or `statute_us`
    async fn get_unit_system(&self) -> ConnectResult<Value>;
    /// All user settings
    async fn get_user_profile(&self) -> ConnectResult<Value>;
    /// User profile settings
    async fn get_userprofile_settings(&self) -> ConnectResult<Value>;

    // Devices

    /// Registered devices
    async fn get_devices(&self) -> ConnectResult<Value>;
    /// Last used device
    async fn get_device_last_used(&self) -> ConnectResult<Value>;
    /// Settings of one device
    async fn get_device_settings(&self, device_id: &str) -> ConnectResult<Value>;
    /// Alarms collected across every device
    async fn get_device_alarms(&self) -> ConnectResult<Value>;
    /// Primary training device information
    async fn get_primary_training_device(&self) -> ConnectResult<Value>;
    /// Solar input of a device over a day or a range
    async fn get_device_solar_data(
        &self,
        device_id: &str,
        startdate: &str,
        enddate: Option<&str>,
    ) -> ConnectResult<Value>;

    // Daily health

    /// Daily user summary
    async fn get_stats(&self, cdate: &str) -> ConnectResult<Value>;
    /// Daily user summary
    async fn get_user_summary(&self, cdate: &str) -> ConnectResult<Value>;
    /// Summary merged with body composition averages
    async fn get_stats_and_body(&self, cdate: &str) -> ConnectResult<Value>;
    /// Step chart of a day
    async fn get_steps_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Daily step totals between two dates
    async fn get_daily_steps(&self, start: &str, end: &str) -> ConnectResult<Value>;
    /// Heart rate samples of a day
    async fn get_heart_rates(&self, cdate: &str) -> ConnectResult<Value>;
    /// Resting heart rate of a day
    async fn get_rhr_day(&self, cdate: &str) -> ConnectResult<Value>;
    /// Heart rate variability of a day
    async fn get_hrv_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Sleep data of a night
    async fn get_sleep_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Stress data of a day
    async fn get_stress_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// All-day stress samples
    async fn get_all_day_stress(&self, cdate: &str) -> ConnectResult<Value>;
    /// Body battery reports over a range
    async fn get_body_battery(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value>;
    /// Body battery events of a day
    async fn get_body_battery_events(&self, cdate: &str) -> ConnectResult<Value>;
    /// Hydration log of a day
    async fn get_hydration_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Respiration data of a day
    async fn get_respiration_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Pulse ox data of a day
    async fn get_spo2_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Floors climbed chart of a day
    async fn get_floors(&self, cdate: &str) -> ConnectResult<Value>;
    /// Intensity minutes of a day
    async fn get_intensity_minutes_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// All-day events of a day
    async fn get_all_day_events(&self, cdate: &str) -> ConnectResult<Value>;
    /// Wellness events of a day
    async fn get_daily_wellness_events_data(&self, startdate: &str) -> ConnectResult<Value>;
    /// Ask the service to reprocess a day
    async fn request_reload(&self, cdate: &str) -> ConnectResult<Value>;

    // Performance metrics

    /// VO2 max and related metrics
    async fn get_max_metrics(&self, cdate: &str) -> ConnectResult<Value>;
    /// Fitness age
    async fn get_fitnessage_data(&self, cdate: &str) -> ConnectResult<Value>;
    /// Training readiness
    async fn get_training_readiness(&self, cdate: &str) -> ConnectResult<Value>;
    /// Aggregated training status
    async fn get_training_status(&self, cdate: &str) -> ConnectResult<Value>;
    /// Hill score for a day or a range
    async fn get_hill_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value>;
    /// Endurance score for a day or a range
    async fn get_endurance_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value>;
    /// Latest race predictions, or a daily/monthly series when every argument is given
    async fn get_race_predictions(
        &self,
        startdate: Option<&str>,
        enddate: Option<&str>,
        prediction_type: Option<&str>,
    ) -> ConnectResult<Value>;
    /// Progress summary over activities
    async fn get_progress_summary_between_dates(
        &self,
        startdate: &str,
        enddate: &str,
        metric: &str,
        groupbyactivities: bool,
    ) -> ConnectResult<Value>;

    // Weight and body composition

    /// Weigh-ins between two dates
    async fn get_weigh_ins(&self, startdate: &str, enddate: &str) -> ConnectResult<Value>;
    /// Weigh-ins of a day
    async fn get_daily_weigh_ins(&self, cdate: &str) -> ConnectResult<Value>;
    /// Record a weigh-in at a local timestamp (now when absent)
    async fn add_weigh_in(&self, weight: f64, unit_key: &str, timestamp: Option<&str>) -> ConnectResult<Value>;
    /// Record a weigh-in with explicit local and GMT timestamps
    async fn add_weigh_in_with_timestamps(
        &self,
        weight: f64,
        unit_key: &str,
        date_timestamp: Option<&str>,
        gmt_timestamp: Option<&str>,
    ) -> ConnectResult<Value>;
    /// Delete the weigh-ins of a day, returning how many were removed
    async fn delete_weigh_ins(&self, cdate: &str, delete_all: bool) -> ConnectResult<Value>;
    /// Delete one weigh-in
    async fn delete_weigh_in(&self, weight_pk: &str, cdate: &str) -> ConnectResult<Value>;
    /// Body composition averages over a range
    async fn get_body_composition(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value>;
    /// Upload a scale reading
    async fn add_body_composition(&self, reading: &BodyComposition) -> ConnectResult<Value>;
    /// Log water intake in milliliters
    async fn add_hydration_data(
        &self,
        value_in_ml: f64,
        timestamp: Option<&str>,
        cdate: Option<&str>,
    ) -> ConnectResult<Value>;

    // Blood pressure

    /// Blood pressure readings over a range
    async fn get_blood_pressure(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value>;
    /// Record a blood pressure reading
    async fn set_blood_pressure(&self, reading: &BloodPressureReading) -> ConnectResult<Value>;
    /// Delete a blood pressure reading by version
    async fn delete_blood_pressure(&self, version: &str, cdate: &str) -> ConnectResult<Value>;

    // Women's health

    /// Menstrual calendar between two dates
    async fn get_menstrual_calendar_data(&self, startdate: &str, enddate: &str) -> ConnectResult<Value>;
    /// Menstrual day view
    async fn get_menstrual_data_for_date(&self, fordate: &str) -> ConnectResult<Value>;
    /// Pregnancy snapshot
    async fn get_pregnancy_summary(&self) -> ConnectResult<Value>;

    // Gear

    /// Gear of a user profile
    async fn get_gear(&self, user_profile_number: i64) -> ConnectResult<Value>;
    /// Default gear per activity type
    async fn get_gear_defaults(&self, user_profile_number: i64) -> ConnectResult<Value>;
    /// Activities recorded with a piece of gear
    async fn get_gear_activities(&self, gear_uuid: &str, limit: i64) -> ConnectResult<Value>;
    /// Usage statistics of a piece of gear
    async fn get_gear_stats(&self, gear_uuid: &str) -> ConnectResult<Value>;
    /// Make gear the default for an activity type, or remove the default
    async fn set_gear_default(
        &self,
        activity_type: &str,
        gear_uuid: &str,
        default_gear: bool,
    ) -> ConnectResult<Value>;

    // Goals, badges and challenges

    /// Goals by status
    async fn get_goals(&self, status: &str, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Historical ad-hoc challenges
    async fn get_adhoc_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Badge challenges open to join
    async fn get_available_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Completed badge challenges
    async fn get_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Badge challenges not yet completed
    async fn get_non_completed_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Virtual challenges in progress
    async fn get_inprogress_virtual_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Earned badges
    async fn get_earned_badges(&self) -> ConnectResult<Value>;
    /// Personal records
    async fn get_personal_record(&self) -> ConnectResult<Value>;

    // Workouts

    /// Workout library page
    async fn get_workouts(&self, start: i64, end: i64) -> ConnectResult<Value>;
    /// One workout
    async fn get_workout_by_id(&self, workout_id: i64) -> ConnectResult<Value>;
    /// Workout as a FIT file
    async fn download_workout(&self, workout_id: i64) -> ConnectResult<Vec<u8>>;

    // Activities

    /// One page of the activity list, newest first
    async fn get_activities(&self, start: i64, limit: i64) -> ConnectResult<Value>;
    /// Every activity between two dates
    async fn get_activities_by_date(
        &self,
        startdate: &str,
        enddate: &str,
        activity_type: Option<&str>,
    ) -> ConnectResult<Value>;
    /// Activities of a day
    async fn get_activities_fordate(&self, fordate: &str) -> ConnectResult<Value>;
    /// Most recent activity
    async fn get_last_activity(&self) -> ConnectResult<Value>;
    /// Activity summary
    async fn get_activity(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Lap splits
    async fn get_activity_splits(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Typed splits
    async fn get_activity_typed_splits(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Split summaries
    async fn get_activity_split_summaries(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Weather during the activity
    async fn get_activity_weather(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Time in heart rate zones
    async fn get_activity_hr_in_timezones(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Gear used
    async fn get_activity_gear(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Strength training sets
    async fn get_activity_exercise_sets(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Chart and polyline details
    async fn get_activity_details(&self, activity_id: i64, maxchart: i64, maxpoly: i64) -> ConnectResult<Value>;
    /// Activity type catalogue
    async fn get_activity_types(&self) -> ConnectResult<Value>;
    /// Activity file in the format with the given numeric code
    async fn download_activity(&self, activity_id: i64, dl_fmt: i64) -> ConnectResult<Vec<u8>>;
    /// Upload a `.fit`, `.gpx` or `.tcx` file from disk
    async fn upload_activity(&self, activity_path: &str) -> ConnectResult<Value>;
    /// Delete an activity
    async fn delete_activity(&self, activity_id: i64) -> ConnectResult<Value>;
    /// Rename an activity
    async fn set_activity_name(&self, activity_id: i64, title: &str) -> ConnectResult<Value>;
    /// Change the type of an activity
    async fn set_activity_type(
        &self,
        activity_id: i64,
        type_id: i64,
        type_key: &str,
        parent_type_id: i64,
    ) -> ConnectResult<Value>;
    /// Create an activity from its main attributes
    async fn create_manual_activity(&self, activity: &ManualActivity) -> ConnectResult<Value>;
    /// Create an activity from a raw payload
    async fn create_manual_activity_from_json(&self, payload: &Value) -> ConnectResult<Value>;

    // Other

    /// Run a GraphQL query document
    async fn query_garmin_graphql(&self, query: &Value) -> ConnectResult<Value>;
    /// End the session and drop its tokens
    async fn logout(&self) -> ConnectResult<()>;
}
