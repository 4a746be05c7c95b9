// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides an in-memory GarminApi stub with scripted replies and a call log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines
)]
//! Shared test utilities for `garmin_mcp_server`

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use garmin_connect::{
    BloodPressureReading, BodyComposition, ConnectError, ConnectResult, GarminApi, ManualActivity,
};
use garmin_mcp_server::config::ServerConfig;
use garmin_mcp_server::mcp::ServerResources;
use garmin_mcp_server::session::GarminSession;
use garmin_mcp_server::tools::ToolExecutionContext;
use serde_json::{json, Value};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub args: Vec<Value>,
}

enum Scripted {
    Reply(Value),
    Fail(String),
}

/// In-memory Garmin account
///
/// Unscripted methods answer `{"method": <name>}` so every call yields a
/// distinct, non-empty value.
#[derive(Default)]
pub struct StubGarmin {
    calls: Mutex<Vec<Call>>,
    scripted: Mutex<HashMap<&'static str, Scripted>>,
    failing: Mutex<Option<String>>,
}

impl StubGarmin {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `method` return `value`
    pub fn reply(&self, method: &'static str, value: Value) {
        self.scripted
            .lock()
            .unwrap()
            .insert(method, Scripted::Reply(value));
    }

    /// Make `method` fail with `message`
    pub fn fail(&self, method: &'static str, message: &str) {
        self.scripted
            .lock()
            .unwrap()
            .insert(method, Scripted::Fail(message.to_owned()));
    }

    /// Make every method fail with `message`
    pub fn fail_all(&self, message: &str) {
        *self.failing.lock().unwrap() = Some(message.to_owned());
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The only call made so far
    pub fn single_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].clone()
    }

    fn answer(&self, method: &'static str, args: Vec<Value>) -> ConnectResult<Value> {
        self.calls.lock().unwrap().push(Call { method, args });
        if let Some(message) = self.failing.lock().unwrap().clone() {
            return Err(ConnectError::InvalidArgument(message));
        }
        match self.scripted.lock().unwrap().get(method) {
            Some(Scripted::Reply(value)) => Ok(value.clone()),
            Some(Scripted::Fail(message)) => Err(ConnectError::InvalidArgument(message.clone())),
            None => Ok(json!({ "method": method })),
        }
    }

    fn answer_bytes(&self, method: &'static str, args: Vec<Value>) -> ConnectResult<Vec<u8>> {
        self.answer(method, args).map(|value| match value {
            Value::String(body) => body.into_bytes(),
            other => other.to_string().into_bytes(),
        })
    }
}

#[async_trait]
impl GarminApi for StubGarmin {
    async fn get_full_name(&self) -> ConnectResult<Value> {
        self.answer("get_full_name", vec![])
    }

    async fn get_unit_system(&self) -> ConnectResult<Value> {
        self.answer("get_unit_system", vec![])
    }

    async fn get_user_profile(&self) -> ConnectResult<Value> {
        self.answer("get_user_profile", vec![])
    }

    async fn get_userprofile_settings(&self) -> ConnectResult<Value> {
        self.answer("get_userprofile_settings", vec![])
    }

    async fn get_devices(&self) -> ConnectResult<Value> {
        self.answer("get_devices", vec![])
    }

    async fn get_device_last_used(&self) -> ConnectResult<Value> {
        self.answer("get_device_last_used", vec![])
    }

    async fn get_device_settings(&self, device_id: &str) -> ConnectResult<Value> {
        self.answer("get_device_settings", vec![json!(device_id)])
    }

    async fn get_device_alarms(&self) -> ConnectResult<Value> {
        self.answer("get_device_alarms", vec![])
    }

    async fn get_primary_training_device(&self) -> ConnectResult<Value> {
        self.answer("get_primary_training_device", vec![])
    }

    async fn get_device_solar_data(&self, device_id: &str, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_device_solar_data", vec![json!(device_id), json!(startdate), json!(enddate)])
    }

    async fn get_stats(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_stats", vec![json!(cdate)])
    }

    async fn get_user_summary(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_user_summary", vec![json!(cdate)])
    }

    async fn get_stats_and_body(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_stats_and_body", vec![json!(cdate)])
    }

    async fn get_steps_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_steps_data", vec![json!(cdate)])
    }

    async fn get_daily_steps(&self, start: &str, end: &str) -> ConnectResult<Value> {
        self.answer("get_daily_steps", vec![json!(start), json!(end)])
    }

    async fn get_heart_rates(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_heart_rates", vec![json!(cdate)])
    }

    async fn get_rhr_day(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_rhr_day", vec![json!(cdate)])
    }

    async fn get_hrv_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_hrv_data", vec![json!(cdate)])
    }

    async fn get_sleep_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_sleep_data", vec![json!(cdate)])
    }

    async fn get_stress_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_stress_data", vec![json!(cdate)])
    }

    async fn get_all_day_stress(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_all_day_stress", vec![json!(cdate)])
    }

    async fn get_body_battery(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_body_battery", vec![json!(startdate), json!(enddate)])
    }

    async fn get_body_battery_events(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_body_battery_events", vec![json!(cdate)])
    }

    async fn get_hydration_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_hydration_data", vec![json!(cdate)])
    }

    async fn get_respiration_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_respiration_data", vec![json!(cdate)])
    }

    async fn get_spo2_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_spo2_data", vec![json!(cdate)])
    }

    async fn get_floors(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_floors", vec![json!(cdate)])
    }

    async fn get_intensity_minutes_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_intensity_minutes_data", vec![json!(cdate)])
    }

    async fn get_all_day_events(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_all_day_events", vec![json!(cdate)])
    }

    async fn get_daily_wellness_events_data(&self, startdate: &str) -> ConnectResult<Value> {
        self.answer("get_daily_wellness_events_data", vec![json!(startdate)])
    }

    async fn request_reload(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("request_reload", vec![json!(cdate)])
    }

    async fn get_max_metrics(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_max_metrics", vec![json!(cdate)])
    }

    async fn get_fitnessage_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_fitnessage_data", vec![json!(cdate)])
    }

    async fn get_training_readiness(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_training_readiness", vec![json!(cdate)])
    }

    async fn get_training_status(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_training_status", vec![json!(cdate)])
    }

    async fn get_hill_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_hill_score", vec![json!(startdate), json!(enddate)])
    }

    async fn get_endurance_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_endurance_score", vec![json!(startdate), json!(enddate)])
    }

    async fn get_race_predictions(&self, startdate: Option<&str>, enddate: Option<&str>, prediction_type: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_race_predictions", vec![json!(startdate), json!(enddate), json!(prediction_type)])
    }

    async fn get_progress_summary_between_dates(&self, startdate: &str, enddate: &str, metric: &str, groupbyactivities: bool) -> ConnectResult<Value> {
        self.answer("get_progress_summary_between_dates", vec![json!(startdate), json!(enddate), json!(metric), json!(groupbyactivities)])
    }

    async fn get_weigh_ins(&self, startdate: &str, enddate: &str) -> ConnectResult<Value> {
        self.answer("get_weigh_ins", vec![json!(startdate), json!(enddate)])
    }

    async fn get_daily_weigh_ins(&self, cdate: &str) -> ConnectResult<Value> {
        self.answer("get_daily_weigh_ins", vec![json!(cdate)])
    }

    async fn add_weigh_in(&self, weight: f64, unit_key: &str, timestamp: Option<&str>) -> ConnectResult<Value> {
        self.answer("add_weigh_in", vec![json!(weight), json!(unit_key), json!(timestamp)])
    }

    async fn add_weigh_in_with_timestamps(&self, weight: f64, unit_key: &str, date_timestamp: Option<&str>, gmt_timestamp: Option<&str>) -> ConnectResult<Value> {
        self.answer("add_weigh_in_with_timestamps", vec![json!(weight), json!(unit_key), json!(date_timestamp), json!(gmt_timestamp)])
    }

    async fn delete_weigh_ins(&self, cdate: &str, delete_all: bool) -> ConnectResult<Value> {
        self.answer("delete_weigh_ins", vec![json!(cdate), json!(delete_all)])
    }

    async fn delete_weigh_in(&self, weight_pk: &str, cdate: &str) -> ConnectResult<Value> {
        self.answer("delete_weigh_in", vec![json!(weight_pk), json!(cdate)])
    }

    async fn get_body_composition(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_body_composition", vec![json!(startdate), json!(enddate)])
    }

    async fn add_body_composition(&self, reading: &BodyComposition) -> ConnectResult<Value> {
        self.answer("add_body_composition", vec![serde_json::to_value(reading).unwrap()])
    }

    async fn add_hydration_data(&self, value_in_ml: f64, timestamp: Option<&str>, cdate: Option<&str>) -> ConnectResult<Value> {
        self.answer("add_hydration_data", vec![json!(value_in_ml), json!(timestamp), json!(cdate)])
    }

    async fn get_blood_pressure(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_blood_pressure", vec![json!(startdate), json!(enddate)])
    }

    async fn set_blood_pressure(&self, reading: &BloodPressureReading) -> ConnectResult<Value> {
        self.answer("set_blood_pressure", vec![json!([reading.systolic, reading.diastolic, reading.pulse, reading.timestamp, reading.notes])])
    }

    async fn delete_blood_pressure(&self, version: &str, cdate: &str) -> ConnectResult<Value> {
        self.answer("delete_blood_pressure", vec![json!(version), json!(cdate)])
    }

    async fn get_menstrual_calendar_data(&self, startdate: &str, enddate: &str) -> ConnectResult<Value> {
        self.answer("get_menstrual_calendar_data", vec![json!(startdate), json!(enddate)])
    }

    async fn get_menstrual_data_for_date(&self, fordate: &str) -> ConnectResult<Value> {
        self.answer("get_menstrual_data_for_date", vec![json!(fordate)])
    }

    async fn get_pregnancy_summary(&self) -> ConnectResult<Value> {
        self.answer("get_pregnancy_summary", vec![])
    }

    async fn get_gear(&self, user_profile_number: i64) -> ConnectResult<Value> {
        self.answer("get_gear", vec![json!(user_profile_number)])
    }

    async fn get_gear_defaults(&self, user_profile_number: i64) -> ConnectResult<Value> {
        self.answer("get_gear_defaults", vec![json!(user_profile_number)])
    }

    async fn get_gear_activities(&self, gear_uuid: &str, limit: i64) -> ConnectResult<Value> {
        self.answer("get_gear_activities", vec![json!(gear_uuid), json!(limit)])
    }

    async fn get_gear_stats(&self, gear_uuid: &str) -> ConnectResult<Value> {
        self.answer("get_gear_stats", vec![json!(gear_uuid)])
    }

    async fn set_gear_default(&self, activity_type: &str, gear_uuid: &str, default_gear: bool) -> ConnectResult<Value> {
        self.answer("set_gear_default", vec![json!(activity_type), json!(gear_uuid), json!(default_gear)])
    }

    async fn get_goals(&self, status: &str, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_goals", vec![json!(status), json!(start), json!(limit)])
    }

    async fn get_adhoc_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_adhoc_challenges", vec![json!(start), json!(limit)])
    }

    async fn get_available_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_available_badge_challenges", vec![json!(start), json!(limit)])
    }

    async fn get_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_badge_challenges", vec![json!(start), json!(limit)])
    }

    async fn get_non_completed_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_non_completed_badge_challenges", vec![json!(start), json!(limit)])
    }

    async fn get_inprogress_virtual_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_inprogress_virtual_challenges", vec![json!(start), json!(limit)])
    }

    async fn get_earned_badges(&self) -> ConnectResult<Value> {
        self.answer("get_earned_badges", vec![])
    }

    async fn get_personal_record(&self) -> ConnectResult<Value> {
        self.answer("get_personal_record", vec![])
    }

    async fn get_workouts(&self, start: i64, end: i64) -> ConnectResult<Value> {
        self.answer("get_workouts", vec![json!(start), json!(end)])
    }

    async fn get_workout_by_id(&self, workout_id: i64) -> ConnectResult<Value> {
        self.answer("get_workout_by_id", vec![json!(workout_id)])
    }

    async fn download_workout(&self, workout_id: i64) -> ConnectResult<Vec<u8>> {
        self.answer_bytes("download_workout", vec![json!(workout_id)])
    }

    async fn get_activities(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.answer("get_activities", vec![json!(start), json!(limit)])
    }

    async fn get_activities_by_date(&self, startdate: &str, enddate: &str, activity_type: Option<&str>) -> ConnectResult<Value> {
        self.answer("get_activities_by_date", vec![json!(startdate), json!(enddate), json!(activity_type)])
    }

    async fn get_activities_fordate(&self, fordate: &str) -> ConnectResult<Value> {
        self.answer("get_activities_fordate", vec![json!(fordate)])
    }

    async fn get_last_activity(&self) -> ConnectResult<Value> {
        self.answer("get_last_activity", vec![])
    }

    async fn get_activity(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity", vec![json!(activity_id)])
    }

    async fn get_activity_splits(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_splits", vec![json!(activity_id)])
    }

    async fn get_activity_typed_splits(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_typed_splits", vec![json!(activity_id)])
    }

    async fn get_activity_split_summaries(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_split_summaries", vec![json!(activity_id)])
    }

    async fn get_activity_weather(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_weather", vec![json!(activity_id)])
    }

    async fn get_activity_hr_in_timezones(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_hr_in_timezones", vec![json!(activity_id)])
    }

    async fn get_activity_gear(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_gear", vec![json!(activity_id)])
    }

    async fn get_activity_exercise_sets(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("get_activity_exercise_sets", vec![json!(activity_id)])
    }

    async fn get_activity_details(&self, activity_id: i64, maxchart: i64, maxpoly: i64) -> ConnectResult<Value> {
        self.answer("get_activity_details", vec![json!(activity_id), json!(maxchart), json!(maxpoly)])
    }

    async fn get_activity_types(&self) -> ConnectResult<Value> {
        self.answer("get_activity_types", vec![])
    }

    async fn download_activity(&self, activity_id: i64, dl_fmt: i64) -> ConnectResult<Vec<u8>> {
        self.answer_bytes("download_activity", vec![json!(activity_id), json!(dl_fmt)])
    }

    async fn upload_activity(&self, activity_path: &str) -> ConnectResult<Value> {
        self.answer("upload_activity", vec![json!(activity_path)])
    }

    async fn delete_activity(&self, activity_id: i64) -> ConnectResult<Value> {
        self.answer("delete_activity", vec![json!(activity_id)])
    }

    async fn set_activity_name(&self, activity_id: i64, title: &str) -> ConnectResult<Value> {
        self.answer("set_activity_name", vec![json!(activity_id), json!(title)])
    }

    async fn set_activity_type(&self, activity_id: i64, type_id: i64, type_key: &str, parent_type_id: i64) -> ConnectResult<Value> {
        self.answer("set_activity_type", vec![json!(activity_id), json!(type_id), json!(type_key), json!(parent_type_id)])
    }

    async fn create_manual_activity(&self, activity: &ManualActivity) -> ConnectResult<Value> {
        self.answer("create_manual_activity", vec![json!([activity.start_datetime, activity.time_zone, activity.type_key, activity.distance_km, activity.duration_min, activity.activity_name])])
    }

    async fn create_manual_activity_from_json(&self, payload: &Value) -> ConnectResult<Value> {
        self.answer("create_manual_activity_from_json", vec![payload.clone()])
    }

    async fn query_garmin_graphql(&self, query: &Value) -> ConnectResult<Value> {
        self.answer("query_garmin_graphql", vec![query.clone()])
    }

    async fn logout(&self) -> ConnectResult<()> {
        self.answer("logout", vec![]).map(|_| ())
    }
}

/// Server resources around an authenticated stub session
pub fn resources_with(stub: &Arc<StubGarmin>) -> Arc<ServerResources> {
    init_test_logging();
    let session = GarminSession::authenticated(Arc::clone(stub) as Arc<dyn GarminApi>);
    Arc::new(ServerResources::new(ServerConfig::default(), session))
}

/// Server resources whose startup login failed
pub fn resources_with_failed_login(reason: &str) -> Arc<ServerResources> {
    init_test_logging();
    let session = GarminSession::failed(StubGarmin::new() as Arc<dyn GarminApi>, reason);
    Arc::new(ServerResources::new(ServerConfig::default(), session))
}

/// Tool execution context over the given resources
pub fn context(resources: &Arc<ServerResources>) -> ToolExecutionContext {
    ToolExecutionContext::new(Arc::clone(resources)).with_request_id(json!(1))
}
