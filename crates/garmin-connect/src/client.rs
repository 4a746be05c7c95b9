// ABOUTME: Garmin Connect HTTP client implementing GarminApi over the authenticated transport
// ABOUTME: Holds the login profile and performs the composite reads (alarms, paging, chunking)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::path::Path;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDateTime};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::GarminApi;
use crate::auth::tokens::TokenPair;
use crate::config::ConnectConfig;
use crate::errors::{ConnectError, ConnectResult};
use crate::fit::encode_body_composition;
use crate::http_client::api_client;
use crate::time::{
    format_date, garmin_stamp, local_to_utc, parse_date, parse_local, precise_stamp,
};
use crate::transport::{Query, Transport};
use crate::types::{BloodPressureReading, BodyComposition, DownloadFormat, ManualActivity, Profile};

const SOCIAL_PROFILE: &str = "/userprofile-service/socialProfile";
const USER_SETTINGS: &str = "/userprofile-service/userprofile/user-settings";
const PROFILE_SETTINGS: &str = "/userprofile-service/userprofile/settings";

const DEVICES: &str = "/device-service/deviceregistration/devices";
const DEVICE_SERVICE: &str = "/device-service/deviceservice";
const PRIMARY_DEVICE: &str = "/web-gateway/device-info/primary-training-device";
const SOLAR: &str = "/web-gateway/solar";

const DAILY_SUMMARY: &str = "/usersummary-service/usersummary/daily";
const DAILY_STEPS: &str = "/usersummary-service/stats/steps/daily";
const HYDRATION_DAILY: &str = "/usersummary-service/usersummary/hydration/daily";
const HYDRATION_LOG: &str = "/usersummary-service/usersummary/hydration/log";
const WELLNESS: &str = "/wellness-service/wellness";
const RHR: &str = "/userstats-service/wellness/daily";
const HRV: &str = "/hrv-service/hrv";
const METRICS: &str = "/metrics-service/metrics";
const FITNESS_AGE: &str = "/fitnessage-service/fitnessage";
const FITNESS_STATS: &str = "/fitnessstats-service/activity";

const WEIGHT: &str = "/weight-service";
const BLOOD_PRESSURE: &str = "/bloodpressure-service/bloodpressure";
const MENSTRUAL: &str = "/periodichealth-service/menstrualcycle";

const GEAR: &str = "/gear-service/gear";
const GOALS: &str = "/goal-service/goal/goals";
const BADGES_EARNED: &str = "/badge-service/badge/earned";
const ADHOC_CHALLENGES: &str = "/adhocchallenge-service/adHocChallenge/historical";
const BADGE_CHALLENGES: &str = "/badgechallenge-service/badgeChallenge";
const VIRTUAL_CHALLENGES: &str = "/badgechallenge-service/virtualChallenge/inProgress";
const PERSONAL_RECORDS: &str = "/personalrecord-service/personalrecord/prs";

const WORKOUTS: &str = "/workout-service";
const ACTIVITY_SEARCH: &str = "/activitylist-service/activities/search/activities";
const ACTIVITY_LIST: &str = "/activitylist-service/activities";
const ACTIVITY: &str = "/activity-service/activity";
const ACTIVITIES_FOR_DATE: &str = "/mobile-gateway/heartRate/forDate";
const UPLOAD: &str = "/upload-service/upload";
const GRAPHQL: &str = "/graphql-gateway/graphql";

const ACTIVITY_PAGE_SIZE: i64 = 20;
const STEPS_CHUNK_DAYS: u64 = 28;
const UPLOAD_FORMATS: [&str; 3] = ["fit", "gpx", "tcx"];

/// Authenticated Garmin Connect account
pub struct Garmin {
    transport: Transport,
    profile: RwLock<Option<Profile>>,
}

impl Garmin {
    /// Client without a session
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: ConnectConfig) -> ConnectResult<Self> {
        let http = api_client(&config)?;
        Ok(Self {
            transport: Transport::new(http, config),
            profile: RwLock::new(None),
        })
    }

    /// Log in with credentials (or the token store) and capture the profile
    ///
    /// # Errors
    ///
    /// Returns an authentication error when login fails, or the error of
    /// the profile request
    pub async fn login(&self, email: &str, password: &str) -> ConnectResult<()> {
        self.transport.auth().login(email, password).await?;
        self.load_profile().await
    }

    /// Start a session from existing tokens
    ///
    /// # Errors
    ///
    /// Returns the error of the profile request
    pub async fn resume(&self, tokens: TokenPair) -> ConnectResult<()> {
        self.transport.auth().install(tokens).await;
        self.load_profile().await
    }

    /// Profile captured at login
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::NotAuthenticated`] before login
    pub async fn profile(&self) -> ConnectResult<Profile> {
        self.profile.read().await.clone().ok_or_else(|| {
            ConnectError::NotAuthenticated("log in before using the Garmin client".to_owned())
        })
    }

    async fn display_name(&self) -> ConnectResult<String> {
        Ok(self.profile().await?.display_name)
    }

    async fn load_profile(&self) -> ConnectResult<()> {
        let social = self.transport.get(SOCIAL_PROFILE, &[]).await?;
        let display_name = social
            .get("displayName")
            .and_then(Value::as_str)
            .ok_or_else(|| ConnectError::Parse("social profile has no displayName".to_owned()))?
            .to_owned();
        let settings = self.transport.get(USER_SETTINGS, &[]).await?;

        let profile = Profile {
            display_name,
            profile_id: social.get("profileId").and_then(Value::as_i64),
            full_name: social
                .get("fullName")
                .and_then(Value::as_str)
                .map(str::to_owned),
            unit_system: settings
                .pointer("/userData/measurementSystem")
                .and_then(Value::as_str)
                .map(str::to_owned),
        };
        info!("Garmin profile loaded for {}", profile.display_name);
        *self.profile.write().await = Some(profile);
        Ok(())
    }

    async fn get(&self, path: &str, query: Query<'_>) -> ConnectResult<Value> {
        self.transport.get(path, query).await
    }

    async fn wellness_for_user(&self, resource: &str, query: Query<'_>) -> ConnectResult<Value> {
        let display_name = self.display_name().await?;
        self.get(&format!("{WELLNESS}/{resource}/{display_name}"), query)
            .await
    }

    async fn score(
        &self,
        resource: &str,
        startdate: &str,
        enddate: Option<&str>,
        aggregation: &str,
    ) -> ConnectResult<Value> {
        match enddate {
            None => {
                self.get(
                    &format!("{METRICS}/{resource}"),
                    &[("calendarDate", startdate.to_owned())],
                )
                .await
            }
            Some(end) => {
                self.get(
                    &format!("{METRICS}/{resource}/stats"),
                    &[
                        ("startDate", startdate.to_owned()),
                        ("endDate", end.to_owned()),
                        ("aggregation", aggregation.to_owned()),
                    ],
                )
                .await
            }
        }
    }

    async fn badge_challenges(&self, path: &str, start: i64, limit: i64) -> ConnectResult<Value> {
        self.get(
            path,
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn activity_resource(&self, activity_id: i64, resource: &str) -> ConnectResult<Value> {
        self.get(&format!("{ACTIVITY}/{activity_id}/{resource}"), &[])
            .await
    }

    async fn post_weigh_in(
        &self,
        weight: f64,
        unit_key: &str,
        local: NaiveDateTime,
        gmt: NaiveDateTime,
    ) -> ConnectResult<Value> {
        let payload = json!({
            "dateTimestamp": garmin_stamp(local),
            "gmtTimestamp": garmin_stamp(gmt),
            "unitKey": unit_key,
            "sourceType": "MANUAL",
            "value": weight,
        });
        self.transport
            .send_json(Method::POST, &format!("{WEIGHT}/user-weight"), &payload)
            .await
    }
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn key_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl GarminApi for Garmin {
    async fn get_full_name(&self) -> ConnectResult<Value> {
        Ok(self.profile().await?.full_name.map_or(Value::Null, Value::String))
    }

    async fn get_unit_system(&self) -> ConnectResult<Value> {
        Ok(self
            .profile()
            .await?
            .unit_system
            .map_or(Value::Null, Value::String))
    }

    async fn get_user_profile(&self) -> ConnectResult<Value> {
        self.get(USER_SETTINGS, &[]).await
    }

    async fn get_userprofile_settings(&self) -> ConnectResult<Value> {
        self.get(PROFILE_SETTINGS, &[]).await
    }

    async fn get_devices(&self) -> ConnectResult<Value> {
        self.get(DEVICES, &[]).await
    }

    async fn get_device_last_used(&self) -> ConnectResult<Value> {
        self.get(&format!("{DEVICE_SERVICE}/mylastused"), &[]).await
    }

    async fn get_device_settings(&self, device_id: &str) -> ConnectResult<Value> {
        self.get(
            &format!("{DEVICE_SERVICE}/device-info/settings/{device_id}"),
            &[],
        )
        .await
    }

    async fn get_device_alarms(&self) -> ConnectResult<Value> {
        let devices = as_array(self.get_devices().await?);
        let mut alarms = Vec::new();
        for device in &devices {
            let Some(device_id) = device.get("deviceId").and_then(key_string) else {
                continue;
            };
            let settings = self.get_device_settings(&device_id).await?;
            if let Some(Value::Array(found)) = settings.get("alarms") {
                alarms.extend(found.iter().cloned());
            }
        }
        debug!("Collected {} alarms from {} devices", alarms.len(), devices.len());
        Ok(Value::Array(alarms))
    }

    async fn get_primary_training_device(&self) -> ConnectResult<Value> {
        self.get(PRIMARY_DEVICE, &[]).await
    }

    async fn get_device_solar_data(
        &self,
        device_id: &str,
        startdate: &str,
        enddate: Option<&str>,
    ) -> ConnectResult<Value> {
        let single_day = enddate.is_none();
        let end = enddate.unwrap_or(startdate);
        let response = self
            .get(
                &format!("{SOLAR}/{device_id}/{startdate}/{end}"),
                &[("singleDayView", single_day.to_string())],
            )
            .await?;
        Ok(response
            .get("deviceSolarInput")
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn get_stats(&self, cdate: &str) -> ConnectResult<Value> {
        self.get_user_summary(cdate).await
    }

    async fn get_user_summary(&self, cdate: &str) -> ConnectResult<Value> {
        let display_name = self.display_name().await?;
        let summary = self
            .get(
                &format!("{DAILY_SUMMARY}/{display_name}"),
                &[("calendarDate", cdate.to_owned())],
            )
            .await?;
        if summary.get("privacyProtected").and_then(Value::as_bool) == Some(true) {
            return Err(ConnectError::Authentication(
                "daily summary is privacy protected".to_owned(),
            ));
        }
        Ok(summary)
    }

    async fn get_stats_and_body(&self, cdate: &str) -> ConnectResult<Value> {
        let stats = self.get_stats(cdate).await?;
        let body = self.get_body_composition(cdate, None).await?;

        let mut merged = match stats {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(Value::Object(averages)) = body.get("totalAverage") {
            for (key, value) in averages {
                merged.insert(key.clone(), value.clone());
            }
        }
        Ok(Value::Object(merged))
    }

    async fn get_steps_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.wellness_for_user("dailySummaryChart", &[("date", cdate.to_owned())])
            .await
    }

    async fn get_daily_steps(&self, start: &str, end: &str) -> ConnectResult<Value> {
        let first = parse_date(start)?;
        let last = parse_date(end)?;
        if first > last {
            return Err(ConnectError::invalid_argument(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let mut steps = Vec::new();
        let mut current = first;
        loop {
            // Chunks near the end of the calendar are clamped to `last`
            let chunk_end = current
                .checked_add_days(Days::new(STEPS_CHUNK_DAYS - 1))
                .map_or(last, |date| date.min(last));
            let chunk = self
                .get(
                    &format!(
                        "{DAILY_STEPS}/{}/{}",
                        format_date(current),
                        format_date(chunk_end)
                    ),
                    &[],
                )
                .await?;
            steps.extend(as_array(chunk));

            if chunk_end == last {
                break;
            }
            current = chunk_end.checked_add_days(Days::new(1)).ok_or_else(|| {
                ConnectError::invalid_argument(format!("date range ending {end} is out of range"))
            })?;
        }
        Ok(Value::Array(steps))
    }

    async fn get_heart_rates(&self, cdate: &str) -> ConnectResult<Value> {
        self.wellness_for_user("dailyHeartRate", &[("date", cdate.to_owned())])
            .await
    }

    async fn get_rhr_day(&self, cdate: &str) -> ConnectResult<Value> {
        let display_name = self.display_name().await?;
        self.get(
            &format!("{RHR}/{display_name}"),
            &[
                ("fromDate", cdate.to_owned()),
                ("untilDate", cdate.to_owned()),
                ("metricId", "60".to_owned()),
            ],
        )
        .await
    }

    async fn get_hrv_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{HRV}/{cdate}"), &[]).await
    }

    async fn get_sleep_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.wellness_for_user(
            "dailySleepData",
            &[
                ("date", cdate.to_owned()),
                ("nonSleepBufferMinutes", "60".to_owned()),
            ],
        )
        .await
    }

    async fn get_stress_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/dailyStress/{cdate}"), &[]).await
    }

    async fn get_all_day_stress(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/dailyStress/{cdate}"), &[]).await
    }

    async fn get_body_battery(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.get(
            &format!("{WELLNESS}/bodyBattery/reports/daily"),
            &[
                ("startDate", startdate.to_owned()),
                ("endDate", enddate.unwrap_or(startdate).to_owned()),
            ],
        )
        .await
    }

    async fn get_body_battery_events(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/bodyBattery/events/{cdate}"), &[])
            .await
    }

    async fn get_hydration_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{HYDRATION_DAILY}/{cdate}"), &[]).await
    }

    async fn get_respiration_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/daily/respiration/{cdate}"), &[])
            .await
    }

    async fn get_spo2_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/daily/spo2/{cdate}"), &[]).await
    }

    async fn get_floors(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/floorsChartData/daily/{cdate}"), &[])
            .await
    }

    async fn get_intensity_minutes_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{WELLNESS}/daily/im/{cdate}"), &[]).await
    }

    async fn get_all_day_events(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(
            &format!("{WELLNESS}/dailyEvents"),
            &[("calendarDate", cdate.to_owned())],
        )
        .await
    }

    async fn get_daily_wellness_events_data(&self, startdate: &str) -> ConnectResult<Value> {
        self.get_all_day_events(startdate).await
    }

    async fn request_reload(&self, cdate: &str) -> ConnectResult<Value> {
        self.transport
            .send_empty(Method::POST, &format!("{WELLNESS}/epoch/request/{cdate}"))
            .await
    }

    async fn get_max_metrics(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{METRICS}/maxmet/daily/{cdate}/{cdate}"), &[])
            .await
    }

    async fn get_fitnessage_data(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{FITNESS_AGE}/{cdate}"), &[]).await
    }

    async fn get_training_readiness(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{METRICS}/trainingreadiness/{cdate}"), &[])
            .await
    }

    async fn get_training_status(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(&format!("{METRICS}/trainingstatus/aggregated/{cdate}"), &[])
            .await
    }

    async fn get_hill_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.score("hillscore", startdate, enddate, "daily").await
    }

    async fn get_endurance_score(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.score("endurancescore", startdate, enddate, "weekly")
            .await
    }

    async fn get_race_predictions(
        &self,
        startdate: Option<&str>,
        enddate: Option<&str>,
        prediction_type: Option<&str>,
    ) -> ConnectResult<Value> {
        let display_name = self.display_name().await?;
        match (startdate, enddate, prediction_type) {
            (None, None, None) => {
                self.get(
                    &format!("{METRICS}/racepredictions/latest/{display_name}"),
                    &[],
                )
                .await
            }
            (Some(start), Some(end), Some(kind)) => {
                if kind != "daily" && kind != "monthly" {
                    return Err(ConnectError::invalid_argument(format!(
                        "prediction type must be 'daily' or 'monthly', got '{kind}'"
                    )));
                }
                self.get(
                    &format!("{METRICS}/racepredictions/{kind}/{display_name}"),
                    &[
                        ("fromCalendarDate", start.to_owned()),
                        ("toCalendarDate", end.to_owned()),
                    ],
                )
                .await
            }
            _ => Err(ConnectError::invalid_argument(
                "You must either provide all parameters or no parameters",
            )),
        }
    }

    async fn get_progress_summary_between_dates(
        &self,
        startdate: &str,
        enddate: &str,
        metric: &str,
        groupbyactivities: bool,
    ) -> ConnectResult<Value> {
        self.get(
            FITNESS_STATS,
            &[
                ("aggregation", "lifetime".to_owned()),
                ("startDate", startdate.to_owned()),
                ("endDate", enddate.to_owned()),
                ("metric", metric.to_owned()),
                ("groupByActivityType", groupbyactivities.to_string()),
            ],
        )
        .await
    }

    async fn get_weigh_ins(&self, startdate: &str, enddate: &str) -> ConnectResult<Value> {
        self.get(
            &format!("{WEIGHT}/weight/range/{startdate}/{enddate}"),
            &[("includeAll", "true".to_owned())],
        )
        .await
    }

    async fn get_daily_weigh_ins(&self, cdate: &str) -> ConnectResult<Value> {
        self.get(
            &format!("{WEIGHT}/weight/dayview/{cdate}"),
            &[("includeAll", "true".to_owned())],
        )
        .await
    }

    async fn add_weigh_in(&self, weight: f64, unit_key: &str, timestamp: Option<&str>) -> ConnectResult<Value> {
        let local = parse_local(timestamp)?;
        let gmt = local_to_utc(local)?.naive_utc();
        self.post_weigh_in(weight, unit_key, local, gmt).await
    }

    async fn add_weigh_in_with_timestamps(
        &self,
        weight: f64,
        unit_key: &str,
        date_timestamp: Option<&str>,
        gmt_timestamp: Option<&str>,
    ) -> ConnectResult<Value> {
        let local = parse_local(date_timestamp)?;
        let gmt = match gmt_timestamp.filter(|g| !g.trim().is_empty()) {
            Some(given) => parse_local(Some(given))?,
            None => local_to_utc(local)?.naive_utc(),
        };
        self.post_weigh_in(weight, unit_key, local, gmt).await
    }

    async fn delete_weigh_ins(&self, cdate: &str, delete_all: bool) -> ConnectResult<Value> {
        let day = self.get_daily_weigh_ins(cdate).await?;
        let weigh_ins = day
            .get("dateWeightList")
            .cloned()
            .map(as_array)
            .unwrap_or_default();

        if weigh_ins.is_empty() {
            warn!("No weigh-ins found on {cdate}");
            return Ok(Value::Null);
        }
        if weigh_ins.len() > 1 && !delete_all {
            warn!(
                "{} weigh-ins found on {cdate}, pass delete_all to remove them all",
                weigh_ins.len()
            );
            return Ok(Value::Null);
        }

        for weigh_in in &weigh_ins {
            let Some(sample_pk) = weigh_in.get("samplePk").and_then(key_string) else {
                return Err(ConnectError::Parse(format!(
                    "weigh-in on {cdate} has no samplePk"
                )));
            };
            self.delete_weigh_in(&sample_pk, cdate).await?;
        }
        Ok(Value::from(weigh_ins.len()))
    }

    async fn delete_weigh_in(&self, weight_pk: &str, cdate: &str) -> ConnectResult<Value> {
        self.transport
            .delete(&format!("{WEIGHT}/weight/{cdate}/byversion/{weight_pk}"))
            .await
    }

    async fn get_body_composition(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        self.get(
            &format!("{WEIGHT}/weight/dateRange"),
            &[
                ("startDate", startdate.to_owned()),
                ("endDate", enddate.unwrap_or(startdate).to_owned()),
            ],
        )
        .await
    }

    async fn add_body_composition(&self, reading: &BodyComposition) -> ConnectResult<Value> {
        let at = local_to_utc(parse_local(reading.timestamp.as_deref())?)?;
        let file = encode_body_composition(at, reading)?;
        self.transport
            .upload(UPLOAD, "body_composition.fit", file)
            .await
    }

    async fn add_hydration_data(
        &self,
        value_in_ml: f64,
        timestamp: Option<&str>,
        cdate: Option<&str>,
    ) -> ConnectResult<Value> {
        let now = Local::now().naive_local();
        let (at, day) = match (timestamp, cdate) {
            (None, None) => (now, now.date()),
            (None, Some(day)) => {
                let date = parse_date(day)?;
                (date.and_time(now.time()), date)
            }
            (Some(stamp), None) => {
                let at = parse_local(Some(stamp))?;
                (at, at.date())
            }
            (Some(stamp), Some(day)) => (parse_local(Some(stamp))?, parse_date(day)?),
        };
        let profile = self.profile().await?;

        let payload = json!({
            "calendarDate": format_date(day),
            "timestampLocal": precise_stamp(at),
            "valueInML": value_in_ml,
            "userProfileId": profile.profile_id,
        });
        self.transport
            .send_json(Method::PUT, HYDRATION_LOG, &payload)
            .await
    }

    async fn get_blood_pressure(&self, startdate: &str, enddate: Option<&str>) -> ConnectResult<Value> {
        let end = enddate.unwrap_or(startdate);
        self.get(
            &format!("{BLOOD_PRESSURE}/range/{startdate}/{end}"),
            &[("includeAll", "true".to_owned())],
        )
        .await
    }

    async fn set_blood_pressure(&self, reading: &BloodPressureReading) -> ConnectResult<Value> {
        let local = parse_local(reading.timestamp.as_deref())?;
        let gmt = local_to_utc(local)?.naive_utc();
        let payload = json!({
            "measurementTimestampLocal": garmin_stamp(local),
            "measurementTimestampGMT": garmin_stamp(gmt),
            "systolic": reading.systolic,
            "diastolic": reading.diastolic,
            "pulse": reading.pulse,
            "sourceType": "MANUAL",
            "notes": reading.notes.clone().unwrap_or_default(),
        });
        self.transport
            .send_json(Method::POST, BLOOD_PRESSURE, &payload)
            .await
    }

    async fn delete_blood_pressure(&self, version: &str, cdate: &str) -> ConnectResult<Value> {
        self.transport
            .delete(&format!("{BLOOD_PRESSURE}/{cdate}/{version}"))
            .await
    }

    async fn get_menstrual_calendar_data(&self, startdate: &str, enddate: &str) -> ConnectResult<Value> {
        self.get(&format!("{MENSTRUAL}/calendar/{startdate}/{enddate}"), &[])
            .await
    }

    async fn get_menstrual_data_for_date(&self, fordate: &str) -> ConnectResult<Value> {
        self.get(&format!("{MENSTRUAL}/dayview/{fordate}"), &[])
            .await
    }

    async fn get_pregnancy_summary(&self) -> ConnectResult<Value> {
        self.get(&format!("{MENSTRUAL}/pregnancysnapshot"), &[]).await
    }

    async fn get_gear(&self, user_profile_number: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{GEAR}/filterGear"),
            &[("userProfilePk", user_profile_number.to_string())],
        )
        .await
    }

    async fn get_gear_defaults(&self, user_profile_number: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{GEAR}/user/{user_profile_number}/activityTypes"),
            &[],
        )
        .await
    }

    async fn get_gear_activities(&self, gear_uuid: &str, limit: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{ACTIVITY_LIST}/{gear_uuid}/gear"),
            &[("start", "0".to_owned()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn get_gear_stats(&self, gear_uuid: &str) -> ConnectResult<Value> {
        self.get(&format!("{GEAR}/stats/{gear_uuid}"), &[]).await
    }

    async fn set_gear_default(
        &self,
        activity_type: &str,
        gear_uuid: &str,
        default_gear: bool,
    ) -> ConnectResult<Value> {
        let base = format!("{GEAR}/{gear_uuid}/activityType/{activity_type}");
        if default_gear {
            self.transport
                .send_empty(Method::PUT, &format!("{base}/default/true"))
                .await
        } else {
            self.transport.delete(&base).await
        }
    }

    async fn get_goals(&self, status: &str, start: i64, limit: i64) -> ConnectResult<Value> {
        self.get(
            GOALS,
            &[
                ("status", status.to_owned()),
                ("start", start.to_string()),
                ("limit", limit.to_string()),
                ("sortOrder", "asc".to_owned()),
            ],
        )
        .await
    }

    async fn get_adhoc_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.badge_challenges(ADHOC_CHALLENGES, start, limit).await
    }

    async fn get_available_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.badge_challenges(&format!("{BADGE_CHALLENGES}/available"), start, limit)
            .await
    }

    async fn get_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.badge_challenges(&format!("{BADGE_CHALLENGES}/completed"), start, limit)
            .await
    }

    async fn get_non_completed_badge_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.badge_challenges(&format!("{BADGE_CHALLENGES}/non-completed"), start, limit)
            .await
    }

    async fn get_inprogress_virtual_challenges(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.badge_challenges(VIRTUAL_CHALLENGES, start, limit).await
    }

    async fn get_earned_badges(&self) -> ConnectResult<Value> {
        self.get(BADGES_EARNED, &[]).await
    }

    async fn get_personal_record(&self) -> ConnectResult<Value> {
        let display_name = self.display_name().await?;
        self.get(&format!("{PERSONAL_RECORDS}/{display_name}"), &[])
            .await
    }

    async fn get_workouts(&self, start: i64, end: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{WORKOUTS}/workouts"),
            &[("start", start.to_string()), ("limit", end.to_string())],
        )
        .await
    }

    async fn get_workout_by_id(&self, workout_id: i64) -> ConnectResult<Value> {
        self.get(&format!("{WORKOUTS}/workout/{workout_id}"), &[])
            .await
    }

    async fn download_workout(&self, workout_id: i64) -> ConnectResult<Vec<u8>> {
        self.transport
            .download(&format!("{WORKOUTS}/workout/FIT/{workout_id}"))
            .await
    }

    async fn get_activities(&self, start: i64, limit: i64) -> ConnectResult<Value> {
        self.get(
            ACTIVITY_SEARCH,
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn get_activities_by_date(
        &self,
        startdate: &str,
        enddate: &str,
        activity_type: Option<&str>,
    ) -> ConnectResult<Value> {
        let mut activities = Vec::new();
        let mut start = 0;
        loop {
            let mut query = vec![
                ("startDate", startdate.to_owned()),
                ("endDate", enddate.to_owned()),
                ("start", start.to_string()),
                ("limit", ACTIVITY_PAGE_SIZE.to_string()),
            ];
            if let Some(kind) = activity_type {
                query.push(("activityType", kind.to_owned()));
            }

            let page = as_array(self.get(ACTIVITY_SEARCH, &query).await?);
            if page.is_empty() {
                break;
            }
            activities.extend(page);
            start += ACTIVITY_PAGE_SIZE;
        }
        debug!("Found {} activities between {startdate} and {enddate}", activities.len());
        Ok(Value::Array(activities))
    }

    async fn get_activities_fordate(&self, fordate: &str) -> ConnectResult<Value> {
        self.get(&format!("{ACTIVITIES_FOR_DATE}/{fordate}"), &[])
            .await
    }

    async fn get_last_activity(&self) -> ConnectResult<Value> {
        let latest = as_array(self.get_activities(0, 1).await?);
        Ok(latest.into_iter().next().unwrap_or(Value::Null))
    }

    async fn get_activity(&self, activity_id: i64) -> ConnectResult<Value> {
        self.get(&format!("{ACTIVITY}/{activity_id}"), &[]).await
    }

    async fn get_activity_splits(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "splits").await
    }

    async fn get_activity_typed_splits(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "typedsplits").await
    }

    async fn get_activity_split_summaries(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "split_summaries").await
    }

    async fn get_activity_weather(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "weather").await
    }

    async fn get_activity_hr_in_timezones(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "hrTimeInZones").await
    }

    async fn get_activity_gear(&self, activity_id: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{GEAR}/filterGear"),
            &[("activityId", activity_id.to_string())],
        )
        .await
    }

    async fn get_activity_exercise_sets(&self, activity_id: i64) -> ConnectResult<Value> {
        self.activity_resource(activity_id, "exerciseSets").await
    }

    async fn get_activity_details(&self, activity_id: i64, maxchart: i64, maxpoly: i64) -> ConnectResult<Value> {
        self.get(
            &format!("{ACTIVITY}/{activity_id}/details"),
            &[
                ("maxChartSize", maxchart.to_string()),
                ("maxPolylineSize", maxpoly.to_string()),
            ],
        )
        .await
    }

    async fn get_activity_types(&self) -> ConnectResult<Value> {
        self.get(&format!("{ACTIVITY}/activityTypes"), &[]).await
    }

    async fn download_activity(&self, activity_id: i64, dl_fmt: i64) -> ConnectResult<Vec<u8>> {
        let format = DownloadFormat::from_code(dl_fmt)?;
        debug!("Downloading activity {activity_id} as {format}");
        self.transport.download(&format.path(activity_id)).await
    }

    async fn upload_activity(&self, activity_path: &str) -> ConnectResult<Value> {
        let path = Path::new(activity_path);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !UPLOAD_FORMATS.contains(&extension.as_str()) {
            return Err(ConnectError::invalid_argument(format!(
                "Invalid file format '{extension}'. Allowed formats: {}",
                UPLOAD_FORMATS.join(", ")
            )));
        }
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("activity")
            .to_owned();

        let bytes = fs::read(path).await?;
        self.transport.upload(UPLOAD, &file_name, bytes).await
    }

    async fn delete_activity(&self, activity_id: i64) -> ConnectResult<Value> {
        self.transport
            .delete(&format!("{ACTIVITY}/{activity_id}"))
            .await
    }

    async fn set_activity_name(&self, activity_id: i64, title: &str) -> ConnectResult<Value> {
        let payload = json!({ "activityId": activity_id, "activityName": title });
        self.transport
            .send_json(Method::PUT, &format!("{ACTIVITY}/{activity_id}"), &payload)
            .await
    }

    async fn set_activity_type(
        &self,
        activity_id: i64,
        type_id: i64,
        type_key: &str,
        parent_type_id: i64,
    ) -> ConnectResult<Value> {
        let payload = json!({
            "activityId": activity_id,
            "activityTypeDTO": {
                "typeId": type_id,
                "typeKey": type_key,
                "parentTypeId": parent_type_id,
            },
        });
        self.transport
            .send_json(Method::PUT, &format!("{ACTIVITY}/{activity_id}"), &payload)
            .await
    }

    async fn create_manual_activity(&self, activity: &ManualActivity) -> ConnectResult<Value> {
        let duration_secs = activity.duration_secs()?;
        let payload = json!({
            "activityTypeDTO": { "typeKey": activity.type_key },
            "accessControlRuleDTO": { "typeId": 2, "typeKey": "private" },
            "timeZoneUnitDTO": { "unitKey": activity.time_zone },
            "activityName": activity.activity_name,
            "metadataDTO": { "autoCalcCalories": true },
            "summaryDTO": {
                "startTimeLocal": activity.start_datetime,
                "distance": activity.distance_km * 1000.0,
                "duration": duration_secs,
            },
        });
        self.create_manual_activity_from_json(&payload).await
    }

    async fn create_manual_activity_from_json(&self, payload: &Value) -> ConnectResult<Value> {
        self.transport.send_json(Method::POST, ACTIVITY, payload).await
    }

    async fn query_garmin_graphql(&self, query: &Value) -> ConnectResult<Value> {
        self.transport.send_json(Method::POST, GRAPHQL, query).await
    }

    async fn logout(&self) -> ConnectResult<()> {
        self.transport.auth().clear().await;
        *self.profile.write().await = None;
        info!("Garmin session closed");
        Ok(())
    }
}
