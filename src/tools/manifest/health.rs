// ABOUTME: Daily health and performance tools: stats, heart rate, sleep, stress, body battery, scores
// ABOUTME: Daily reads take a single `cdate`; range reads take `startdate` and an optional `enddate`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use crate::errors::AppError;
use crate::tools::args::ParamSpec;
use crate::tools::dispatch::Endpoint;

use super::{CDATE, OPT_ENDDATE, STARTDATE};

/// Daily health reads
pub const CATEGORY: &str = "health";

/// Training and fitness scores
pub const PERFORMANCE_CATEGORY: &str = "performance";

/// Daily wellness and health metrics
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_stats",
            "Get user activity summary for a specific date",
            "retrieving stats",
            vec![CDATE],
            forward!(|api, args| api.get_stats(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_user_summary",
            "Get user activity summary for a specific date",
            "retrieving user summary",
            vec![CDATE],
            forward!(|api, args| api.get_user_summary(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_steps_data",
            "Get steps data for a specific date",
            "retrieving steps data",
            vec![CDATE],
            forward!(|api, args| api.get_steps_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_daily_steps",
            "Get steps data between two dates",
            "retrieving daily steps",
            vec![
                ParamSpec::string("start", "Start date in YYYY-MM-DD format"),
                ParamSpec::string("end", "End date in YYYY-MM-DD format"),
            ],
            forward!(|api, args| api.get_daily_steps(args.str("start")?, args.str("end")?)),
        ),
        Endpoint::read(
            "get_heart_rates",
            "Get heart rate data for a specific date",
            "retrieving heart rates",
            vec![CDATE],
            forward!(|api, args| api.get_heart_rates(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_rhr_day",
            "Get resting heart rate data for a specific date",
            "retrieving resting heart rate",
            vec![CDATE],
            forward!(|api, args| api.get_rhr_day(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_hrv_data",
            "Get Heart Rate Variability (HRV) data for a specific date",
            "retrieving HRV data",
            vec![CDATE],
            forward!(|api, args| api.get_hrv_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_sleep_data",
            "Get sleep data for a specific date",
            "retrieving sleep data",
            vec![CDATE],
            forward!(|api, args| api.get_sleep_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_stress_data",
            "Get stress data for a specific date",
            "retrieving stress data",
            vec![CDATE],
            forward!(|api, args| api.get_stress_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_all_day_stress",
            "Get all day stress data for a specific date",
            "retrieving all day stress data",
            vec![CDATE],
            forward!(|api, args| api.get_all_day_stress(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_body_battery",
            "Get body battery values between dates",
            "retrieving body battery data",
            vec![STARTDATE, OPT_ENDDATE],
            forward!(|api, args| api
                .get_body_battery(args.str("startdate")?, args.opt_str("enddate"))),
        ),
        Endpoint::read(
            "get_body_battery_events",
            "Get body battery events for a specific date",
            "retrieving body battery events",
            vec![CDATE],
            forward!(|api, args| api.get_body_battery_events(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_body_composition",
            "Get body composition data between dates",
            "retrieving body composition",
            vec![STARTDATE, OPT_ENDDATE],
            forward!(|api, args| api
                .get_body_composition(args.str("startdate")?, args.opt_str("enddate"))),
        ),
        Endpoint::read(
            "get_stats_and_body",
            "Get activity data and body composition for a specific date",
            "retrieving stats and body data",
            vec![CDATE],
            forward!(|api, args| api.get_stats_and_body(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_hydration_data",
            "Get hydration data for a specific date",
            "retrieving hydration data",
            vec![CDATE],
            forward!(|api, args| api.get_hydration_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_respiration_data",
            "Get respiration data for a specific date",
            "retrieving respiration data",
            vec![CDATE],
            forward!(|api, args| api.get_respiration_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_spo2_data",
            "Get SpO2 data for a specific date",
            "retrieving SpO2 data",
            vec![CDATE],
            forward!(|api, args| api.get_spo2_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_floors",
            "Get floors data for a specific date",
            "retrieving floors data",
            vec![CDATE],
            forward!(|api, args| api.get_floors(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_intensity_minutes_data",
            "Get Intensity Minutes data for a specific date",
            "retrieving intensity minutes data",
            vec![CDATE],
            forward!(|api, args| api.get_intensity_minutes_data(args.str("cdate")?)),
        ),
    ]
}

/// Fitness scores and training state
#[must_use]
pub fn performance_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_max_metrics",
            "Get max metric data (like vo2MaxValue and fitnessAge) for a specific date",
            "retrieving max metrics",
            vec![CDATE],
            forward!(|api, args| api.get_max_metrics(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_fitnessage_data",
            "Get Fitness Age data for a specific date",
            "retrieving fitness age data",
            vec![CDATE],
            forward!(|api, args| api.get_fitnessage_data(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_training_readiness",
            "Get training readiness data for a specific date",
            "retrieving training readiness",
            vec![CDATE],
            forward!(|api, args| api.get_training_readiness(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_training_status",
            "Get training status data for a specific date",
            "retrieving training status",
            vec![CDATE],
            forward!(|api, args| api.get_training_status(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_hill_score",
            "Get hill score data between dates",
            "retrieving hill score",
            vec![STARTDATE, OPT_ENDDATE],
            forward!(|api, args| api
                .get_hill_score(args.str("startdate")?, args.opt_str("enddate"))),
        ),
        Endpoint::read(
            "get_endurance_score",
            "Get endurance score data between dates",
            "retrieving endurance score",
            vec![STARTDATE, OPT_ENDDATE],
            forward!(|api, args| api
                .get_endurance_score(args.str("startdate")?, args.opt_str("enddate"))),
        ),
    ]
}
