// ABOUTME: Workout library, race prediction and progress summary tools
// ABOUTME: Workout downloads report success without returning the file body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde_json::Value;

use crate::errors::AppError;
use crate::tools::args::{ParamDefault, ParamSpec};
use crate::tools::dispatch::{Endpoint, Outcome};
use crate::tools::traits::ToolCapabilities;

use super::{ENDDATE, STARTDATE};

/// Workouts and training
pub const CATEGORY: &str = "workouts";

#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_workouts",
            "Get workouts from start to end",
            "retrieving workouts",
            vec![
                ParamSpec::integer("start", "Starting index (default: 0)").or(ParamDefault::Int(0)),
                ParamSpec::integer("end", "Ending index (default: 100)").or(ParamDefault::Int(100)),
            ],
            forward!(|api, args| api.get_workouts(args.int("start")?, args.int("end")?)),
        ),
        Endpoint::read(
            "get_workout_by_id",
            "Get workout by ID",
            "retrieving workout",
            vec![ParamSpec::integer("workout_id", "ID of the workout to retrieve")],
            forward!(|api, args| api.get_workout_by_id(args.int("workout_id")?)),
        ),
        Endpoint::read(
            "download_workout",
            "Download workout by ID",
            "downloading workout",
            vec![ParamSpec::integer("workout_id", "ID of the workout to download")],
            |api, args| {
                Box::pin(async move {
                    let bytes = api.download_workout(args.int("workout_id")?).await?;
                    Ok::<_, AppError>(Value::from(bytes.len()))
                })
            },
        )
        .with_outcome(Outcome::Acknowledge(|args| {
            format!("Successfully downloaded workout {}", args.display("workout_id"))
        }))
        .with_capabilities(ToolCapabilities::READ.union(ToolCapabilities::TRANSFERS_FILES)),
        Endpoint::read(
            "get_race_predictions",
            "Get race predictions for 5k, 10k, half marathon and marathon",
            "retrieving race predictions",
            vec![
                ParamSpec::string("startdate", "Start date in YYYY-MM-DD format (optional)")
                    .optional(),
                ParamSpec::string("enddate", "End date in YYYY-MM-DD format (optional)")
                    .optional(),
                ParamSpec::string("_type", "Type of prediction (daily or monthly) (optional)")
                    .optional(),
            ],
            forward!(|api, args| api.get_race_predictions(
                args.opt_str("startdate"),
                args.opt_str("enddate"),
                args.opt_str("_type"),
            )),
        ),
        Endpoint::read(
            "get_progress_summary_between_dates",
            "Get progress summary data between specific dates",
            "retrieving progress summary",
            vec![
                STARTDATE,
                ENDDATE,
                ParamSpec::string(
                    "metric",
                    "Metric to calculate (elevationGain, duration, distance, movingDuration) (default: distance)",
                )
                .or(ParamDefault::Str("distance")),
                ParamSpec::boolean(
                    "groupbyactivities",
                    "Group summary by activity type (default: True)",
                )
                .or(ParamDefault::Bool(true)),
            ],
            forward!(|api, args| api.get_progress_summary_between_dates(
                args.str("startdate")?,
                args.str("enddate")?,
                args.str("metric")?,
                args.bool("groupbyactivities")?,
            )),
        ),
    ]
}
