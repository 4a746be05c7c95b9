// ABOUTME: Activity tools: listing and per-activity reads plus upload, download and edits
// ABOUTME: Listing and per-activity reads answer with a "No ... found" message when Garmin returns nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use garmin_connect::ManualActivity;
use serde_json::Value;

use crate::errors::AppError;
use crate::tools::args::{ParamDefault, ParamSpec, ToolArgs};
use crate::tools::dispatch::{Endpoint, Outcome};
use crate::tools::traits::ToolCapabilities;

/// Activity reads
pub const CATEGORY: &str = "activities";

/// Activity edits and file transfer
pub const MANAGEMENT_CATEGORY: &str = "activity_management";

/// Recent activities page size
const RECENT_ACTIVITY_LIMIT: i64 = 20;

const fn activity_id(description: &'static str) -> ParamSpec {
    ParamSpec::integer("activity_id", description)
}

fn by_date_empty(args: &ToolArgs) -> String {
    let base = format!(
        "No activities found between {} and {}",
        args.display("start_date"),
        args.display("end_date")
    );
    match args.opt_str("activity_type") {
        Some(activity_type) => format!("{base} for activity type '{activity_type}'"),
        None => base,
    }
}

/// Activity listing and per-activity reads
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_activities_by_date",
            "Get activities data between specified dates, optionally filtered by activity type",
            "retrieving activities by date",
            vec![
                ParamSpec::string("start_date", "Start date in YYYY-MM-DD format"),
                ParamSpec::string("end_date", "End date in YYYY-MM-DD format"),
                ParamSpec::string(
                    "activity_type",
                    "Optional activity type filter (e.g., cycling, running, swimming)",
                )
                .or(ParamDefault::Str("")),
            ],
            forward!(|api, args| api.get_activities_by_date(
                args.str("start_date")?,
                args.str("end_date")?,
                args.opt_str("activity_type"),
            )),
        )
        .when_empty(by_date_empty),
        Endpoint::read(
            "get_activities_fordate",
            "Get activities for a specific date",
            "retrieving activities for date",
            vec![ParamSpec::string("date", "Date in YYYY-MM-DD format")],
            forward!(|api, args| api.get_activities_fordate(args.str("date")?)),
        )
        .when_empty(|args| format!("No activities found for {}", args.display("date"))),
        Endpoint::read(
            "get_activity",
            "Get basic activity information",
            "retrieving activity",
            vec![activity_id("ID of the activity to retrieve")],
            forward!(|api, args| api.get_activity(args.int("activity_id")?)),
        )
        .when_empty(|args| format!("No activity found with ID {}", args.display("activity_id"))),
        Endpoint::read(
            "get_activity_splits",
            "Get splits for an activity",
            "retrieving activity splits",
            vec![activity_id("ID of the activity to retrieve splits for")],
            forward!(|api, args| api.get_activity_splits(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No splits found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_typed_splits",
            "Get typed splits for an activity",
            "retrieving activity typed splits",
            vec![activity_id("ID of the activity to retrieve typed splits for")],
            forward!(|api, args| api.get_activity_typed_splits(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No typed splits found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_split_summaries",
            "Get split summaries for an activity",
            "retrieving activity split summaries",
            vec![activity_id(
                "ID of the activity to retrieve split summaries for",
            )],
            forward!(|api, args| api.get_activity_split_summaries(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No split summaries found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_weather",
            "Get weather data for an activity",
            "retrieving activity weather data",
            vec![activity_id("ID of the activity to retrieve weather data for")],
            forward!(|api, args| api.get_activity_weather(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No weather data found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_hr_in_timezones",
            "Get heart rate data in different time zones for an activity",
            "retrieving activity heart rate time zone data",
            vec![activity_id(
                "ID of the activity to retrieve heart rate time zone data for",
            )],
            forward!(|api, args| api.get_activity_hr_in_timezones(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No heart rate time zone data found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_gear",
            "Get gear data used for an activity",
            "retrieving activity gear data",
            vec![activity_id("ID of the activity to retrieve gear data for")],
            forward!(|api, args| api.get_activity_gear(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No gear data found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_activity_exercise_sets",
            "Get exercise sets for strength training activities",
            "retrieving activity exercise sets",
            vec![activity_id("ID of the activity to retrieve exercise sets for")],
            forward!(|api, args| api.get_activity_exercise_sets(args.int("activity_id")?)),
        )
        .when_empty(|args| {
            format!(
                "No exercise sets found for activity with ID {}",
                args.display("activity_id")
            )
        }),
        Endpoint::read(
            "get_recent_activities",
            "Get recent activities",
            "retrieving recent activities",
            Vec::new(),
            forward!(|api, _| api.get_activities(0, RECENT_ACTIVITY_LIMIT)),
        )
        .when_empty(|_| "No recent activities found".to_owned()),
    ]
}

/// Activity edits, uploads and downloads
#[must_use]
pub fn management_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_last_activity",
            "Get the last activity",
            "retrieving last activity",
            Vec::new(),
            forward!(|api, _| api.get_last_activity()),
        ),
        Endpoint::read(
            "get_activity_details",
            "Get detailed activity information",
            "retrieving activity details",
            vec![
                activity_id("ID of the activity"),
                ParamSpec::integer("maxchart", "Maximum chart data points (default: 2000)")
                    .or(ParamDefault::Int(2000)),
                ParamSpec::integer("maxpoly", "Maximum polygon data points (default: 4000)")
                    .or(ParamDefault::Int(4000)),
            ],
            forward!(|api, args| api.get_activity_details(
                args.int("activity_id")?,
                args.int("maxchart")?,
                args.int("maxpoly")?,
            )),
        ),
        Endpoint::read(
            "get_activity_types",
            "Get available activity types",
            "retrieving activity types",
            Vec::new(),
            forward!(|api, _| api.get_activity_types()),
        ),
        Endpoint::read(
            "download_activity",
            "Download activity in requested format",
            "downloading activity",
            vec![
                activity_id("ID of the activity to download"),
                ParamSpec::integer("dl_fmt", "Download format (default: 2 for TCX)")
                    .or(ParamDefault::Int(2)),
            ],
            |api, args| {
                Box::pin(async move {
                    let bytes = api
                        .download_activity(args.int("activity_id")?, args.int("dl_fmt")?)
                        .await?;
                    Ok::<_, AppError>(Value::from(bytes.len()))
                })
            },
        )
        .with_outcome(Outcome::Acknowledge(|args| {
            format!(
                "Successfully downloaded activity {}",
                args.display("activity_id")
            )
        }))
        .with_capabilities(ToolCapabilities::READ.union(ToolCapabilities::TRANSFERS_FILES)),
        Endpoint::write(
            "upload_activity",
            "Upload activity in FIT format from file",
            "uploading activity",
            vec![ParamSpec::string("activity_path", "Path to the activity file")],
            Outcome::Confirm("Successfully uploaded activity"),
            forward!(|api, args| api.upload_activity(args.str("activity_path")?)),
        )
        .with_capabilities(ToolCapabilities::WRITE.union(ToolCapabilities::TRANSFERS_FILES)),
        Endpoint::write(
            "delete_activity",
            "Delete activity with specified ID",
            "deleting activity",
            vec![activity_id("ID of the activity to delete")],
            Outcome::Acknowledge(|args| {
                format!("Successfully deleted activity {}", args.display("activity_id"))
            }),
            forward!(|api, args| api.delete_activity(args.int("activity_id")?)),
        )
        .with_capabilities(ToolCapabilities::DELETE),
        Endpoint::write(
            "set_activity_name",
            "Set name for activity with ID",
            "setting activity name",
            vec![
                activity_id("ID of the activity"),
                ParamSpec::string("title", "New title for the activity"),
            ],
            Outcome::Confirm("Successfully set activity name"),
            forward!(|api, args| api
                .set_activity_name(args.int("activity_id")?, args.str("title")?)),
        ),
        Endpoint::write(
            "set_activity_type",
            "Set activity type",
            "setting activity type",
            vec![
                activity_id("ID of the activity"),
                ParamSpec::integer("type_id", "Type ID"),
                ParamSpec::string("type_key", "Type key"),
                ParamSpec::integer("parent_type_id", "Parent type ID"),
            ],
            Outcome::Confirm("Successfully set activity type"),
            forward!(|api, args| api.set_activity_type(
                args.int("activity_id")?,
                args.int("type_id")?,
                args.str("type_key")?,
                args.int("parent_type_id")?,
            )),
        ),
        Endpoint::write(
            "create_manual_activity",
            "Create a manual activity",
            "creating manual activity",
            vec![
                ParamSpec::string(
                    "start_datetime",
                    "Start datetime in format \"2023-12-02T10:00:00.00\"",
                ),
                ParamSpec::string("timezone", "Local timezone (e.g., 'Europe/Paris')"),
                ParamSpec::string("type_key", "Activity type key (e.g., 'resort_skiing')"),
                ParamSpec::number("distance_km", "Distance in kilometers"),
                ParamSpec::integer("duration_min", "Duration in minutes"),
                ParamSpec::string("activity_name", "Activity title"),
            ],
            Outcome::Confirm("Successfully created manual activity"),
            |api, args| {
                Box::pin(async move {
                    let activity = ManualActivity {
                        start_datetime: args.str("start_datetime")?.to_owned(),
                        time_zone: args.str("timezone")?.to_owned(),
                        type_key: args.str("type_key")?.to_owned(),
                        distance_km: args.float("distance_km")?,
                        duration_min: args.int("duration_min")?,
                        activity_name: args.str("activity_name")?.to_owned(),
                    };
                    api.create_manual_activity(&activity)
                        .await
                        .map_err(AppError::from)
                })
            },
        ),
        Endpoint::write(
            "create_manual_activity_from_json",
            "Create a manual activity from JSON payload",
            "creating manual activity from JSON",
            vec![ParamSpec::object("payload", "JSON payload for the activity")],
            Outcome::Confirm("Successfully created manual activity from JSON"),
            forward!(|api, args| api.create_manual_activity_from_json(args.object("payload")?)),
        ),
    ]
}
