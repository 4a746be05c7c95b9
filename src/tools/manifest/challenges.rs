// ABOUTME: Gear, goals, badges, challenges and personal record tools
// ABOUTME: Paged reads forward `start` and `limit` untouched to Garmin Connect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use crate::errors::AppError;
use crate::tools::args::{ParamDefault, ParamSpec};
use crate::tools::dispatch::{Endpoint, Outcome};

/// Gear tracking
pub const GEAR_CATEGORY: &str = "gear";

/// Goals, badges and challenges
pub const CATEGORY: &str = "challenges";

const PROFILE_NUMBER: ParamSpec = ParamSpec::integer("userProfileNumber", "User profile number");

const START: ParamSpec = ParamSpec::integer("start", "Starting index");

const LIMIT: ParamSpec = ParamSpec::integer("limit", "Number of challenges to return");

/// Gear reads and defaults
#[must_use]
pub fn gear_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_gear",
            "Get all user gear",
            "retrieving gear",
            vec![PROFILE_NUMBER],
            forward!(|api, args| api.get_gear(args.int("userProfileNumber")?)),
        ),
        Endpoint::read(
            "get_gear_defaults",
            "Get gear defaults for a user profile",
            "retrieving gear defaults",
            vec![PROFILE_NUMBER],
            forward!(|api, args| api.get_gear_defaults(args.int("userProfileNumber")?)),
        ),
        // Tool name is misspelled on purpose; clients already call it this way.
        Endpoint::read(
            "get_gear_ativities",
            "Get activities where specific gear was used",
            "retrieving gear activities",
            vec![
                ParamSpec::string("gearUUID", "UUID of the gear to get activities for"),
                ParamSpec::integer(
                    "limit",
                    "Maximum number of activities to return (default: 9999)",
                )
                .or(ParamDefault::Int(9999)),
            ],
            forward!(|api, args| api
                .get_gear_activities(args.str("gearUUID")?, args.int("limit")?)),
        ),
        Endpoint::read(
            "get_gear_stats",
            "Get statistics for specific gear",
            "retrieving gear stats",
            vec![ParamSpec::string(
                "gearUUID",
                "UUID of the gear to get stats for",
            )],
            forward!(|api, args| api.get_gear_stats(args.str("gearUUID")?)),
        ),
        Endpoint::write(
            "set_gear_default",
            "Set gear as default for an activity type",
            "setting gear default",
            vec![
                ParamSpec::string("activityType", "Type of activity"),
                ParamSpec::string("gearUUID", "UUID of the gear"),
                ParamSpec::boolean("defaultGear", "Whether to set as default (default: True)")
                    .or(ParamDefault::Bool(true)),
            ],
            Outcome::Confirm("Successfully set gear default"),
            forward!(|api, args| api.set_gear_default(
                args.str("activityType")?,
                args.str("gearUUID")?,
                args.bool("defaultGear")?,
            )),
        ),
    ]
}

/// Goals, badges, challenges and records
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_goals",
            "Get goals based on status",
            "retrieving goals",
            vec![
                ParamSpec::string(
                    "status",
                    "Status of goals (active, future, or past) (default: active)",
                )
                .or(ParamDefault::Str("active")),
                ParamSpec::integer("start", "Initial goal index (default: 1)")
                    .or(ParamDefault::Int(1)),
                ParamSpec::integer("limit", "Pagination limit (default: 30)")
                    .or(ParamDefault::Int(30)),
            ],
            forward!(|api, args| api.get_goals(
                args.str("status")?,
                args.int("start")?,
                args.int("limit")?,
            )),
        ),
        Endpoint::read(
            "get_adhoc_challenges",
            "Get adhoc challenges for current user",
            "retrieving adhoc challenges",
            vec![START, LIMIT],
            forward!(|api, args| api
                .get_adhoc_challenges(args.int("start")?, args.int("limit")?)),
        ),
        Endpoint::read(
            "get_available_badge_challenges",
            "Get available badge challenges",
            "retrieving available badge challenges",
            vec![START, LIMIT],
            forward!(|api, args| api
                .get_available_badge_challenges(args.int("start")?, args.int("limit")?)),
        ),
        Endpoint::read(
            "get_badge_challenges",
            "Get badge challenges for current user",
            "retrieving badge challenges",
            vec![START, LIMIT],
            forward!(|api, args| api
                .get_badge_challenges(args.int("start")?, args.int("limit")?)),
        ),
        Endpoint::read(
            "get_non_completed_badge_challenges",
            "Get non-completed badge challenges for current user",
            "retrieving non-completed badge challenges",
            vec![START, LIMIT],
            forward!(|api, args| api
                .get_non_completed_badge_challenges(args.int("start")?, args.int("limit")?)),
        ),
        Endpoint::read(
            "get_earned_badges",
            "Get earned badges for current user",
            "retrieving earned badges",
            Vec::new(),
            forward!(|api, _| api.get_earned_badges()),
        ),
        Endpoint::read(
            "get_personal_record",
            "Get personal records for current user",
            "retrieving personal records",
            Vec::new(),
            forward!(|api, _| api.get_personal_record()),
        ),
        Endpoint::read(
            "get_inprogress_virtual_challenges",
            "Get in-progress virtual challenges for current user",
            "retrieving in-progress virtual challenges",
            vec![START, LIMIT],
            forward!(|api, args| api
                .get_inprogress_virtual_challenges(args.int("start")?, args.int("limit")?)),
        ),
    ]
}
