// ABOUTME: User profile and device tools: names, settings, paired devices, alarms and solar data
// ABOUTME: All reads; values are returned exactly as Garmin Connect sends them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use crate::errors::AppError;
use crate::tools::args::ParamSpec;
use crate::tools::dispatch::Endpoint;

use super::OPT_ENDDATE;

/// User profile reads
pub const PROFILE_CATEGORY: &str = "profile";

/// Device reads
pub const CATEGORY: &str = "devices";

#[must_use]
pub fn profile_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_full_name",
            "Get user's full name",
            "retrieving full name",
            Vec::new(),
            forward!(|api, _| api.get_full_name()),
        ),
        Endpoint::read(
            "get_unit_system",
            "Get user's unit system preference",
            "retrieving unit system",
            Vec::new(),
            forward!(|api, _| api.get_unit_system()),
        ),
        Endpoint::read(
            "get_user_profile",
            "Get all user settings",
            "retrieving user profile",
            Vec::new(),
            forward!(|api, _| api.get_user_profile()),
        ),
        Endpoint::read(
            "get_userprofile_settings",
            "Get user settings",
            "retrieving user profile settings",
            Vec::new(),
            forward!(|api, _| api.get_userprofile_settings()),
        ),
    ]
}

#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_devices",
            "Get all available devices for the current user account",
            "retrieving devices",
            Vec::new(),
            forward!(|api, _| api.get_devices()),
        ),
        Endpoint::read(
            "get_device_last_used",
            "Get device last used information",
            "retrieving device last used",
            Vec::new(),
            forward!(|api, _| api.get_device_last_used()),
        ),
        Endpoint::read(
            "get_device_settings",
            "Get device settings for a specific device",
            "retrieving device settings",
            vec![ParamSpec::string(
                "device_id",
                "ID of the device to get settings for",
            )],
            forward!(|api, args| api.get_device_settings(args.str("device_id")?)),
        ),
        Endpoint::read(
            "get_device_alarms",
            "Get list of active alarms from all devices",
            "retrieving device alarms",
            Vec::new(),
            forward!(|api, _| api.get_device_alarms()),
        ),
        Endpoint::read(
            "get_primary_training_device",
            "Get detailed information about primary training devices",
            "retrieving primary training device",
            Vec::new(),
            forward!(|api, _| api.get_primary_training_device()),
        ),
        Endpoint::read(
            "get_device_solar_data",
            "Get solar data for compatible device",
            "retrieving device solar data",
            vec![
                ParamSpec::string("device_id", "ID of the device"),
                ParamSpec::string("startdate", "Start date in YYYY-MM-DD format"),
                OPT_ENDDATE,
            ],
            forward!(|api, args| api.get_device_solar_data(
                args.str("device_id")?,
                args.str("startdate")?,
                args.opt_str("enddate"),
            )),
        ),
    ]
}
