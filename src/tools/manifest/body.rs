// ABOUTME: Weight, body composition, hydration, blood pressure and menstrual tracking tools
// ABOUTME: Writes answer with "Successfully ..." followed by whatever Garmin returned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use garmin_connect::{BloodPressureReading, BodyComposition};

use crate::errors::AppError;
use crate::tools::args::{ParamDefault, ParamSpec, ToolArgs};
use crate::tools::dispatch::{Endpoint, Outcome};
use crate::tools::traits::ToolCapabilities;

use super::{CDATE, ENDDATE, OPT_ENDDATE, STARTDATE};

/// Weight, body composition and hydration
pub const CATEGORY: &str = "body";

/// Blood pressure log
pub const BLOOD_PRESSURE_CATEGORY: &str = "blood_pressure";

/// Menstrual cycle and pregnancy tracking
pub const WOMENS_HEALTH_CATEGORY: &str = "womens_health";

const UNIT_KEY: ParamSpec =
    ParamSpec::string("unitKey", "Unit key (default: kg)").or(ParamDefault::Str("kg"));

const fn optional_number(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec::number(name, description).optional()
}

fn body_composition(args: &ToolArgs) -> Result<BodyComposition, AppError> {
    Ok(BodyComposition {
        timestamp: args.opt_str("timestamp").map(str::to_owned),
        weight: args.float("weight")?,
        percent_fat: args.opt_float("percent_fat"),
        percent_hydration: args.opt_float("percent_hydration"),
        visceral_fat_mass: args.opt_float("visceral_fat_mass"),
        bone_mass: args.opt_float("bone_mass"),
        muscle_mass: args.opt_float("muscle_mass"),
        basal_met: args.opt_float("basal_met"),
        active_met: args.opt_float("active_met"),
        physique_rating: args.opt_float("physique_rating"),
        metabolic_age: args.opt_float("metabolic_age"),
        visceral_fat_rating: args.opt_float("visceral_fat_rating"),
        bmi: args.opt_float("bmi"),
    })
}

/// Weigh-ins, body composition and hydration
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_weigh_ins",
            "Get weigh-ins between two dates",
            "retrieving weigh-ins",
            vec![STARTDATE, ENDDATE],
            forward!(|api, args| api
                .get_weigh_ins(args.str("startdate")?, args.str("enddate")?)),
        ),
        Endpoint::read(
            "get_daily_weigh_ins",
            "Get weigh-ins for a specific date",
            "retrieving daily weigh-ins",
            vec![CDATE],
            forward!(|api, args| api.get_daily_weigh_ins(args.str("cdate")?)),
        ),
        Endpoint::write(
            "add_weigh_in",
            "Add a weigh-in",
            "adding weigh-in",
            vec![
                ParamSpec::integer("weight", "Weight value"),
                UNIT_KEY,
                ParamSpec::string("timestamp", "Timestamp (optional)").or(ParamDefault::Str("")),
            ],
            Outcome::Confirm("Successfully added weigh-in"),
            forward!(|api, args| api.add_weigh_in(
                args.int("weight")? as f64,
                args.str("unitKey")?,
                args.opt_str("timestamp"),
            )),
        ),
        Endpoint::write(
            "add_weigh_in_with_timestamps",
            "Add a weigh-in with explicit timestamps",
            "adding weigh-in with timestamps",
            vec![
                ParamSpec::integer("weight", "Weight value"),
                UNIT_KEY,
                ParamSpec::string("dateTimestamp", "Date timestamp (optional)")
                    .or(ParamDefault::Str("")),
                ParamSpec::string("gmtTimestamp", "GMT timestamp (optional)")
                    .or(ParamDefault::Str("")),
            ],
            Outcome::Confirm("Successfully added weigh-in with timestamps"),
            forward!(|api, args| api.add_weigh_in_with_timestamps(
                args.int("weight")? as f64,
                args.str("unitKey")?,
                args.opt_str("dateTimestamp"),
                args.opt_str("gmtTimestamp"),
            )),
        ),
        Endpoint::write(
            "delete_weigh_ins",
            "Delete weigh-ins for a specific date",
            "deleting weigh-ins",
            vec![
                CDATE,
                ParamSpec::boolean(
                    "delete_all",
                    "Whether to delete all weigh-ins for that date (default: False)",
                )
                .or(ParamDefault::Bool(false)),
            ],
            Outcome::Confirm("Successfully deleted weigh-ins"),
            forward!(|api, args| api
                .delete_weigh_ins(args.str("cdate")?, args.bool("delete_all")?)),
        )
        .with_capabilities(ToolCapabilities::DELETE),
        Endpoint::write(
            "delete_weigh_in",
            "Delete a specific weigh-in",
            "deleting weigh-in",
            vec![ParamSpec::string("weight_pk", "Weight primary key"), CDATE],
            Outcome::Confirm("Successfully deleted weigh-in"),
            forward!(|api, args| api
                .delete_weigh_in(args.str("weight_pk")?, args.str("cdate")?)),
        )
        .with_capabilities(ToolCapabilities::DELETE),
        Endpoint::write(
            "add_body_composition",
            "Add body composition data",
            "adding body composition",
            vec![
                ParamSpec::string("timestamp", "Timestamp for the measurement"),
                ParamSpec::number("weight", "Weight value"),
                optional_number("percent_fat", "Percent body fat (optional)"),
                optional_number("percent_hydration", "Percent hydration (optional)"),
                optional_number("visceral_fat_mass", "Visceral fat mass (optional)"),
                optional_number("bone_mass", "Bone mass (optional)"),
                optional_number("muscle_mass", "Muscle mass (optional)"),
                optional_number("basal_met", "Basal metabolic rate (optional)"),
                optional_number("active_met", "Active metabolic rate (optional)"),
                optional_number("physique_rating", "Physique rating (optional)"),
                optional_number("metabolic_age", "Metabolic age (optional)"),
                optional_number("visceral_fat_rating", "Visceral fat rating (optional)"),
                optional_number("bmi", "BMI (optional)"),
            ],
            Outcome::Confirm("Successfully added body composition"),
            forward!(|api, args| api.add_body_composition(&body_composition(args)?)),
        ),
        Endpoint::write(
            "add_hydration_data",
            "Add hydration data in ml",
            "adding hydration data",
            vec![
                ParamSpec::number(
                    "value_in_ml",
                    "The number of ml of water to add (positive) or subtract (negative)",
                ),
                ParamSpec::string(
                    "timestamp",
                    "The timestamp of the hydration update (optional)",
                )
                .optional(),
                ParamSpec::string("cdate", "The date of the hydration update (optional)")
                    .optional(),
            ],
            Outcome::Confirm("Successfully added hydration data"),
            forward!(|api, args| api.add_hydration_data(
                args.float("value_in_ml")?,
                args.opt_str("timestamp"),
                args.opt_str("cdate"),
            )),
        ),
    ]
}

/// Blood pressure reads and writes
#[must_use]
pub fn blood_pressure_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_blood_pressure",
            "Get blood pressure data between dates",
            "retrieving blood pressure data",
            vec![STARTDATE, OPT_ENDDATE],
            forward!(|api, args| api
                .get_blood_pressure(args.str("startdate")?, args.opt_str("enddate"))),
        ),
        Endpoint::write(
            "set_blood_pressure",
            "Add blood pressure measurement",
            "adding blood pressure",
            vec![
                ParamSpec::integer("systolic", "Systolic blood pressure"),
                ParamSpec::integer("diastolic", "Diastolic blood pressure"),
                ParamSpec::integer("pulse", "Pulse rate"),
                ParamSpec::string("timestamp", "Timestamp (optional)").or(ParamDefault::Str("")),
                ParamSpec::string("notes", "Notes (optional)").or(ParamDefault::Str("")),
            ],
            Outcome::Confirm("Successfully added blood pressure"),
            |api, args| {
                Box::pin(async move {
                    let reading = BloodPressureReading {
                        systolic: args.int("systolic")?,
                        diastolic: args.int("diastolic")?,
                        pulse: args.int("pulse")?,
                        timestamp: args.opt_str("timestamp").map(str::to_owned),
                        notes: args.opt_str("notes").map(str::to_owned),
                    };
                    api.set_blood_pressure(&reading)
                        .await
                        .map_err(AppError::from)
                })
            },
        ),
        Endpoint::write(
            "delete_blood_pressure",
            "Delete specific blood pressure measurement",
            "deleting blood pressure",
            vec![
                ParamSpec::string("version", "Version of the blood pressure measurement"),
                CDATE,
            ],
            Outcome::Confirm("Successfully deleted blood pressure"),
            forward!(|api, args| api
                .delete_blood_pressure(args.str("version")?, args.str("cdate")?)),
        )
        .with_capabilities(ToolCapabilities::DELETE),
    ]
}

/// Menstrual cycle and pregnancy reads
#[must_use]
pub fn womens_health_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_menstrual_calendar_data",
            "Get menstrual calendar data between dates",
            "retrieving menstrual calendar data",
            vec![STARTDATE, ENDDATE],
            forward!(|api, args| api
                .get_menstrual_calendar_data(args.str("startdate")?, args.str("enddate")?)),
        ),
        Endpoint::read(
            "get_menstrual_data_for_date",
            "Get menstrual data for a specific date",
            "retrieving menstrual data",
            vec![ParamSpec::string("fordate", "Date in YYYY-MM-DD format")],
            forward!(|api, args| api.get_menstrual_data_for_date(args.str("fordate")?)),
        ),
        Endpoint::read(
            "get_pregnancy_summary",
            "Get pregnancy summary data",
            "retrieving pregnancy summary",
            Vec::new(),
            forward!(|api, _| api.get_pregnancy_summary()),
        ),
    ]
}
