// ABOUTME: Catalog of every Garmin Connect tool exposed over MCP, grouped by category
// ABOUTME: Each entry names one GarminApi call, its parameters, and how replies and failures read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Endpoint Manifest
//!
//! One module per tool category. Every module exposes a `CATEGORY` name and an
//! `endpoints()` list; [`all`] collects them in the order `tools/list` shows.

use super::args::ParamSpec;
use super::dispatch::Endpoint;

/// Forward to one collaborator method and convert its error
///
/// `forward!(|api, args| api.get_stats(args.str("cdate")?))` expands to an
/// [`Invoke`](super::dispatch::Invoke) closure.
macro_rules! forward {
    (|$api:ident, $args:pat_param| $call:expr) => {
        |$api, $args| Box::pin(async move { $call.await.map_err(AppError::from) })
    };
}

pub mod activities;
pub mod body;
pub mod challenges;
pub mod devices;
pub mod health;
pub mod system;
pub mod workouts;

/// Calendar date parameter used by most daily reads
pub const CDATE: ParamSpec = ParamSpec::string("cdate", "Date in YYYY-MM-DD format");

/// Required range start
pub const STARTDATE: ParamSpec = ParamSpec::string("startdate", "Start date in YYYY-MM-DD format");

/// Required range end
pub const ENDDATE: ParamSpec = ParamSpec::string("enddate", "End date in YYYY-MM-DD format");

/// Optional range end; a single day when omitted
pub const OPT_ENDDATE: ParamSpec =
    ParamSpec::string("enddate", "End date in YYYY-MM-DD format (optional)").optional();

/// Every endpoint, grouped by category
#[must_use]
pub fn all() -> Vec<(&'static str, Vec<Endpoint>)> {
    vec![
        (activities::CATEGORY, activities::endpoints()),
        (devices::PROFILE_CATEGORY, devices::profile_endpoints()),
        (devices::CATEGORY, devices::endpoints()),
        (health::CATEGORY, health::endpoints()),
        (health::PERFORMANCE_CATEGORY, health::performance_endpoints()),
        (body::CATEGORY, body::endpoints()),
        (body::BLOOD_PRESSURE_CATEGORY, body::blood_pressure_endpoints()),
        (body::WOMENS_HEALTH_CATEGORY, body::womens_health_endpoints()),
        (challenges::GEAR_CATEGORY, challenges::gear_endpoints()),
        (challenges::CATEGORY, challenges::endpoints()),
        (workouts::CATEGORY, workouts::endpoints()),
        (
            activities::MANAGEMENT_CATEGORY,
            activities::management_endpoints(),
        ),
        (system::CATEGORY, system::endpoints()),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for (_, endpoints) in all() {
            for endpoint in endpoints {
                assert!(seen.insert(endpoint.name), "duplicate {}", endpoint.name);
            }
        }
        assert_eq!(seen.len(), 93);
    }

    #[test]
    fn test_actions_and_descriptions_present() {
        for (category, endpoints) in all() {
            assert!(!endpoints.is_empty(), "{category} is empty");
            for endpoint in endpoints {
                assert!(!endpoint.action.is_empty(), "{} has no action", endpoint.name);
                assert!(
                    !endpoint.description.is_empty(),
                    "{} has no description",
                    endpoint.name
                );
            }
        }
    }
}
