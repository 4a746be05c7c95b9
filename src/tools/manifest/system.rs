// ABOUTME: Utility tools: daily events, data reload, raw GraphQL queries and logout
// ABOUTME: A successful logout ends the Garmin session for the rest of the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde_json::Value;

use crate::errors::AppError;
use crate::tools::args::ParamSpec;
use crate::tools::dispatch::{Endpoint, Outcome};
use crate::tools::traits::ToolCapabilities;

use super::CDATE;

/// Utility and session tools
pub const CATEGORY: &str = "system";

/// Daily events, data reload, GraphQL queries and logout
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::read(
            "get_all_day_events",
            "Get available daily events data for a specific date",
            "retrieving all day events",
            vec![CDATE],
            forward!(|api, args| api.get_all_day_events(args.str("cdate")?)),
        ),
        Endpoint::read(
            "get_daily_wellness_events_data",
            "Get daily wellness events data for a specific date",
            "retrieving daily wellness events",
            vec![ParamSpec::string("startdate", "Date in YYYY-MM-DD format")],
            forward!(|api, args| api.get_daily_wellness_events_data(args.str("startdate")?)),
        ),
        Endpoint::write(
            "request_reload",
            "Request reload of data for a specific date",
            "requesting reload",
            vec![CDATE],
            Outcome::Acknowledge(|args| {
                format!("Successfully requested reload for {}", args.display("cdate"))
            }),
            forward!(|api, args| api.request_reload(args.str("cdate")?)),
        ),
        Endpoint::read(
            "query_garmin_graphql",
            "Query Garmin GraphQL endpoints",
            "querying GraphQL",
            vec![ParamSpec::object("query", "GraphQL query dictionary")],
            forward!(|api, args| api.query_garmin_graphql(args.object("query")?)),
        ),
        Endpoint::write(
            "logout",
            "Log user out of session",
            "logging out",
            Vec::new(),
            Outcome::Acknowledge(|_| "Successfully logged out".to_owned()),
            |api, _| {
                Box::pin(async move {
                    api.logout().await?;
                    Ok::<_, AppError>(Value::Null)
                })
            },
        )
        .with_capabilities(
            ToolCapabilities::REQUIRES_SESSION.union(ToolCapabilities::ENDS_SESSION),
        ),
    ]
}
