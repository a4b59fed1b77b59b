//! Third-party tools a user can link through the backend's OAuth flows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Slack,
    Calendly,
    Attio,
    Hubspot,
    Notion,
}

impl Tool {
    /// Every tool, in the order the connect buttons are shown.
    pub const ALL: [Tool; 5] = [
        Tool::Slack,
        Tool::Calendly,
        Tool::Attio,
        Tool::Hubspot,
        Tool::Notion,
    ];

    /// Value of the `tool` query parameter on the generic OAuth route.
    pub fn slug(self) -> &'static str {
        match self {
            Tool::Slack => "slack",
            Tool::Calendly => "calendly",
            Tool::Attio => "attio",
            Tool::Hubspot => "hubspot",
            Tool::Notion => "notion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Slack => "Slack",
            Tool::Calendly => "Calendly",
            Tool::Attio => "Attio",
            Tool::Hubspot => "Hubspot",
            Tool::Notion => "Notion",
        }
    }

    /// Dedicated OAuth-start route of the older backend revisions.
    /// Calendly was the first integration and kept the unprefixed route.
    pub fn legacy_path(self) -> &'static str {
        match self {
            Tool::Slack => "/api/slack_oauth_start",
            Tool::Calendly => "/api/oauth_start",
            Tool::Attio => "/api/attio_oauth_start",
            Tool::Hubspot => "/api/hubspot_oauth_start",
            Tool::Notion => "/api/notion_oauth_start",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Tool {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StoreError::Backend(format!("Unknown tool: {wanted}")))
    }
}

/// Which OAuth-start routes the backend exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OAuthRoutes {
    /// One route per tool, see [`Tool::legacy_path`].
    PerTool,
    /// `/api/tool_oauth_start?tool=<slug>`.
    #[default]
    Generic,
}

impl OAuthRoutes {
    pub const GENERIC_PATH: &'static str = "/api/tool_oauth_start";

    pub fn path_for(self, tool: Tool) -> &'static str {
        match self {
            OAuthRoutes::PerTool => tool.legacy_path(),
            OAuthRoutes::Generic => Self::GENERIC_PATH,
        }
    }
}

impl FromStr for OAuthRoutes {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(OAuthRoutes::Generic),
            "per-tool" | "per_tool" | "legacy" => Ok(OAuthRoutes::PerTool),
            other => Err(StoreError::Backend(format!("Unknown OAuth route style: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_parse_is_case_insensitive() {
        assert_eq!("HubSpot".parse::<Tool>().unwrap(), Tool::Hubspot);
        assert_eq!(" notion ".parse::<Tool>().unwrap(), Tool::Notion);
        assert!("trello".parse::<Tool>().is_err());
    }

    #[test]
    fn test_calendly_uses_unprefixed_route() {
        assert_eq!(Tool::Calendly.legacy_path(), "/api/oauth_start");
        assert_eq!(Tool::Slack.legacy_path(), "/api/slack_oauth_start");
    }

    #[test]
    fn test_route_style_selects_path() {
        assert_eq!(OAuthRoutes::PerTool.path_for(Tool::Attio), "/api/attio_oauth_start");
        assert_eq!(OAuthRoutes::Generic.path_for(Tool::Attio), "/api/tool_oauth_start");
        assert_eq!("per-tool".parse::<OAuthRoutes>().unwrap(), OAuthRoutes::PerTool);
        assert_eq!(OAuthRoutes::default(), OAuthRoutes::Generic);
    }
}
