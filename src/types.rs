//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Probe kinds supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// ICMP echo round-trip latency
    Latency,
    /// DNS resolution timing
    Dns,
    /// Downstream transfer throughput
    Downlink,
    /// Upstream transfer throughput
    Uplink,
    /// Pseudo-probe expanded to downlink + uplink before scheduling
    Throughput,
}

impl ProbeKind {
    /// Parse a probe kind from its configuration spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latency" => Some(Self::Latency),
            "dns" => Some(Self::Dns),
            "downlink" => Some(Self::Downlink),
            "uplink" => Some(Self::Uplink),
            "throughput" => Some(Self::Throughput),
            _ => None,
        }
    }

    /// Configuration/result-row spelling of this probe kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latency => "latency",
            Self::Dns => "dns",
            Self::Downlink => "downlink",
            Self::Uplink => "uplink",
            Self::Throughput => "throughput",
        }
    }

    /// Whether this probe transfers payload in either direction
    pub fn is_throughput(&self) -> bool {
        matches!(self, Self::Downlink | Self::Uplink | Self::Throughput)
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service type of a test endpoint. Determines which probe kinds are
/// supported and whether geographic constraints apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Compute,
    Paas,
    Storage,
    Cdn,
    Dns,
}

impl ServiceType {
    /// Parse a service type from its configuration spelling.
    /// `servers` and `vps` are legacy aliases for `compute`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compute" | "servers" | "vps" => Some(Self::Compute),
            "paas" => Some(Self::Paas),
            "storage" => Some(Self::Storage),
            "cdn" => Some(Self::Cdn),
            "dns" => Some(Self::Dns),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Paas => "paas",
            Self::Storage => "storage",
            Self::Cdn => "cdn",
            Self::Dns => "dns",
        }
    }

    /// CDN and DNS endpoints have no stable physical country, so
    /// geographic same-* constraints never apply to them
    pub fn exempt_from_geography(&self) -> bool {
        matches!(self, Self::Cdn | Self::Dns)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated status of one result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// All samples succeeded
    Success,
    /// Some samples succeeded, some failed
    Partial,
    /// Samples were collected but none succeeded
    Fail,
    /// The probe itself failed - no samples at all
    Failed,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Fail => "fail",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of one orchestrated run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Pending,
    Running,
    Completed,
    /// Terminated early by the abort threshold. A terminal status, not an
    /// error.
    Aborted,
}

/// Dimensions the same-* constraint engine can match on, in evaluation
/// priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    Continent,
    Country,
    State,
    GeoRegion,
    Provider,
    Service,
    Region,
}

impl ConstraintType {
    /// All constraint dimensions in priority order
    pub const ALL: [ConstraintType; 7] = [
        Self::Continent,
        Self::Country,
        Self::State,
        Self::GeoRegion,
        Self::Provider,
        Self::Service,
        Self::Region,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "continent" => Some(Self::Continent),
            "country" => Some(Self::Country),
            "state" => Some(Self::State),
            "geo_region" => Some(Self::GeoRegion),
            "provider" => Some(Self::Provider),
            "service" => Some(Self::Service),
            "region" => Some(Self::Region),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continent => "continent",
            Self::Country => "country",
            Self::State => "state",
            Self::GeoRegion => "geo_region",
            Self::Provider => "provider",
            Self::Service => "service",
            Self::Region => "region",
        }
    }
}

/// Whether lower or higher sample values indicate better performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Latency/DNS/timed throughput: smaller is better
    LowerIsBetter,
    /// Transfer rate: larger is better
    HigherIsBetter,
}

impl Polarity {
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Self::LowerIsBetter)
    }

    /// Unit of merit for samples of this polarity
    pub fn unit(&self) -> &'static str {
        match self {
            Self::LowerIsBetter => "ms",
            Self::HigherIsBetter => "Mb/s",
        }
    }

    pub fn unit_long(&self) -> &'static str {
        match self {
            Self::LowerIsBetter => "milliseconds",
            Self::HigherIsBetter => "megabits per second",
        }
    }
}
