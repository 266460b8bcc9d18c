//! Coastal threat alerts: threshold rules over a snapshot and an in-memory store.

use crate::conditions::{CoastalSnapshot, PollutionLevel, TideType, WaterQuality};
use crate::location::{default_city, LocationSource, ResolvedLocation};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const WIND_WARN: f64 = 15.0;
const WIND_SEVERE: f64 = 25.0;
const TIDE_HIGH: f64 = 2.5;
const TIDE_FLOOD: f64 = 2.8;
const STORM_PRESSURE: f64 = 1000.0;
const STORM_WIND: f64 = 12.0;
const ROUGH_WAVES: f64 = 2.5;
const BACTERIA_LIMIT: u32 = 250;

/// Stored alerts kept before the oldest are evicted.
const MAX_STORED: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighWind,
    HighTide,
    StormRisk,
    Pollution,
    RoughSeas,
    FloodingRisk,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::HighWind => "Strong winds detected",
            Self::HighTide => "High tide warning",
            Self::StormRisk => "Storm conditions detected",
            Self::Pollution => "Water quality alert",
            Self::RoughSeas => "Rough sea conditions",
            Self::FloodingRisk => "Potential flooding risk",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertKind,
    pub severity: Severity,
    /// `"lat,lon"` of the marker.
    pub location: String,
    pub description: String,
    pub is_active: bool,
    pub triggered_by: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

/// An alert before it has an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: AlertKind,
    pub severity: Severity,
    pub description: String,
}

impl Finding {
    fn new(kind: AlertKind, severity: Severity, description: String) -> Self {
        Self { kind, severity, description }
    }
}

/// Apply the threshold rules to one snapshot.
pub fn evaluate(snapshot: &CoastalSnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();
    let w = &snapshot.weather;
    let t = &snapshot.tide;

    if w.wind_speed >= WIND_WARN {
        let severity = if w.wind_speed >= WIND_SEVERE { Severity::High } else { Severity::Medium };
        findings.push(Finding::new(
            AlertKind::HighWind,
            severity,
            format!("Winds of {:.1} m/s. Secure vessels and monitor coastal conditions.", w.wind_speed),
        ));
    }

    if t.tide_height >= TIDE_HIGH {
        findings.push(Finding::new(
            AlertKind::HighTide,
            Severity::Low,
            format!("High tide: {:.2} m and {}.", t.tide_height, tide_word(t.tide_type)),
        ));
    }

    if w.pressure < STORM_PRESSURE && w.wind_speed >= STORM_WIND {
        let severity = if w.wind_speed >= WIND_SEVERE { Severity::Critical } else { Severity::High };
        findings.push(Finding::new(
            AlertKind::StormRisk,
            severity,
            format!("Low pressure ({:.0} hPa) with {:.1} m/s winds.", w.pressure, w.wind_speed),
        ));
    }

    if snapshot.ocean.wave_height >= ROUGH_WAVES {
        findings.push(Finding::new(
            AlertKind::RoughSeas,
            Severity::Medium,
            format!("Waves of {:.1} m. Small craft should stay in harbour.", snapshot.ocean.wave_height),
        ));
    }

    let p = &snapshot.pollution;
    let bacteria = p.monitoring_data.bacteria_count;
    if p.water_quality == WaterQuality::Poor
        || p.pollution_level == PollutionLevel::High
        || bacteria >= BACTERIA_LIMIT
    {
        findings.push(Finding::new(
            AlertKind::Pollution,
            Severity::Medium,
            format!("Water quality degraded: bacteria count {} CFU/100 mL.", bacteria),
        ));
    }

    if t.tide_height >= TIDE_FLOOD && t.tide_type == TideType::Rising {
        findings.push(Finding::new(
            AlertKind::FloodingRisk,
            Severity::Medium,
            "Flooding risk in low-lying coastal areas on the rising tide.".to_string(),
        ));
    }

    findings
}

fn tide_word(tide: TideType) -> &'static str {
    match tide {
        TideType::Rising => "rising",
        TideType::Falling => "falling",
    }
}

fn sample_location() -> String {
    ResolvedLocation::from_city(default_city(), LocationSource::Default).coordinates()
}

/// In-memory alert store. Not persisted; holds at most `MAX_STORED` alerts.
#[derive(Debug)]
pub struct AlertStore {
    alerts: Vec<Alert>,
    next_seq: u64,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore {
    pub fn new() -> Self {
        Self { alerts: Vec::new(), next_seq: 1 }
    }

    /// A store holding the two sample alerts the dashboard starts with.
    pub fn with_samples(now: DateTime<Utc>) -> Self {
        let mut store = Self::new();
        let location = sample_location();
        store.push(
            Finding::new(
                AlertKind::HighWind,
                Severity::Medium,
                "Moderate winds: 22 m/s. Monitor coastal conditions.".into(),
            ),
            &location,
            "sample",
            now - Duration::minutes(15),
        );
        store.push(
            Finding::new(
                AlertKind::HighTide,
                Severity::Low,
                "High tide approaching: 2.8 m expected in next 2 hours.".into(),
            ),
            &location,
            "sample",
            now - Duration::minutes(30),
        );
        store
    }

    fn push(&mut self, finding: Finding, location: &str, triggered_by: &str, at: DateTime<Utc>) -> Alert {
        let alert = Alert {
            id: format!("alert_{}_{:03}", at.format("%Y%m%d_%H%M%S"), self.next_seq),
            alert_type: finding.kind,
            severity: finding.severity,
            location: location.to_string(),
            description: finding.description,
            is_active: true,
            triggered_by: triggered_by.to_string(),
            timestamp: at,
            source: "coastwatch_alert_service".into(),
        };
        self.next_seq += 1;
        self.alerts.push(alert.clone());
        self.evict();
        alert
    }

    /// Drop the oldest inactive alert, or failing that the oldest alert, until under the cap.
    fn evict(&mut self) {
        while self.alerts.len() > MAX_STORED {
            let victim = self.alerts.iter().position(|a| !a.is_active).unwrap_or(0);
            self.alerts.remove(victim);
        }
    }

    fn find_active(&self, kind: AlertKind, location: &str) -> Option<&Alert> {
        self.alerts
            .iter()
            .find(|a| a.is_active && a.alert_type == kind && a.location == location)
    }

    /// Evaluate `snapshot` and store whatever fires.
    ///
    /// A finding that is already active for the same location is not stored
    /// again; the existing alert is returned in its place.
    pub fn record(&mut self, snapshot: &CoastalSnapshot) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for finding in evaluate(snapshot) {
            let alert = match self.find_active(finding.kind, &snapshot.location) {
                Some(existing) => existing.clone(),
                None => self.push(finding, &snapshot.location, "threshold_rules", snapshot.timestamp),
            };
            alerts.push(alert);
        }
        alerts
    }

    /// Active alerts, most severe first, newest first within a severity.
    pub fn active(&self) -> Vec<Alert> {
        let mut active: Vec<Alert> = self.alerts.iter().filter(|a| a.is_active).cloned().collect();
        active.sort_by(|a, b| b.severity.cmp(&a.severity).then(b.timestamp.cmp(&a.timestamp)));
        active
    }

    /// Mark an alert inactive. False when the id is unknown or already inactive.
    pub fn deactivate(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id && a.is_active) {
            Some(alert) => {
                alert.is_active = false;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
