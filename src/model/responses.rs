use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Assembled response shapes. Nested fields are named after the joined table,
// matching how rows come back from the provider.

/// A circuit as used by one round of a season, circuit fields spread alongside the race's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCircuit {
    pub round: i32,
    pub year: i32,
    pub circuit_id: i32,
    pub name: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
}

/// A driver's details merged with their finishing position in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDriver {
    pub forename: String,
    pub surname: String,
    pub nationality: Option<String>,
    pub position: Option<i32>,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitSummary {
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDetail {
    pub race_id: i32,
    pub name: String,
    pub round: i32,
    pub year: i32,
    pub date: NaiveDate,
    pub circuits: CircuitSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSummary {
    pub race_id: i32,
    pub name: String,
    pub round: i32,
    pub year: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitHeader {
    pub circuit_ref: String,
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
}

/// Envelope for the races held at one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRaces {
    pub circuit: CircuitHeader,
    pub races: Vec<RaceSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDriver {
    pub driver_ref: String,
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRace {
    pub name: String,
    pub round: i32,
    pub year: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultConstructor {
    pub name: String,
    pub constructor_ref: String,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub position: Option<i32>,
    pub points: f64,
    pub grid: i32,
    pub laps: i32,
    pub time: Option<String>,
    pub fastest_lap: Option<i32>,
    pub rank: Option<i32>,
    pub drivers: ResultDriver,
    pub races: ResultRace,
    pub constructors: ResultConstructor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingDriver {
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
    pub driver_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    pub driver_standings_id: i32,
    pub driver_id: i32,
    pub position: Option<i32>,
    pub points: f64,
    pub position_text: Option<String>,
    pub wins: i32,
    pub race_id: i32,
    pub drivers: StandingDriver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingConstructor {
    pub constructor_ref: String,
    pub name: String,
    pub nationality: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    pub constructor_standings_id: i32,
    pub constructor_id: i32,
    pub position: Option<i32>,
    pub points: f64,
    pub position_text: Option<String>,
    pub wins: i32,
    pub race_id: i32,
    pub constructors: StandingConstructor,
}
