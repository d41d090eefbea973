use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Full-table records, returned as-is by the listing and by-ref endpoints.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: i32,
    pub circuit_ref: String,
    pub name: String,
    pub location: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub constructor_id: i32,
    pub constructor_ref: String,
    pub name: String,
    pub nationality: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: i32,
    pub driver_ref: String,
    pub number: Option<i32>,
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
    pub dob: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub result_id: i32,
    pub race_id: i32,
    pub driver_id: i32,
    pub constructor_id: i32,
    pub number: Option<i32>,
    pub grid: i32,
    pub position: Option<i32>,
    pub position_text: String,
    pub position_order: i32,
    pub points: f64,
    pub laps: i32,
    pub time: Option<String>,
    pub milliseconds: Option<i64>,
    pub fastest_lap: Option<i32>,
    pub rank: Option<i32>,
    pub fastest_lap_time: Option<String>,
    pub fastest_lap_speed: Option<String>,
    pub status_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingEntry {
    pub qualify_id: i32,
    pub race_id: i32,
    pub driver_id: i32,
    pub constructor_id: i32,
    pub number: Option<i32>,
    pub position: i32,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}
