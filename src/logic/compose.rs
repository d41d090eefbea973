//! Query objects for every read the API performs.
//!
//! Each function only describes the read; execution and shaping happen in
//! [`crate::logic::execute`] and [`crate::logic::assemble`].

use crate::model::{ColumnRef, Entity, FilterOp, Join, Query};

const RACE_SUMMARY: &[&str] = &["raceId", "name", "round", "year", "date"];
const CIRCUIT_SUMMARY: &[&str] = &["name", "location", "country"];

pub fn all_circuits() -> Query {
    Query::from(Entity::Circuits).order_by("name")
}

pub fn all_constructors() -> Query {
    Query::from(Entity::Constructors).order_by("name")
}

pub fn all_drivers() -> Query {
    Query::from(Entity::Drivers).order_by("surname")
}

/// Case-insensitive exact match on `ref_column`.
pub fn by_ref(entity: Entity, ref_column: &'static str, reference: &str) -> Query {
    Query::from(entity).eq_ignore_case(ref_column, reference)
}

pub fn circuits_in_season(year: i32) -> Query {
    Query::from(Entity::Races)
        .select(&["round", "year", "circuitId"])
        .eq("year", year)
        .join(Join::optional(Entity::Circuits).select(CIRCUIT_SUMMARY))
        .order_by("round")
}

pub fn drivers_by_surname_prefix(prefix: &str) -> Query {
    Query::from(Entity::Drivers)
        .starts_with_ignore_case("surname", prefix)
        .order_by("surname")
}

pub fn drivers_in_race(race_id: i64) -> Query {
    Query::from(Entity::Results)
        .select(&["driverId", "position", "points"])
        .eq("raceId", race_id)
        .join(Join::required(Entity::Drivers).select(&["forename", "surname", "nationality"]))
        .order_by("position")
}

pub fn race_by_id(race_id: i64) -> Query {
    Query::from(Entity::Races)
        .select(RACE_SUMMARY)
        .eq("raceId", race_id)
        .join(Join::required(Entity::Circuits).select(CIRCUIT_SUMMARY))
}

pub fn races_in_season(year: i32) -> Query {
    Query::from(Entity::Races)
        .select(RACE_SUMMARY)
        .eq("year", year)
        .join(Join::required(Entity::Circuits).select(CIRCUIT_SUMMARY))
        .order_by("round")
}

pub fn race_by_round(year: i32, round: i64) -> Query {
    Query::from(Entity::Races)
        .select(RACE_SUMMARY)
        .eq("year", year)
        .eq("round", round)
        .join(Join::required(Entity::Circuits).select(CIRCUIT_SUMMARY))
}

/// Races held at a circuit, optionally limited to an inclusive span of seasons.
pub fn races_at_circuit(circuit_id: i32, seasons: Option<(i32, i32)>) -> Query {
    let query = Query::from(Entity::Races)
        .select(RACE_SUMMARY)
        .eq("circuitId", circuit_id);
    let query = match seasons {
        Some((start, end)) => query.between(ColumnRef::source("year"), start, end),
        None => query,
    };
    query.order_by("year")
}

/// Existence probe for the race a per-race listing belongs to.
pub fn race_exists(race_id: i64) -> Query {
    Query::from(Entity::Races)
        .select(&["raceId"])
        .eq("raceId", race_id)
}

pub fn results_for_race(race_id: i64) -> Query {
    Query::from(Entity::Results)
        .select(&["position", "points", "grid", "laps", "time", "fastestLap", "rank"])
        .eq("raceId", race_id)
        .join(Join::required(Entity::Drivers).select(&["driverRef", "code", "forename", "surname"]))
        .join(Join::required(Entity::Races).select(&["name", "round", "year", "date"]))
        .join(
            Join::required(Entity::Constructors).select(&["name", "constructorRef", "nationality"]),
        )
        .order_by("grid")
}

fn driver_ref_filter(query: Query, driver_ref: &str) -> Query {
    query.filter(
        ColumnRef::joined(Entity::Drivers, "driverRef"),
        FilterOp::EqIgnoreCase,
        driver_ref,
    )
}

pub fn results_for_driver(driver_ref: &str) -> Query {
    let query = Query::from(Entity::Results).join(Join::filter_only(Entity::Drivers));
    driver_ref_filter(query, driver_ref).order_by("resultId")
}

pub fn results_for_driver_between(driver_ref: &str, start: i32, end: i32) -> Query {
    let query = Query::from(Entity::Results)
        .join(Join::filter_only(Entity::Drivers))
        .join(Join::filter_only(Entity::Races))
        .join(Join::filter_only(Entity::Constructors));
    driver_ref_filter(query, driver_ref)
        .between(ColumnRef::joined(Entity::Races, "year"), start, end)
        .order_by_column(ColumnRef::joined(Entity::Races, "year"))
}

pub fn qualifying_for_race(race_id: i64) -> Query {
    Query::from(Entity::Qualifying)
        .eq("raceId", race_id)
        .join(Join::filter_only(Entity::Drivers))
        .join(Join::filter_only(Entity::Constructors))
        .join(Join::filter_only(Entity::Races))
        .order_by("position")
}

pub fn driver_standings(race_id: i64) -> Query {
    Query::from(Entity::DriverStandings)
        .select(&[
            "driverStandingsId",
            "driverId",
            "position",
            "points",
            "positionText",
            "wins",
            "raceId",
        ])
        .eq("raceId", race_id)
        .join(Join::required(Entity::Drivers).select(&["code", "forename", "surname", "driverRef"]))
        .order_by("position")
}

pub fn constructor_standings(race_id: i64) -> Query {
    Query::from(Entity::ConstructorStandings)
        .select(&[
            "constructorStandingsId",
            "constructorId",
            "position",
            "points",
            "positionText",
            "wins",
            "raceId",
        ])
        .eq("raceId", race_id)
        .join(
            Join::required(Entity::Constructors)
                .select(&["constructorRef", "name", "nationality", "url"]),
        )
        .order_by("position")
}
