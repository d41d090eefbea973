use serde::{Deserialize, Serialize};

/// The tables exposed by the dataset.
///
/// Every foreign key in the dataset carries the same column name as the
/// primary key it references (`races.circuitId` -> `circuits.circuitId`),
/// which is what join resolution relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Circuits,
    Constructors,
    Drivers,
    Races,
    Results,
    Qualifying,
    DriverStandings,
    ConstructorStandings,
}

impl Entity {
    pub const ALL: [Entity; 8] = [
        Entity::Circuits,
        Entity::Constructors,
        Entity::Drivers,
        Entity::Races,
        Entity::Results,
        Entity::Qualifying,
        Entity::DriverStandings,
        Entity::ConstructorStandings,
    ];

    /// Table name, also used as the key a joined row is embedded under.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Circuits => "circuits",
            Entity::Constructors => "constructors",
            Entity::Drivers => "drivers",
            Entity::Races => "races",
            Entity::Results => "results",
            Entity::Qualifying => "qualifying",
            Entity::DriverStandings => "driver_standings",
            Entity::ConstructorStandings => "constructor_standings",
        }
    }

    pub fn primary_key(&self) -> &'static str {
        match self {
            Entity::Circuits => "circuitId",
            Entity::Constructors => "constructorId",
            Entity::Drivers => "driverId",
            Entity::Races => "raceId",
            Entity::Results => "resultId",
            Entity::Qualifying => "qualifyId",
            Entity::DriverStandings => "driverStandingsId",
            Entity::ConstructorStandings => "constructorStandingsId",
        }
    }

    /// Every column of the table, in dataset order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Circuits => &[
                "circuitId", "circuitRef", "name", "location", "country", "lat", "lng", "url",
            ],
            Entity::Constructors => &[
                "constructorId", "constructorRef", "name", "nationality", "url",
            ],
            Entity::Drivers => &[
                "driverId", "driverRef", "number", "code", "forename", "surname", "dob",
                "nationality", "url",
            ],
            Entity::Races => &[
                "raceId", "year", "round", "circuitId", "name", "date", "time", "url",
            ],
            Entity::Results => &[
                "resultId", "raceId", "driverId", "constructorId", "number", "grid",
                "position", "positionText", "positionOrder", "points", "laps", "time",
                "milliseconds", "fastestLap", "rank", "fastestLapTime", "fastestLapSpeed",
                "statusId",
            ],
            Entity::Qualifying => &[
                "qualifyId", "raceId", "driverId", "constructorId", "number", "position", "q1",
                "q2", "q3",
            ],
            Entity::DriverStandings => &[
                "driverStandingsId", "raceId", "driverId", "points", "position",
                "positionText", "wins",
            ],
            Entity::ConstructorStandings => &[
                "constructorStandingsId", "raceId", "constructorId", "points", "position",
                "positionText", "wins",
            ],
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    /// The column on `self` referencing `target`, if the schema has one.
    pub fn foreign_key_to(&self, target: Entity) -> Option<&'static str> {
        let key = target.primary_key();
        if *self != target && self.has_column(key) {
            Some(key)
        } else {
            None
        }
    }

    /// Human-readable kind used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Circuits => "Circuit",
            Entity::Constructors => "Constructor",
            Entity::Drivers => "Driver",
            Entity::Races => "Race",
            Entity::Results => "Result",
            Entity::Qualifying => "Qualifying entry",
            Entity::DriverStandings => "Driver standing",
            Entity::ConstructorStandings => "Constructor standing",
        }
    }

    /// Column holding the human-readable reference code, for the entities that have one.
    pub fn ref_column(&self) -> Option<&'static str> {
        match self {
            Entity::Circuits => Some("circuitRef"),
            Entity::Constructors => Some("constructorRef"),
            Entity::Drivers => Some("driverRef"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
