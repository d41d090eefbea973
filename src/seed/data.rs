use serde_json::{json, Value};

use crate::store::{MemoryProvider, ProviderError};

/// A small slice of the championship: three seasons across a handful of
/// circuits, enough to exercise every endpoint.
///
/// Race 6 (2011 Australian Grand Prix) deliberately has no results,
/// qualifying or standings, and Silverstone hosts no races.
pub fn seed_dataset() -> Value {
    json!({
        "circuits": [
            {"circuitId": 1, "circuitRef": "albert_park", "name": "Albert Park Grand Prix Circuit", "location": "Melbourne", "country": "Australia", "lat": -37.8497, "lng": 144.968, "url": "http://en.wikipedia.org/wiki/Melbourne_Grand_Prix_Circuit"},
            {"circuitId": 3, "circuitRef": "bahrain", "name": "Bahrain International Circuit", "location": "Sakhir", "country": "Bahrain", "lat": 26.0325, "lng": 50.5106, "url": "http://en.wikipedia.org/wiki/Bahrain_International_Circuit"},
            {"circuitId": 9, "circuitRef": "silverstone", "name": "Silverstone Circuit", "location": "Silverstone", "country": "UK", "lat": 52.0786, "lng": -1.01694, "url": "http://en.wikipedia.org/wiki/Silverstone_Circuit"},
            {"circuitId": 14, "circuitRef": "monza", "name": "Autodromo Nazionale di Monza", "location": "Monza", "country": "Italy", "lat": 45.6156, "lng": 9.28111, "url": "http://en.wikipedia.org/wiki/Autodromo_Nazionale_Monza"}
        ],
        "constructors": [
            {"constructorId": 1, "constructorRef": "mclaren", "name": "McLaren", "nationality": "British", "url": "http://en.wikipedia.org/wiki/McLaren"},
            {"constructorId": 6, "constructorRef": "ferrari", "name": "Ferrari", "nationality": "Italian", "url": "http://en.wikipedia.org/wiki/Scuderia_Ferrari"},
            {"constructorId": 9, "constructorRef": "red_bull", "name": "Red Bull", "nationality": "Austrian", "url": "http://en.wikipedia.org/wiki/Red_Bull_Racing"},
            {"constructorId": 23, "constructorRef": "brawn", "name": "Brawn", "nationality": "British", "url": "http://en.wikipedia.org/wiki/Brawn_GP"}
        ],
        "drivers": [
            {"driverId": 1, "driverRef": "hamilton", "number": 44, "code": "HAM", "forename": "Lewis", "surname": "Hamilton", "dob": "1985-01-07", "nationality": "British", "url": "http://en.wikipedia.org/wiki/Lewis_Hamilton"},
            {"driverId": 4, "driverRef": "alonso", "number": 14, "code": "ALO", "forename": "Fernando", "surname": "Alonso", "dob": "1981-07-29", "nationality": "Spanish", "url": "http://en.wikipedia.org/wiki/Fernando_Alonso"},
            {"driverId": 18, "driverRef": "button", "number": 22, "code": "BUT", "forename": "Jenson", "surname": "Button", "dob": "1980-01-19", "nationality": "British", "url": "http://en.wikipedia.org/wiki/Jenson_Button"},
            {"driverId": 20, "driverRef": "vettel", "number": 5, "code": "VET", "forename": "Sebastian", "surname": "Vettel", "dob": "1987-07-03", "nationality": "German", "url": "http://en.wikipedia.org/wiki/Sebastian_Vettel"},
            {"driverId": 22, "driverRef": "barrichello", "number": null, "code": "BAR", "forename": "Rubens", "surname": "Barrichello", "dob": "1972-05-23", "nationality": "Brazilian", "url": "http://en.wikipedia.org/wiki/Rubens_Barrichello"}
        ],
        "races": [
            {"raceId": 1, "year": 2009, "round": 1, "circuitId": 1, "name": "Australian Grand Prix", "date": "2009-03-29", "time": "06:00:00", "url": "http://en.wikipedia.org/wiki/2009_Australian_Grand_Prix"},
            {"raceId": 4, "year": 2009, "round": 4, "circuitId": 3, "name": "Bahrain Grand Prix", "date": "2009-04-26", "time": "12:00:00", "url": "http://en.wikipedia.org/wiki/2009_Bahrain_Grand_Prix"},
            {"raceId": 12, "year": 2009, "round": 12, "circuitId": 14, "name": "Italian Grand Prix", "date": "2009-09-13", "time": "12:00:00", "url": "http://en.wikipedia.org/wiki/2009_Italian_Grand_Prix"},
            {"raceId": 350, "year": 2010, "round": 14, "circuitId": 14, "name": "Italian Grand Prix", "date": "2010-09-12", "time": "12:00:00", "url": "http://en.wikipedia.org/wiki/2010_Italian_Grand_Prix"},
            {"raceId": 841, "year": 2011, "round": 1, "circuitId": 1, "name": "Australian Grand Prix", "date": "2011-03-27", "time": "06:00:00", "url": "http://en.wikipedia.org/wiki/2011_Australian_Grand_Prix"},
            {"raceId": 872, "year": 2012, "round": 13, "circuitId": 14, "name": "Italian Grand Prix", "date": "2012-09-09", "time": "12:00:00", "url": "http://en.wikipedia.org/wiki/2012_Italian_Grand_Prix"}
        ],
        "results": [
            {"resultId": 7554, "raceId": 1, "driverId": 18, "constructorId": 23, "number": 22, "grid": 1, "position": 1, "positionText": "1", "positionOrder": 1, "points": 10.0, "laps": 58, "time": "1:34:15.784", "milliseconds": 5655784, "fastestLap": 17, "rank": 3, "fastestLapTime": "1:28.020", "fastestLapSpeed": "216.891", "statusId": 1},
            {"resultId": 7555, "raceId": 1, "driverId": 22, "constructorId": 23, "number": 23, "grid": 2, "position": 2, "positionText": "2", "positionOrder": 2, "points": 8.0, "laps": 58, "time": "+0.807", "milliseconds": 5656591, "fastestLap": 43, "rank": 5, "fastestLapTime": "1:28.140", "fastestLapSpeed": "216.596", "statusId": 1},
            {"resultId": 7557, "raceId": 1, "driverId": 1, "constructorId": 1, "number": 1, "grid": 18, "position": 4, "positionText": "4", "positionOrder": 4, "points": 5.0, "laps": 58, "time": "+2.914", "milliseconds": 5658698, "fastestLap": 40, "rank": 6, "fastestLapTime": "1:28.208", "fastestLapSpeed": "216.429", "statusId": 1},
            {"resultId": 7556, "raceId": 1, "driverId": 20, "constructorId": 9, "number": 15, "grid": 3, "position": null, "positionText": "R", "positionOrder": 13, "points": 0.0, "laps": 56, "time": null, "milliseconds": null, "fastestLap": 54, "rank": 4, "fastestLapTime": "1:28.140", "fastestLapSpeed": "216.596", "statusId": 4},
            {"resultId": 20779, "raceId": 350, "driverId": 4, "constructorId": 6, "number": 8, "grid": 1, "position": 1, "positionText": "1", "positionOrder": 1, "points": 25.0, "laps": 53, "time": "1:16:24.572", "milliseconds": 4584572, "fastestLap": 52, "rank": 1, "fastestLapTime": "1:24.139", "fastestLapSpeed": "247.860", "statusId": 1},
            {"resultId": 20780, "raceId": 350, "driverId": 18, "constructorId": 1, "number": 1, "grid": 2, "position": 2, "positionText": "2", "positionOrder": 2, "points": 18.0, "laps": 53, "time": "+2.938", "milliseconds": 4587510, "fastestLap": 50, "rank": 3, "fastestLapTime": "1:24.577", "fastestLapSpeed": "246.577", "statusId": 1},
            {"resultId": 20782, "raceId": 350, "driverId": 20, "constructorId": 9, "number": 5, "grid": 6, "position": 4, "positionText": "4", "positionOrder": 4, "points": 12.0, "laps": 53, "time": "+28.640", "milliseconds": 4613212, "fastestLap": 53, "rank": 5, "fastestLapTime": "1:24.806", "fastestLapSpeed": "245.911", "statusId": 1},
            {"resultId": 20798, "raceId": 350, "driverId": 1, "constructorId": 1, "number": 2, "grid": 5, "position": null, "positionText": "R", "positionOrder": 20, "points": 0.0, "laps": 0, "time": null, "milliseconds": null, "fastestLap": null, "rank": null, "fastestLapTime": null, "fastestLapSpeed": null, "statusId": 4},
            {"resultId": 21467, "raceId": 872, "driverId": 1, "constructorId": 1, "number": 4, "grid": 1, "position": 1, "positionText": "1", "positionOrder": 1, "points": 25.0, "laps": 53, "time": "1:19:41.221", "milliseconds": 4781221, "fastestLap": 52, "rank": 2, "fastestLapTime": "1:27.239", "fastestLapSpeed": "239.058", "statusId": 1},
            {"resultId": 21469, "raceId": 872, "driverId": 4, "constructorId": 6, "number": 5, "grid": 10, "position": 3, "positionText": "3", "positionOrder": 3, "points": 15.0, "laps": 53, "time": "+20.591", "milliseconds": 4801812, "fastestLap": 50, "rank": 4, "fastestLapTime": "1:27.467", "fastestLapSpeed": "238.435", "statusId": 1}
        ],
        "qualifying": [
            {"qualifyId": 1553, "raceId": 1, "driverId": 22, "constructorId": 23, "number": 23, "position": 2, "q1": "1:25.006", "q2": "1:24.783", "q3": "1:26.505"},
            {"qualifyId": 1552, "raceId": 1, "driverId": 18, "constructorId": 23, "number": 22, "position": 1, "q1": "1:25.211", "q2": "1:24.855", "q3": "1:26.202"},
            {"qualifyId": 1554, "raceId": 1, "driverId": 20, "constructorId": 9, "number": 15, "position": 3, "q1": "1:25.938", "q2": "1:25.121", "q3": "1:26.830"},
            {"qualifyId": 1566, "raceId": 1, "driverId": 1, "constructorId": 1, "number": 1, "position": 15, "q1": "1:26.454", "q2": null, "q3": null}
        ],
        "driver_standings": [
            {"driverStandingsId": 9, "raceId": 1, "driverId": 1, "points": 5.0, "position": 3, "positionText": "3", "wins": 0},
            {"driverStandingsId": 7, "raceId": 1, "driverId": 18, "points": 10.0, "position": 1, "positionText": "1", "wins": 1},
            {"driverStandingsId": 8, "raceId": 1, "driverId": 22, "points": 8.0, "position": 2, "positionText": "2", "wins": 0},
            {"driverStandingsId": 10, "raceId": 1, "driverId": 20, "points": 0.0, "position": 4, "positionText": "4", "wins": 0}
        ],
        "constructor_standings": [
            {"constructorStandingsId": 3, "raceId": 1, "constructorId": 9, "points": 0.0, "position": 3, "positionText": "3", "wins": 0},
            {"constructorStandingsId": 1, "raceId": 1, "constructorId": 23, "points": 18.0, "position": 1, "positionText": "1", "wins": 1},
            {"constructorStandingsId": 2, "raceId": 1, "constructorId": 1, "points": 5.0, "position": 2, "positionText": "2", "wins": 0}
        ]
    })
}

/// In-memory provider loaded with [`seed_dataset`].
pub fn seed_provider() -> Result<MemoryProvider, ProviderError> {
    MemoryProvider::from_dataset(seed_dataset())
}
