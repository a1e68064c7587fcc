//! Entity types returned by the reporting service
//!
//! Trimmed to the fields the cached clients read, sort on, or normalize.

use serde::{Deserialize, Serialize};

/// An aircraft, cached in per-model lists under `Aircraft.<modelId>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    pub id: i32,
    pub model_id: i32,
    pub registration: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Year of manufacture; the service encodes "unknown" as 0, which the
    /// client normalizes to `None`
    #[serde(default)]
    pub manufactured: Option<u32>,
}

/// An airline, embedded in flight payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub id: i32,
    pub name: String,
}

/// A flight, cached in lists keyed by route, airline or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: i32,
    pub number: String,
    pub embarkation: String,
    pub destination: String,
    pub airline: Airline,
}

/// An airport, cached under the `Airports` root list and per-code keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub id: i32,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub country_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aircraft_deserialize() {
        let json = r#"{"id":1,"modelId":42,"registration":"G-ABCD","manufactured":0}"#;
        let aircraft: Aircraft = serde_json::from_str(json).unwrap();

        assert_eq!(aircraft.id, 1);
        assert_eq!(aircraft.model_id, 42);
        assert_eq!(aircraft.registration, "G-ABCD");
        assert_eq!(aircraft.serial_number, None);
        assert_eq!(aircraft.manufactured, Some(0));
    }

    #[test]
    fn test_flight_deserialize() {
        let json = r#"{
            "id": 7,
            "number": "BA123",
            "embarkation": "LGW",
            "destination": "RMU",
            "airline": {"id": 3, "name": "EasyJet"}
        }"#;
        let flight: Flight = serde_json::from_str(json).unwrap();

        assert_eq!(flight.number, "BA123");
        assert_eq!(flight.airline.name, "EasyJet");
    }

    #[test]
    fn test_airport_roundtrip() {
        let airport = Airport {
            id: 1,
            code: "LGW".to_string(),
            name: "Gatwick".to_string(),
            country_id: Some(2),
        };
        let json = serde_json::to_string(&airport).unwrap();
        let back: Airport = serde_json::from_str(&json).unwrap();

        assert_eq!(back, airport);
    }
}
