//! Sensor reading domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sensor types known to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    SoilMoisture,
}

impl SensorKind {
    /// Wire name of the sensor type as the backend expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::SoilMoisture => "soil_moisture",
        }
    }

    /// Default measurement unit for this sensor type
    pub fn default_unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::SoilMoisture => "%",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(SensorKind::Temperature),
            "soil_moisture" => Ok(SensorKind::SoilMoisture),
            other => Err(format!(
                "unknown sensor type '{other}' (expected 'temperature' or 'soil_moisture')"
            )),
        }
    }
}

/// A single sensor reading to submit to the backend
///
/// `timestamp` is optional; the backend stamps the reading with the current
/// time when it is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub field_id: i64,
    pub sensor_type: SensorKind,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl SensorReading {
    /// Creates a reading with the sensor's default unit and no timestamp
    pub fn new(field_id: i64, sensor_type: SensorKind, value: f64) -> Self {
        Self {
            field_id,
            sensor_type,
            value,
            unit: sensor_type.default_unit().to_string(),
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_kind_wire_names() {
        assert_eq!(SensorKind::Temperature.as_str(), "temperature");
        assert_eq!(SensorKind::SoilMoisture.as_str(), "soil_moisture");
        assert_eq!("soil_moisture".parse::<SensorKind>(), Ok(SensorKind::SoilMoisture));
        assert!("humidity".parse::<SensorKind>().is_err());
    }

    #[test]
    fn test_reading_serializes_without_timestamp() {
        let reading = SensorReading::new(1, SensorKind::Temperature, 21.5);
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["sensor_type"], "temperature");
        assert_eq!(json["unit"], "°C");
        assert!(json.get("timestamp").is_none());
    }
}
