use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A map position, stored as `[lat, lng]` like the map widget hands it out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("unknown workout kind: {other}")),
        }
    }
}

/// Validated numbers from the workout form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Running { distance: f64, duration: f64, cadence: f64 },
    Cycling { distance: f64, duration: f64, elevation_gain: f64 },
}

/// Kind specific fields. The `type` tag is persisted with the record so that
/// loading restores the right variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    pub description: String,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

/// One row of a list entry, e.g. `⏱ 30 min`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl DetailRow {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

impl Workout {
    /// Builds a record from already validated input. The description uses the
    /// month and day of `created_at` in its own offset.
    pub fn new<Tz: TimeZone>(input: WorkoutInput, coords: Coords, created_at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        match input {
            WorkoutInput::Running { distance, duration, cadence } => {
                Self::running(coords, distance, duration, cadence, created_at)
            }
            WorkoutInput::Cycling { distance, duration, elevation_gain } => {
                Self::cycling(coords, distance, duration, elevation_gain, created_at)
            }
        }
    }

    pub fn running<Tz: TimeZone>(coords: Coords, distance: f64, duration: f64, cadence: f64, created_at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let details = WorkoutDetails::Running { cadence, pace: duration / distance };
        Self::with_details(coords, distance, duration, details, created_at)
    }

    pub fn cycling<Tz: TimeZone>(coords: Coords, distance: f64, duration: f64, elevation_gain: f64, created_at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let details = WorkoutDetails::Cycling { elevation_gain, speed: distance / (duration / 60.) };
        Self::with_details(coords, distance, duration, details, created_at)
    }

    fn with_details<Tz: TimeZone>(coords: Coords, distance: f64, duration: f64, details: WorkoutDetails, created_at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };

        Self {
            id: id_from_timestamp(created_at.timestamp_millis()),
            created_at: created_at.with_timezone(&Utc),
            coords,
            distance,
            duration,
            description: format!("{} on {}", kind.label(), created_at.format("%B %-d")),
            details,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km for running, speed in km/h for cycling.
    pub fn metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running { pace, .. } => pace,
            WorkoutDetails::Cycling { speed, .. } => speed,
        }
    }

    pub fn popup_content(&self) -> String {
        format!("{} {}", self.kind().icon(), self.description)
    }

    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.kind().name())
    }

    pub fn detail_rows(&self) -> Vec<DetailRow> {
        let mut rows = vec![
            DetailRow::new(self.kind().icon(), self.distance.to_string(), "km"),
            DetailRow::new("⏱", self.duration.to_string(), "min"),
        ];

        match self.details {
            WorkoutDetails::Running { cadence, pace } => {
                rows.push(DetailRow::new("⚡️", format!("{:.1}", pace), "min/km"));
                rows.push(DetailRow::new("🦶🏼", cadence.to_string(), "spm"));
            }
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                rows.push(DetailRow::new("⚡️", format!("{:.1}", speed), "km/h"));
                rows.push(DetailRow::new("⛰", elevation_gain.to_string(), "m"));
            }
        }

        rows
    }
}

/// Last 10 digits of the millisecond timestamp.
fn id_from_timestamp(millis: i64) -> String {
    let digits = millis.to_string();
    let start = digits.len().saturating_sub(10);
    digits[start..].to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn march_7() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-07T09:30:00+01:00").unwrap()
    }

    #[test]
    fn running_pace_is_duration_per_distance() {
        let workout = Workout::running(Coords::new(56.1, 10.2), 5.2, 24., 178., &march_7());
        assert_eq!(workout.metric(), 24. / 5.2);
        assert_eq!(workout.kind(), WorkoutKind::Running);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let workout = Workout::cycling(Coords::new(56.1, 10.2), 27., 95., -223., &march_7());
        assert_eq!(workout.metric(), 27. / (95. / 60.));
        assert_eq!(workout.kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn description_uses_kind_and_local_date() {
        let running = Workout::running(Coords::new(0., 0.), 5., 25., 170., &march_7());
        assert_eq!(running.description, "Running on March 7");

        // 23:30 UTC on the 6th is already the 7th at +01:00
        let late = DateTime::parse_from_rfc3339("2024-03-07T00:30:00+01:00").unwrap();
        let cycling = Workout::cycling(Coords::new(0., 0.), 20., 60., 100., &late);
        assert_eq!(cycling.description, "Cycling on March 7");
        assert_eq!(cycling.created_at.to_rfc3339(), "2024-03-06T23:30:00+00:00");
    }

    #[test]
    fn id_is_last_ten_digits_of_millis() {
        let workout = Workout::running(Coords::new(0., 0.), 5., 25., 170., &march_7());
        let millis = march_7().timestamp_millis().to_string();
        assert_eq!(workout.id.len(), 10);
        assert!(millis.ends_with(&workout.id));

        assert_eq!(id_from_timestamp(42), "42");
    }

    #[test]
    fn new_dispatches_on_input() {
        let input = WorkoutInput::Cycling { distance: 10., duration: 30., elevation_gain: 5. };
        let workout = Workout::new(input, Coords::new(1., 2.), &march_7());
        assert_eq!(workout.details, WorkoutDetails::Cycling { elevation_gain: 5., speed: 20. });
        assert_eq!(workout.coords, Coords::new(1., 2.));
    }

    #[test]
    fn popup_and_rows() {
        let workout = Workout::running(Coords::new(0., 0.), 4., 30., 160., &march_7());
        assert_eq!(workout.popup_content(), "🏃‍♂️ Running on March 7");
        assert_eq!(workout.popup_class(), "running-popup");

        let rows = workout.detail_rows();
        let values: Vec<_> = rows.iter().map(|r| (r.value.as_str(), r.unit)).collect();
        assert_eq!(values, vec![("4", "km"), ("30", "min"), ("7.5", "min/km"), ("160", "spm")]);

        let cycling = Workout::cycling(Coords::new(0., 0.), 10., 45., -12.5, &march_7());
        let rows = cycling.detail_rows();
        assert_eq!(rows[0].icon, "🚴‍♀️");
        assert_eq!(rows[2].value, "13.3");
        assert_eq!(rows[2].unit, "km/h");
        assert_eq!(rows[3].value, "-12.5");
    }

    #[test]
    fn serializes_to_flat_tagged_object() {
        let workout = Workout::cycling(Coords::new(56.5, 10.25), 10., 30., 40., &march_7());
        let value = serde_json::to_value(&workout).unwrap();

        assert_eq!(value["type"], "cycling");
        assert_eq!(value["coords"], serde_json::json!([56.5, 10.25]));
        assert_eq!(value["elevationGain"], 40.);
        assert_eq!(value["speed"], 20.);
        assert_eq!(value["description"], "Cycling on March 7");
        assert!(value.get("date").is_some());
    }

    #[test]
    fn kind_parses_form_values() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!("cycling".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }
}
