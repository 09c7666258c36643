use crate::{
    error::TrackerError,
    workout::{WorkoutInput, WorkoutKind},
};

/// Raw values of the workout form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// The one kind specific field the form shows at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraField {
    Cadence,
    Elevation,
}

impl WorkoutForm {
    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            WorkoutKind::Running => WorkoutKind::Cycling,
            WorkoutKind::Cycling => WorkoutKind::Running,
        };
    }

    pub fn visible_extra_field(&self) -> ExtraField {
        match self.kind {
            WorkoutKind::Running => ExtraField::Cadence,
            WorkoutKind::Cycling => ExtraField::Elevation,
        }
    }

    /// Empties the numeric fields. The selected kind stays.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    pub fn parse(&self) -> Result<WorkoutInput, TrackerError> {
        let distance = coerce(&self.distance);
        let duration = coerce(&self.duration);

        let input = match self.kind {
            WorkoutKind::Running => {
                let cadence = coerce(&self.cadence);
                if !all_finite(&[distance, duration, cadence]) || !all_positive(&[distance, duration, cadence]) {
                    return Err(TrackerError::InvalidInput);
                }
                WorkoutInput::Running { distance, duration, cadence }
            }
            WorkoutKind::Cycling => {
                let elevation_gain = coerce(&self.elevation);
                if !all_finite(&[distance, duration, elevation_gain]) || !all_positive(&[distance, duration]) {
                    return Err(TrackerError::InvalidInput);
                }
                WorkoutInput::Cycling { distance, duration, elevation_gain }
            }
        };

        Ok(input)
    }
}

/// Numeric coercion of a text field: blank is 0, anything unparsable is NaN.
fn coerce(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.)
}
