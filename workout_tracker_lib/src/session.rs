use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info, warn};

use crate::{
    config::TrackerConfig,
    error::{StorageError, TrackerError},
    form::WorkoutForm,
    storage::{KeyValueStore, Loaded, WorkoutStore},
    workout::{Coords, Workout},
};

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the user's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// The form is only ever open for a location picked on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormState {
    #[default]
    Hidden,
    Shown(Coords),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MapState {
    #[default]
    Uninitialized,
    Ready {
        center: Coords,
        zoom: f64,
        /// Pan duration in seconds when the last move should be animated.
        pan: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeolocationError {
    Unsupported,
    Denied,
    Failed,
}

/// All state of one page session: persisted workouts, the form and the map view.
pub struct Session<S: KeyValueStore, C: Clock = SystemClock> {
    store: WorkoutStore<S>,
    clock: C,
    config: TrackerConfig,
    workouts: Vec<Workout>,
    form: FormState,
    map: MapState,
    load_problems: Vec<String>,
}

/// A recorded workout, plus the write error if it could not be persisted.
#[derive(Debug)]
pub struct Submitted<'a> {
    pub workout: &'a Workout,
    pub save_error: Option<StorageError>,
}

impl<S: KeyValueStore> Session<S, SystemClock> {
    pub fn new(store: S, config: TrackerConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Loads any persisted workouts right away so the list can render before
    /// the map is ready.
    pub fn with_clock(store: S, clock: C, config: TrackerConfig) -> Self {
        let store = WorkoutStore::new(store, config.storage_key.clone());
        let Loaded { workouts, problems } = store.load();
        info!("Session started with {} stored workouts", workouts.len());

        Self {
            store,
            clock,
            config,
            workouts,
            load_problems: problems,
            form: FormState::Hidden,
            map: MapState::Uninitialized,
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// What was dropped while reading the stored workouts.
    pub fn load_problems(&self) -> &[String] {
        &self.load_problems
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn map(&self) -> MapState {
        self.map
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Result of the one-shot position request. On failure the map stays
    /// uninitialized for the rest of the session.
    pub fn locate(&mut self, position: Result<Coords, GeolocationError>) -> Result<(), TrackerError> {
        match position {
            Ok(center) => {
                info!("Position found: {}, {}", center.lat, center.lng);
                self.map = MapState::Ready { center, zoom: self.config.zoom, pan: None };
                Ok(())
            }
            Err(e) => {
                warn!("Geolocation failed: {e:?}");
                Err(TrackerError::GeolocationUnavailable)
            }
        }
    }

    pub fn map_clicked(&mut self, coords: Coords) {
        if self.map == MapState::Uninitialized {
            return;
        }
        debug!("Map clicked at {}, {}", coords.lat, coords.lng);
        self.form = FormState::Shown(coords);
    }

    /// Validates the form and records a new workout at the pending location.
    /// Nothing changes unless the whole submission is valid.
    pub fn submit_workout(&mut self, form: &WorkoutForm) -> Result<Submitted<'_>, TrackerError> {
        let FormState::Shown(coords) = self.form else {
            return Err(TrackerError::NoPendingLocation);
        };

        let input = form.parse()?;
        let workout = Workout::new(input, coords, &self.clock.now());
        info!("New workout {}: {}", workout.id, workout.description);

        let index = self.workouts.len();
        self.workouts.push(workout);
        self.form = FormState::Hidden;

        // A failed write leaves the in-memory list intact for this session.
        let save_error = self.store.save(&self.workouts).err();
        if let Some(e) = &save_error {
            warn!("Could not persist workouts: {e}");
        }

        Ok(Submitted { workout: &self.workouts[index], save_error })
    }

    /// Pans the map to the workout with the given id.
    pub fn focus_workout(&mut self, id: &str) -> Result<(), TrackerError> {
        let MapState::Ready { zoom, .. } = self.map else {
            return Ok(());
        };

        let workout = self
            .workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| TrackerError::RecordNotFound(id.to_owned()))?;

        self.map = MapState::Ready {
            center: workout.coords,
            zoom,
            pan: Some(self.config.pan_duration_secs),
        };
        Ok(())
    }

    /// Forgets every workout, persisted ones included.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        self.store.clear()?;
        self.workouts.clear();
        self.form = FormState::Hidden;
        info!("Workouts reset");
        Ok(())
    }
}
