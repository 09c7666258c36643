use crate::components::{map_component::MapComponent, panel::Panel, workout_form::WorkoutFormComponent};
use gloo_console::{error, info, warn};
use gloo_utils::window;
use local_storage::LocalStorage;
use workout_tracker_lib::{
    config::TrackerConfig,
    form::WorkoutForm,
    session::{FormState, GeolocationError, Session},
    workout::Coords,
    TrackerError,
};
use yew::prelude::*;

mod components;
mod geolocation;
mod local_storage;

enum MainMsg {
    Located(Result<Coords, GeolocationError>),
    MapClicked(Coords),
    FormChanged(WorkoutForm),
    SubmitWorkout,
    FocusWorkout(String),
    Reset,
}

struct Model {
    session: Session<LocalStorage>,
    form: WorkoutForm,
    focus_count: usize,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        geolocation::current_position(ctx.link().callback(MainMsg::Located));

        let session = Session::new(LocalStorage::new(), TrackerConfig::default());
        for problem in session.load_problems() {
            warn!(problem.clone());
        }

        Self {
            session,
            form: WorkoutForm::default(),
            focus_count: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(position) => {
                if let Err(e) = self.session.locate(position) {
                    alert(&e);
                }
            }
            MainMsg::MapClicked(coords) => {
                self.session.map_clicked(coords);
            }
            MainMsg::FormChanged(form) => {
                self.form = form;
            }
            MainMsg::SubmitWorkout => match self.session.submit_workout(&self.form) {
                Ok(submitted) => {
                    info!(format!("Added workout {}", submitted.workout.id));
                    if let Some(e) = submitted.save_error {
                        error!(format!("Workout not saved: {}", e));
                    }
                    self.form.clear();
                }
                Err(e) => alert(&e),
            },
            MainMsg::FocusWorkout(id) => match self.session.focus_workout(&id) {
                Ok(()) => self.focus_count += 1,
                Err(e) => warn!(format!("{}", e)),
            },
            MainMsg::Reset => {
                if let Err(e) = self.session.reset() {
                    error!(format!("Reset failed: {}", e));
                }
                if let Err(e) = window().location().reload() {
                    error!(format!("Reload failed: {:?}", e));
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <>
                <Panel
                    workouts={self.session.workouts().to_vec()}
                    select_workout={link.callback(MainMsg::FocusWorkout)}
                    reset={link.callback(|()| MainMsg::Reset)}
                >
                    <WorkoutFormComponent
                        form={self.form.clone()}
                        hidden={self.session.form() == FormState::Hidden}
                        on_change={link.callback(MainMsg::FormChanged)}
                        on_submit={link.callback(|()| MainMsg::SubmitWorkout)}
                    />
                </Panel>
                <MapComponent
                    state={self.session.map()}
                    workouts={self.session.workouts().to_vec()}
                    config={self.session.config().clone()}
                    on_click={link.callback(MainMsg::MapClicked)}
                    focus_count={self.focus_count}
                />
            </>
        }
    }
}

/// Blocking alert for the errors the user has to act on; everything else is
/// only logged.
fn alert(e: &TrackerError) {
    match e.user_message() {
        Some(message) => {
            if let Err(e) = window().alert_with_message(message) {
                error!(format!("Could not show alert: {:?}", e));
            }
        }
        None => warn!(format!("{}", e)),
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
