use workout_tracker_lib::workout::Workout;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub workouts: Vec<Workout>,
    pub select_workout: Callback<String>,
    pub reset: Callback<()>,
    pub children: Html,
}

/// Sidebar: the form slot followed by the workouts, newest first.
#[function_component]
pub fn Panel(props: &Props) -> Html {
    let on_reset = {
        let reset = props.reset.clone();
        Callback::from(move |_| reset.emit(()))
    };

    html! {
        <div class="sidebar">
            <ul class="workouts">
                {props.children.clone()}
                {for props.workouts.iter().rev().map(|workout| html! {
                    <WorkoutEntry workout={workout.clone()} on_select={props.select_workout.clone()} />
                })}
            </ul>
            if !props.workouts.is_empty() {
                <button class="reset-btn" onclick={on_reset}>{"Reset"}</button>
            }
        </div>
    }
}

#[derive(PartialEq, Properties, Clone)]
struct EntryProps {
    workout: Workout,
    on_select: Callback<String>,
}

#[function_component]
fn WorkoutEntry(props: &EntryProps) -> Html {
    let workout = &props.workout;

    let onclick = {
        let on_select = props.on_select.clone();
        let id = workout.id.clone();
        Callback::from(move |_| on_select.emit(id.clone()))
    };

    html! {
        <li class={classes!("workout", format!("workout--{}", workout.kind().name()))} data-id={workout.id.clone()} {onclick}>
            <h2 class="workout__title">{workout.description.clone()}</h2>
            {for workout.detail_rows().into_iter().map(|row| html! {
                <div class="workout__details">
                    <span class="workout__icon">{row.icon}</span>
                    <span class="workout__value">{row.value}</span>
                    <span class="workout__unit">{row.unit}</span>
                </div>
            })}
        </li>
    }
}
