use gloo_console::error;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::form::{ExtraField, WorkoutForm};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub form: WorkoutForm,
    pub hidden: bool,
    pub on_change: Callback<WorkoutForm>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutFormComponent(props: &Props) -> Html {
    let distance_ref = use_node_ref();

    {
        let distance_ref = distance_ref.clone();
        use_effect_with(props.hidden, move |hidden| {
            if !*hidden {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    if let Err(e) = input.focus() {
                        error!(format!("Could not focus distance input: {:?}", e));
                    }
                }
            }
        });
    }

    let on_kind_change = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut form = form.clone();
            if select.value() != form.kind.name() {
                form.toggle_kind();
            }
            on_change.emit(form);
        })
    };

    let field = |update: fn(&mut WorkoutForm, String)| {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form = form.clone();
            update(&mut form, input.value());
            on_change.emit(form);
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let extra = props.form.visible_extra_field();
    let row_class = |shown: bool| classes!("form__row", (!shown).then_some("form__row--hidden"));

    html! {
        <form class={classes!("form", props.hidden.then_some("hidden"))} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={on_kind_change}>
                    <option value="running" selected={extra == ExtraField::Cadence}>{"Running"}</option>
                    <option value="cycling" selected={extra == ExtraField::Elevation}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input class="form__input form__input--distance" placeholder="km" ref={distance_ref}
                    value={props.form.distance.clone()} oninput={field(|f, v| f.distance = v)} />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input class="form__input form__input--duration" placeholder="min"
                    value={props.form.duration.clone()} oninput={field(|f, v| f.duration = v)} />
            </div>
            <div class={row_class(extra == ExtraField::Cadence)}>
                <label class="form__label">{"Cadence"}</label>
                <input class="form__input form__input--cadence" placeholder="step/min"
                    value={props.form.cadence.clone()} oninput={field(|f, v| f.cadence = v)} />
            </div>
            <div class={row_class(extra == ExtraField::Elevation)}>
                <label class="form__label">{"Elev Gain"}</label>
                <input class="form__input form__input--elevation" placeholder="meters"
                    value={props.form.elevation.clone()} oninput={field(|f, v| f.elevation = v)} />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
