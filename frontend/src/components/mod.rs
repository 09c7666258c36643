pub mod map_component;
pub mod panel;
pub mod workout_form;
