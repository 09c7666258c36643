use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use workout_tracker_lib::{session::GeolocationError, workout::Coords};
use yew::Callback;

// GeolocationPositionError.PERMISSION_DENIED
const PERMISSION_DENIED: u16 = 1;

/// One-shot position request. `callback` fires exactly once, unless the
/// browser never answers.
pub fn current_position(callback: Callback<Result<Coords, GeolocationError>>) {
    let Ok(geolocation) = window().navigator().geolocation() else {
        callback.emit(Err(GeolocationError::Unsupported));
        return;
    };

    let on_success = {
        let callback = callback.clone();
        Closure::once_into_js(move |position: JsValue| {
            callback.emit(read_coords(&position).ok_or(GeolocationError::Failed));
        })
    };

    let on_error = {
        let callback = callback.clone();
        Closure::once_into_js(move |error: JsValue| {
            let code = Reflect::get(&error, &"code".into()).ok().and_then(|c| c.as_f64()).map(|c| c as u16);
            let error = match code {
                Some(PERMISSION_DENIED) => GeolocationError::Denied,
                _ => GeolocationError::Failed,
            };
            callback.emit(Err(error));
        })
    };

    if geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
        .is_err()
    {
        callback.emit(Err(GeolocationError::Failed));
    }
}

/// `position.coords.{latitude, longitude}`
fn read_coords(position: &JsValue) -> Option<Coords> {
    let coords = Reflect::get(position, &"coords".into()).ok()?;
    let lat = Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Some(Coords::new(lat, lng))
}
