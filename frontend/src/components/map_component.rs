use gloo_console::{error, info};
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys::{Object, Reflect},
    Element, HtmlElement, Node,
};
use workout_tracker_lib::{
    config::TrackerConfig,
    session::MapState,
    workout::{Coords, Workout},
};
use yew::prelude::*;

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    /// One per workout, in list order. Workouts are only ever appended.
    markers: Vec<Marker>,
    ready: bool,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub state: MapState,
    pub workouts: Vec<Workout>,
    pub config: TrackerConfig,
    pub on_click: Callback<Coords>,
    /// Bumped on every list selection so a repeated selection pans again.
    pub focus_count: usize,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    fn sync(&mut self, props: &Props, old_props: Option<&Props>) {
        let MapState::Ready { center, zoom, pan } = props.state else {
            return;
        };

        if !self.ready {
            self.ready = true;
            self.map.set_view(&to_lat_lng(center), zoom);
            add_tile_layer(&self.map, &props.config);
            info!(format!("Map ready at {}, {}", center.lat, center.lng));
        } else if old_props.is_some_and(|old| old.state != props.state || old.focus_count != props.focus_count) {
            match view_options(pan) {
                Ok(opts) => {
                    self.map.set_view_with_options(&to_lat_lng(center), zoom, &opts);
                }
                Err(e) => error!(format!("Could not build view options: {:?}", e)),
            }
        }

        let first_new = self.markers.len().min(props.workouts.len());
        for workout in &props.workouts[first_new..] {
            let marker = make_marker(workout, &props.config);
            marker.add_to(&self.map);
            marker.open_popup();
            self.markers.push(marker);
        }
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_id("map");

        let leaflet_map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            map: leaflet_map,
            container,
            markers: Vec::new(),
            ready: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let on_click = ctx.props().on_click.clone();
            self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
                let lat_lng = event.lat_lng();
                on_click.emit(Coords::new(lat_lng.lat(), lat_lng.lng()));
            }));

            self.sync(ctx.props(), None);
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.map.invalidate_size(false);
        self.sync(ctx.props(), Some(old_props));
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            {self.render_map()}
        }
    }
}

fn to_lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.lat, coords.lng)
}

/// Leaflet `setView` options, `{ animate, pan: { duration } }` when panning.
fn view_options(pan: Option<f64>) -> Result<JsValue, JsValue> {
    let opts = Object::new();
    if let Some(duration) = pan {
        let pan_opts = Object::new();
        Reflect::set(&pan_opts, &"duration".into(), &duration.into())?;
        Reflect::set(&opts, &"animate".into(), &true.into())?;
        Reflect::set(&opts, &"pan".into(), &pan_opts)?;
    }
    Ok(opts.into())
}

fn make_marker(workout: &Workout, config: &TrackerConfig) -> Marker {
    let opts = PopupOptions::default();
    opts.set_max_width(config.popup_max_width);
    opts.set_min_width(config.popup_min_width);
    opts.set_auto_close(false);
    opts.set_close_on_click(false);
    opts.set_class_name(workout.popup_class());

    let popup = Popup::new(&opts, None);
    popup.set_content(&workout.popup_content().into());

    let marker = Marker::new(&to_lat_lng(workout.coords));
    marker.bind_popup(&popup);
    marker
}

fn add_tile_layer(map: &Map, config: &TrackerConfig) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(config.tile_attribution.clone());
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}
