use taurus_funnel::carousel::{RingLayout, RING_AUTOPLAY_MS, RING_DEPTH_PX};
use yew::prelude::*;

use crate::components::carousel::{use_autoplay, CarouselAction, CarouselModel};

#[derive(Clone, PartialEq)]
pub struct RingItem {
    pub image: AttrValue,
    pub caption: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct Carousel3dProps {
    pub items: Vec<RingItem>,
}

/// Rotating ring of items around the horizontal axis.
#[function_component(Carousel3d)]
pub fn carousel_3d(props: &Carousel3dProps) -> Html {
    let count = props.items.len();
    let model = use_reducer(|| CarouselModel::new(count));
    let layout = RingLayout::new(count, RING_DEPTH_PX);

    let autoplay = {
        let model = model.clone();
        use_autoplay(
            RING_AUTOPLAY_MS,
            count > 0,
            Callback::from(move |_| model.dispatch(CarouselAction::Next)),
        )
    };

    if count == 0 {
        return html! {};
    }

    let navigate = |action: CarouselAction| {
        let model = model.clone();
        let manual = autoplay.manual.clone();
        Callback::from(move |_: MouseEvent| {
            model.dispatch(action);
            manual.emit(());
        })
    };
    let on_prev = navigate(CarouselAction::Prev);
    let on_next = navigate(CarouselAction::Next);

    html! {
        <div class="carousel-3d" onmouseenter={autoplay.on_enter} onmouseleave={autoplay.on_leave}>
            <div class="carousel-inner" style={format!("transform: {};", layout.ring_transform(model.current()))}>
                { for props.items.iter().enumerate().map(|(index, item)| html! {
                    <div
                        class={classes!("carousel-item", model.is_active(index).then_some("active"))}
                        style={format!("transform: {};", layout.item_transform(index))}
                    >
                        <img src={item.image.clone()} alt={item.caption.clone()} />
                        <p>{ item.caption.clone() }</p>
                    </div>
                }) }
            </div>
            <button type="button" class="carousel-prev" aria-label="Précédent" onclick={on_prev}>{"‹"}</button>
            <button type="button" class="carousel-next" aria-label="Suivant" onclick={on_next}>{"›"}</button>
        </div>
    }
}
