use taurus_funnel::carousel::SLIDES_AUTOPLAY_MS;
use taurus_funnel::modal::OpenerRef;
use taurus_funnel::submission::TicketTier;
use yew::prelude::*;

use crate::components::carousel::{use_autoplay, CarouselAction, CarouselModel};
use crate::context::use_funnel;

#[derive(Clone, PartialEq)]
pub struct ServiceSlide {
    pub title: AttrValue,
    pub description: AttrValue,
    pub image: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct SlideCarouselProps {
    pub slides: Vec<ServiceSlide>,
}

#[function_component(SlideCarousel)]
pub fn slide_carousel(props: &SlideCarouselProps) -> Html {
    let funnel = use_funnel();
    let count = props.slides.len();
    let model = use_reducer(|| CarouselModel::new(count));
    let autoplay = {
        let model = model.clone();
        use_autoplay(
            SLIDES_AUTOPLAY_MS,
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
        move || {
            model.dispatch(action);
            manual.emit(());
        }
    };

    let on_prev = {
        let go = navigate(CarouselAction::Prev);
        Callback::from(move |_: MouseEvent| go())
    };
    let on_next = {
        let go = navigate(CarouselAction::Next);
        Callback::from(move |_: MouseEvent| go())
    };

    let slides = props.slides.iter().enumerate().map(|(index, slide)| {
        let opener = format!("service-discover-{}", index);
        let onclick = {
            let funnel = funnel.clone();
            let opener = opener.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(funnel) = &funnel {
                    funnel.apply.emit((TicketTier::Low, OpenerRef::new(opener.clone())));
                }
            })
        };
        html! {
            <div class={classes!("slide", model.is_active(index).then_some("active"))}>
                <img src={slide.image.clone()} alt={slide.title.clone()} />
                <div class="slide-body">
                    <h3>{ slide.title.clone() }</h3>
                    <p>{ slide.description.clone() }</p>
                    <button type="button" id={opener} class="btn open-service-modal" {onclick}>
                        {"Découvrir"}
                    </button>
                </div>
            </div>
        }
    });

    let indicators = (0..count).map(|index| {
        let onclick = {
            let model = model.clone();
            let manual = autoplay.manual.clone();
            Callback::from(move |_: MouseEvent| {
                model.dispatch(CarouselAction::GoTo(index));
                manual.emit(());
            })
        };
        html! {
            <button
                type="button"
                class={classes!("indicator", model.is_active(index).then_some("active"))}
                aria-label={format!("Slide {}", index + 1)}
                {onclick}
            />
        }
    });

    html! {
        <div class="slide-carousel" onmouseenter={autoplay.on_enter} onmouseleave={autoplay.on_leave}>
            <div class="slides">{ for slides }</div>
            <button type="button" class="slide-prev" aria-label="Précédent" onclick={on_prev}>{"‹"}</button>
            <button type="button" class="slide-next" aria-label="Suivant" onclick={on_next}>{"›"}</button>
            <div class="slide-indicators">{ for indicators }</div>
        </div>
    }
}
