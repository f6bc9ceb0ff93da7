use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use taurus_funnel::carousel::{Autoplay, Carousel, TimerCommand};
use yew::prelude::*;

#[derive(Clone, Copy, Debug)]
pub enum CarouselAction {
    Next,
    Prev,
    GoTo(usize),
}

/// Reducer wrapper so interval callbacks never see a stale index.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselModel(pub Option<Carousel>);

impl CarouselModel {
    pub fn new(len: usize) -> Self {
        Self(Carousel::new(len))
    }

    pub fn current(&self) -> usize {
        self.0.map_or(0, |c| c.current())
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.0.map_or(false, |c| c.is_active(index))
    }
}

impl Reducible for CarouselModel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let Some(mut carousel) = self.0 else {
            return self;
        };
        match action {
            CarouselAction::Next => carousel.next(),
            CarouselAction::Prev => carousel.prev(),
            CarouselAction::GoTo(index) => carousel.go_to(index),
        };
        Rc::new(Self(Some(carousel)))
    }
}

pub struct AutoplayHandle {
    pub on_enter: Callback<MouseEvent>,
    pub on_leave: Callback<MouseEvent>,
    /// Call after an arrow or indicator click.
    pub manual: Callback<()>,
}

fn apply(timer: &Rc<RefCell<Option<Interval>>>, period_ms: u32, on_tick: &Callback<()>, command: TimerCommand) {
    match command {
        TimerCommand::Stop => {
            timer.borrow_mut().take();
        }
        TimerCommand::Restart => {
            let on_tick = on_tick.clone();
            *timer.borrow_mut() = Some(Interval::new(period_ms, move || on_tick.emit(())));
        }
        TimerCommand::Keep => {}
    }
}

/// Calls `on_tick` every `period_ms` while mounted, pausing while hovered.
#[hook]
pub fn use_autoplay(period_ms: u32, enabled: bool, on_tick: Callback<()>) -> AutoplayHandle {
    let policy = use_mut_ref(Autoplay::default);
    let timer: Rc<RefCell<Option<Interval>>> = use_mut_ref(|| None);

    {
        let timer = timer.clone();
        let on_tick = on_tick.clone();
        use_effect_with_deps(
            move |enabled| {
                if *enabled {
                    apply(&timer, period_ms, &on_tick, TimerCommand::Restart);
                }
                move || {
                    timer.borrow_mut().take();
                }
            },
            enabled,
        );
    }

    let on_enter = {
        let (policy, timer, on_tick) = (policy.clone(), timer.clone(), on_tick.clone());
        Callback::from(move |_: MouseEvent| {
            let command = policy.borrow_mut().pointer_enter();
            apply(&timer, period_ms, &on_tick, command);
        })
    };
    let on_leave = {
        let (policy, timer, on_tick) = (policy.clone(), timer.clone(), on_tick.clone());
        Callback::from(move |_: MouseEvent| {
            if !enabled {
                return;
            }
            let command = policy.borrow_mut().pointer_leave();
            apply(&timer, period_ms, &on_tick, command);
        })
    };
    let manual = Callback::from(move |_| {
        if !enabled {
            return;
        }
        let command = policy.borrow().manual_navigation();
        apply(&timer, period_ms, &on_tick, command);
    });

    AutoplayHandle {
        on_enter,
        on_leave,
        manual,
    }
}
