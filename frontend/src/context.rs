use std::rc::Rc;

use taurus_funnel::modal::OpenerRef;
use taurus_funnel::submission::{Submitter, TicketTier};
use taurus_funnel::FunnelConfig;
use yew::prelude::*;

use crate::components::modal::ModalRuntime;
use crate::utils::transport::GlooTransport;

/// A request to show the VIP application modal for one ticket tier.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationRequest {
    pub tier: TicketTier,
    pub opener: OpenerRef,
    /// Bumped on every request so reopening the same tier still resets the form.
    pub seq: u32,
}

#[derive(Clone)]
pub struct FunnelContext {
    pub config: Rc<FunnelConfig>,
    pub submitter: Rc<Submitter<GlooTransport>>,
    pub modals: Rc<ModalRuntime>,
    pub apply: Callback<(TicketTier, OpenerRef)>,
}

impl PartialEq for FunnelContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.submitter, &other.submitter)
            && Rc::ptr_eq(&self.modals, &other.modals)
            && self.apply == other.apply
    }
}

#[hook]
pub fn use_funnel() -> Option<FunnelContext> {
    use_context::<FunnelContext>()
}
