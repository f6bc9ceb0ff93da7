//! Rotating displays: index arithmetic, 3D ring layout and the autoplay policy.

/// Autoplay period of the 3D ring on the VIP page.
pub const RING_AUTOPLAY_MS: u32 = 3_500;
/// Autoplay period of the slide carousel on the home page.
pub const SLIDES_AUTOPLAY_MS: u32 = 5_000;
/// Distance of each ring item from the rotation axis, in pixels.
pub const RING_DEPTH_PX: f64 = 350.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// `None` for an empty set of slides; the widget then does nothing.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index % self.len;
        self.current
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current == index
    }
}

/// Item placement of the 3D ring: every item sits at a fixed angle around the X axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    angle_step: f64,
    depth: f64,
}

impl RingLayout {
    pub fn new(item_count: usize, depth: f64) -> Self {
        let angle_step = if item_count == 0 {
            0.0
        } else {
            360.0 / item_count as f64
        };
        Self { angle_step, depth }
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn item_transform(&self, index: usize) -> String {
        format!(
            "rotateX({}deg) translateZ({}px)",
            index as f64 * self.angle_step,
            self.depth
        )
    }

    pub fn rotation(&self, current: usize) -> f64 {
        if current == 0 {
            return 0.0;
        }
        -(current as f64) * self.angle_step
    }

    pub fn ring_transform(&self, current: usize) -> String {
        format!("rotateX({}deg)", self.rotation(current))
    }
}

/// What the owner of the autoplay interval must do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Drop the running interval.
    Stop,
    /// Drop any running interval and start a fresh one.
    Restart,
    Keep,
}

/// Autoplay is suspended while the pointer hovers the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Autoplay {
    hovering: bool,
}

impl Autoplay {
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn pointer_enter(&mut self) -> TimerCommand {
        self.hovering = true;
        TimerCommand::Stop
    }

    pub fn pointer_leave(&mut self) -> TimerCommand {
        self.hovering = false;
        TimerCommand::Restart
    }

    /// Arrows and indicators reset the period, unless autoplay is suspended.
    pub fn manual_navigation(&self) -> TimerCommand {
        if self.hovering {
            TimerCommand::Keep
        } else {
            TimerCommand::Restart
        }
    }
}
