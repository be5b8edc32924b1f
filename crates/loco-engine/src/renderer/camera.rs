/// Horizontal follow camera for a side-scroller.
///
/// `offset_x` is the translation applied to world-space draws: a world x
/// lands on screen at `x + offset_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Current world-to-screen translation on x.
    pub offset_x: f32,
    /// Screen x at which the followed target is kept.
    pub lead: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_x: 0.0,
            lead: 0.0,
        }
    }

    pub fn with_lead(mut self, lead: f32) -> Self {
        self.lead = lead;
        self
    }

    /// Keep the target `lead` units from the left edge of the screen.
    pub fn follow(&mut self, target_x: f32) {
        self.offset_x = -target_x + self.lead;
    }

    /// World x → screen x.
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x + self.offset_x
    }

    /// Whether a world-space span [x, x + w) overlaps the screen.
    pub fn is_span_visible(&self, x: f32, w: f32) -> bool {
        let left = self.to_screen_x(x);
        left + w > 0.0 && left < self.width
    }
}
