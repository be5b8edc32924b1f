/// Logical controls the simulation understands. Mapping physical keys or
/// touch buttons to these lives in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
    Throw,
    Mute,
}

impl Control {
    /// Decode the numeric id used across the host bridge.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Control::MoveLeft),
            1 => Some(Control::MoveRight),
            2 => Some(Control::Jump),
            3 => Some(Control::Throw),
            4 => Some(Control::Mute),
            _ => None,
        }
    }
}

/// Snapshot of the logical controls, the only input the simulation reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub throw: bool,
    pub mute: bool,
}

impl ControlState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::MoveLeft => self.move_left = pressed,
            Control::MoveRight => self.move_right = pressed,
            Control::Jump => self.jump = pressed,
            Control::Throw => self.throw = pressed,
            Control::Mute => self.mute = pressed,
        }
    }

    /// Any gameplay control held (mute does not count as activity).
    pub fn any_action(&self) -> bool {
        self.move_left || self.move_right || self.jump || self.throw
    }
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A control became active.
    Press(Control),
    /// A control was released.
    Release(Control),
    /// Release every control (focus lost, session reset).
    ReleaseAll,
}

/// A queue of input events.
/// The host writes events into the queue; the runner folds them into the
/// control state once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host bridge).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drain the queue into `state`, in arrival order.
    pub fn apply_to(&mut self, state: &mut ControlState) {
        for event in self.drain() {
            match event {
                InputEvent::Press(c) => state.set(c, true),
                InputEvent::Release(c) => state.set(c, false),
                InputEvent::ReleaseAll => {
                    // Mute is a setting, not a held key.
                    *state = ControlState {
                        mute: state.mute,
                        ..ControlState::default()
                    };
                }
            }
        }
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
