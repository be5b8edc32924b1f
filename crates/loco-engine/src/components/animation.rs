//! Clip player for sprite frame sequences.
//!
//! Each call to `Animator::play` is one animation step: the animator keeps a
//! monotonically increasing counter shared by all clips of the entity and
//! picks `counter % len` for looping clips. Terminal clips (death) run once
//! and then hold their last frame; selecting one latches the animator so no
//! other clip can be played afterwards.

use std::collections::HashMap;

/// A named, ordered sequence of atlas cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// Frame cells as (col, row) pairs in the atlas.
    pub frames: Vec<(f32, f32)>,
    /// Whether to wrap around when reaching the end.
    pub looping: bool,
}

impl Clip {
    /// Create a horizontal strip clip (consecutive columns, same row).
    pub fn horizontal_strip(row: f32, start_col: f32, frame_count: u32) -> Self {
        let frames = (0..frame_count)
            .map(|i| (start_col + i as f32, row))
            .collect();
        Self {
            frames,
            looping: true,
        }
    }

    /// Same strip, but holds its last frame once played through.
    pub fn terminal_strip(row: f32, start_col: f32, frame_count: u32) -> Self {
        Self {
            looping: false,
            ..Self::horizontal_strip(row, start_col, frame_count)
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<(f32, f32)> {
        self.frames.last().copied()
    }
}

/// Animation state for an entity.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    clips: HashMap<String, Clip>,
    current: String,
    counter: u32,
    /// Counter value when the current clip was selected.
    clip_start: u32,
    frame: Option<(f32, f32)>,
    latched: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, name: impl Into<String>, clip: Clip) -> Self {
        self.add(name, clip);
        self
    }

    pub fn add(&mut self, name: impl Into<String>, clip: Clip) {
        self.clips.insert(name.into(), clip);
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Steps played so far across all clips.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Frame cell currently shown, if any clip was played.
    pub fn frame(&self) -> Option<(f32, f32)> {
        self.frame
    }

    /// Whether a terminal clip has been selected.
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Advance one step of `name`. Unknown clips and calls after a terminal
    /// clip latched are ignored (a latched animator keeps its death clip).
    /// Returns the frame shown after the step.
    pub fn play(&mut self, name: &str) -> Option<(f32, f32)> {
        if self.latched && self.current != name {
            return self.frame;
        }
        let Some(clip) = self.clips.get(name) else {
            return self.frame;
        };
        if clip.frames.is_empty() {
            return self.frame;
        }

        if self.current != name {
            self.current = name.to_string();
            self.clip_start = self.counter;
        }

        let index = if clip.looping {
            self.counter as usize % clip.frames.len()
        } else {
            self.latched = true;
            ((self.counter - self.clip_start) as usize).min(clip.frames.len() - 1)
        };
        self.frame = Some(clip.frames[index]);
        self.counter = self.counter.wrapping_add(1);
        self.frame
    }

    /// True when the shared counter has just completed a whole cycle of `name`.
    pub fn completed_cycle(&self, name: &str) -> bool {
        match self.clips.get(name) {
            Some(clip) if !clip.frames.is_empty() => {
                self.current == name
                    && self.counter > 0
                    && self.counter as usize % clip.frames.len() == 0
            }
            _ => false,
        }
    }
}
