//! Platform abstraction layer
//!
//! The game core talks to the host only through these types:
//! - Input: a drained list of discrete [`InputEvent`]s per frame
//! - Drawing: a [`Canvas`] that receives back-to-front [`DrawCommand`]s
//! - Sound: a fire-and-forget [`AudioSink`]

use glam::IVec2;

use crate::sim::mask::Mask;
use crate::sim::sprite::SpriteKind;

/// Raw input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / user asked to leave
    Quit,
    /// Mouse click or touch
    PointerDown,
    /// A host timer with the given id fired
    TimerFired(u32),
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Sound effects the core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Jump,
    /// Player crashed
    Crash,
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that drops every request
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// One sprite to draw; `mask` is the exact opaque silhouette
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand<'a> {
    pub kind: SpriteKind,
    /// Window-space pixel position of the mask's top-left corner
    pub top_left: IVec2,
    pub mask: &'a Mask,
}

/// Where the score text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePlacement {
    /// Top of the window during play
    Hud,
    /// Below the restart menu after a crash
    UnderMenu,
}

/// Rendering collaborator
pub trait Canvas {
    fn draw(&mut self, command: &DrawCommand<'_>);
    fn draw_score(&mut self, score: u32, placement: ScorePlacement);
    /// Restart menu overlay
    fn draw_menu(&mut self);
    fn present(&mut self);
}
