//! Frame builder implementing the game's [`Canvas`] seam
//!
//! Sprites become vertex batches for [`RenderState`](super::RenderState);
//! score and menu become a [`HudState`] the host mirrors into the DOM.

use super::shapes;
use super::vertex::Vertex;
use crate::platform::{Canvas, DrawCommand, ScorePlacement};

/// Text overlay state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub placement: ScorePlacement,
    pub menu_visible: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            score: 0,
            placement: ScorePlacement::Hud,
            menu_visible: false,
        }
    }
}

/// Collects draw calls until `present`, then exposes the finished frame
#[derive(Debug)]
pub struct SceneCanvas {
    pending: Vec<Vertex>,
    pending_hud: HudState,
    frame: Vec<Vertex>,
    hud: HudState,
    frames_presented: u64,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self {
            pending: shapes::sky().to_vec(),
            pending_hud: HudState::default(),
            frame: Vec::new(),
            hud: HudState::default(),
            frames_presented: 0,
        }
    }

    /// Vertices of the last presented frame, back to front
    pub fn frame(&self) -> &[Vertex] {
        &self.frame
    }

    /// Overlay state of the last presented frame
    pub fn hud(&self) -> HudState {
        self.hud
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Canvas for SceneCanvas {
    fn draw(&mut self, command: &DrawCommand<'_>) {
        let color = shapes::sprite_color(command.kind);
        shapes::mask_runs(&mut self.pending, command.mask, command.top_left, color);
    }

    fn draw_score(&mut self, score: u32, placement: ScorePlacement) {
        self.pending_hud.score = score;
        self.pending_hud.placement = placement;
    }

    fn draw_menu(&mut self) {
        self.pending_hud.menu_visible = true;
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.frame, &mut self.pending);
        self.hud = std::mem::take(&mut self.pending_hud);

        self.pending.clear();
        self.pending.extend_from_slice(&shapes::sky());
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mask::Mask;
    use crate::sim::sprite::SpriteKind;
    use glam::IVec2;

    #[test]
    fn test_present_publishes_frame_and_hud() {
        let mut canvas = SceneCanvas::new();
        let mask = Mask::filled(3, 2);
        canvas.draw(&DrawCommand {
            kind: SpriteKind::Player,
            top_left: IVec2::new(5, 5),
            mask: &mask,
        });
        canvas.draw_score(7, ScorePlacement::UnderMenu);
        canvas.draw_menu();
        assert!(canvas.frame().is_empty());

        canvas.present();

        // Sky plus two row quads
        assert_eq!(canvas.frame().len(), 6 + 12);
        assert_eq!(
            canvas.hud(),
            HudState {
                score: 7,
                placement: ScorePlacement::UnderMenu,
                menu_visible: true,
            }
        );
        assert_eq!(canvas.frames_presented(), 1);
    }

    #[test]
    fn test_menu_does_not_stick_between_frames() {
        let mut canvas = SceneCanvas::new();
        canvas.draw_menu();
        canvas.present();
        canvas.draw_score(1, ScorePlacement::Hud);
        canvas.present();
        assert!(!canvas.hud().menu_visible);
        assert_eq!(canvas.frame().len(), 6);
    }
}
