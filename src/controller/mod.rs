// CONTROLLER: frame loop and debug overlay
pub mod frame_loop;
pub mod hud;

pub use frame_loop::{FpsCounter, FrameInput, FrameLoop, FrameOutput, RAYCAST_DISTANCE};
pub use hud::{DebugOverlay, HudData};
