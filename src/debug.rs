/*
 * Debug Information Module
 *
 * Frame timing shown in the viewer's control panel and debug overlay.
 */

use std::time::Duration;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: usize,
}
