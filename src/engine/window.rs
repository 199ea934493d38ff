// Window focus and minimize tracking

use log::info;
use winit::event::WindowEvent;

/// What the simulation is allowed to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Focused and visible: integrate normally
    Running,
    /// Visible but unfocused: hold position and velocity exactly
    Frozen,
    /// Minimized: velocity is forced to zero
    Minimized,
}

/// Focus and minimize flags written by window events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStatus {
    focused: bool,
    minimized: bool,
}

impl WindowStatus {
    /// A freshly created window: focused, not minimized
    pub fn new() -> Self {
        Self {
            focused: true,
            minimized: false,
        }
    }

    /// Update the flags from a winit window event
    ///
    /// Occlusion is not minimizing: a covered window keeps its state and is
    /// frozen through focus loss instead.
    pub fn apply_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Focused(focused) => self.set_focused(*focused),
            WindowEvent::Resized(size) => {
                // Some platforms report minimizing only as a collapse to 0x0
                self.set_minimized(size.width == 0 && size.height == 0)
            }
            _ => {}
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            info!("Window {}", if focused { "focused" } else { "lost focus" });
        }
        self.focused = focused;
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        if self.minimized != minimized {
            info!("Window {}", if minimized { "minimized" } else { "restored" });
        }
        self.minimized = minimized;
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Minimized takes precedence over focus
    pub fn activity(&self) -> Activity {
        if self.minimized {
            Activity::Minimized
        } else if self.focused {
            Activity::Running
        } else {
            Activity::Frozen
        }
    }
}

impl Default for WindowStatus {
    fn default() -> Self {
        Self::new()
    }
}
