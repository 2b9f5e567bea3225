use std::fmt;

/// Discrete events that can end the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    CloseRequested,
    EscapePressed,
}

impl fmt::Display for LoopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CloseRequested => "window close requested",
            Self::EscapePressed => "escape pressed",
        })
    }
}

/// Main loop lifecycle. `Stopped` is terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    pub fn apply(self, event: LoopEvent) -> Self {
        match self {
            Self::Running => {
                log::info!("Stopping: {event}");
                Self::Stopped
            }
            Self::Stopped => Self::Stopped,
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}
