//! Viewer commands and their key bindings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Restart,
    StepForward,
    StepBack,
    Faster,
    Slower,
    ToggleLayout,
    CycleQuantity,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub keys: &'static str,
    pub description: &'static str,
    /// Short label for the status bar; `None` keeps the command out of it.
    pub hint: Option<&'static str>,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        keys: "space",
        description: "Pause / resume",
        hint: Some("pause"),
    },
    CommandSpec {
        keys: "r",
        description: "Restart the animation",
        hint: Some("restart"),
    },
    CommandSpec {
        keys: "left/right",
        description: "Step one frame (pauses)",
        hint: None,
    },
    CommandSpec {
        keys: "+/-",
        description: "Faster / slower",
        hint: Some("speed"),
    },
    CommandSpec {
        keys: "l",
        description: "Toggle grid / single layout",
        hint: Some("layout"),
    },
    CommandSpec {
        keys: "tab",
        description: "Next quantity (single layout)",
        hint: None,
    },
    CommandSpec {
        keys: "?",
        description: "Toggle this help",
        hint: Some("help"),
    },
    CommandSpec {
        keys: "q, esc",
        description: "Quit",
        hint: Some("quit"),
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}
