/// Discrete commands bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show or hide the boxes.
    ToggleBoxes,
    /// Show or hide the labels.
    ToggleLabels,
    /// Show or hide the masks.
    ToggleMasks,
    /// Back to zoom 1 without translation.
    ResetView,
    /// Save the current frame.
    Export,
    /// Leave the viewer.
    Quit,
}

impl Command {
    /// Escape key.
    pub const ESCAPE: char = '\u{1b}';

    /// Command bound to a key, `b`, `l`, `m`, `r`, `s` and escape.
    ///
    /// # Example
    ///
    /// ```
    /// use segview_viewer::Command;
    ///
    /// assert_eq!(Command::from_key('m'), Some(Command::ToggleMasks));
    /// assert_eq!(Command::from_key(Command::ESCAPE), Some(Command::Quit));
    /// assert_eq!(Command::from_key('x'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'b' => Some(Self::ToggleBoxes),
            'l' => Some(Self::ToggleLabels),
            'm' => Some(Self::ToggleMasks),
            'r' => Some(Self::ResetView),
            's' => Some(Self::Export),
            Self::ESCAPE => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Input of the viewer loop, positions in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerEvent {
    /// Mouse wheel; a positive delta zooms in.
    Scroll {
        /// Pointer position.
        position: [f32; 2],
        /// Wheel delta.
        delta: f32,
    },
    /// Primary button pressed.
    PointerDown([f32; 2]),
    /// Pointer moved.
    PointerMove([f32; 2]),
    /// Primary button released.
    PointerUp([f32; 2]),
    /// Key command.
    Key(Command),
}

/// What the loop does after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}
