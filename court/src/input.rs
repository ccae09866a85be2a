//! Input model: the editing tool and the per-editor session context.
//!
//! `EditorSession` is owned by one editor and handed to the input layer
//! explicitly; there is no ambient "current tool" or "selected player".

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SHOT_TYPE;
use crate::doc::ElementId;

/// Which annotation a click on the court creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Place a player.
    Player,
    /// Select a player, then click the landing spot of a shot.
    Shot,
    /// Select a player, then click where it runs to.
    Movement,
}

impl Tool {
    /// Whether this tool needs a selected player before it can place anything.
    #[must_use]
    pub fn needs_player(self) -> bool {
        matches!(self, Self::Shot | Self::Movement)
    }

    /// Noun used in the "select a player first" notice.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Shot => "shot",
            Self::Movement => "movement",
        }
    }
}

/// Editing context for one editor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    pub tool: Option<Tool>,
    /// Player a pending shot or movement will start from.
    pub selected_player: Option<ElementId>,
    /// Shot type stamped on new shots.
    pub shot_type: String,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self { tool: None, selected_player: None, shot_type: DEFAULT_SHOT_TYPE.to_owned() }
    }
}

impl EditorSession {
    /// Switch tools. Any pending selection is dropped.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = Some(tool);
        self.selected_player = None;
    }

    /// Forget the tool and any selection.
    pub fn reset(&mut self) {
        self.tool = None;
        self.selected_player = None;
    }
}
