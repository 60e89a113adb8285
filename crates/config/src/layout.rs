//! Layout commands: the closed set of placements a window can be snapped to.
//!
//! Commands are written in configuration files and on the command line using
//! kebab-case names such as `left-third` or `bottom-right`.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One quarter of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Upper-left quarter.
    TopLeft,
    /// Upper-right quarter.
    TopRight,
    /// Lower-left quarter.
    BottomLeft,
    /// Lower-right quarter.
    BottomRight,
}

/// Left or right half, full height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    /// Left half.
    Left,
    /// Right half.
    Right,
}

/// One third of the width, full height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Third {
    /// Leftmost third.
    Left,
    /// Middle third.
    Center,
    /// Rightmost third.
    Right,
}

/// Two thirds of the width, anchored left or right, full height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoThirds {
    /// Left two thirds.
    Left,
    /// Right two thirds.
    Right,
}

/// Top or bottom half, full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    /// Upper half.
    Top,
    /// Lower half.
    Bottom,
}

/// Placements that are not a tile of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generic {
    /// A scaled rectangle centered on the screen.
    Center,
    /// The entire screen bounds.
    FullScreen,
}

/// A requested window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LayoutCommand {
    /// Quarter-screen corner placement.
    Corner(Corner),
    /// Horizontal half.
    Half(Half),
    /// Horizontal third.
    Third(Third),
    /// Horizontal two thirds.
    TwoThirds(TwoThirds),
    /// Vertical half.
    Vertical(Vertical),
    /// Center or full screen.
    Generic(Generic),
}

/// Canonical names, in `LayoutCommand::ALL` order.
const NAMES: [(&str, LayoutCommand); 15] = [
    ("top-left", LayoutCommand::Corner(Corner::TopLeft)),
    ("top-right", LayoutCommand::Corner(Corner::TopRight)),
    ("bottom-left", LayoutCommand::Corner(Corner::BottomLeft)),
    ("bottom-right", LayoutCommand::Corner(Corner::BottomRight)),
    ("left-half", LayoutCommand::Half(Half::Left)),
    ("right-half", LayoutCommand::Half(Half::Right)),
    ("left-third", LayoutCommand::Third(Third::Left)),
    ("center-third", LayoutCommand::Third(Third::Center)),
    ("right-third", LayoutCommand::Third(Third::Right)),
    ("left-two-thirds", LayoutCommand::TwoThirds(TwoThirds::Left)),
    ("right-two-thirds", LayoutCommand::TwoThirds(TwoThirds::Right)),
    ("top-half", LayoutCommand::Vertical(Vertical::Top)),
    ("bottom-half", LayoutCommand::Vertical(Vertical::Bottom)),
    ("center", LayoutCommand::Generic(Generic::Center)),
    ("full-screen", LayoutCommand::Generic(Generic::FullScreen)),
];

impl LayoutCommand {
    /// Every command, one per variant.
    pub const ALL: [Self; 15] = [
        Self::Corner(Corner::TopLeft),
        Self::Corner(Corner::TopRight),
        Self::Corner(Corner::BottomLeft),
        Self::Corner(Corner::BottomRight),
        Self::Half(Half::Left),
        Self::Half(Half::Right),
        Self::Third(Third::Left),
        Self::Third(Third::Center),
        Self::Third(Third::Right),
        Self::TwoThirds(TwoThirds::Left),
        Self::TwoThirds(TwoThirds::Right),
        Self::Vertical(Vertical::Top),
        Self::Vertical(Vertical::Bottom),
        Self::Generic(Generic::Center),
        Self::Generic(Generic::FullScreen),
    ];

    /// Canonical kebab-case name of this command.
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }
}

impl Display for LayoutCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let key = match key.as_str() {
            "fullscreen" | "full" | "maximize" => "full-screen",
            other => other,
        };
        NAMES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| {
                let known: Vec<&str> = NAMES.iter().map(|(n, _)| *n).collect();
                Error::validation(format!(
                    "unknown layout command '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for LayoutCommand {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayoutCommand> for String {
    fn from(value: LayoutCommand) -> Self {
        value.name().to_string()
    }
}
