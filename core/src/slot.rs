use serde::{Deserialize, Serialize};

/// Player-visible state of one character of the target word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskSlot {
    Hidden,
    Revealed(char),
}

impl MaskSlot {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn letter(self) -> Option<char> {
        match self {
            Self::Hidden => None,
            Self::Revealed(letter) => Some(letter),
        }
    }
}
