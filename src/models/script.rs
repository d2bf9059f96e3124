//! Script families recognised by the alphabet classifier

use serde::{Deserialize, Serialize};

/// Script family of a span of text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    #[default]
    Latin,
    Cyrillic,
    Cjk,
    Arabic,
}

impl Script {
    pub fn is_latin(self) -> bool {
        matches!(self, Script::Latin)
    }
}
