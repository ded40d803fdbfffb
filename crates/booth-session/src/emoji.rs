//! Emoji sets offered for the emoji collage style.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiSet {
    #[default]
    Cute,
    Sweet,
    Party,
    Animals,
}

impl EmojiSet {
    pub const ALL: [EmojiSet; 4] = [EmojiSet::Cute, EmojiSet::Sweet, EmojiSet::Party, EmojiSet::Animals];

    pub fn emojis(self) -> &'static [&'static str] {
        match self {
            EmojiSet::Cute => &["✨", "💖", "🎀", "🌸", "⭐", "🍓", "🦄", "💜", "🌈", "📸"],
            EmojiSet::Sweet => &["🍬", "🍭", "🍩", "🍓", "🧁", "🍒"],
            EmojiSet::Party => &["🎉", "🎈", "🎊", "🥳", "🎵", "✨"],
            EmojiSet::Animals => &["🐶", "🐱", "🐰", "🐻", "🦊", "🐼"],
        }
    }

    /// Owned copy, ready for `CollageOptions::emojis`.
    pub fn to_vec(self) -> Vec<String> {
        self.emojis().iter().map(|e| e.to_string()).collect()
    }
}
