//! Floating assistant widget: orb, transcript, composer, suggestions

pub mod composer;
pub mod orb;
pub mod suggestions;
pub mod transcript;
pub mod typing;

pub use composer::{Composer, ComposerResult};
pub use orb::AssistantOrb;
pub use suggestions::SuggestionSurface;
pub use transcript::Transcript;
pub use typing::TypingIndicator;
