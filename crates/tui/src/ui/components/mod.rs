pub mod card;
pub mod hints;
pub mod money;
pub mod tabs;
pub mod text;
pub mod toast;
