pub mod attachment;
pub mod card_ref;
pub mod trigger;
