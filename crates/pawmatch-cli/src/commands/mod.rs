pub mod inspect;
pub mod play;
pub mod tally;
pub mod view;
