pub mod cell;
pub mod inspect;
pub mod logging;
pub mod sample;
