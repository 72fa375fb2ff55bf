mod companion;

pub use companion::*;
