//! The six recognized transforms, one file each.

pub mod expander;
pub mod flipper;
pub mod logger;
pub mod rotator;
pub mod typewriter;
pub mod uppercaser;

pub use expander::Expander;
pub use flipper::Flipper;
pub use logger::Logger;
pub use rotator::Rotator;
pub use typewriter::Typewriter;
pub use uppercaser::Uppercaser;
