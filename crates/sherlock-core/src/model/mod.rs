pub mod bound;
pub mod evidence;
pub mod player;
pub mod round;
pub mod suspect;
