//! Reading and writing UltraTracker (`.ult`) and Imperium Galactica (`.xmf`) music modules
//!
//! Both are tracker formats from the Gravis Ultrasound era. XMF modules can only be read,
//! and converted to ULT with [`convert`](convert::convert()) so they can be opened in
//! regular trackers and players. ULT modules can be read and written.

pub mod convert;
pub mod io;
pub mod text;
pub mod ult;
pub mod voice;
pub mod xmf;

pub use ux::u4;
