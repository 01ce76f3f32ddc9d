/*!
Platform abstraction for the external window-management binding.

Core code only uses the `WindowBinding`/`WindowHandle` traits - never
OS-specific types directly. The Win32 implementation lives behind
`cfg(target_os = "windows")`; tests inject a scriptable fake.
*/

mod traits;

pub use traits::{WindowBinding, WindowHandle};

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use win32::{Win32Binding, Win32Handle};

#[cfg(test)]
pub(crate) mod fake;
