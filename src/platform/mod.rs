use cfg_if::cfg_if;

mod unsupported;
#[cfg(windows)]
pub mod win32;

pub use unsupported::UnsupportedDisplayConfig;

cfg_if! {
    if #[cfg(windows)] {
        /// Display configuration API of the current platform.
        pub type NativeDisplayConfig = win32::Win32DisplayConfig;
    } else {
        /// Display configuration API of the current platform.
        pub type NativeDisplayConfig = UnsupportedDisplayConfig;
    }
}
