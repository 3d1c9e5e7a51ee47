#![cfg_attr(feature = "docs-features", feature(doc_cfg))]

//! # gdicapture
//! `gdicapture` is a library for capturing the pixels of a single window
//! through GDI on Windows. Built as a cdylib it exports the C entry points
//! in [ffi]; as a Rust crate the same session is [Capture].
//!
//! A session is bound to one window for its whole life: create it, snapshot
//! as often as you like (once per frame is the intended cadence), drop it.
//! Every call is synchronous and runs on the calling thread.
//!
//! # Examples
//! ```no_run
//! # use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;
//! let hwnd = unsafe { GetForegroundWindow() };
//! let mut capture = gdicapture::Capture::new(hwnd).unwrap();
//!
//! loop {
//!     match capture.grab_frame() {
//!         Ok(()) => break,
//!         Err(e) => {
//!             if e == gdicapture::CaptureError::PixelTransfer {
//!                 // transient, e.g. the window is minimized.
//!                 continue;
//!             }
//!             panic!("{}", e);
//!         }
//!     }
//! }
//! // top-down BGRA rows, width * height * 4 bytes.
//! let pixels = capture.raw_buffer();
//! ```
//!
//! [Read more with image](`Capture::get_img_frame`)

pub mod capture;
pub mod ffi;
pub mod gdi;

pub use capture::*;
pub use ffi::CaptureContext;
