//! C entry points of the dynamic library.
//!
//! The exported surface is `init_capture` / `get_frame` / `get_frame_ptr` /
//! `get_width` / `get_height` / `recreate_capture` / `release`, with a
//! [CaptureContext] pointer as the opaque session handle. Nothing here
//! panics across the boundary: every failure comes back as a null pointer,
//! `false` or zero, and the cause is only visible through [tracing].
//!
//! A handle is valid from a non-null `init_capture` return until the one
//! `release` call; using it after `release`, releasing it twice, or sharing
//! it between threads without external locking is undefined.

use core::ffi::{c_int, c_void};

use tracing::warn;
use windows::Win32::Foundation::HWND;

use crate::capture::Capture;

/// Opaque capture-session handle handed across the C boundary.
pub type CaptureContext = Capture;

/// Create a capture session for `hwnd`.
///
/// Returns null on a null/invalid window or when the OS declines any of
/// the backing surfaces; nothing is leaked on failure. The window stays
/// owned by the caller and must outlive the session.
#[no_mangle]
pub unsafe extern "C" fn init_capture(hwnd: *mut c_void) -> *mut CaptureContext {
    if hwnd.is_null() {
        return core::ptr::null_mut();
    }

    match Capture::new(HWND(hwnd)) {
        Ok(capture) => Box::into_raw(Box::new(capture)),
        Err(e) => {
            warn!("init_capture failed: {e}");
            core::ptr::null_mut()
        }
    }
}

/// Snapshot the window into the session buffer. `false` means "no new
/// frame this cycle"; the buffer keeps whatever it held and the caller
/// may simply try again next cycle.
#[no_mangle]
pub unsafe extern "C" fn get_frame(ctx: *mut CaptureContext) -> bool {
    let Some(ctx) = ctx.as_mut() else {
        return false;
    };

    match ctx.grab_frame() {
        Ok(()) => true,
        Err(e) => {
            warn!("get_frame failed: {e}");
            false
        }
    }
}

/// Pointer to the session's pixel buffer, `get_width() * get_height() * 4`
/// bytes of top-down BGRA. Stable across `get_frame` calls, invalidated
/// by `recreate_capture` and by `release`. Null for a null handle.
#[no_mangle]
pub unsafe extern "C" fn get_frame_ptr(ctx: *const CaptureContext) -> *const u8 {
    match ctx.as_ref() {
        Some(ctx) => ctx.raw_buffer().as_ptr(),
        None => core::ptr::null(),
    }
}

/// Width in pixels of the captured client area, 0 for a null handle.
#[no_mangle]
pub unsafe extern "C" fn get_width(ctx: *const CaptureContext) -> c_int {
    match ctx.as_ref() {
        Some(ctx) => ctx.width(),
        None => 0,
    }
}

/// Height in pixels of the captured client area, 0 for a null handle.
#[no_mangle]
pub unsafe extern "C" fn get_height(ctx: *const CaptureContext) -> c_int {
    match ctx.as_ref() {
        Some(ctx) => ctx.height(),
        None => 0,
    }
}

/// Rebuild the session around the window's current client size. On
/// success the buffer pointer and dimensions must be re-fetched; on
/// failure the session is unchanged and still usable.
#[no_mangle]
pub unsafe extern "C" fn recreate_capture(ctx: *mut CaptureContext) -> bool {
    let Some(ctx) = ctx.as_mut() else {
        return false;
    };

    match ctx.recreate() {
        Ok(()) => true,
        Err(e) => {
            warn!("recreate_capture failed: {e}");
            false
        }
    }
}

/// Release the session and every OS resource behind it, in reverse
/// acquisition order. No-op on null. The handle must not be used again.
#[no_mangle]
pub unsafe extern "C" fn release(ctx: *mut CaptureContext) {
    if ctx.is_null() {
        return;
    }

    drop(Box::from_raw(ctx));
}
