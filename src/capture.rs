use tracing::debug;
use windows::Win32::{
    Foundation::{HWND, RECT},
    Graphics::Gdi::{
        BitBlt, GetDIBits, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CAPTUREBLT,
        DIB_RGB_COLORS, HGDIOBJ, ROP_CODE, SRCCOPY,
    },
    UI::WindowsAndMessaging::{GetClientRect, IsWindow},
};

use crate::gdi::{GdiBitmap, MemoryDc, WindowDc};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CaptureError {
    // null handle, or the window no longer exists.
    #[error("Window handle is not a live window.")]
    InvalidWindow,

    #[error("Could not query the window client area.")]
    ClientArea,

    // zero-sized client area, nothing to capture.
    #[error("Window client area is empty.")]
    EmptyClientArea,

    #[error("No device context for the window.")]
    NoWindowDc,

    #[error("No compatible memory device context.")]
    NoMemoryDc,

    #[error("No compatible bitmap.")]
    NoBitmap,

    #[error("Screen copy into the off-screen surface failed: {0:?}")]
    ScreenCopy(windows::core::HRESULT),

    #[error("Pixel transfer out of the off-screen surface failed.")]
    PixelTransfer,
}

/// One frame copied out of a [Capture] session.
#[derive(Clone, Debug, Default)]
pub struct RawFrameData {
    pub width: i32,
    pub height: i32,
    /// Tightly packed top-down BGRA rows, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// A capture session bound to a single window for its whole lifetime.
///
/// The client-area size is queried once at creation and never re-queried:
/// if the window is resized afterwards, snapshots keep using the stale
/// dimensions (possibly clipped or misaligned) until [Capture::recreate]
/// is called. The pixel buffer is allocated once and never moves, so its
/// address may be cached across [Capture::grab_frame] calls.
///
/// The session holds raw OS handles and is therefore neither [Send] nor
/// [Sync]; a single session must stay on one thread. Independent sessions
/// over different windows may live on different threads.
pub struct Capture {
    pixels: Vec<u8>,
    info: BITMAPINFO,
    bitmap: GdiBitmap,
    mem_dc: MemoryDc,
    window_dc: WindowDc,
    prev_bitmap: HGDIOBJ,
    width: i32,
    height: i32,
}
impl Capture {
    /// Create a session for `hwnd`, sized to its current client area.
    ///
    /// The window is borrowed, never owned: the caller keeps it alive for
    /// at least as long as the session. Acquisition order is window
    /// context, then memory context, then bitmap; any failure releases
    /// exactly what was already acquired, in reverse.
    pub fn new(hwnd: HWND) -> Result<Self, CaptureError> {
        if hwnd.is_invalid() || !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
            return Err(CaptureError::InvalidWindow);
        }

        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd, &mut rect) }.map_err(|_| CaptureError::ClientArea)?;

        let width = rect.right - rect.left;
        let height = rect.bottom - rect.top;
        if width <= 0 || height <= 0 {
            return Err(CaptureError::EmptyClientArea);
        }

        let window_dc = WindowDc::new(hwnd).ok_or(CaptureError::NoWindowDc)?;
        let mem_dc = MemoryDc::new(&window_dc).ok_or(CaptureError::NoMemoryDc)?;
        let bitmap = GdiBitmap::new(&window_dc, width, height).ok_or(CaptureError::NoBitmap)?;

        // Selection happens only after every acquisition succeeded, so no
        // failure path leaves the bitmap selected.
        let prev_bitmap = unsafe { SelectObject(mem_dc.hdc(), bitmap.handle().into()) };

        let mut info = BITMAPINFO::default();
        info.bmiHeader.biSize = core::mem::size_of::<BITMAPINFOHEADER>() as u32;
        info.bmiHeader.biWidth = width;
        info.bmiHeader.biHeight = -height; // negative height selects top-down rows
        info.bmiHeader.biPlanes = 1;
        info.bmiHeader.biBitCount = 32;
        info.bmiHeader.biCompression = BI_RGB.0;

        let pixels = vec![0u8; (width as usize) * (height as usize) * 4];

        debug!("capture session created, {width}x{height}");

        Ok(Self {
            pixels,
            info,
            bitmap,
            mem_dc,
            window_dc,
            prev_bitmap,
            width,
            height,
        })
    }

    /// Take one synchronous snapshot of the window into the session buffer.
    ///
    /// Blocks for the duration of the copy; no retry, no partial update.
    /// On failure the buffer's prior contents are unspecified. Treat a
    /// failure as transient (window minimized, resized, closed) and try
    /// again on the next cycle.
    pub fn grab_frame(&mut self) -> Result<(), CaptureError> {
        unsafe {
            BitBlt(
                self.mem_dc.hdc(),
                0,
                0,
                self.width,
                self.height,
                Some(self.window_dc.hdc()),
                0,
                0,
                ROP_CODE(SRCCOPY.0 | CAPTUREBLT.0),
            )
        }
        .map_err(|e| CaptureError::ScreenCopy(e.code()))?;

        let lines = unsafe {
            GetDIBits(
                self.mem_dc.hdc(),
                self.bitmap.handle(),
                0,
                self.height as u32,
                Some(self.pixels.as_mut_ptr().cast()),
                &mut self.info,
                DIB_RGB_COLORS,
            )
        };
        if lines == 0 {
            return Err(CaptureError::PixelTransfer);
        }

        Ok(())
    }

    /// Snapshot the window and copy the frame out as [RawFrameData].
    pub fn get_raw_frame(&mut self) -> Result<RawFrameData, CaptureError> {
        self.grab_frame()?;

        Ok(RawFrameData {
            width: self.width,
            height: self.height,
            data: self.pixels.clone(),
        })
    }

    /// Re-query the client area and rebuild the surfaces and buffer.
    ///
    /// This is the only way a session picks up a window resize; it is
    /// never done implicitly. The buffer moves, so any cached pointer is
    /// invalid afterwards. On failure the session is left as it was.
    pub fn recreate(&mut self) -> Result<(), CaptureError> {
        let next = Self::new(self.window_dc.hwnd())?;
        *self = next;

        Ok(())
    }

    pub fn hwnd(&self) -> HWND {
        self.window_dc.hwnd()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The most recently captured frame: top-down BGRA rows, no padding,
    /// exactly `width * height * 4` bytes. Zeroed until the first
    /// successful [Capture::grab_frame].
    pub fn raw_buffer(&self) -> &[u8] {
        &self.pixels
    }
}
impl Drop for Capture {
    fn drop(&mut self) {
        // The bitmap must not be selected when it is deleted; restore the
        // stock object first, then field order tears down bitmap, memory
        // context and window context in reverse acquisition order.
        unsafe {
            SelectObject(self.mem_dc.hdc(), self.prev_bitmap);
        }
    }
}

#[cfg(feature = "img")]
pub mod img;
#[cfg(feature = "img")]
#[cfg_attr(feature = "docs-features", doc(cfg(feature = "img")))]
pub use img::ImgFrameData;
