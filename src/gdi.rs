use windows::Win32::{
    Foundation::HWND,
    Graphics::Gdi::{
        CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, ReleaseDC,
        HBITMAP, HDC,
    },
};

/// Device context of a window, acquired with `GetDC`.
///
/// Released back to the window on drop.
pub struct WindowDc {
    hwnd: HWND,
    hdc: HDC,
}
impl WindowDc {
    /// Returns `None` when the OS declines to hand out a context
    /// (destroyed window, resource exhaustion).
    pub fn new(hwnd: HWND) -> Option<Self> {
        let hdc = unsafe { GetDC(Some(hwnd)) };
        if hdc.is_invalid() {
            return None;
        }

        Some(Self { hwnd, hdc })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}
impl Drop for WindowDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(Some(self.hwnd), self.hdc);
        }
    }
}

/// Off-screen memory device context compatible with a window's context.
///
/// Deleted on drop. Whatever bitmap is selected into it must be
/// deselected before the bitmap itself is deleted.
pub struct MemoryDc {
    hdc: HDC,
}
impl MemoryDc {
    pub fn new(window_dc: &WindowDc) -> Option<Self> {
        let hdc = unsafe { CreateCompatibleDC(Some(window_dc.hdc())) };
        if hdc.is_invalid() {
            return None;
        }

        Some(Self { hdc })
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}
impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.hdc);
        }
    }
}

/// Bitmap compatible with a window's context, used as the scratch
/// render target for a snapshot. Deleted on drop.
pub struct GdiBitmap {
    hbitmap: HBITMAP,
}
impl GdiBitmap {
    pub fn new(window_dc: &WindowDc, width: i32, height: i32) -> Option<Self> {
        let hbitmap = unsafe { CreateCompatibleBitmap(window_dc.hdc(), width, height) };
        if hbitmap.is_invalid() {
            return None;
        }

        Some(Self { hbitmap })
    }

    pub fn handle(&self) -> HBITMAP {
        self.hbitmap
    }
}
impl Drop for GdiBitmap {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.hbitmap.into());
        }
    }
}
