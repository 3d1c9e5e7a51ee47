//! Tests for the capture session lifecycle.
//!
//! These create real windows and need an interactive desktop.

#![cfg(windows)]

use gdicapture::{Capture, CaptureError};
use windows::core::w;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, WINDOW_EX_STYLE, WS_POPUP, WS_VISIBLE,
};

/// A borderless popup window, so the client area is exactly the window size.
fn create_test_window(width: i32, height: i32) -> HWND {
    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("STATIC"),
            w!("gdicapture test window"),
            WS_POPUP | WS_VISIBLE,
            0,
            0,
            width,
            height,
            None,
            None,
            None,
            None,
        )
    }
    .unwrap()
}

#[test]
fn create_and_capture_known_size() {
    let hwnd = create_test_window(320, 240);

    let mut capture = Capture::new(hwnd).unwrap();
    assert_eq!(capture.width(), 320);
    assert_eq!(capture.height(), 240);
    assert_eq!(capture.raw_buffer().len(), 320 * 240 * 4);

    let ptr = capture.raw_buffer().as_ptr();
    for _ in 0..3 {
        capture.grab_frame().unwrap();
        assert_eq!(capture.width(), 320);
        assert_eq!(capture.height(), 240);
        assert_eq!(capture.raw_buffer().as_ptr(), ptr);
        assert_eq!(capture.raw_buffer().len(), 320 * 240 * 4);
    }

    drop(capture);
    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn invalid_window_is_rejected() {
    let err = Capture::new(HWND(core::ptr::null_mut())).unwrap_err();
    assert_eq!(err, CaptureError::InvalidWindow);
}

#[test]
fn destroyed_window_is_rejected() {
    let hwnd = create_test_window(64, 64);
    unsafe { DestroyWindow(hwnd).unwrap() };

    let err = Capture::new(hwnd).unwrap_err();
    assert_eq!(err, CaptureError::InvalidWindow);
}

#[test]
fn sessions_are_independent() {
    let hwnd = create_test_window(128, 96);

    let mut first = Capture::new(hwnd).unwrap();
    let mut second = Capture::new(hwnd).unwrap();

    assert_ne!(first.raw_buffer().as_ptr(), second.raw_buffer().as_ptr());
    first.grab_frame().unwrap();
    second.grab_frame().unwrap();

    drop(first);
    second.grab_frame().unwrap();

    drop(second);
    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn recreate_rebuilds_the_session() {
    let hwnd = create_test_window(200, 100);

    let mut capture = Capture::new(hwnd).unwrap();
    capture.grab_frame().unwrap();

    capture.recreate().unwrap();
    assert_eq!(capture.width(), 200);
    assert_eq!(capture.height(), 100);
    assert_eq!(capture.raw_buffer().len(), 200 * 100 * 4);
    capture.grab_frame().unwrap();

    drop(capture);
    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn get_raw_frame_copies_the_buffer() {
    let hwnd = create_test_window(80, 60);

    let mut capture = Capture::new(hwnd).unwrap();
    let raw = capture.get_raw_frame().unwrap();
    assert_eq!(raw.width, 80);
    assert_eq!(raw.height, 60);
    assert_eq!(raw.data.len(), 80 * 60 * 4);
    assert_ne!(raw.data.as_ptr(), capture.raw_buffer().as_ptr());

    drop(capture);
    unsafe { DestroyWindow(hwnd).unwrap() };
}
