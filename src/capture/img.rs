use image::{Bgra, DynamicImage, ImageBuffer, RgbaImage};

use super::*;

#[derive(Clone, Debug, Default)]
/// this is container for image.
///
/// [Read more](`Capture::get_img_frame`)
#[cfg_attr(feature = "docs-features", doc(cfg(feature = "img")))]
pub struct ImgFrameData {
    pub width: i32,
    pub height: i32,
    pub data: RgbaImage,
}
impl ImgFrameData {
    pub fn new(width: i32, height: i32, data: RgbaImage) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

impl Capture {
    /// Snapshot the window and convert the BGRA frame to an [RgbaImage]
    /// for the [image] crate.
    ///
    /// Required features: *`"img"`*
    /// # Examples
    /// ```no_run
    /// # use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;
    /// let hwnd = unsafe { GetForegroundWindow() };
    /// let mut capture = gdicapture::Capture::new(hwnd).unwrap();
    ///
    /// let image = capture.get_img_frame().expect("Failed to capture");
    /// let path = "image.png";
    ///
    /// image.data.save(path).expect("Failed to save");
    /// ```
    pub fn get_img_frame(&mut self) -> Result<ImgFrameData, CaptureError> {
        let raw = self.get_raw_frame()?;

        let image: ImageBuffer<Bgra<u8>, _> =
            ImageBuffer::from_raw(raw.width as u32, raw.height as u32, raw.data).unwrap();
        let dynamic_image = DynamicImage::ImageBgra8(image);
        let dynamic_image = dynamic_image.to_rgba8();

        Ok(ImgFrameData::new(raw.width, raw.height, dynamic_image))
    }
}
