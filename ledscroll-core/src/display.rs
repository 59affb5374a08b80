//! Scrolling display
//!
//! [`Display`] owns the virtual [`PixelBuffer`] and maps it onto a
//! fixed-size [`Device`] at render time. For every physical cell
//! `(px, py)`:
//!
//! 1. flip: `sx = width - 1 - px` if mirrored horizontally, else `px`
//!    (same for `sy` with the height)
//! 2. scroll: `vx = sx + scroll_x`, `vy = sy + scroll_y`
//! 3. tiling on: wrap `vx`/`vy` into the buffer with a non-negative modulo,
//!    so the buffer repeats forever in every direction
//! 4. tiling off: anything outside the buffer is 0 and never wraps
//!
//! A buffer narrower or shorter than the panel is zero-padded up to the
//! panel size before wrapping, so a single pixel on a fresh display shows
//! up once rather than filling the whole view. An empty buffer renders as
//! all zeros.
//!
//! The device dimensions are queried on every render.

use crate::buffer::PixelBuffer;
use crate::config::DisplayConfig;
use crate::device::Device;
use crate::error::BufferError;
use crate::frame::Frame;

/// Drawing surface bound to one physical panel
pub struct Display<D> {
    device: D,
    buffer: PixelBuffer,
    scroll_x: i32,
    scroll_y: i32,
    tiling: bool,
    flip_horizontal: bool,
    flip_vertical: bool,
}

impl<D: Device> Display<D> {
    /// Create a display with the default configuration
    pub fn new(device: D) -> Self {
        Self::with_config(device, DisplayConfig::default())
    }

    /// Create a display with explicit options
    pub fn with_config(device: D, config: DisplayConfig) -> Self {
        Self {
            device,
            buffer: PixelBuffer::new(),
            scroll_x: 0,
            scroll_y: 0,
            tiling: config.tiling,
            flip_horizontal: config.flip_horizontal,
            flip_vertical: config.flip_vertical,
        }
    }

    /// Set a single pixel in the virtual buffer
    ///
    /// Fails for negative coordinates and for writes that would grow the
    /// buffer past [`MAX_CELLS`](crate::buffer::MAX_CELLS).
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) -> Result<(), BufferError> {
        self.buffer.set(x, y, value)
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`
    pub fn fill(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        value: u8,
    ) -> Result<(), BufferError> {
        self.buffer.fill(x0, y0, x1, y1, value)
    }

    /// Zero the virtual buffer
    ///
    /// Buffer size, scroll offset, flip and tiling are kept. A blank frame
    /// is staged on the device; it reaches the panel on the next `show`.
    pub fn clear(&mut self) {
        self.buffer.clear();
        let frame = self.render();
        self.device.set_buffer(frame);
    }

    /// Blank the panel directly, bypassing the render pipeline
    ///
    /// The virtual buffer is untouched; the next `show` draws it again.
    pub fn clear_device(&mut self) -> Result<(), D::Error> {
        self.device.clear()
    }

    /// Mirror the output; takes effect on the next `show`
    pub fn set_flip(&mut self, horizontal: bool, vertical: bool) {
        self.flip_horizontal = horizontal;
        self.flip_vertical = vertical;
    }

    /// Current `(horizontal, vertical)` flip flags
    pub fn flip(&self) -> (bool, bool) {
        (self.flip_horizontal, self.flip_vertical)
    }

    /// Set the absolute scroll offset (no clamping)
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Move the scroll offset by a delta
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_x = self.scroll_x.wrapping_add(dx);
        self.scroll_y = self.scroll_y.wrapping_add(dy);
    }

    /// Current scroll offset
    pub fn scroll_offset(&self) -> (i32, i32) {
        (self.scroll_x, self.scroll_y)
    }

    /// Enable or disable tiling
    pub fn set_tiling(&mut self, enabled: bool) {
        self.tiling = enabled;
    }

    /// Whether tiling is enabled
    pub fn tiling(&self) -> bool {
        self.tiling
    }

    /// Forward a global brightness to the device
    pub fn set_brightness(&mut self, brightness: u8) {
        self.device.set_brightness(brightness);
    }

    /// Map the virtual buffer onto a device-sized frame
    pub fn render(&self) -> Frame {
        let width = self.device.width();
        let height = self.device.height();
        let mut frame = Frame::new(width, height);

        if self.buffer.is_empty() {
            return frame;
        }

        // The buffer is treated as zero-padded up to the panel size, so a
        // drawing smaller than the panel is not repeated inside one view
        let period_x = self.buffer.width().max(width) as i64;
        let period_y = self.buffer.height().max(height) as i64;

        for py in 0..height {
            let sy = if self.flip_vertical { height - 1 - py } else { py };
            let Some(vy) = self.resolve(sy, self.scroll_y, period_y) else {
                continue;
            };
            for px in 0..width {
                let sx = if self.flip_horizontal { width - 1 - px } else { px };
                if let Some(vx) = self.resolve(sx, self.scroll_x, period_x) {
                    frame.set(px, py, self.buffer.cell(vx, vy));
                }
            }
        }

        frame
    }

    /// Render and push the result to the device
    ///
    /// Errors from the device's `show` are returned unchanged.
    pub fn show(&mut self) -> Result<(), D::Error> {
        let frame = self.render();
        self.device.set_buffer(frame);

        #[cfg(feature = "defmt")]
        defmt::trace!("show: scroll=({}, {})", self.scroll_x, self.scroll_y);

        self.device.show()
    }

    /// The virtual buffer
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The device, mutably
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Drop the display and give the device back
    pub fn release(self) -> D {
        self.device
    }

    /// Virtual coordinate feeding physical coordinate `s` on one axis
    ///
    /// `None` means the cell is off the buffer and shows 0.
    fn resolve(&self, s: usize, scroll: i32, period: i64) -> Option<usize> {
        // i64 keeps `coordinate + offset` exact for any i32 offset
        let v = s as i64 + scroll as i64;
        if self.tiling {
            Some(v.rem_euclid(period) as usize)
        } else if (0..period).contains(&v) {
            Some(v as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    /// Fake panel that records what it is given
    struct TestDevice {
        width: usize,
        height: usize,
        frame: Option<Frame>,
        log: Vec<&'static str>,
        brightness: u8,
        fail_show: bool,
    }

    impl TestDevice {
        fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                frame: None,
                log: Vec::new(),
                brightness: 255,
                fail_show: false,
            }
        }
    }

    impl Device for TestDevice {
        type Error = BusFault;

        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn set_buffer(&mut self, frame: Frame) {
            self.log.push("set_buffer");
            self.frame = Some(frame);
        }

        fn set_brightness(&mut self, brightness: u8) {
            self.brightness = brightness;
        }

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.log.push("clear");
            Ok(())
        }

        fn show(&mut self) -> Result<(), Self::Error> {
            self.log.push("show");
            if self.fail_show {
                Err(BusFault)
            } else {
                Ok(())
            }
        }
    }

    fn display(config: DisplayConfig) -> Display<TestDevice> {
        Display::with_config(TestDevice::new(3, 3), config)
    }

    fn shown(display: &Display<TestDevice>) -> &Frame {
        display.device().frame.as_ref().unwrap()
    }

    /// The four-pixel pattern used by the tiling and flip tests
    fn draw_diagonal(display: &mut Display<TestDevice>) {
        display.set_pixel(0, 0, 1).unwrap();
        display.set_pixel(1, 1, 2).unwrap();
        display.set_pixel(2, 2, 3).unwrap();
        display.set_pixel(3, 1, 4).unwrap();
    }

    #[test]
    fn test_single_pixel() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(0, 0, 1).unwrap();
        display.show().unwrap();

        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[1, 0, 0], [0, 0, 0], [0, 0, 0]])
        );
    }

    #[test]
    fn test_clear_stages_blank_frame() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(0, 0, 1).unwrap();
        display.show().unwrap();
        display.scroll_to(1, 2);

        display.clear();
        assert_eq!(shown(&display), &Frame::new(3, 3));
        assert_eq!(display.device().log, ["set_buffer", "show", "set_buffer"]);
        // Buffer size and scroll survive a clear
        assert_eq!(display.buffer().width(), 1);
        assert_eq!(display.scroll_offset(), (1, 2));
    }

    #[test]
    fn test_clear_device_fast_path() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(1, 1, 5).unwrap();
        display.clear_device().unwrap();

        assert_eq!(display.device().log, ["clear"]);
        assert_eq!(display.buffer().get(1, 1), 5);
    }

    #[test]
    fn test_fill() {
        let mut display = display(DisplayConfig::default());
        display.fill(1, 1, 3, 3, 1).unwrap();
        display.show().unwrap();

        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 0], [0, 1, 1], [0, 1, 1]])
        );
        assert_eq!(display.buffer().width(), 3);
        assert_eq!(display.buffer().height(), 3);
    }

    #[test]
    fn test_scroll_reveals_grown_pixel() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(3, 3, 1).unwrap();
        display.show().unwrap();
        assert_eq!(shown(&display), &Frame::new(3, 3));

        display.scroll_to(2, 1);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 0], [0, 0, 0], [0, 1, 0]])
        );
    }

    #[test]
    fn test_tiling_wraps_scroll() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);
        assert_eq!(display.buffer().width(), 4);

        display.scroll_to(7, 0);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 1, 0], [4, 0, 2], [0, 0, 0]])
        );
    }

    #[test]
    fn test_narrow_buffer_tiles_at_panel_width() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(0, 0, 1).unwrap();
        display.show().unwrap();
        let base = shown(&display).clone();

        // A 1x1 buffer repeats every 3 columns on a 3-wide panel, not every 1
        display.scroll_to(1, 0);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 1], [0, 0, 0], [0, 0, 0]])
        );

        display.scroll_to(3, 0);
        display.show().unwrap();
        assert_eq!(shown(&display), &base);

        display.scroll_to(-6, 3);
        display.show().unwrap();
        assert_eq!(shown(&display), &base);
    }

    #[test]
    fn test_oversized_write_leaves_display_intact() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(0, 0, 1).unwrap();

        assert!(matches!(
            display.set_pixel(70_000, 70_000, 1),
            Err(BufferError::TooLarge { .. })
        ));
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[1, 0, 0], [0, 0, 0], [0, 0, 0]])
        );
    }

    #[test]
    fn test_tiling_disabled_does_not_wrap() {
        let mut display = display(DisplayConfig::new().with_tiling(false));
        draw_diagonal(&mut display);

        display.scroll_to(7, 0);
        display.show().unwrap();
        assert_eq!(shown(&display), &Frame::new(3, 3));
    }

    #[test]
    fn test_tiling_disabled_partial_overlap() {
        let mut display = display(DisplayConfig::new().with_tiling(false));
        draw_diagonal(&mut display);

        display.scroll_to(2, -1);
        display.show().unwrap();
        // Column 2 of the view is x=4, past the buffer; row 0 is y=-1
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 0], [0, 0, 0], [0, 4, 0]])
        );
    }

    #[test]
    fn test_negative_scroll_tiles() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);

        // -4 is a whole buffer width to the left
        display.scroll_to(-4, -3);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[1, 0, 0], [0, 2, 0], [0, 0, 3]])
        );
    }

    #[test]
    fn test_horizontal_flip() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);

        display.set_flip(true, false);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 1], [0, 2, 0], [3, 0, 0]])
        );
    }

    #[test]
    fn test_both_flips() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);

        display.set_flip(true, true);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[3, 0, 0], [0, 2, 0], [0, 0, 1]])
        );
    }

    #[test]
    fn test_flip_applies_before_scroll() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);

        display.set_flip(true, true);
        display.scroll_to(7, 0);
        display.show().unwrap();
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 0], [2, 0, 4], [0, 1, 0]])
        );
    }

    #[test]
    fn test_flip_from_config() {
        let mut display = display(DisplayConfig::new().with_flip(false, true));
        display.set_pixel(0, 0, 9).unwrap();
        display.show().unwrap();

        assert_eq!(display.flip(), (false, true));
        assert_eq!(
            shown(&display),
            &Frame::from_rows(&[[0, 0, 0], [0, 0, 0], [9, 0, 0]])
        );
    }

    #[test]
    fn test_empty_buffer_renders_zero() {
        let mut display = display(DisplayConfig::default());
        display.scroll_to(-5, 12);
        display.show().unwrap();
        assert_eq!(shown(&display), &Frame::new(3, 3));
    }

    #[test]
    fn test_show_propagates_device_error() {
        let mut display = display(DisplayConfig::default());
        display.device_mut().fail_show = true;
        display.set_pixel(0, 0, 1).unwrap();

        assert_eq!(display.show(), Err(BusFault));
        // The frame was still staged before the failing show
        assert_eq!(display.device().log, ["set_buffer", "show"]);
    }

    #[test]
    fn test_invalid_coordinate_from_display() {
        let mut display = display(DisplayConfig::default());
        assert_eq!(
            display.set_pixel(-1, 2, 1),
            Err(BufferError::InvalidCoordinate { x: -1, y: 2 })
        );
        assert_eq!(
            display.fill(0, -3, 2, 2, 1),
            Err(BufferError::InvalidCoordinate { x: 0, y: -3 })
        );
    }

    #[test]
    fn test_scroll_by_accumulates() {
        let mut display = display(DisplayConfig::default());
        display.scroll_to(1, 1);
        display.scroll_by(2, -3);
        assert_eq!(display.scroll_offset(), (3, -2));
    }

    #[test]
    fn test_extreme_scroll_offsets() {
        let mut display = display(DisplayConfig::default());
        draw_diagonal(&mut display);
        display.scroll_to(i32::MAX, i32::MIN);
        // Must not overflow
        display.show().unwrap();
        assert_eq!(shown(&display).width(), 3);
    }

    #[test]
    fn test_dimensions_read_on_every_render() {
        let mut display = display(DisplayConfig::default());
        display.set_pixel(4, 0, 7).unwrap();
        display.device_mut().width = 5;
        display.device_mut().height = 1;
        display.show().unwrap();

        assert_eq!(shown(&display), &Frame::from_rows(&[[0, 0, 0, 0, 7]]));
    }

    #[test]
    fn test_brightness_passthrough_and_release() {
        let mut display = display(DisplayConfig::default());
        display.set_brightness(32);
        let device = display.release();
        assert_eq!(device.brightness, 32);
        assert!(device.log.is_empty());
    }

    #[test]
    fn test_borrowed_device() {
        let mut device = TestDevice::new(2, 1);
        {
            let mut display = Display::new(&mut device);
            display.set_pixel(1, 0, 3).unwrap();
            display.show().unwrap();
        }
        assert_eq!(device.frame, Some(Frame::from_rows(&[[0, 3]])));
    }

    fn pattern() -> impl Strategy<Value = Vec<(i32, i32, u8)>> {
        prop::collection::vec((0i32..8, 0i32..6, 1u8..=255), 1..24)
    }

    fn drawn(config: DisplayConfig, pixels: &[(i32, i32, u8)]) -> Display<TestDevice> {
        let mut display = Display::with_config(TestDevice::new(5, 4), config);
        for &(x, y, v) in pixels {
            display.set_pixel(x, y, v).unwrap();
        }
        display
    }

    proptest! {
        #[test]
        fn prop_whole_tile_scroll_is_identity(pixels in pattern(), k in 0i32..6, j in -3i32..3) {
            let mut display = drawn(DisplayConfig::default(), &pixels);
            let base = display.render();

            // The buffer is zero-padded to the panel before it tiles, so a
            // tile is max(buffer, panel) on each axis. Scrolling by the
            // plain buffer width is only an identity when the buffer is at
            // least as wide as the 5x4 panel.
            let width = display.buffer().width().max(5) as i32;
            let height = display.buffer().height().max(4) as i32;
            display.scroll_to(k * width, j * height);
            prop_assert_eq!(display.render(), base);
        }

        #[test]
        fn prop_horizontal_flip_mirrors_columns(
            pixels in pattern(),
            sx in -10i32..10,
            sy in -10i32..10,
            tiling in any::<bool>(),
        ) {
            let mut display = drawn(DisplayConfig::new().with_tiling(tiling), &pixels);
            display.scroll_to(sx, sy);
            let plain = display.render();

            display.set_flip(true, false);
            let flipped = display.render();

            let w = plain.width();
            for py in 0..plain.height() {
                for px in 0..w {
                    prop_assert_eq!(flipped.get(px, py), plain.get(w - 1 - px, py));
                }
            }
        }

        #[test]
        fn prop_no_wrap_without_tiling(pixels in pattern(), sx in -20i32..20, sy in -20i32..20) {
            let mut display = drawn(DisplayConfig::new().with_tiling(false), &pixels);
            display.scroll_to(sx, sy);
            let frame = display.render();

            for py in 0..frame.height() {
                for px in 0..frame.width() {
                    let vx = px as i32 + sx;
                    let vy = py as i32 + sy;
                    prop_assert_eq!(frame.get(px, py), display.buffer().get(vx, vy));
                }
            }
        }
    }
}
