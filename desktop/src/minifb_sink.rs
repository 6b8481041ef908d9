use catmatrix_core::frame::Frame;
use catmatrix_core::sink::FrameSink;
use embedded_graphics::pixelcolor::RgbColor;

/// Simulated LED panel: a minifb window with one scaled block per
/// matrix pixel.
pub struct MinifbSink {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl MinifbSink {
    pub fn new(width: usize, height: usize, scale: minifb::Scale) -> Self {
        let options = minifb::WindowOptions {
            borderless: false,
            title: true,
            resize: false,
            scale,
            ..minifb::WindowOptions::default()
        };
        let mut window = minifb::Window::new("CatMatrix", width, height, options)
            .unwrap_or_else(|e| {
                panic!("Unable to open window: {}", e);
            });
        window.set_target_fps(30);
        MinifbSink {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
    }

    /// Pump window events without redrawing.
    pub fn idle(&mut self) {
        self.window.update();
    }
}

impl FrameSink for MinifbSink {
    fn show(&mut self, frame: &Frame) {
        for (slot, &index) in self.buffer.iter_mut().zip(frame.image.pixels()) {
            let color = frame.palette[usize::from(index)];
            *slot = u32::from(color.r()) << 16 | u32::from(color.g()) << 8 | u32::from(color.b());
        }
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .unwrap();
    }
}
