//! Draw backend that only counts what a frame would paint.

use kestrel_types::backend::DrawBackend;
use kestrel_types::color::Color;
use kestrel_types::error::Result;

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub fills: usize,
    pub texts: usize,
    pub frames: usize,
}

impl HeadlessBackend {
    pub fn begin_frame(&mut self) {
        self.fills = 0;
        self.texts = 0;
        self.frames += 1;
    }
}

impl DrawBackend for HeadlessBackend {
    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _color: Color) -> Result<()> {
        self.fills += 1;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _font_size: u16,
        _color: Color,
    ) -> Result<()> {
        log::trace!("text '{text}' at ({x}, {y})");
        self.texts += 1;
        Ok(())
    }
}
