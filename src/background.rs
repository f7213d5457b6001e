/// Vertically scrolling, tiled background shared by every scene.
///
/// Two copies are drawn, one at `offset` and one a screen-height below it.
/// The offset only ever lives in (−height, 0].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    offset: i32,
    height: i32,
}

impl Background {
    pub fn new(height: i32) -> Self {
        Background { offset: 0, height }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Scroll up by one unit, wrapping back to 0 once a full screen passed.
    pub fn scroll(&mut self) {
        self.offset -= 1;
        if self.offset <= -self.height {
            self.offset = 0;
        }
    }

    /// Vertical positions of the two tiles.
    pub fn tile_positions(&self) -> [i32; 2] {
        [self.offset, self.offset + self.height]
    }
}
