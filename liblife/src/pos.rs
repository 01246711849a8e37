#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Offsets the position by a signed delta, `None` when that would leave
    /// the first quadrant.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;

        Some(Self { x, y })
    }
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.x, value.y]
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn offset_rejects_negative_coordinates() {
        let origin = Position { x: 0, y: 0 };

        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Position { x: 1, y: 1 }));
    }
}
