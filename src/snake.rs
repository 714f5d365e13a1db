use crate::grid::Position;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

pub struct Snake {
    body: Vec<Position>,
    heading: Direction,
    cell: i32,
}

impl Snake {
    /// A one-segment snake at `start`, heading down.
    pub fn new(start: Position, cell: i32) -> Self {
        Snake { body: vec![start], heading: Down, cell }
    }

    #[cfg(test)]
    pub fn from_segments(body: Vec<Position>, heading: Direction, cell: i32) -> Self {
        assert!(!body.is_empty());
        Snake { body, heading, cell }
    }

    /// Segments, head first.
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    // No guard against reversing into the body.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Adds a segment on top of the current tail. It separates from the
    /// tail on the next `advance`.
    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }

    pub fn advance(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let head = &mut self.body[0];
        match self.heading {
            Up => head.y -= self.cell,
            Down => head.y += self.cell,
            Left => head.x -= self.cell,
            Right => head.x += self.cell,
        }
    }

    /// Whether the head overlaps its own body. The segment right behind the
    /// head (index 1) is never checked.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(2).any(|seg| head.collides(seg, self.cell))
    }

    pub fn head_char(&self) -> char {
        match self.heading() {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: i32 = 40;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn line(len: i32) -> Snake {
        // Horizontal snake heading right, head at the largest x.
        let body = (0..len).map(|i| p((len - i) * SIZE, 200)).collect();
        Snake::from_segments(body, Right, SIZE)
    }

    #[test]
    fn starts_with_one_segment_heading_down() {
        let snake = Snake::new(p(40, 40), SIZE);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), p(40, 40));
        assert_eq!(snake.heading(), Down);
    }

    #[test]
    fn advance_shifts_segments() {
        for len in 1..8 {
            let mut snake = line(len);
            let before = snake.body().to_vec();
            snake.advance();

            assert_eq!(snake.len(), len as usize);
            assert_eq!(snake.head(), p(before[0].x + SIZE, before[0].y));
            for i in 1..snake.len() {
                assert_eq!(snake.body()[i], before[i - 1]);
            }
        }
    }

    #[test]
    fn advance_follows_heading() {
        let mut snake = Snake::new(p(200, 200), SIZE);
        snake.advance();
        assert_eq!(snake.head(), p(200, 240));
        snake.set_heading(Left);
        snake.advance();
        assert_eq!(snake.head(), p(160, 240));
        snake.set_heading(Up);
        snake.advance();
        assert_eq!(snake.head(), p(160, 200));
        snake.set_heading(Right);
        snake.advance();
        assert_eq!(snake.head(), p(200, 200));
    }

    #[test]
    fn grow_keeps_existing_segments() {
        let mut snake = line(3);
        let before = snake.body().to_vec();
        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(&snake.body()[..3], &before[..]);
        assert_eq!(snake.body()[3], before[2]);

        snake.advance();
        assert_eq!(snake.body()[3], before[2]);
        assert_eq!(snake.body()[2], before[1]);
    }

    #[test]
    fn neighbour_segment_is_ignored() {
        let snake = Snake::from_segments(vec![p(80, 40), p(80, 40), p(160, 40)], Left, SIZE);
        assert!(!snake.bites_itself());

        let snake = Snake::from_segments(vec![p(80, 40), p(120, 40), p(80, 40)], Left, SIZE);
        assert!(snake.bites_itself());
    }

    #[test]
    fn reversing_a_short_snake_is_harmless() {
        let mut snake = line(2);
        snake.set_heading(Left);
        snake.advance();
        assert!(!snake.bites_itself());
    }

    #[test]
    fn reversing_a_long_snake_bites() {
        let mut snake = line(4);
        snake.set_heading(Left);
        snake.advance();
        assert!(snake.bites_itself());
    }

    #[test]
    fn fresh_growth_does_not_bite() {
        let mut snake = Snake::new(p(40, 40), SIZE);
        for _ in 0..5 {
            snake.advance();
            snake.grow();
            assert!(!snake.bites_itself());
        }
    }
}
